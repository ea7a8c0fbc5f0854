//! # TracingLogger: delivery events as `tracing` records
//!
//! ## Example output (fmt subscriber)
//! ```text
//! ERROR picomessenger::delivery: receiver failed subscriber=app::Audit message_type=app::Ping label="delivery_failed" err=...
//!  WARN picomessenger::delivery: receiver disabled subscriber=app::Audit message_type=app::Ping
//!  INFO picomessenger::delivery: message blocked to disabled receiver subscriber=app::Audit message_type=app::Ping
//! ```

use tracing::{error, info, warn};

use super::logger::DeliveryLogger;
use crate::error::DeliveryError;
use crate::wrappers::ReceiverInfo;

/// Delivery logger backed by `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Construct a new [`TracingLogger`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DeliveryLogger for TracingLogger {
    fn report_exception(&self, err: &DeliveryError, receiver: &ReceiverInfo) {
        error!(
            target: "picomessenger::delivery",
            subscriber = receiver.subscriber_type,
            message_type = %receiver.message_type,
            shape = %receiver.shape,
            label = err.as_label(),
            err = %err.as_message(),
            "receiver failed"
        );
    }

    fn report_message_blocked(&self, receiver: &ReceiverInfo) {
        info!(
            target: "picomessenger::delivery",
            subscriber = receiver.subscriber_type,
            message_type = %receiver.message_type,
            "message blocked to disabled receiver"
        );
    }

    fn report_disabling(&self, receiver: &ReceiverInfo) {
        warn!(
            target: "picomessenger::delivery",
            subscriber = receiver.subscriber_type,
            message_type = %receiver.message_type,
            "receiver disabled"
        );
    }

    fn name(&self) -> &'static str {
        "tracing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReceiveError;
    use crate::receivers::{MessageType, Shape, SubscriberId};
    use tracing_subscriber::EnvFilter;

    #[test]
    fn test_reports_under_fmt_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("picomessenger=trace"))
            .with_test_writer()
            .finish();

        let info = ReceiverInfo {
            subscriber: SubscriberId::from_ptr(std::ptr::null()),
            subscriber_type: "app::Audit",
            message_type: MessageType::of::<u32>(),
            shape: Shape::Sync,
        };
        let err = DeliveryError::Failed {
            subscriber: "app::Audit",
            message_type: MessageType::of::<u32>(),
            source: ReceiveError::fail("boom"),
        };

        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingLogger::new();
            logger.report_exception(&err, &info);
            logger.report_disabling(&info);
            logger.report_message_blocked(&info);
            assert_eq!(logger.name(), "tracing");
        });
    }
}
