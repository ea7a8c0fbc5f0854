//! # Delivery logger trait.

use crate::error::DeliveryError;
use crate::wrappers::ReceiverInfo;

/// Sink for delivery diagnostics.
///
/// Called inline from the delivering future: keep implementations cheap and
/// non-blocking. A panicking sink is caught and logged; it never changes the
/// delivery outcome.
///
/// # Example
/// ```
/// use picomessenger::{DeliveryError, DeliveryLogger, ReceiverInfo};
///
/// struct Stderr;
///
/// impl DeliveryLogger for Stderr {
///     fn report_exception(&self, error: &DeliveryError, receiver: &ReceiverInfo) {
///         eprintln!("[failed] {} err={error}", receiver.subscriber_type);
///     }
///     fn report_message_blocked(&self, receiver: &ReceiverInfo) {
///         eprintln!("[blocked] {}", receiver.subscriber_type);
///     }
///     fn report_disabling(&self, receiver: &ReceiverInfo) {
///         eprintln!("[disabled] {}", receiver.subscriber_type);
///     }
///     fn name(&self) -> &'static str { "stderr" }
/// }
/// ```
pub trait DeliveryLogger: Send + Sync + 'static {
    /// A subscriber failed while handling a message.
    fn report_exception(&self, error: &DeliveryError, receiver: &ReceiverInfo);

    /// A message was not delivered because the receiver is disabled.
    fn report_message_blocked(&self, receiver: &ReceiverInfo);

    /// The receiver has just been disabled after a failure.
    fn report_disabling(&self, receiver: &ReceiverInfo);

    /// Returns the logger name used in diagnostics.
    ///
    /// The default uses `type_name::<Self>()`.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Logger that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLogger;

impl DeliveryLogger for NullLogger {
    fn report_exception(&self, _error: &DeliveryError, _receiver: &ReceiverInfo) {}

    fn report_message_blocked(&self, _receiver: &ReceiverInfo) {}

    fn report_disabling(&self, _receiver: &ReceiverInfo) {}

    fn name(&self) -> &'static str {
        "null"
    }
}
