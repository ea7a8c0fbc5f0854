//! # Legacy disable-on-error factory.
//!
//! Kept for callers that predate [`ConfigurableFactory`](super::ConfigurableFactory):
//! strong ownership, always disables after the first failure, no logging hook.
//! New code should use `WrapperFactoryBuilder::new().disable_on_error()`.

use std::sync::Arc;

use super::adapter::Adapter;
use super::configurable::ConfigurableReceiver;
use super::factory::ReceiverWrapperFactory;
use super::hold::Hold;
use super::wrapped::WrappedReceiver;
use crate::error::RegisterError;
use crate::loggers::NullLogger;
use crate::receivers::{Capability, SubscriberRef};

/// Strong ownership, disable after first failure, failures are not reported anywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisableOnErrorFactory;

impl ReceiverWrapperFactory for DisableOnErrorFactory {
    fn create_wrapped_receiver(
        &self,
        subscriber: &SubscriberRef,
        capability: &Capability,
    ) -> Result<Arc<dyn WrappedReceiver>, RegisterError> {
        capability.check(subscriber)?;
        Ok(Arc::new(ConfigurableReceiver::new(
            Adapter::new(subscriber, capability, Hold::strong(subscriber)),
            true,
            Arc::new(NullLogger),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::ReceiveError;
    use crate::receivers::Receive;

    #[derive(Default)]
    struct Panicky {
        calls: AtomicUsize,
    }

    impl Receive<u16> for Panicky {
        fn receive(&self, _message: &u16) -> Result<(), ReceiveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            panic!("always");
        }
    }

    #[tokio::test]
    async fn test_first_panic_disables_receiver() {
        let panicky = Arc::new(Panicky::default());
        let wrapped = DisableOnErrorFactory
            .create_wrapped_receiver(
                &SubscriberRef::new(&panicky),
                &Capability::of_sync::<u16, Panicky>(),
            )
            .unwrap();

        assert!(wrapped.deliver(&3u16).await.is_ok());
        assert!(wrapped.deliver(&3u16).await.is_ok());
        assert!(!wrapped.is_alive());
        assert_eq!(panicky.calls.load(Ordering::SeqCst), 1);
    }
}
