//! # Plain wrappers: strong ownership, failures surface to the publisher.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use super::adapter::Adapter;
use super::factory::ReceiverWrapperFactory;
use super::hold::Hold;
use super::wrapped::{ReceiverInfo, WrappedReceiver};
use crate::error::{DeliveryError, RegisterError};
use crate::receivers::{Capability, MessageType, SubscriberId, SubscriberRef};

/// Default factory: strong ownership, no logging, never disables.
///
/// Every delivery failure is returned to the publisher.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainFactory;

impl ReceiverWrapperFactory for PlainFactory {
    fn create_wrapped_receiver(
        &self,
        subscriber: &SubscriberRef,
        capability: &Capability,
    ) -> Result<Arc<dyn WrappedReceiver>, RegisterError> {
        capability.check(subscriber)?;
        Ok(Arc::new(PlainReceiver {
            adapter: Adapter::new(subscriber, capability, Hold::strong(subscriber)),
        }))
    }
}

struct PlainReceiver {
    adapter: Adapter,
}

#[async_trait]
impl WrappedReceiver for PlainReceiver {
    fn message_type(&self) -> MessageType {
        self.adapter.info().message_type
    }

    fn is_alive(&self) -> bool {
        self.adapter.is_alive()
    }

    fn wrapped_object(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.adapter.wrapped_object()
    }

    fn subscriber_id(&self) -> Option<SubscriberId> {
        self.adapter.subscriber_id()
    }

    fn info(&self) -> ReceiverInfo {
        self.adapter.info()
    }

    async fn deliver(
        &self,
        message: &(dyn Any + Send + Sync + 'static),
    ) -> Result<(), DeliveryError> {
        self.adapter.call(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::error::ReceiveError;
    use crate::receivers::{Receive, Shape};

    #[derive(Default)]
    struct Counter {
        calls: AtomicUsize,
    }

    impl Receive<String> for Counter {
        fn receive(&self, _message: &String) -> Result<(), ReceiveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ReceiveError::fail("always"))
        }
    }

    struct Stranger;

    #[tokio::test]
    async fn test_plain_receiver_surfaces_every_failure() {
        let counter = Arc::new(Counter::default());
        let wrapped = PlainFactory
            .create_wrapped_receiver(
                &SubscriberRef::new(&counter),
                &Capability::of_sync::<String, Counter>(),
            )
            .unwrap();

        assert!(wrapped.is_alive());
        assert_eq!(wrapped.message_type(), MessageType::of::<String>());
        assert_eq!(wrapped.info().shape, Shape::Sync);
        assert_eq!(wrapped.subscriber_id(), Some(SubscriberId::of(&counter)));

        let message = String::from("x");
        assert!(wrapped.deliver(&message).await.is_err());
        assert!(wrapped.deliver(&message).await.is_err());
        assert!(wrapped.is_alive());
        assert_eq!(counter.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_plain_factory_rejects_mismatched_subscriber() {
        let result = PlainFactory.create_wrapped_receiver(
            &SubscriberRef::new(&Arc::new(Stranger)),
            &Capability::of_sync::<String, Counter>(),
        );
        assert!(matches!(result, Err(RegisterError::CapabilityMismatch { .. })));
    }
}
