//! # Capability adapter with panic isolation.
//!
//! [`Adapter`] is the shared core of every wrapper: it resolves the subscriber
//! through its [`Hold`], calls it through the capability's [`Invoke`] and folds
//! every way the call can go wrong into a [`DeliveryError`].
//!
//! ```text
//! call(message)
//!   ├─ hold.target() == None          ─► Ok(())   (weak subscriber dropped)
//!   ├─ Invoke::Sync(f)  ─► catch_unwind(f(subscriber, message))
//!   └─ Invoke::Async(f) ─► catch_unwind(f(subscriber, message)) ─► future.catch_unwind().await
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;

use super::hold::Hold;
use super::wrapped::ReceiverInfo;
use crate::error::{DeliveryError, ReceiveError};
use crate::receivers::{Capability, Erased, Invoke, SubscriberId, SubscriberRef};

pub(crate) struct Adapter {
    hold: Hold,
    invoke: Invoke,
    info: ReceiverInfo,
}

impl Adapter {
    pub(crate) fn new(subscriber: &SubscriberRef, capability: &Capability, hold: Hold) -> Self {
        Self {
            hold,
            invoke: capability.invoke(),
            info: ReceiverInfo {
                subscriber: subscriber.id(),
                subscriber_type: subscriber.type_name(),
                message_type: capability.message_type(),
                shape: capability.shape(),
            },
        }
    }

    pub(crate) fn info(&self) -> ReceiverInfo {
        self.info
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.hold.is_alive()
    }

    pub(crate) fn wrapped_object(&self) -> Option<Arc<Erased>> {
        self.hold.target()
    }

    pub(crate) fn subscriber_id(&self) -> Option<SubscriberId> {
        self.hold.id()
    }

    /// Invokes the subscriber once.
    pub(crate) async fn call(&self, message: &Erased) -> Result<(), DeliveryError> {
        let Some(target) = self.hold.target() else {
            return Ok(());
        };

        match self.invoke {
            Invoke::Sync(invoke) => {
                match panic::catch_unwind(AssertUnwindSafe(|| invoke(target.as_ref(), message))) {
                    Ok(Some(result)) => result.map_err(|e| self.failed(e)),
                    Ok(None) => Err(self.mismatch()),
                    Err(payload) => Err(self.panicked(payload.as_ref())),
                }
            }
            Invoke::Async(invoke) => {
                let fut = match panic::catch_unwind(AssertUnwindSafe(|| invoke(target, message))) {
                    Ok(Some(fut)) => fut,
                    Ok(None) => return Err(self.mismatch()),
                    Err(payload) => return Err(self.panicked(payload.as_ref())),
                };
                match AssertUnwindSafe(fut).catch_unwind().await {
                    Ok(result) => result.map_err(|e| self.failed(e)),
                    Err(payload) => Err(self.panicked(payload.as_ref())),
                }
            }
        }
    }

    fn failed(&self, source: ReceiveError) -> DeliveryError {
        DeliveryError::Failed {
            subscriber: self.info.subscriber_type,
            message_type: self.info.message_type,
            source,
        }
    }

    fn panicked(&self, payload: &(dyn Any + Send)) -> DeliveryError {
        DeliveryError::Panicked {
            subscriber: self.info.subscriber_type,
            message_type: self.info.message_type,
            info: panic_info(payload),
        }
    }

    fn mismatch(&self) -> DeliveryError {
        DeliveryError::TypeMismatch {
            subscriber: self.info.subscriber_type,
            expected: self.info.message_type,
        }
    }
}

/// Renders a panic payload; `panic!` produces `&str` or `String`.
fn panic_info(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::receivers::{Receive, ReceiveAsync};

    #[derive(Default)]
    struct Probe {
        calls: AtomicUsize,
    }

    impl Receive<u32> for Probe {
        fn receive(&self, message: &u32) -> Result<(), ReceiveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match *message {
                0 => Err(ReceiveError::fail("zero")),
                1 => panic!("sync boom"),
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ReceiveAsync<u32> for Probe {
        async fn receive_async(&self, message: &u32) -> Result<(), ReceiveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            match *message {
                0 => Err(ReceiveError::fail("zero")),
                1 => panic!("async boom"),
                _ => Ok(()),
            }
        }
    }

    fn adapter(probe: &Arc<Probe>, capability: Capability, weak: bool) -> Adapter {
        let subscriber = SubscriberRef::new(probe);
        let hold = if weak {
            Hold::weak(&subscriber)
        } else {
            Hold::strong(&subscriber)
        };
        Adapter::new(&subscriber, &capability, hold)
    }

    #[tokio::test]
    async fn test_sync_error_and_panic_become_delivery_errors() {
        let probe = Arc::new(Probe::default());
        let a = adapter(&probe, Capability::of_sync::<u32, Probe>(), false);

        assert!(a.call(&7u32).await.is_ok());
        assert_eq!(a.call(&0u32).await.unwrap_err().as_label(), "delivery_failed");

        let err = a.call(&1u32).await.unwrap_err();
        assert_eq!(err.as_label(), "delivery_panicked");
        assert_eq!(err.as_message(), "panic: sync boom");
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_async_error_and_panic_become_delivery_errors() {
        let probe = Arc::new(Probe::default());
        let a = adapter(&probe, Capability::of_async::<u32, Probe>(), false);

        assert!(a.call(&7u32).await.is_ok());
        assert_eq!(
            a.call(&0u32).await.unwrap_err().receive_error(),
            Some(&ReceiveError::fail("zero"))
        );
        assert_eq!(a.call(&1u32).await.unwrap_err().as_message(), "panic: async boom");
    }

    #[tokio::test]
    async fn test_wrong_message_type_is_reported() {
        let probe = Arc::new(Probe::default());
        let a = adapter(&probe, Capability::of_sync::<u32, Probe>(), false);

        let err = a.call(&"text").await.unwrap_err();
        assert_eq!(err.as_label(), "delivery_type_mismatch");
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_weak_subscriber_is_noop() {
        let probe = Arc::new(Probe::default());
        let a = adapter(&probe, Capability::of_async::<u32, Probe>(), true);
        drop(probe);

        assert!(!a.is_alive());
        assert!(a.wrapped_object().is_none());
        assert!(a.call(&0u32).await.is_ok());
    }
}
