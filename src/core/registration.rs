//! # Closure registrations that unregister on drop.
//!
//! [`Registration`] is returned by [`Messenger::on`](super::Messenger::on) and
//! [`Messenger::on_async`](super::Messenger::on_async). It owns the closure
//! receivers it created; dropping it (or calling [`Registration::release`])
//! unregisters all of them from the messenger.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::messenger::Messenger;
use crate::error::{ReceiveError, RegisterError};
use crate::receivers::{AsyncFnReceiver, FnReceiver, Message};

/// Guard over closure receivers registered on a [`Messenger`].
///
/// # Example
/// ```rust
/// use picomessenger::{Messenger, ReceiveError};
///
/// let messenger = Messenger::new();
/// let registration = messenger
///     .on(|n: &u32| { println!("u32: {n}"); Ok::<_, ReceiveError>(()) })?
///     .and(|s: &String| { println!("string: {s}"); Ok::<_, ReceiveError>(()) })?;
/// assert_eq!(messenger.registered_count(), 2);
///
/// drop(registration);
/// assert!(messenger.is_empty());
/// # Ok::<(), picomessenger::RegisterError>(())
/// ```
#[must_use = "dropping a Registration unregisters its closures"]
pub struct Registration {
    messenger: Messenger,
    receivers: Vec<Arc<dyn Any + Send + Sync>>,
}

impl Registration {
    pub(crate) fn new(messenger: Messenger) -> Self {
        Self {
            messenger,
            receivers: Vec::new(),
        }
    }

    /// Adds a synchronous closure receiver of `M` to this registration.
    ///
    /// # Errors
    /// Propagates the messenger's [`RegisterError`]; the closures registered
    /// so far are unregistered when the consumed guard drops.
    pub fn and<M, F>(mut self, f: F) -> Result<Self, RegisterError>
    where
        M: Message,
        F: Fn(&M) -> Result<(), ReceiveError> + Send + Sync + 'static,
    {
        let receiver = FnReceiver::<M, F>::arc(f);
        self.messenger.register::<M, _>(&receiver)?;
        self.receivers.push(receiver);
        Ok(self)
    }

    /// Adds an asynchronous closure receiver of `M` to this registration.
    ///
    /// # Errors
    /// Propagates the messenger's [`RegisterError`].
    pub fn and_async<M, F, Fut>(mut self, f: F) -> Result<Self, RegisterError>
    where
        M: Message + Clone,
        F: Fn(M) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ReceiveError>> + Send + 'static,
    {
        let receiver = AsyncFnReceiver::<M, F>::arc(f);
        self.messenger.register_async::<M, _>(&receiver)?;
        self.receivers.push(receiver);
        Ok(self)
    }

    /// Number of closures held by this registration.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    /// True if no closure was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Unregisters every closure now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        for receiver in self.receivers.drain(..) {
            self.messenger.unregister_all(&receiver);
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("closures", &self.receivers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_closures_receive_until_dropped() {
        let messenger = Messenger::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        let registration = messenger
            .on(move |n: &u32| {
                h.fetch_add(*n as usize, Ordering::SeqCst);
                Ok::<(), ReceiveError>(())
            })
            .unwrap();

        messenger.publish(3u32).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        drop(registration);
        assert!(messenger.is_empty());

        messenger.publish(3u32).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_chained_closures_release_together() {
        let messenger = Messenger::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h1 = Arc::clone(&hits);
        let h2 = Arc::clone(&hits);
        let registration = messenger
            .on(move |_: &String| {
                h1.fetch_add(1, Ordering::SeqCst);
                Ok::<(), ReceiveError>(())
            })
            .unwrap()
            .and_async(move |_: u64| {
                let h = Arc::clone(&h2);
                async move {
                    h.fetch_add(10, Ordering::SeqCst);
                    Ok::<(), ReceiveError>(())
                }
            })
            .unwrap();

        assert_eq!(registration.len(), 2);
        assert_eq!(messenger.registered_count(), 2);

        messenger.publish(String::from("x")).await.unwrap();
        messenger.publish(7u64).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 11);

        registration.release();
        assert!(messenger.is_empty());
    }

    #[tokio::test]
    async fn test_closure_failure_surfaces() {
        let messenger = Messenger::new();
        let _registration = messenger
            .on(|_: &u8| Err::<(), _>(ReceiveError::fail("closed")))
            .unwrap();

        let err = messenger.publish(1u8).await.unwrap_err();
        assert_eq!(err.receive_error(), Some(&ReceiveError::fail("closed")));
    }

    #[test]
    fn test_registration_survives_on_weak_messenger() {
        let messenger = Messenger::weak();
        let registration = messenger.on(|_: &u8| Ok::<(), ReceiveError>(())).unwrap();

        // The guard owns the closure, so the weak wrapper stays alive.
        assert_eq!(messenger.registered_count(), 1);
        drop(registration);
        assert!(messenger.is_empty());
    }
}
