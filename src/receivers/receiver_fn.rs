//! # Closure-backed receivers (`FnReceiver`, `AsyncFnReceiver`)
//!
//! [`FnReceiver`] wraps `F: Fn(&M) -> Result<(), ReceiveError>`;
//! [`AsyncFnReceiver`] wraps `F: Fn(M) -> Fut` and produces a fresh future per
//! message, handing it an owned clone of the message.
//!
//! They back [`Messenger::on`](crate::Messenger::on) and
//! [`Messenger::on_async`](crate::Messenger::on_async), and can also be
//! registered directly.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use picomessenger::{FnReceiver, Receive, ReceiveError};
//!
//! let r: Arc<FnReceiver<String, _>> = FnReceiver::arc(|m: &String| {
//!     assert_eq!(m, "hi");
//!     Ok::<_, ReceiveError>(())
//! });
//! assert!(r.receive(&"hi".to_string()).is_ok());
//! ```

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use super::receive::{Message, Receive, ReceiveAsync};
use crate::error::ReceiveError;

/// Synchronous receiver backed by a closure.
pub struct FnReceiver<M, F> {
    f: F,
    _message: PhantomData<fn(&M)>,
}

impl<M, F> FnReceiver<M, F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _message: PhantomData,
        }
    }

    /// Wraps `f` and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<M, F> Receive<M> for FnReceiver<M, F>
where
    M: Message,
    F: Fn(&M) -> Result<(), ReceiveError> + Send + Sync + 'static,
{
    fn receive(&self, message: &M) -> Result<(), ReceiveError> {
        (self.f)(message)
    }
}

/// Asynchronous receiver backed by a closure returning a future.
pub struct AsyncFnReceiver<M, F> {
    f: F,
    _message: PhantomData<fn(M)>,
}

impl<M, F> AsyncFnReceiver<M, F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _message: PhantomData,
        }
    }

    /// Wraps `f` and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<M, F, Fut> ReceiveAsync<M> for AsyncFnReceiver<M, F>
where
    M: Message + Clone,
    F: Fn(M) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ReceiveError>> + Send + 'static,
{
    async fn receive_async(&self, message: &M) -> Result<(), ReceiveError> {
        (self.f)(message.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fn_receiver_forwards_result() {
        let ok: FnReceiver<u8, _> = FnReceiver::new(|_: &u8| Ok::<(), ReceiveError>(()));
        assert!(ok.receive(&1u8).is_ok());

        let failing: FnReceiver<u8, _> =
            FnReceiver::new(|_: &u8| Err::<(), _>(ReceiveError::fail("nope")));
        assert_eq!(failing.receive(&1u8), Err(ReceiveError::fail("nope")));
    }

    #[tokio::test]
    async fn test_async_fn_receiver_gets_owned_copy() {
        let seen = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&seen);
        let r: AsyncFnReceiver<usize, _> = AsyncFnReceiver::new(move |m: usize| {
            let s = Arc::clone(&s);
            async move {
                s.fetch_add(m, Ordering::SeqCst);
                Ok::<(), ReceiveError>(())
            }
        });

        r.receive_async(&5usize).await.unwrap();
        r.receive_async(&2usize).await.unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }
}
