//! # Wrapper factory trait.

use std::sync::Arc;

use super::wrapped::WrappedReceiver;
use crate::error::RegisterError;
use crate::receivers::{Capability, SubscriberRef};

/// Builds the [`WrappedReceiver`] for one (subscriber, capability) pair.
///
/// A [`Messenger`](crate::Messenger) owns a default factory; every
/// registration call has a `_with` variant that overrides it.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use picomessenger::{
///     Capability, PlainFactory, ReceiverWrapperFactory, RegisterError, SubscriberRef,
///     WrappedReceiver,
/// };
///
/// /// Wraps like `PlainFactory` and counts what it hands out.
/// #[derive(Default)]
/// struct Counting(AtomicUsize);
///
/// impl ReceiverWrapperFactory for Counting {
///     fn create_wrapped_receiver(
///         &self,
///         subscriber: &SubscriberRef,
///         capability: &Capability,
///     ) -> Result<Arc<dyn WrappedReceiver>, RegisterError> {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         PlainFactory.create_wrapped_receiver(subscriber, capability)
///     }
/// }
/// ```
pub trait ReceiverWrapperFactory: Send + Sync + 'static {
    /// Wraps `subscriber` for `capability`.
    ///
    /// # Errors
    /// [`RegisterError::CapabilityMismatch`] if `subscriber` is not an instance of
    /// the type `capability` was declared for.
    fn create_wrapped_receiver(
        &self,
        subscriber: &SubscriberRef,
        capability: &Capability,
    ) -> Result<Arc<dyn WrappedReceiver>, RegisterError>;
}

impl<F: ReceiverWrapperFactory + ?Sized> ReceiverWrapperFactory for Arc<F> {
    fn create_wrapped_receiver(
        &self,
        subscriber: &SubscriberRef,
        capability: &Capability,
    ) -> Result<Arc<dyn WrappedReceiver>, RegisterError> {
        (**self).create_wrapped_receiver(subscriber, capability)
    }
}
