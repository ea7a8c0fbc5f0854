//! # Messenger: registration and concurrent fan-out.
//!
//! [`Messenger`] owns the registered receivers and delivers each published
//! message to every live receiver of the message's exact type.
//!
//! ## Publish flow
//! ```text
//! publish(message: M)
//!   ├─► snapshot = receivers.load()            (copy-on-write, never blocks registrars)
//!   ├─► targets  = snapshot.filter(message_type == M && is_alive)
//!   ├─► join_all(targets.map(deliver))         (all attempted, concurrently, in this task)
//!   └─► first Err in registration order, or Ok(())
//! ```
//!
//! ## Rules
//! - Every target is attempted, whatever happens to its siblings.
//! - No lock is held while a subscriber runs.
//! - A publish does not see receivers registered after it took its snapshot.
//! - Failure selection: when several receivers fail, the error of the one
//!   registered first is returned; the others are only counted in the log.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, trace, warn};

use super::registration::Registration;
use super::registry::ReceiverSet;
use crate::error::{DeliveryError, ReceiveError, RegisterError};
use crate::receivers::{
    Capability, Message, MessageType, Receive, ReceiveAsync, Subscriber, SubscriberId,
    SubscriberRef,
};
use crate::wrappers::{ConfigurableFactory, PlainFactory, ReceiverWrapperFactory, WrappedReceiver};

/// In-process publish/subscribe dispatcher.
///
/// Cloning is cheap; clones share the same receivers and default factory.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use picomessenger::{Messenger, Receive, ReceiveError};
///
/// struct Greeter;
///
/// impl Receive<String> for Greeter {
///     fn receive(&self, name: &String) -> Result<(), ReceiveError> {
///         println!("hello, {name}");
///         Ok(())
///     }
/// }
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let messenger = Messenger::new();
///     let greeter = Arc::new(Greeter);
///
///     messenger.register::<String, _>(&greeter)?;
///     messenger.publish(String::from("world")).await?;
///
///     messenger.unregister::<String, _>(&greeter);
///     assert!(messenger.is_empty());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Messenger {
    receivers: Arc<ReceiverSet>,
    default_factory: Arc<dyn ReceiverWrapperFactory>,
}

impl Messenger {
    /// Messenger using [`PlainFactory`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(PlainFactory)
    }

    /// Messenger using `factory` for registrations without an explicit factory.
    #[must_use]
    pub fn with_factory(factory: impl ReceiverWrapperFactory) -> Self {
        Self {
            receivers: Arc::new(ReceiverSet::new()),
            default_factory: Arc::new(factory),
        }
    }

    /// Messenger without special features; same as [`Messenger::new`].
    #[must_use]
    pub fn simple() -> Self {
        Self::new()
    }

    /// Messenger holding its subscribers through weak references.
    #[must_use]
    pub fn weak() -> Self {
        Self::with_factory(ConfigurableFactory::weak())
    }

    /// Number of registered receivers, including disabled and dropped-weak ones.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.receivers.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered_count() == 0
    }

    // ---------------------------
    // Registration
    // ---------------------------

    /// Registers `subscriber` as a synchronous receiver of `M`.
    ///
    /// # Errors
    /// Propagates the default factory's [`RegisterError`].
    pub fn register<M, S>(&self, subscriber: &Arc<S>) -> Result<(), RegisterError>
    where
        M: Message,
        S: Receive<M>,
    {
        self.register_with::<M, S>(subscriber, self.default_factory.as_ref())
    }

    /// Registers `subscriber` as a synchronous receiver of `M`, wrapped by `factory`.
    ///
    /// # Errors
    /// Propagates `factory`'s [`RegisterError`].
    pub fn register_with<M, S>(
        &self,
        subscriber: &Arc<S>,
        factory: &dyn ReceiverWrapperFactory,
    ) -> Result<(), RegisterError>
    where
        M: Message,
        S: Receive<M>,
    {
        self.register_capability(
            &SubscriberRef::new(subscriber),
            &Capability::of_sync::<M, S>(),
            factory,
        )
    }

    /// Registers `subscriber` as an asynchronous receiver of `M`.
    ///
    /// # Errors
    /// Propagates the default factory's [`RegisterError`].
    pub fn register_async<M, S>(&self, subscriber: &Arc<S>) -> Result<(), RegisterError>
    where
        M: Message,
        S: ReceiveAsync<M>,
    {
        self.register_async_with::<M, S>(subscriber, self.default_factory.as_ref())
    }

    /// Registers `subscriber` as an asynchronous receiver of `M`, wrapped by `factory`.
    ///
    /// # Errors
    /// Propagates `factory`'s [`RegisterError`].
    pub fn register_async_with<M, S>(
        &self,
        subscriber: &Arc<S>,
        factory: &dyn ReceiverWrapperFactory,
    ) -> Result<(), RegisterError>
    where
        M: Message,
        S: ReceiveAsync<M>,
    {
        self.register_capability(
            &SubscriberRef::new(subscriber),
            &Capability::of_async::<M, S>(),
            factory,
        )
    }

    /// Wraps one (subscriber, capability) pair with `factory` and adds it.
    ///
    /// # Errors
    /// Propagates `factory`'s [`RegisterError`]; nothing is added on error.
    pub fn register_capability(
        &self,
        subscriber: &SubscriberRef,
        capability: &Capability,
        factory: &dyn ReceiverWrapperFactory,
    ) -> Result<(), RegisterError> {
        let wrapped = factory.create_wrapped_receiver(subscriber, capability)?;
        self.receivers.extend(&[wrapped]);
        debug!(
            subscriber = subscriber.type_name(),
            message_type = %capability.message_type(),
            shape = %capability.shape(),
            registered = self.registered_count(),
            "receiver registered"
        );
        Ok(())
    }

    /// Registers every capability `S` declares through [`Subscriber`].
    ///
    /// Returns the number of receivers added.
    ///
    /// # Errors
    /// Propagates the default factory's [`RegisterError`]; nothing is added on error.
    pub fn register_all<S: Subscriber>(&self, subscriber: &Arc<S>) -> Result<usize, RegisterError> {
        self.register_all_with(subscriber, self.default_factory.as_ref())
    }

    /// Registers every capability `S` declares, wrapped by `factory`.
    ///
    /// # Errors
    /// Propagates `factory`'s [`RegisterError`]; nothing is added on error.
    pub fn register_all_with<S: Subscriber>(
        &self,
        subscriber: &Arc<S>,
        factory: &dyn ReceiverWrapperFactory,
    ) -> Result<usize, RegisterError> {
        let subscriber = SubscriberRef::new(subscriber);
        let wrapped = S::declared_capabilities()
            .iter()
            .map(|capability| factory.create_wrapped_receiver(&subscriber, capability))
            .collect::<Result<Vec<_>, _>>()?;

        self.receivers.extend(&wrapped);
        debug!(
            subscriber = subscriber.type_name(),
            added = wrapped.len(),
            registered = self.registered_count(),
            "subscriber registered"
        );
        Ok(wrapped.len())
    }

    /// Removes the receivers of `M` registered for this `subscriber` instance.
    ///
    /// Both the sync and async registrations of `M` are removed. Returns the
    /// number removed; zero is not an error.
    pub fn unregister<M, S>(&self, subscriber: &Arc<S>) -> usize
    where
        M: Message,
        S: ?Sized,
    {
        let id = SubscriberId::of(subscriber);
        let message_type = MessageType::of::<M>();
        let removed = self.receivers.remove_where(|r| {
            r.message_type() == message_type && r.subscriber_id() == Some(id)
        });
        debug!(%message_type, removed, "receiver unregistered");
        removed
    }

    /// Removes every receiver registered for this `subscriber` instance.
    ///
    /// Returns the number removed; zero is not an error.
    pub fn unregister_all<S: ?Sized>(&self, subscriber: &Arc<S>) -> usize {
        let id = SubscriberId::of(subscriber);
        let removed = self
            .receivers
            .remove_where(|r| r.subscriber_id() == Some(id));
        debug!(removed, "subscriber unregistered");
        removed
    }

    /// Removes receivers whose weakly held subscriber has been dropped.
    ///
    /// Disabled receivers are kept. Returns the number removed.
    pub fn purge_collected(&self) -> usize {
        let removed = self.receivers.remove_where(|r| r.subscriber_id().is_none());
        debug!(removed, "collected receivers purged");
        removed
    }

    // ---------------------------
    // Delegate registration
    // ---------------------------

    /// Registers a closure as a synchronous receiver of `M`.
    ///
    /// The returned [`Registration`] keeps the closure registered until it is
    /// dropped; chain [`Registration::and`] to add more closures to it.
    ///
    /// # Errors
    /// Propagates the default factory's [`RegisterError`].
    pub fn on<M, F>(&self, f: F) -> Result<Registration, RegisterError>
    where
        M: Message,
        F: Fn(&M) -> Result<(), ReceiveError> + Send + Sync + 'static,
    {
        Registration::new(self.clone()).and(f)
    }

    /// Registers a closure as an asynchronous receiver of `M`.
    ///
    /// # Errors
    /// Propagates the default factory's [`RegisterError`].
    pub fn on_async<M, F, Fut>(&self, f: F) -> Result<Registration, RegisterError>
    where
        M: Message + Clone,
        F: Fn(M) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ReceiveError>> + Send + 'static,
    {
        Registration::new(self.clone()).and_async(f)
    }

    // ---------------------------
    // Publish
    // ---------------------------

    /// Delivers `message` to every live receiver registered for exactly `M`.
    ///
    /// Completes once every delivery has finished.
    ///
    /// # Errors
    /// If at least one receiver failed, returns the error of the failing
    /// receiver that was registered first. Delivery was still attempted for
    /// all receivers.
    pub async fn publish<M: Message>(&self, message: M) -> Result<(), DeliveryError> {
        let message_type = MessageType::of::<M>();
        let snapshot = self.receivers.snapshot();
        let targets: Vec<&Arc<dyn WrappedReceiver>> = snapshot
            .iter()
            .filter(|r| r.message_type() == message_type && r.is_alive())
            .collect();

        trace!(%message_type, targets = targets.len(), "publishing");

        let message = &message;
        let results = join_all(targets.iter().map(|r| r.deliver(message))).await;

        let mut failures = results.into_iter().filter_map(Result::err);
        let Some(first) = failures.next() else {
            return Ok(());
        };
        let failed = 1 + failures.count();
        warn!(
            %message_type,
            failed,
            attempted = targets.len(),
            label = first.as_label(),
            err = %first,
            "publish failed"
        );
        Err(first)
    }
}

impl Default for Messenger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Messenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messenger")
            .field("registered", &self.registered_count())
            .finish()
    }
}
