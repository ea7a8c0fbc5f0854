//! # Capability descriptors.
//!
//! A [`Capability`] names one way a subscriber type can receive messages:
//! its [`Shape`] (sync or async), the message type, and the concrete subscriber
//! type it was declared for. The set of shapes is closed, and each descriptor
//! carries the monomorphized call that knows how to reach the subscriber
//! through a type-erased handle.
//!
//! ```text
//! Capability::of_sync::<M, S>()  ──► Invoke::Sync(invoke_sync::<M, S>)
//! Capability::of_async::<M, S>() ──► Invoke::Async(invoke_async::<M, S>)
//!                                        │
//!                   factory picks the wrapper around it (plain / configurable)
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::receive::{Message, MessageType, Receive, ReceiveAsync};
use crate::error::{ReceiveError, RegisterError};

/// Type-erased subscriber or message.
pub(crate) type Erased = dyn Any + Send + Sync;

type IsInstance = fn(&Erased) -> bool;
type SyncInvoke = fn(&Erased, &Erased) -> Option<Result<(), ReceiveError>>;
type AsyncInvoke =
    for<'a> fn(Arc<Erased>, &'a Erased) -> Option<BoxFuture<'a, Result<(), ReceiveError>>>;

/// Monomorphized entry point into a subscriber.
///
/// Both variants return `None` when the erased subscriber or message is not of
/// the type the capability was declared for.
#[derive(Clone, Copy)]
pub(crate) enum Invoke {
    Sync(SyncInvoke),
    Async(AsyncInvoke),
}

fn is_instance<S: Any>(subscriber: &Erased) -> bool {
    subscriber.is::<S>()
}

fn invoke_sync<M, S>(subscriber: &Erased, message: &Erased) -> Option<Result<(), ReceiveError>>
where
    M: Message,
    S: Receive<M>,
{
    let subscriber = subscriber.downcast_ref::<S>()?;
    let message = message.downcast_ref::<M>()?;
    Some(subscriber.receive(message))
}

fn invoke_async<'a, M, S>(
    subscriber: Arc<Erased>,
    message: &'a Erased,
) -> Option<BoxFuture<'a, Result<(), ReceiveError>>>
where
    M: Message,
    S: ReceiveAsync<M>,
{
    let subscriber = subscriber.downcast::<S>().ok()?;
    let message = message.downcast_ref::<M>()?;
    Some(Box::pin(
        async move { subscriber.receive_async(message).await },
    ))
}

/// The two recognized capability shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// [`Receive<M>`](crate::Receive).
    Sync,
    /// [`ReceiveAsync<M>`](crate::ReceiveAsync).
    Async,
}

impl Shape {
    /// Short label: `"sync"` or `"async"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Sync => "sync",
            Shape::Async => "async",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared (shape, message type) capability of a subscriber type.
#[derive(Clone, Copy)]
pub struct Capability {
    message_type: MessageType,
    is_instance: IsInstance,
    subscriber_name: &'static str,
    invoke: Invoke,
}

impl Capability {
    /// Declares that `S` receives `M` synchronously.
    pub fn of_sync<M, S>() -> Self
    where
        M: Message,
        S: Receive<M>,
    {
        Self {
            message_type: MessageType::of::<M>(),
            is_instance: is_instance::<S>,
            subscriber_name: type_name::<S>(),
            invoke: Invoke::Sync(invoke_sync::<M, S>),
        }
    }

    /// Declares that `S` receives `M` asynchronously.
    pub fn of_async<M, S>() -> Self
    where
        M: Message,
        S: ReceiveAsync<M>,
    {
        Self {
            message_type: MessageType::of::<M>(),
            is_instance: is_instance::<S>,
            subscriber_name: type_name::<S>(),
            invoke: Invoke::Async(invoke_async::<M, S>),
        }
    }

    /// Sync or async.
    pub fn shape(&self) -> Shape {
        match self.invoke {
            Invoke::Sync(_) => Shape::Sync,
            Invoke::Async(_) => Shape::Async,
        }
    }

    /// Message type handled by this capability.
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    /// Type name of the subscriber this capability was declared for.
    pub fn subscriber_name(&self) -> &'static str {
        self.subscriber_name
    }

    /// Checks that `subscriber` is an instance of the declared subscriber type.
    ///
    /// # Errors
    /// [`RegisterError::CapabilityMismatch`] when the concrete types differ.
    pub fn check(&self, subscriber: &SubscriberRef) -> Result<(), RegisterError> {
        if (self.is_instance)(subscriber.object().as_ref()) {
            Ok(())
        } else {
            Err(RegisterError::CapabilityMismatch {
                shape: self.shape().as_str(),
                message_type: self.message_type,
                declared: self.subscriber_name,
                actual: subscriber.type_name(),
            })
        }
    }

    pub(crate) fn invoke(&self) -> Invoke {
        self.invoke
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("shape", &self.shape())
            .field("message_type", &self.message_type)
            .field("subscriber", &self.subscriber_name)
            .finish()
    }
}

/// Identity of a subscriber instance: the address of its `Arc` allocation.
///
/// Two ids are equal iff they were taken from clones of the same `Arc`
/// (while that allocation is alive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

impl SubscriberId {
    /// Identity of the value behind `subscriber`.
    pub fn of<S: ?Sized>(subscriber: &Arc<S>) -> Self {
        Self::from_ptr(Arc::as_ptr(subscriber) as *const ())
    }

    pub(crate) fn from_ptr(ptr: *const ()) -> Self {
        Self(ptr as usize)
    }
}

/// Type-erased, strongly held subscriber handed to a wrapper factory.
#[derive(Clone)]
pub struct SubscriberRef {
    object: Arc<Erased>,
    type_name: &'static str,
}

impl SubscriberRef {
    /// Erases `subscriber`, remembering its type name.
    pub fn new<S: Send + Sync + 'static>(subscriber: &Arc<S>) -> Self {
        let object: Arc<Erased> = subscriber.clone();
        Self {
            object,
            type_name: type_name::<S>(),
        }
    }

    /// Identity of the referenced subscriber.
    pub fn id(&self) -> SubscriberId {
        SubscriberId::of(&self.object)
    }

    /// Type name of the referenced subscriber.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The erased subscriber.
    pub fn object(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.object
    }
}

impl fmt::Debug for SubscriberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRef")
            .field("id", &self.id())
            .field("type", &self.type_name)
            .finish()
    }
}

/// Collects the capabilities of `S` for [`Subscriber::capabilities`].
///
/// Every method is bounded on the matching trait, so a type can only declare
/// what it actually implements.
pub struct Capabilities<S> {
    list: Vec<Capability>,
    _subscriber: PhantomData<fn() -> S>,
}

impl<S: Send + Sync + 'static> Capabilities<S> {
    pub(crate) fn new() -> Self {
        Self {
            list: Vec::new(),
            _subscriber: PhantomData,
        }
    }

    /// Declares `Receive<M>`.
    pub fn receive<M: Message>(&mut self) -> &mut Self
    where
        S: Receive<M>,
    {
        self.list.push(Capability::of_sync::<M, S>());
        self
    }

    /// Declares `ReceiveAsync<M>`.
    pub fn receive_async<M: Message>(&mut self) -> &mut Self
    where
        S: ReceiveAsync<M>,
    {
        self.list.push(Capability::of_async::<M, S>());
        self
    }

    pub(crate) fn into_vec(self) -> Vec<Capability> {
        self.list
    }
}

/// A type that can list all of its receiver capabilities.
///
/// Used by [`Messenger::register_all`](crate::Messenger::register_all), which
/// registers one wrapped receiver per declared capability.
pub trait Subscriber: Send + Sync + Sized + 'static {
    /// Declares each `Receive<M>` / `ReceiveAsync<M>` implemented by `Self`.
    fn capabilities(caps: &mut Capabilities<Self>);

    /// Returns the declared capabilities.
    fn declared_capabilities() -> Vec<Capability> {
        let mut caps = Capabilities::new();
        Self::capabilities(&mut caps);
        caps.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Both;

    impl Receive<String> for Both {
        fn receive(&self, _message: &String) -> Result<(), ReceiveError> {
            Ok(())
        }
    }

    #[async_trait]
    impl ReceiveAsync<u32> for Both {
        async fn receive_async(&self, _message: &u32) -> Result<(), ReceiveError> {
            Ok(())
        }
    }

    impl Subscriber for Both {
        fn capabilities(caps: &mut Capabilities<Self>) {
            caps.receive::<String>().receive_async::<u32>();
        }
    }

    struct Other;

    #[test]
    fn test_declared_capabilities_lists_each_shape() {
        let caps = Both::declared_capabilities();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0].shape(), Shape::Sync);
        assert_eq!(caps[0].message_type(), MessageType::of::<String>());
        assert_eq!(caps[1].shape(), Shape::Async);
        assert_eq!(caps[1].message_type(), MessageType::of::<u32>());
    }

    #[test]
    fn test_check_accepts_declared_subscriber_type() {
        let subscriber = SubscriberRef::new(&Arc::new(Both));
        assert!(Capability::of_sync::<String, Both>().check(&subscriber).is_ok());
    }

    #[test]
    fn test_check_rejects_other_subscriber_type() {
        let subscriber = SubscriberRef::new(&Arc::new(Other));
        let err = Capability::of_async::<u32, Both>()
            .check(&subscriber)
            .unwrap_err();
        assert_eq!(err.as_label(), "register_capability_mismatch");
    }

    #[test]
    fn test_subscriber_id_tracks_allocation() {
        let a = Arc::new(Both);
        let b = Arc::new(Both);
        assert_eq!(SubscriberId::of(&a), SubscriberId::of(&a.clone()));
        assert_ne!(SubscriberId::of(&a), SubscriberId::of(&b));
        assert_eq!(SubscriberRef::new(&a).id(), SubscriberId::of(&a));
    }
}
