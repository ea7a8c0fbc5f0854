//! # Wrapped receiver contract.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::receivers::{MessageType, Shape, SubscriberId};

/// Static description of a wrapped receiver, handed to loggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceiverInfo {
    /// Identity of the subscriber instance.
    pub subscriber: SubscriberId,
    /// Type name of the subscriber.
    pub subscriber_type: &'static str,
    /// Message type this receiver handles.
    pub message_type: MessageType,
    /// Capability shape used for delivery.
    pub shape: Shape,
}

/// # Uniform adapter around one subscriber capability.
///
/// ### Implementation requirements
/// - `deliver` must not panic: failures of the subscriber, whether returned,
///   raised before the future exists or raised while it is polled, are
///   reported as `Err` from the future.
/// - `is_alive` is evaluated on every call; it turns `false` when a weakly
///   held subscriber is dropped or when the receiver disabled itself.
/// - `subscriber_id` must not upgrade a weak handle.
#[async_trait]
pub trait WrappedReceiver: Send + Sync + 'static {
    /// Message type handled by this receiver. Fixed at construction.
    fn message_type(&self) -> MessageType;

    /// Whether the receiver is still eligible for delivery.
    fn is_alive(&self) -> bool;

    /// The wrapped subscriber, or `None` if it was held weakly and has been dropped.
    ///
    /// The returned `Arc` keeps the subscriber alive while it is held.
    fn wrapped_object(&self) -> Option<Arc<dyn Any + Send + Sync>>;

    /// Identity of the wrapped subscriber, or `None` if it has been dropped.
    fn subscriber_id(&self) -> Option<SubscriberId>;

    /// Describes this receiver for logs.
    fn info(&self) -> ReceiverInfo;

    /// Delivers one message.
    ///
    /// `message` must be of [`Self::message_type`]; anything else yields
    /// [`DeliveryError::TypeMismatch`].
    async fn deliver(
        &self,
        message: &(dyn Any + Send + Sync + 'static),
    ) -> Result<(), DeliveryError>;
}
