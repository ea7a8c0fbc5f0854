//! # Receiver traits and message identity.
//!
//! A subscriber handles a message type `M` by implementing [`Receive<M>`]
//! (synchronous) or [`ReceiveAsync<M>`] (asynchronous). One type may implement
//! both traits, for as many message types as it likes.
//!
//! Dispatch is by exact type: [`MessageType`] compares `TypeId`s, so a receiver
//! of `Box<dyn Any>` never sees a `String` and vice versa.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::error::ReceiveError;

/// Marker for values that can be published.
///
/// Implemented for every `Send + Sync + 'static` type.
pub trait Message: Any + Send + Sync {}

impl<T: Any + Send + Sync> Message for T {}

/// Runtime identity of a message type.
///
/// Equality and hashing use the `TypeId` only; the name is kept for logs.
#[derive(Clone, Copy)]
pub struct MessageType {
    id: TypeId,
    name: &'static str,
}

impl MessageType {
    /// Returns the identity of `M`.
    #[inline]
    pub fn of<M: Message>() -> Self {
        Self {
            id: TypeId::of::<M>(),
            name: type_name::<M>(),
        }
    }

    /// The underlying `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageType {}

impl Hash for MessageType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageType").field(&self.name).finish()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// # Synchronous receiver of `M`.
///
/// Called inline while the publisher's fan-out future is polled; keep it short
/// and non-blocking. Returning `Err` or panicking counts as a delivery failure.
///
/// # Example
/// ```
/// use picomessenger::{Receive, ReceiveError};
///
/// struct Printer;
///
/// impl Receive<String> for Printer {
///     fn receive(&self, message: &String) -> Result<(), ReceiveError> {
///         println!("{message}");
///         Ok(())
///     }
/// }
/// ```
pub trait Receive<M: Message>: Send + Sync + 'static {
    /// Handles one message.
    fn receive(&self, message: &M) -> Result<(), ReceiveError>;
}

/// # Asynchronous receiver of `M`.
///
/// The returned future is awaited together with every other receiver of the
/// same publish call. A resolved `Err`, or a panic while polling, counts as a
/// delivery failure.
#[async_trait]
pub trait ReceiveAsync<M: Message>: Send + Sync + 'static {
    /// Handles one message.
    async fn receive_async(&self, message: &M) -> Result<(), ReceiveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Base;
    struct Derived;

    #[test]
    fn test_message_type_equality_is_exact() {
        assert_eq!(MessageType::of::<String>(), MessageType::of::<String>());
        assert_ne!(MessageType::of::<Base>(), MessageType::of::<Derived>());
        assert_ne!(MessageType::of::<&'static str>(), MessageType::of::<String>());
    }

    #[test]
    fn test_message_type_hash_follows_id() {
        let set: HashSet<MessageType> = [
            MessageType::of::<u32>(),
            MessageType::of::<u32>(),
            MessageType::of::<u64>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_message_type_display_uses_type_name() {
        assert_eq!(MessageType::of::<u8>().to_string(), "u8");
    }
}
