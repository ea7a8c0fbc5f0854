//! Error types used by receivers, wrappers and the messenger.
//!
//! This module defines three error enums:
//!
//! - [`ReceiveError`]: errors returned by subscriber code.
//! - [`DeliveryError`]: failures surfaced by a wrapped receiver after a delivery attempt.
//! - [`RegisterError`]: errors raised while building a wrapped receiver.
//!
//! All of them provide `as_label` / `as_message` helpers for logging.

use thiserror::Error;

use crate::receivers::MessageType;

/// # Errors produced by subscriber code.
///
/// Returned from [`Receive::receive`](crate::Receive::receive) and
/// [`ReceiveAsync::receive_async`](crate::ReceiveAsync::receive_async).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiveError {
    /// Message handling failed.
    #[error("receive failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Message handling failed and the subscriber considers itself broken.
    #[error("fatal receive error: {error}")]
    Fatal {
        /// The underlying error message.
        error: String,
    },
}

impl ReceiveError {
    /// Shorthand for [`ReceiveError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        ReceiveError::Fail {
            error: error.into(),
        }
    }

    /// Shorthand for [`ReceiveError::Fatal`].
    pub fn fatal(error: impl Into<String>) -> Self {
        ReceiveError::Fatal {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use picomessenger::ReceiveError;
    ///
    /// assert_eq!(ReceiveError::fail("boom").as_label(), "receive_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ReceiveError::Fail { .. } => "receive_failed",
            ReceiveError::Fatal { .. } => "receive_fatal",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ReceiveError::Fail { error } => format!("error: {error}"),
            ReceiveError::Fatal { error } => format!("fatal: {error}"),
        }
    }
}

/// # Failure of a single delivery attempt.
///
/// Produced by a [`WrappedReceiver`](crate::WrappedReceiver) when the subscriber
/// returned an error or panicked. Panics never cross the wrapper boundary; they
/// are captured and reported as [`DeliveryError::Panicked`].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The subscriber returned an error.
    #[error("subscriber {subscriber} failed on {message_type}: {source}")]
    Failed {
        /// Type name of the subscriber.
        subscriber: &'static str,
        /// Message type being delivered.
        message_type: MessageType,
        /// Error returned by the subscriber.
        #[source]
        source: ReceiveError,
    },

    /// The subscriber panicked, either before returning or while its future was polled.
    #[error("subscriber {subscriber} panicked on {message_type}: {info}")]
    Panicked {
        /// Type name of the subscriber.
        subscriber: &'static str,
        /// Message type being delivered.
        message_type: MessageType,
        /// Panic payload rendered as text.
        info: String,
    },

    /// The wrapper was handed a message of a different type than it was built for.
    #[error("subscriber {subscriber} expects {expected}")]
    TypeMismatch {
        /// Type name of the subscriber.
        subscriber: &'static str,
        /// Message type the wrapper was built for.
        expected: MessageType,
    },
}

impl DeliveryError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryError::Failed { .. } => "delivery_failed",
            DeliveryError::Panicked { .. } => "delivery_panicked",
            DeliveryError::TypeMismatch { .. } => "delivery_type_mismatch",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DeliveryError::Failed { source, .. } => source.as_message(),
            DeliveryError::Panicked { info, .. } => format!("panic: {info}"),
            DeliveryError::TypeMismatch { expected, .. } => format!("expected {expected}"),
        }
    }

    /// Returns the subscriber's own error, if the failure came from a returned `Err`.
    pub fn receive_error(&self) -> Option<&ReceiveError> {
        match self {
            DeliveryError::Failed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// # Errors raised while wrapping a subscriber.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The capability was declared for a different subscriber type than the one supplied.
    #[error("capability {shape} of {message_type} declared for {declared}, got {actual}")]
    CapabilityMismatch {
        /// `"sync"` or `"async"`.
        shape: &'static str,
        /// Message type of the capability.
        message_type: MessageType,
        /// Subscriber type the capability was declared for.
        declared: &'static str,
        /// Type name reported for the supplied subscriber.
        actual: &'static str,
    },
}

impl RegisterError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use picomessenger::{MessageType, RegisterError};
    ///
    /// let err = RegisterError::CapabilityMismatch {
    ///     shape: "sync",
    ///     message_type: MessageType::of::<String>(),
    ///     declared: "A",
    ///     actual: "B",
    /// };
    /// assert_eq!(err.as_label(), "register_capability_mismatch");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegisterError::CapabilityMismatch { .. } => "register_capability_mismatch",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RegisterError::CapabilityMismatch {
                shape,
                message_type,
                declared,
                actual,
            } => format!(
                "{shape} receiver of {message_type} declared for {declared}, got {actual}"
            ),
        }
    }
}
