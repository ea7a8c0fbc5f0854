//! # Subscriber capabilities.
//!
//! This module provides the subscriber-facing types:
//! - [`Receive`] / [`ReceiveAsync`] - the two capability shapes a subscriber can implement
//! - [`Subscriber`] / [`Capabilities`] - declares every capability of a type for `register_all`
//! - [`Capability`] - one (shape, message type, subscriber type) descriptor
//! - [`FnReceiver`] / [`AsyncFnReceiver`] - closure-backed receivers
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use picomessenger::{Capabilities, Receive, ReceiveAsync, ReceiveError, Subscriber};
//!
//! struct Audit;
//!
//! impl Receive<String> for Audit {
//!     fn receive(&self, message: &String) -> Result<(), ReceiveError> {
//!         println!("audit: {message}");
//!         Ok(())
//!     }
//! }
//!
//! #[async_trait]
//! impl ReceiveAsync<u64> for Audit {
//!     async fn receive_async(&self, message: &u64) -> Result<(), ReceiveError> {
//!         println!("audit: #{message}");
//!         Ok(())
//!     }
//! }
//!
//! impl Subscriber for Audit {
//!     fn capabilities(caps: &mut Capabilities<Self>) {
//!         caps.receive::<String>().receive_async::<u64>();
//!     }
//! }
//! ```

mod capability;
mod receive;
mod receiver_fn;

pub use capability::{Capabilities, Capability, Shape, Subscriber, SubscriberId, SubscriberRef};
pub use receive::{Message, MessageType, Receive, ReceiveAsync};
pub use receiver_fn::{AsyncFnReceiver, FnReceiver};

pub(crate) use capability::{Erased, Invoke};
