//! # Receiver wrappers.
//!
//! A [`WrappedReceiver`] adapts one subscriber capability (sync or async) held
//! with one ownership mode (strong or weak) to a single delivery contract.
//! A [`ReceiverWrapperFactory`] decides which wrapper a registration gets.
//!
//! ## Architecture
//! ```text
//! Messenger::register(subscriber)
//!     │
//!     ▼
//! ReceiverWrapperFactory::create_wrapped_receiver(subscriber, capability)
//!     │
//!     ├── PlainFactory          ──► PlainReceiver        (strong, errors surface)
//!     ├── ConfigurableFactory   ──► ConfigurableReceiver (strong|weak, disable-on-error, logger)
//!     └── DisableOnErrorFactory ──► ConfigurableReceiver (strong, disable-on-error, no logger)
//!                                         │
//!                                         ▼
//!                                  Adapter { Hold, Invoke }
//!                                   ├─ Hold::Strong(Arc) | Hold::Weak(Weak)
//!                                   └─ Invoke::Sync(fn)  | Invoke::Async(fn)
//! ```
//!
//! ## Rules
//! - `deliver` never panics and never fails synchronously: subscriber panics and
//!   errors come back as `Err(DeliveryError)` from the returned future.
//! - `is_alive` is recomputed on every call.
//! - A reclaimed weak subscriber is a silent no-op, not a failure.

mod adapter;
mod configurable;
mod disable_on_error;
mod factory;
mod hold;
mod plain;
mod wrapped;

pub use configurable::ConfigurableFactory;
pub use disable_on_error::DisableOnErrorFactory;
pub use factory::ReceiverWrapperFactory;
pub use plain::PlainFactory;
pub use wrapped::{ReceiverInfo, WrappedReceiver};
