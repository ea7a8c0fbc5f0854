//! # Delivery logging sinks.
//!
//! [`DeliveryLogger`] is the side-effect-only hook used by
//! [`ConfigurableFactory`](crate::ConfigurableFactory) wrappers. It observes
//! three events and never influences the delivery outcome:
//!
//! ```text
//! ConfigurableReceiver::deliver
//!   ├─ subscriber failed            ─► report_exception(error, info)
//!   ├─ receiver latched to disabled ─► report_disabling(info)
//!   └─ delivery to disabled receiver ─► report_message_blocked(info)
//! ```
//!
//! Built-in sinks:
//! - [`NullLogger`] - discards everything (default);
//! - [`TracingLogger`] - emits `tracing` events.

mod log;
mod logger;

pub use log::TracingLogger;
pub use logger::{DeliveryLogger, NullLogger};
