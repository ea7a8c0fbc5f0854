//! Dispatch core: registration, publishing and factory assembly.
//!
//! The public API from this module is [`Messenger`], the dispatcher, plus the
//! pieces used to configure it.
//!
//! Internal modules:
//! - [`messenger`]: register/unregister and concurrent fan-out;
//! - [`registry`]: copy-on-write collection of wrapped receivers;
//! - [`registration`]: closure receivers released on drop;
//! - [`builder`]: fluent assembly of a wrapper factory;
//! - [`config`]: policy switches.

mod builder;
mod config;
mod messenger;
mod registration;
mod registry;

pub use builder::{WrapperFactory, WrapperFactoryBuilder};
pub use config::WrapperConfig;
pub use messenger::Messenger;
pub use registration::Registration;
