//! # picomessenger
//!
//! **picomessenger** is a small in-process publish/subscribe dispatcher.
//!
//! Subscribers register interest in messages of a given type; publishing a
//! message fans it out, concurrently, to every live subscriber registered for
//! exactly that type. Synchronous and asynchronous subscribers are handled
//! uniformly, can be held strongly or weakly, and can be disabled
//! automatically after their first failure.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌───────────────┐   ┌─────────────────┐   ┌─────────────────────┐
//!   │  Receive<M>   │   │ ReceiveAsync<M> │   │ Subscriber          │
//!   │  (sync)       │   │ (async)         │   │ (many capabilities) │
//!   └──────┬────────┘   └────────┬────────┘   └──────────┬──────────┘
//!          ▼                     ▼                       ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Messenger::register / register_async / register_all         │
//! │    └─► ReceiverWrapperFactory::create_wrapped_receiver       │
//! │          ├─ PlainFactory          (strong, errors surface)   │
//! │          ├─ ConfigurableFactory   (weak?, disable?, logger)  │
//! │          └─ DisableOnErrorFactory (strong, disable)          │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 ▼
//!               ReceiverSet (copy-on-write Vec<WrappedReceiver>)
//!                                 │
//!          Messenger::publish(m)  │ snapshot
//!                                 ▼
//!     filter(message_type == M && is_alive) ─► join_all(deliver)
//!                                 │
//!                                 ▼
//!            Ok(()) | Err(first failure in registration order)
//! ```
//!
//! ### Delivery
//! ```text
//! WrappedReceiver::deliver(message)
//!   ├─ subscriber dropped (weak)   ─► Ok(())      (silent no-op)
//!   ├─ disabled                    ─► Ok(())      (report_message_blocked)
//!   └─ invoke Receive / ReceiveAsync, panics caught
//!        ├─ Ok  ─► Ok(())
//!        └─ Err ─► disable_on_error?
//!                    ├─ yes ─► latch, report_disabling, report_exception, Ok(())
//!                    └─ no  ─► report_exception, Err(DeliveryError)
//! ```
//!
//! ## Features
//! | Area            | Description                                                  | Key types / traits                              |
//! |-----------------|--------------------------------------------------------------|-------------------------------------------------|
//! | **Receivers**   | Sync and async receiver capabilities, closure receivers.     | [`Receive`], [`ReceiveAsync`], [`Subscriber`]   |
//! | **Dispatch**    | Registration and concurrent publish.                         | [`Messenger`], [`Registration`]                 |
//! | **Wrappers**    | Ownership and failure policy per registration.               | [`ReceiverWrapperFactory`], [`WrappedReceiver`] |
//! | **Logging**     | Side-effect-only delivery reporting.                         | [`DeliveryLogger`], [`TracingLogger`]           |
//! | **Errors**      | Typed errors for receivers, delivery and registration.       | [`ReceiveError`], [`DeliveryError`]             |
//! | **Configuration** | Policy switches and fluent factory assembly.               | [`WrapperConfig`], [`WrapperFactoryBuilder`]    |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use picomessenger::{
//!     Capabilities, Messenger, Receive, ReceiveAsync, ReceiveError, Subscriber, TracingLogger,
//!     WrapperFactoryBuilder,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct OrderPlaced { id: u64 }
//!
//! #[derive(Clone, Debug)]
//! struct OrderShipped { id: u64 }
//!
//! struct Audit;
//!
//! impl Receive<OrderPlaced> for Audit {
//!     fn receive(&self, m: &OrderPlaced) -> Result<(), ReceiveError> {
//!         println!("placed #{}", m.id);
//!         Ok(())
//!     }
//! }
//!
//! #[async_trait]
//! impl ReceiveAsync<OrderShipped> for Audit {
//!     async fn receive_async(&self, m: &OrderShipped) -> Result<(), ReceiveError> {
//!         println!("shipped #{}", m.id);
//!         Ok(())
//!     }
//! }
//!
//! impl Subscriber for Audit {
//!     fn capabilities(caps: &mut Capabilities<Self>) {
//!         caps.receive::<OrderPlaced>().receive_async::<OrderShipped>();
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = WrapperFactoryBuilder::new()
//!         .log_errors_to(Arc::new(TracingLogger::new()))
//!         .disable_on_error()
//!         .build();
//!     let messenger = Messenger::with_factory(factory);
//!
//!     let audit = Arc::new(Audit);
//!     assert_eq!(messenger.register_all(&audit)?, 2);
//!
//!     messenger.publish(OrderPlaced { id: 1 }).await?;
//!     messenger.publish(OrderShipped { id: 1 }).await?;
//!
//!     messenger.unregister_all(&audit);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod loggers;
mod receivers;
mod wrappers;

// ---- Public re-exports ----

pub use core::{Messenger, Registration, WrapperConfig, WrapperFactory, WrapperFactoryBuilder};
pub use error::{DeliveryError, ReceiveError, RegisterError};
pub use loggers::{DeliveryLogger, NullLogger, TracingLogger};
pub use receivers::{
    AsyncFnReceiver, Capabilities, Capability, FnReceiver, Message, MessageType, Receive,
    ReceiveAsync, Shape, Subscriber, SubscriberId, SubscriberRef,
};
pub use wrappers::{
    ConfigurableFactory, DisableOnErrorFactory, PlainFactory, ReceiverInfo,
    ReceiverWrapperFactory, WrappedReceiver,
};
