//! # Configurable wrappers.
//!
//! [`ConfigurableFactory`] binds a [`WrapperConfig`] and a [`DeliveryLogger`]
//! into every receiver it creates.
//!
//! ## Disable-on-error
//! ```text
//! deliver(message)
//!   ├─ disabled?  ─► report_message_blocked ─► Ok(())    (subscriber not called)
//!   └─ call subscriber
//!        ├─ Ok   ─► Ok(())
//!        └─ Err  ─► disable_on_error?
//!                    ├─ yes ─► latch disabled, report_disabling, report_exception ─► Ok(())
//!                    └─ no  ─► report_exception ─► Err(error)
//! ```
//! The latch is one-way; `is_alive` reports `false` once it is set.
//! A panicking logger is caught and reported through `tracing`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::warn;

use super::adapter::Adapter;
use super::factory::ReceiverWrapperFactory;
use super::hold::Hold;
use super::wrapped::{ReceiverInfo, WrappedReceiver};
use crate::core::WrapperConfig;
use crate::error::{DeliveryError, RegisterError};
use crate::loggers::{DeliveryLogger, NullLogger};
use crate::receivers::{Capability, MessageType, SubscriberId, SubscriberRef};

/// Factory applying weak ownership and disable-on-error per [`WrapperConfig`],
/// reporting to a [`DeliveryLogger`].
#[derive(Clone)]
pub struct ConfigurableFactory {
    config: WrapperConfig,
    logger: Arc<dyn DeliveryLogger>,
}

impl ConfigurableFactory {
    /// Creates a factory with the given policy and logger.
    #[must_use]
    pub fn new(config: WrapperConfig, logger: Arc<dyn DeliveryLogger>) -> Self {
        Self { config, logger }
    }

    /// Weak ownership without logging.
    #[must_use]
    pub fn weak() -> Self {
        Self::new(
            WrapperConfig {
                use_weak_references: true,
                disable_on_error: false,
            },
            Arc::new(NullLogger),
        )
    }

    /// Policy bound into created receivers.
    pub fn config(&self) -> WrapperConfig {
        self.config
    }

    /// Whether subscribers are held weakly.
    pub fn use_weak_references(&self) -> bool {
        self.config.use_weak_references
    }

    /// Whether receivers disable themselves after a failure.
    pub fn disable_on_error(&self) -> bool {
        self.config.disable_on_error
    }

    /// Logger bound into created receivers.
    pub fn logger(&self) -> &Arc<dyn DeliveryLogger> {
        &self.logger
    }
}

impl std::fmt::Debug for ConfigurableFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurableFactory")
            .field("config", &self.config)
            .field("logger", &self.logger.name())
            .finish()
    }
}

impl ReceiverWrapperFactory for ConfigurableFactory {
    fn create_wrapped_receiver(
        &self,
        subscriber: &SubscriberRef,
        capability: &Capability,
    ) -> Result<Arc<dyn WrappedReceiver>, RegisterError> {
        capability.check(subscriber)?;
        let hold = if self.config.use_weak_references {
            Hold::weak(subscriber)
        } else {
            Hold::strong(subscriber)
        };
        Ok(Arc::new(ConfigurableReceiver::new(
            Adapter::new(subscriber, capability, hold),
            self.config.disable_on_error,
            Arc::clone(&self.logger),
        )))
    }
}

pub(crate) struct ConfigurableReceiver {
    adapter: Adapter,
    disable_on_error: bool,
    disabled: AtomicBool,
    logger: Arc<dyn DeliveryLogger>,
}

impl ConfigurableReceiver {
    pub(crate) fn new(
        adapter: Adapter,
        disable_on_error: bool,
        logger: Arc<dyn DeliveryLogger>,
    ) -> Self {
        Self {
            adapter,
            disable_on_error,
            disabled: AtomicBool::new(false),
            logger,
        }
    }

    /// Calls the logger; a panicking logger never changes the delivery outcome.
    fn report(&self, f: impl FnOnce(&dyn DeliveryLogger)) {
        if panic::catch_unwind(AssertUnwindSafe(|| f(self.logger.as_ref()))).is_err() {
            warn!(logger = self.logger.name(), "delivery logger panicked");
        }
    }
}

#[async_trait]
impl WrappedReceiver for ConfigurableReceiver {
    fn message_type(&self) -> MessageType {
        self.adapter.info().message_type
    }

    fn is_alive(&self) -> bool {
        self.adapter.is_alive() && !self.disabled.load(Ordering::Acquire)
    }

    fn wrapped_object(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.adapter.wrapped_object()
    }

    fn subscriber_id(&self) -> Option<SubscriberId> {
        self.adapter.subscriber_id()
    }

    fn info(&self) -> ReceiverInfo {
        self.adapter.info()
    }

    async fn deliver(
        &self,
        message: &(dyn Any + Send + Sync + 'static),
    ) -> Result<(), DeliveryError> {
        let info = self.adapter.info();

        if self.disabled.load(Ordering::Acquire) {
            self.report(|l| l.report_message_blocked(&info));
            return Ok(());
        }

        let Err(err) = self.adapter.call(message).await else {
            return Ok(());
        };

        if self.disable_on_error {
            // Only the first failure reports the transition.
            if !self.disabled.swap(true, Ordering::AcqRel) {
                self.report(|l| l.report_disabling(&info));
            }
            self.report(|l| l.report_exception(&err, &info));
            return Ok(());
        }

        self.report(|l| l.report_exception(&err, &info));
        Err(err)
    }
}
