//! # Fluent assembly of a wrapper factory.
//!
//! [`WrapperFactoryBuilder`] collects the policy switches and the logging sink
//! and turns them into one of the statically known factory strategies:
//!
//! ```text
//! WrapperFactoryBuilder::new()
//!     .log_errors_to(logger)      (optional)
//!     .disable_on_error()         (optional)
//!     .use_weak_references()      (optional)
//!     .build()
//!        ├─ nothing configured ─► WrapperFactory::Plain(PlainFactory)
//!        └─ otherwise          ─► WrapperFactory::Configurable(ConfigurableFactory)
//!                                  (logger defaults to NullLogger)
//! ```

use std::sync::Arc;

use super::config::WrapperConfig;
use crate::error::RegisterError;
use crate::loggers::{DeliveryLogger, NullLogger};
use crate::receivers::{Capability, SubscriberRef};
use crate::wrappers::{ConfigurableFactory, PlainFactory, ReceiverWrapperFactory, WrappedReceiver};

/// Builder for a [`WrapperFactory`].
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use picomessenger::{Messenger, TracingLogger, WrapperFactoryBuilder};
///
/// let factory = WrapperFactoryBuilder::new()
///     .log_errors_to(Arc::new(TracingLogger::new()))
///     .disable_on_error()
///     .build();
/// let messenger = Messenger::with_factory(factory);
/// assert!(messenger.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct WrapperFactoryBuilder {
    config: WrapperConfig,
    logger: Option<Arc<dyn DeliveryLogger>>,
}

impl WrapperFactoryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports delivery failures and disabling to `logger`.
    pub fn log_errors_to(mut self, logger: Arc<dyn DeliveryLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Disables a receiver after its first failure.
    pub fn disable_on_error(mut self) -> Self {
        self.config.disable_on_error = true;
        self
    }

    /// Holds subscribers through weak references.
    pub fn use_weak_references(mut self) -> Self {
        self.config.use_weak_references = true;
        self
    }

    /// Replaces both policy switches with `config`.
    pub fn with_config(mut self, config: WrapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the factory.
    #[must_use]
    pub fn build(self) -> WrapperFactory {
        match self.logger {
            None if self.config.is_plain() => WrapperFactory::Plain(PlainFactory),
            logger => WrapperFactory::Configurable(ConfigurableFactory::new(
                self.config,
                logger.unwrap_or_else(|| Arc::new(NullLogger)),
            )),
        }
    }
}

impl std::fmt::Debug for WrapperFactoryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperFactoryBuilder")
            .field("config", &self.config)
            .field("logger", &self.logger.as_ref().map(|l| l.name()))
            .finish()
    }
}

/// Factory strategy produced by [`WrapperFactoryBuilder::build`].
#[derive(Clone, Debug)]
pub enum WrapperFactory {
    /// Strong ownership, failures returned to the publisher.
    Plain(PlainFactory),
    /// Policy and logger from the builder.
    Configurable(ConfigurableFactory),
}

impl ReceiverWrapperFactory for WrapperFactory {
    fn create_wrapped_receiver(
        &self,
        subscriber: &SubscriberRef,
        capability: &Capability,
    ) -> Result<Arc<dyn WrappedReceiver>, RegisterError> {
        match self {
            Self::Plain(f) => f.create_wrapped_receiver(subscriber, capability),
            Self::Configurable(f) => f.create_wrapped_receiver(subscriber, capability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loggers::TracingLogger;

    #[test]
    fn test_empty_builder_is_plain() {
        assert!(matches!(
            WrapperFactoryBuilder::new().build(),
            WrapperFactory::Plain(_)
        ));
        assert!(matches!(
            WrapperFactoryBuilder::new()
                .with_config(WrapperConfig::default())
                .build(),
            WrapperFactory::Plain(_)
        ));
    }

    #[test]
    fn test_logger_is_bound_by_identity() {
        let logger: Arc<dyn DeliveryLogger> = Arc::new(TracingLogger::new());
        let factory = WrapperFactoryBuilder::new()
            .log_errors_to(Arc::clone(&logger))
            .build();

        let WrapperFactory::Configurable(f) = factory else {
            panic!("expected configurable factory");
        };
        assert!(Arc::ptr_eq(f.logger(), &logger));
        assert_eq!(f.logger().name(), "tracing");
        assert!(!f.disable_on_error());
        assert!(!f.use_weak_references());
    }

    #[test]
    fn test_flags_without_logger_use_null_logger() {
        let factory = WrapperFactoryBuilder::new()
            .disable_on_error()
            .use_weak_references()
            .build();

        let WrapperFactory::Configurable(f) = factory else {
            panic!("expected configurable factory");
        };
        assert!(f.disable_on_error());
        assert!(f.use_weak_references());
        assert_eq!(f.logger().name(), "null");
    }

    #[test]
    fn test_with_config_overrides_flags() {
        let factory = WrapperFactoryBuilder::new()
            .disable_on_error()
            .with_config(WrapperConfig {
                use_weak_references: true,
                disable_on_error: false,
            })
            .build();

        let WrapperFactory::Configurable(f) = factory else {
            panic!("expected configurable factory");
        };
        assert_eq!(
            f.config(),
            WrapperConfig {
                use_weak_references: true,
                disable_on_error: false,
            }
        );
    }
}
