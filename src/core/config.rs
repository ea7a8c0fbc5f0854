//! # Wrapper policy configuration.
//!
//! Provides [`WrapperConfig`], the two policy switches bound into a
//! [`ConfigurableFactory`](crate::ConfigurableFactory) together with a
//! [`DeliveryLogger`](crate::DeliveryLogger).
//!
//! Config is used in two ways:
//! 1. **Builder**: `WrapperFactoryBuilder::with_config(cfg)`
//! 2. **Direct**: `ConfigurableFactory::new(cfg, logger)`

/// Policy switches for wrapped receivers.
///
/// ## Field semantics
/// - `use_weak_references`: hold subscribers through `Weak`; a dropped
///   subscriber stops receiving and is skipped (it stays registered until
///   unregistered).
/// - `disable_on_error`: the first delivery failure latches the receiver to
///   disabled; the failure is logged instead of returned to the publisher, and
///   later deliveries are blocked.
///
/// Both default to `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrapperConfig {
    /// Hold subscribers weakly.
    pub use_weak_references: bool,

    /// Disable a receiver after its first failure.
    pub disable_on_error: bool,
}

impl WrapperConfig {
    /// True when neither policy is enabled.
    #[inline]
    pub fn is_plain(&self) -> bool {
        !self.use_weak_references && !self.disable_on_error
    }
}
