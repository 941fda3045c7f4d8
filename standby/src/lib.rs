//! # standby - Deferred Dispatch Proxy
//!
//! `standby` forwards calls to a dependency that may not be registered yet.
//! A [`DeferredProxy`] resolves the current instance from an
//! [`InstanceRegistry`], waits a bounded time when nothing is registered, and
//! falls back to a pluggable [`UnavailabilityPolicy`] when nothing shows up.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use standby::prelude::*;
//!
//! #[derive(Debug)]
//! struct SayHello;
//!
//! impl Operation for SayHello {
//!     const NAME: &'static str = "sayHello";
//!     type Output = String;
//! }
//!
//! impl Service<SayHello> for Greeter { ... }
//!
//! let registry = Arc::new(SlotRegistry::new());
//! let proxy = DeferredProxy::new(registry.clone(), "(type=Greeter)", Duration::from_millis(50))?;
//!
//! registry.publish(Arc::new(Greeter));
//! let greeting = proxy.invoke(SayHello).await?;
//! ```
//!
//! ## Failure modes
//!
//! - The default policy ([`FailFast`](policies::FailFast)) fails the call
//!   with [`ProxyError::ServiceUnavailable`].
//! - A policy that returns normally leads to
//!   [`ProxyError::NoInstanceAvailable`].
//! - Errors raised by the instance reach the caller unchanged.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use standby_core::{
    // Error types
    BoxError,
    // Policy
    DynUnavailabilityPolicy,
    // Registry
    InstanceRegistry,
    Invocation,
    // Operation
    Operation,
    ProxyError,
    Service,
    Unavailable,
    UnavailabilityPolicy,
};

// Proxy
pub use standby_std::{
    proxy::{DeferredProxy, ProxyBuilder, ProxyConfig},
    registry::SlotRegistry,
};

/// Standard unavailability policies.
pub mod policies {
    #![allow(clippy::wildcard_imports)]
    pub use standby_std::policies::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use standby_std::testing::*;
}

#[cfg(feature = "tower")]
pub mod tower_service;

/// Prelude module - common imports for standby.
///
/// # Usage
///
/// ```rust,ignore
/// use standby::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Proxy
        DeferredProxy,
        DynUnavailabilityPolicy,
        // Core traits
        InstanceRegistry,
        Operation,
        ProxyBuilder,
        ProxyError,
        Service,
        SlotRegistry,
        Unavailable,
        UnavailabilityPolicy,
        policies::{FailFast, Ignore, LoggingPolicy},
    };
}

#[cfg(feature = "macros")]
pub use standby_macros::Operation;
