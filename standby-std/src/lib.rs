//! # standby-std
//!
//! Standard implementations for the standby deferred dispatch proxy.
//!
//! This crate provides:
//! - **Proxy**: [`DeferredProxy`], [`ProxyBuilder`], [`ProxyConfig`]
//! - **Policies**: [`FailFast`](policies::FailFast), [`Ignore`](policies::Ignore),
//!   [`LoggingPolicy`](policies::LoggingPolicy), [`FnPolicy`](policies::FnPolicy)
//! - **Registry**: [`SlotRegistry`], a single-slot reference registry
//! - **Testing**: scripted registries, recording policies, a sample service

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use standby_core;

// Modules
pub mod policies;
pub mod proxy;
pub mod registry;
pub mod testing;

pub use proxy::{DeferredProxy, ProxyBuilder, ProxyConfig};
pub use registry::SlotRegistry;
