//! # standby-core
//!
//! Core traits for the standby deferred dispatch proxy.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! service implementations, registries, and policies that don't need the
//! full `standby-std` implementation.
//!
//! # Collaborators
//!
//! A deferred proxy sits between a caller and a dependency that may not be
//! registered yet. It talks to three kinds of collaborators, each expressed
//! here as a trait:
//!
//! ## [`Operation`] and [`Service`]
//!
//! An operation is a typed request value. Its [`Operation::NAME`] is the
//! operation identity and its fields are the ordered arguments of the call.
//! A [`Service`] is a concrete instance able to execute that operation.
//!
//! ## [`InstanceRegistry`]
//!
//! The registry tracks the instances that match the proxy's selection filter.
//! It answers "what is available right now" without blocking, and "tell me as
//! soon as something appears" with a bounded asynchronous wait.
//!
//! ## [`UnavailabilityPolicy`]
//!
//! The hook invoked when no instance could be found within the timeout. It
//! may fail the call, log, alert, or do nothing at all. It never supplies a
//! substitute instance.
//!
//! # Error Types
//!
//! - [`ProxyError`] - Errors raised by the proxy itself
//! - [`BoxError`] - Dynamic error used by services and policies

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod operation;
mod policy;
mod registry;

// Re-exports
pub use error::{BoxError, ProxyError};
pub use operation::{Operation, Service};
pub use policy::{DynUnavailabilityPolicy, Invocation, Unavailable, UnavailabilityPolicy};
pub use registry::InstanceRegistry;
