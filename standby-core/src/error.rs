//! Error types for standby.
//!
//! The proxy reports its own failures through [`ProxyError`]. Everything that
//! crosses a collaborator boundary (service calls, policy hooks, and the
//! result of a dispatch) travels as a [`BoxError`], so an error raised by a
//! delegate instance reaches the caller without being re-wrapped.

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the deferred proxy itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// The proxy could not be constructed from the given configuration.
    #[error("invalid proxy configuration: {0}")]
    InvalidConfiguration(String),

    /// No instance matched the filter within the timeout.
    ///
    /// This is the signal of the default policy.
    #[error(
        "no service available for filter {filter} while calling {operation} with {arguments} (waited {timeout:?})"
    )]
    ServiceUnavailable {
        /// The selection filter of the proxy.
        filter: String,
        /// Identity of the operation that was called.
        operation: &'static str,
        /// Debug rendering of the call arguments.
        arguments: String,
        /// The configured wait.
        timeout: Duration,
    },

    /// Delegation was attempted without a resolved instance.
    ///
    /// Only reachable when a policy handles unavailability without failing.
    #[error("no instance available to dispatch {operation} (filter {filter})")]
    NoInstanceAvailable {
        /// The selection filter of the proxy.
        filter: String,
        /// Identity of the operation that was called.
        operation: &'static str,
    },
}

impl ProxyError {
    /// Shorthand for [`ProxyError::InvalidConfiguration`].
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        ProxyError::InvalidConfiguration(reason.into())
    }

    /// Returns `true` for [`ProxyError::ServiceUnavailable`].
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, ProxyError::ServiceUnavailable { .. })
    }

    /// Returns `true` for [`ProxyError::NoInstanceAvailable`].
    pub fn is_no_instance(&self) -> bool {
        matches!(self, ProxyError::NoInstanceAvailable { .. })
    }
}
