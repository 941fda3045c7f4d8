//! Proxy configuration and builder.

use super::DeferredProxy;
use standby_core::{DynUnavailabilityPolicy, InstanceRegistry, ProxyError};
use std::{sync::Arc, time::Duration};

/// Static configuration of a [`DeferredProxy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Selection filter handed to the registry. Must not be empty.
    pub filter: String,
    /// Maximum wait per call. Zero means "check current availability only".
    pub timeout: Duration,
}

impl ProxyConfig {
    /// Create a configuration.
    pub fn new(filter: impl Into<String>, timeout: Duration) -> Self {
        Self {
            filter: filter.into(),
            timeout,
        }
    }

    /// Checks the invariants a proxy relies on.
    pub fn validate(&self) -> Result<(), ProxyError> {
        if self.filter.trim().is_empty() {
            return Err(ProxyError::invalid_config(
                "the filter parameter cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Builder for constructing a [`DeferredProxy`].
///
/// # Example
///
/// ```rust,ignore
/// let proxy = ProxyBuilder::new(registry)
///     .filter("(type=Greeter)")
///     .timeout_millis(250)
///     .policy(Arc::new(LoggingPolicy::new(FailFast)))
///     .build()?;
/// ```
pub struct ProxyBuilder<R> {
    registry: Arc<R>,
    config: ProxyConfig,
    policy: Option<Arc<dyn DynUnavailabilityPolicy>>,
}

impl<R: InstanceRegistry> ProxyBuilder<R> {
    /// Create a builder over `registry` with an empty filter and no wait.
    pub fn new(registry: Arc<R>) -> Self {
        Self {
            registry,
            config: ProxyConfig::default(),
            policy: None,
        }
    }

    /// Set the selection filter.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.config.filter = filter.into();
        self
    }

    /// Set the maximum wait per call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum wait in milliseconds.
    pub fn timeout_millis(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Set the maximum wait in seconds.
    pub fn timeout_secs(self, seconds: u64) -> Self {
        self.timeout(Duration::from_secs(seconds))
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Install a custom unavailability policy.
    pub fn policy(mut self, policy: Arc<dyn DynUnavailabilityPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the proxy.
    pub fn build(self) -> Result<DeferredProxy<R>, ProxyError> {
        let proxy = DeferredProxy::from_config(self.registry, self.config)?;
        if let Some(policy) = self.policy {
            proxy.set_unavailability_policy(policy);
        }
        Ok(proxy)
    }
}
