//! The deferred dispatch proxy.
//!
//! A [`DeferredProxy`] forwards operations to whichever instance its registry
//! currently tracks. When nothing is registered it waits up to its timeout
//! for an instance to appear, and when nothing appears it consults its
//! unavailability policy.
//!
//! # Resolution
//!
//! ```text
//! current_instance ──found──────────────────────────────┐
//!        │ absent                                       │
//!        ▼                                              ▼
//! await_instance(timeout) ──found──────────────────▶ delegate
//!        │ still absent                                 ▲
//!        ▼                                              │
//! policy.handle ──Err──▶ caller       Ok ──▶ current_instance ──absent──▶ NoInstanceAvailable
//! ```

mod builder;

pub use builder::{ProxyBuilder, ProxyConfig};

use crate::policies::FailFast;
use standby_core::{
    BoxError, DynUnavailabilityPolicy, InstanceRegistry, Invocation, Operation, ProxyError,
    Service, Unavailable, UnavailabilityPolicy,
};
use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

/// A stable stand-in for a dependency that may not be registered yet.
///
/// The proxy is immutable after construction except for its policy slot,
/// which may be replaced at any time with
/// [`set_unavailability_policy`](Self::set_unavailability_policy). Share it
/// between tasks behind an `Arc`; every call resolves the registry on its
/// own.
///
/// # Example
///
/// ```rust,ignore
/// let proxy = DeferredProxy::new(registry, "(type=Greeter)", Duration::from_millis(50))?;
/// let greeting = proxy.invoke(SayHello).await?;
/// ```
///
/// # Runtime Requirements
///
/// The wait is bounded with `tokio::time::timeout`, so `invoke` must run
/// inside a tokio runtime with the time driver enabled whenever the timeout
/// is non-zero.
pub struct DeferredProxy<R> {
    registry: Arc<R>,
    filter: String,
    timeout: Duration,
    policy: RwLock<Option<Arc<dyn DynUnavailabilityPolicy>>>,
}

impl<R: InstanceRegistry> DeferredProxy<R> {
    /// Creates a proxy over `registry` for the instances matching `filter`.
    ///
    /// Fails with [`ProxyError::InvalidConfiguration`] if `filter` is empty.
    /// A zero `timeout` disables waiting: only the current registry state is
    /// checked.
    pub fn new(
        registry: Arc<R>,
        filter: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProxyError> {
        Self::from_config(registry, ProxyConfig::new(filter, timeout))
    }

    /// Creates a proxy from a validated [`ProxyConfig`].
    pub fn from_config(registry: Arc<R>, config: ProxyConfig) -> Result<Self, ProxyError> {
        config.validate()?;
        let ProxyConfig { filter, timeout } = config;
        Ok(Self {
            registry,
            filter,
            timeout,
            policy: RwLock::new(None),
        })
    }

    /// Starts a [`ProxyBuilder`] over `registry`.
    pub fn builder(registry: Arc<R>) -> ProxyBuilder<R> {
        ProxyBuilder::new(registry)
    }

    /// Forwards `op` to the resolved instance.
    ///
    /// Errors raised by the instance are returned exactly as produced, so
    /// `downcast_ref` on the result yields the instance's own error type.
    /// Errors raised by the proxy are [`ProxyError`]s; errors raised by a
    /// policy are returned as the policy produced them.
    pub async fn invoke<Op>(&self, op: Op) -> Result<Op::Output, BoxError>
    where
        Op: Operation,
        R::Instance: Service<Op>,
    {
        let instance = match self.resolve::<Op>().await {
            Some(instance) => instance,
            None => {
                self.handle_unavailable(&op).await?;
                self.registry.current_instance().ok_or_else(|| {
                    ProxyError::NoInstanceAvailable {
                        filter: self.filter.clone(),
                        operation: Op::NAME,
                    }
                })?
            }
        };

        instance.call(op).await
    }

    /// Replaces the unavailability policy.
    ///
    /// Calls already past the policy read keep the policy they saw.
    pub fn set_unavailability_policy(&self, policy: Arc<dyn DynUnavailabilityPolicy>) {
        *self.policy.write().unwrap_or_else(PoisonError::into_inner) = Some(policy);
    }

    /// Restores the default [`FailFast`] policy.
    pub fn clear_unavailability_policy(&self) {
        *self.policy.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// The custom policy, if one was set.
    pub fn unavailability_policy(&self) -> Option<Arc<dyn DynUnavailabilityPolicy>> {
        self.policy
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The selection filter.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The maximum wait per call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The registry this proxy resolves against.
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    async fn resolve<Op: Operation>(&self) -> Option<Arc<R::Instance>> {
        if let Some(instance) = self.registry.current_instance() {
            #[cfg(feature = "tracing")]
            tracing::trace!(filter = %self.filter, operation = Op::NAME, "instance available");
            return Some(instance);
        }
        if self.timeout.is_zero() {
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            filter = %self.filter,
            operation = Op::NAME,
            timeout = ?self.timeout,
            "waiting for instance"
        );

        // The registry promises to honour the timeout; the outer bound keeps
        // the caller's wait finite even if it does not.
        let found = tokio::time::timeout(self.timeout, self.registry.await_instance(self.timeout))
            .await
            .ok()
            .flatten();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            filter = %self.filter,
            operation = Op::NAME,
            found = found.is_some(),
            "wait finished"
        );

        found
    }

    async fn handle_unavailable<Op: Operation>(&self, op: &Op) -> Result<(), BoxError> {
        let event = Unavailable::new(&self.filter, Invocation::new(Op::NAME, op), self.timeout);
        match self.unavailability_policy() {
            Some(policy) => policy.handle(&event).await,
            None => FailFast.handle(&event).await,
        }
    }
}

impl<R> std::fmt::Debug for DeferredProxy<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let custom_policy = self
            .policy
            .read()
            .map(|policy| policy.is_some())
            .unwrap_or(false);
        f.debug_struct("DeferredProxy")
            .field("filter", &self.filter)
            .field("timeout", &self.timeout)
            .field("custom_policy", &custom_policy)
            .finish_non_exhaustive()
    }
}
