//! Instance registry contract.

use std::{future::Future, sync::Arc, time::Duration};

/// Tracks the instances that match one selection filter.
///
/// The registry owns all synchronization needed to follow instances as they
/// come and go; proxies treat it as an opaque, thread-safe collaborator and
/// query it once per call.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `InstanceRegistry`",
    label = "missing `InstanceRegistry` implementation",
    note = "Registries must provide `current_instance` and `await_instance`."
)]
pub trait InstanceRegistry: Send + Sync + 'static {
    /// The instance type handed out by this registry.
    type Instance: Send + Sync + 'static;

    /// Returns the instance currently matching the filter, without waiting.
    fn current_instance(&self) -> Option<Arc<Self::Instance>>;

    /// Waits until a matching instance appears or `timeout` elapses.
    ///
    /// Must resolve promptly on either event and must not busy-spin.
    fn await_instance(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Option<Arc<Self::Instance>>> + Send;
}
