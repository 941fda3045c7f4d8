//! Single-slot registry for embedding and tests.

use standby_core::InstanceRegistry;
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;

/// A registry holding at most one published instance.
///
/// Selection has already happened by the time an instance is published here;
/// the slot simply tracks whether that instance is currently registered.
/// Waiters are woken as soon as an instance is published.
///
/// # Example
///
/// ```rust,ignore
/// let registry = Arc::new(SlotRegistry::new());
/// let proxy = DeferredProxy::new(registry.clone(), "(type=Greeter)", Duration::from_secs(1))?;
///
/// registry.publish(Arc::new(Greeter::new("hi")));
/// ```
pub struct SlotRegistry<S> {
    slot: watch::Sender<Option<Arc<S>>>,
}

impl<S> SlotRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    /// Create a registry with `instance` already published.
    pub fn with_instance(instance: Arc<S>) -> Self {
        let (slot, _) = watch::channel(Some(instance));
        Self { slot }
    }

    /// Publish `instance`, returning the one it replaces.
    pub fn publish(&self, instance: Arc<S>) -> Option<Arc<S>> {
        self.slot.send_replace(Some(instance))
    }

    /// Withdraw the published instance, if any.
    pub fn withdraw(&self) -> Option<Arc<S>> {
        self.slot.send_replace(None)
    }

    /// Check if an instance is currently published.
    pub fn is_available(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl<S> Default for SlotRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> InstanceRegistry for SlotRegistry<S>
where
    S: Send + Sync + 'static,
{
    type Instance = S;

    fn current_instance(&self) -> Option<Arc<S>> {
        self.slot.borrow().clone()
    }

    async fn await_instance(&self, timeout: Duration) -> Option<Arc<S>> {
        let mut updates = self.slot.subscribe();
        let published = async move {
            let current = updates.wait_for(Option::is_some).await.ok()?;
            current.clone()
        };
        tokio::time::timeout(timeout, published).await.ok().flatten()
    }
}
