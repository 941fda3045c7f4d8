//! Testing utilities for standby.
//!
//! This module provides utilities to make testing proxies, policies, and
//! services easier.
//!
//! # Features
//!
//! - [`ScriptedRegistry`]: A registry with programmable answers and call counters
//! - [`RecordingPolicy`]: A policy that records every event it receives
//! - [`Greeter`]: A sample service with [`SayHello`], [`Greet`], and [`Fail`] operations

use standby_core::{
    BoxError, InstanceRegistry, Operation, ProxyError, Service, Unavailable, UnavailabilityPolicy,
};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use thiserror::Error;

// ============================================================================
// Scripted Registry
// ============================================================================

/// How a [`ScriptedRegistry`] behaves when asked to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitBehavior {
    /// Sleep for the requested timeout, then report the scripted answer.
    #[default]
    HonorTimeout,
    /// Never resolve, regardless of the timeout.
    Stall,
}

/// A registry whose answers are set by the test.
///
/// `current_instance` returns the scripted current instance. `await_instance`
/// returns the scripted awaited instance immediately when there is one;
/// otherwise it behaves according to its [`WaitBehavior`].
///
/// # Example
///
/// ```rust,ignore
/// let registry = Arc::new(ScriptedRegistry::with_awaited(Arc::new(Greeter::new("hi"))));
/// let proxy = DeferredProxy::new(registry.clone(), "(type=Greeter)", Duration::from_millis(10))?;
///
/// proxy.invoke(SayHello).await?;
/// assert_eq!(registry.await_calls(), 1);
/// ```
pub struct ScriptedRegistry<S> {
    current: Mutex<Option<Arc<S>>>,
    awaited: Mutex<Option<Arc<S>>>,
    wait: Mutex<WaitBehavior>,
    last_timeout: Mutex<Option<Duration>>,
    current_calls: AtomicUsize,
    await_calls: AtomicUsize,
}

impl<S> ScriptedRegistry<S> {
    /// Create a registry that never has an instance.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
            awaited: Mutex::new(None),
            wait: Mutex::new(WaitBehavior::HonorTimeout),
            last_timeout: Mutex::new(None),
            current_calls: AtomicUsize::new(0),
            await_calls: AtomicUsize::new(0),
        }
    }

    /// Create a registry whose current instance is `instance`.
    pub fn with_current(instance: Arc<S>) -> Self {
        let registry = Self::new();
        registry.set_current(Some(instance));
        registry
    }

    /// Create a registry with no current instance whose wait yields `instance`.
    pub fn with_awaited(instance: Arc<S>) -> Self {
        let registry = Self::new();
        registry.set_awaited(Some(instance));
        registry
    }

    /// Set the answer of `current_instance`.
    pub fn set_current(&self, instance: Option<Arc<S>>) {
        *self.current.lock().unwrap() = instance;
    }

    /// Set the answer of `await_instance`.
    pub fn set_awaited(&self, instance: Option<Arc<S>>) {
        *self.awaited.lock().unwrap() = instance;
    }

    /// Set how `await_instance` waits when it has nothing to return.
    pub fn set_wait_behavior(&self, behavior: WaitBehavior) {
        *self.wait.lock().unwrap() = behavior;
    }

    /// Get the number of `current_instance` calls.
    pub fn current_calls(&self) -> usize {
        self.current_calls.load(Ordering::SeqCst)
    }

    /// Get the number of `await_instance` calls.
    pub fn await_calls(&self) -> usize {
        self.await_calls.load(Ordering::SeqCst)
    }

    /// Get the timeout passed to the most recent `await_instance` call.
    pub fn last_timeout(&self) -> Option<Duration> {
        *self.last_timeout.lock().unwrap()
    }
}

impl<S> Default for ScriptedRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> InstanceRegistry for ScriptedRegistry<S>
where
    S: Send + Sync + 'static,
{
    type Instance = S;

    fn current_instance(&self) -> Option<Arc<S>> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);
        self.current.lock().unwrap().clone()
    }

    async fn await_instance(&self, timeout: Duration) -> Option<Arc<S>> {
        self.await_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_timeout.lock().unwrap() = Some(timeout);

        let awaited = self.awaited.lock().unwrap().clone();
        if awaited.is_some() {
            return awaited;
        }
        let behavior = *self.wait.lock().unwrap();
        match behavior {
            WaitBehavior::HonorTimeout => {
                tokio::time::sleep(timeout).await;
                None
            }
            WaitBehavior::Stall => std::future::pending().await,
        }
    }
}

// ============================================================================
// Recording Policy
// ============================================================================

/// An owned copy of an [`Unavailable`] event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableRecord {
    /// The proxy's selection filter.
    pub filter: String,
    /// The operation identity.
    pub operation: &'static str,
    /// Debug rendering of the arguments.
    pub arguments: String,
    /// The configured wait.
    pub timeout: Duration,
}

impl From<&Unavailable<'_>> for UnavailableRecord {
    fn from(event: &Unavailable<'_>) -> Self {
        Self {
            filter: event.filter().to_owned(),
            operation: event.operation(),
            arguments: format!("{:?}", event.arguments()),
            timeout: event.timeout(),
        }
    }
}

/// A policy that records every event it receives.
///
/// Returns normally by default; see [`RecordingPolicy::failing`].
///
/// # Example
///
/// ```rust,ignore
/// let policy = RecordingPolicy::new();
/// proxy.set_unavailability_policy(Arc::new(policy.clone()));
///
/// let _ = proxy.invoke(SayHello).await;
/// assert_eq!(policy.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingPolicy {
    records: Arc<Mutex<Vec<UnavailableRecord>>>,
    fail: bool,
}

impl RecordingPolicy {
    /// Create a recording policy that returns normally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording policy that fails with `ServiceUnavailable`.
    pub fn failing() -> Self {
        Self {
            records: Arc::default(),
            fail: true,
        }
    }

    /// Get a clone of the recorded events.
    pub fn records(&self) -> Vec<UnavailableRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl UnavailabilityPolicy for RecordingPolicy {
    async fn handle(&self, event: &Unavailable<'_>) -> Result<(), BoxError> {
        self.records.lock().unwrap().push(event.into());
        if self.fail {
            return Err(Box::new(event.to_error()));
        }
        Ok(())
    }
}

// ============================================================================
// Greeter
// ============================================================================

/// Error raised by [`Greeter`] for the [`Fail`] operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GreeterError {
    /// The greeter refused the call.
    #[error("greeter refused: {0}")]
    Refused(String),
}

/// A sample service that greets.
#[derive(Debug)]
pub struct Greeter {
    greeting: String,
    calls: AtomicUsize,
}

impl Greeter {
    /// Create a greeter answering with `greeting`.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Get the number of operations this instance executed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Returns the greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SayHello;

impl Operation for SayHello {
    const NAME: &'static str = "sayHello";
    type Output = String;
}

/// Returns the greeting addressed to `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greet {
    /// Who to greet.
    pub name: String,
}

impl Operation for Greet {
    const NAME: &'static str = "greet";
    type Output = String;
}

/// Always fails with [`GreeterError::Refused`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fail {
    /// Message of the raised error.
    pub message: String,
}

impl Operation for Fail {
    const NAME: &'static str = "fail";
    type Output = ();
}

impl Service<SayHello> for Greeter {
    async fn call(&self, _op: SayHello) -> Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.greeting.clone())
    }
}

impl Service<Greet> for Greeter {
    async fn call(&self, op: Greet) -> Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}, {}", self.greeting, op.name))
    }
}

impl Service<Fail> for Greeter {
    async fn call(&self, op: Fail) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Box::new(GreeterError::Refused(op.message)))
    }
}

/// Returns `true` if `err` is the proxy's `ServiceUnavailable` error.
pub fn is_service_unavailable(err: &BoxError) -> bool {
    err.downcast_ref::<ProxyError>()
        .is_some_and(ProxyError::is_service_unavailable)
}

/// Returns `true` if `err` is the proxy's `NoInstanceAvailable` error.
pub fn is_no_instance(err: &BoxError) -> bool {
    err.downcast_ref::<ProxyError>()
        .is_some_and(ProxyError::is_no_instance)
}
