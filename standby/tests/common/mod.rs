#![allow(dead_code)]

use standby::{BoxError, DeferredProxy, InstanceRegistry, Operation, Service};
use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

pub const FILTER: &str = "(type=Greeter)";

// ============================================================================
// Test Operations
// ============================================================================

#[derive(Debug, Clone)]
pub struct Store {
    pub key: String,
    pub value: u64,
}

impl Operation for Store {
    const NAME: &'static str = "store";
    type Output = u64;
}

#[derive(Debug, Clone)]
pub struct Load {
    pub key: String,
}

impl Operation for Load {
    const NAME: &'static str = "load";
    type Output = u64;
}

// ============================================================================
// Test Services
// ============================================================================

/// A store that knows a single key and fails with `io::Error` otherwise.
pub struct SingleKeyStore {
    pub id: usize,
    pub key: String,
    pub calls: Arc<AtomicUsize>,
}

impl SingleKeyStore {
    pub fn new(id: usize, key: &str) -> Self {
        Self {
            id,
            key: key.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Service<Store> for SingleKeyStore {
    async fn call(&self, op: Store) -> Result<u64, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if op.key != self.key {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::NotFound,
                format!("unknown key {}", op.key),
            )));
        }
        Ok(op.value)
    }
}

impl Service<Load> for SingleKeyStore {
    async fn call(&self, _op: Load) -> Result<u64, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.id as u64)
    }
}

pub fn proxy_over<R: InstanceRegistry>(registry: &Arc<R>, timeout: Duration) -> DeferredProxy<R> {
    DeferredProxy::new(registry.clone(), FILTER, timeout).unwrap()
}
