//! Tower integration for standby.
//!
//! [`ProxyService`] exposes a [`DeferredProxy`] as a `tower::Service` for
//! every operation its instance type serves, so tower middleware (timeouts,
//! rate limits, retries) can wrap proxied calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use standby::tower_service::ProxyService;
//! use tower::ServiceExt;
//!
//! let service = ProxyService::new(proxy);
//! let greeting = service.oneshot(SayHello).await?;
//! ```

use crate::{BoxError, DeferredProxy, InstanceRegistry, Operation, Service};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

/// Wraps a [`DeferredProxy`] as a tower `Service`.
pub struct ProxyService<R> {
    proxy: Arc<DeferredProxy<R>>,
}

impl<R> ProxyService<R> {
    /// Create a new `ProxyService` wrapping the given proxy.
    pub fn new(proxy: DeferredProxy<R>) -> Self {
        Self::from_shared(Arc::new(proxy))
    }

    /// Create a `ProxyService` over a proxy that is shared elsewhere.
    pub fn from_shared(proxy: Arc<DeferredProxy<R>>) -> Self {
        Self { proxy }
    }

    /// Get a reference to the inner proxy.
    pub fn inner(&self) -> &DeferredProxy<R> {
        &self.proxy
    }
}

impl<R> Clone for ProxyService<R> {
    fn clone(&self) -> Self {
        Self {
            proxy: Arc::clone(&self.proxy),
        }
    }
}

impl<R, Op> ::tower::Service<Op> for ProxyService<R>
where
    Op: Operation,
    R: InstanceRegistry,
    R::Instance: Service<Op>,
{
    type Response = Op::Output;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Availability is resolved per call, so the proxy is always ready
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Op) -> Self::Future {
        let proxy = Arc::clone(&self.proxy);
        Box::pin(async move { proxy.invoke(op).await })
    }
}
