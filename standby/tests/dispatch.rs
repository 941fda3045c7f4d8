//! Resolve-wait-dispatch-fallback behaviour of the proxy.

use standby::{
    DeferredProxy, ProxyError, SlotRegistry,
    policies::{FailFast, Ignore, LoggingPolicy, policy_fn},
    testing::{
        Fail, Greet, Greeter, GreeterError, RecordingPolicy, SayHello, ScriptedRegistry,
        WaitBehavior, is_no_instance, is_service_unavailable,
    },
};
use std::{io, sync::Arc, time::Duration};
use tokio::time::Instant;

mod common;
use common::{FILTER, Load, SingleKeyStore, Store, proxy_over};

#[tokio::test]
async fn test_present_instance_zero_timeout() {
    let greeter = Arc::new(Greeter::new("hello"));
    let registry = Arc::new(ScriptedRegistry::with_current(greeter.clone()));
    let proxy = proxy_over(&registry, Duration::ZERO);

    let started = Instant::now();
    let greeting = proxy.invoke(SayHello).await.unwrap();

    assert_eq!(greeting, "hello");
    assert!(started.elapsed() < Duration::from_millis(20));
    assert_eq!(registry.await_calls(), 0);
    assert_eq!(greeter.calls(), 1);
}

#[tokio::test]
async fn test_absent_instance_default_policy_waits_then_fails() {
    let registry = Arc::new(ScriptedRegistry::<Greeter>::new());
    let proxy = proxy_over(&registry, Duration::from_millis(50));

    let started = Instant::now();
    let err = proxy.invoke(SayHello).await.unwrap_err();
    let waited = started.elapsed();

    assert!(is_service_unavailable(&err));
    assert_eq!(
        err.downcast_ref::<ProxyError>(),
        Some(&ProxyError::ServiceUnavailable {
            filter: FILTER.to_string(),
            operation: "sayHello",
            arguments: "SayHello".to_string(),
            timeout: Duration::from_millis(50),
        })
    );
    assert!(waited >= Duration::from_millis(50), "waited {waited:?}");
    assert!(waited < Duration::from_millis(500), "waited {waited:?}");
}

#[tokio::test]
async fn test_non_raising_policy_ends_in_no_instance() {
    let registry = Arc::new(ScriptedRegistry::<Greeter>::new());
    let proxy = proxy_over(&registry, Duration::from_millis(5));
    proxy.set_unavailability_policy(Arc::new(LoggingPolicy::new(Ignore)));

    let err = proxy.invoke(SayHello).await.unwrap_err();

    assert!(is_no_instance(&err));
}

#[tokio::test]
async fn test_policy_called_once_with_call_details() {
    let registry = Arc::new(ScriptedRegistry::<Greeter>::new());
    let proxy = proxy_over(&registry, Duration::from_millis(5));
    let policy = RecordingPolicy::failing();
    proxy.set_unavailability_policy(Arc::new(policy.clone()));

    let err = proxy
        .invoke(Greet {
            name: "grace".to_string(),
        })
        .await
        .unwrap_err();

    assert!(is_service_unavailable(&err));
    let records = policy.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].filter, FILTER);
    assert_eq!(records[0].operation, "greet");
    assert_eq!(records[0].arguments, r#"Greet { name: "grace" }"#);
    assert_eq!(records[0].timeout, Duration::from_millis(5));
}

#[tokio::test]
async fn test_awaited_instance_skips_policy() {
    let registry = Arc::new(ScriptedRegistry::with_awaited(Arc::new(Greeter::new("hey"))));
    let proxy = proxy_over(&registry, Duration::from_millis(100));
    let policy = RecordingPolicy::failing();
    proxy.set_unavailability_policy(Arc::new(policy.clone()));

    let greeting = proxy.invoke(SayHello).await.unwrap();

    assert_eq!(greeting, "hey");
    assert_eq!(registry.await_calls(), 1);
    assert_eq!(policy.count(), 0);
}

#[tokio::test]
async fn test_policy_error_is_returned_unchanged() {
    let registry = Arc::new(ScriptedRegistry::<Greeter>::new());
    let proxy = proxy_over(&registry, Duration::ZERO);
    proxy.set_unavailability_policy(Arc::new(policy_fn(|_| {
        Err(io::Error::new(io::ErrorKind::TimedOut, "alerted").into())
    })));

    let err = proxy.invoke(SayHello).await.unwrap_err();

    let io_err = err.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::TimedOut);
    assert_eq!(io_err.to_string(), "alerted");
}

#[tokio::test]
async fn test_delegate_error_keeps_identity() {
    let registry = Arc::new(SlotRegistry::with_instance(Arc::new(SingleKeyStore::new(1, "a"))));
    let proxy = proxy_over(&registry, Duration::ZERO);

    let err = proxy
        .invoke(Store {
            key: "b".to_string(),
            value: 3,
        })
        .await
        .unwrap_err();

    let io_err = err.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    assert_eq!(err.to_string(), "unknown key b");
}

#[tokio::test]
async fn test_delegate_error_from_thiserror_type() {
    let registry = Arc::new(ScriptedRegistry::with_current(Arc::new(Greeter::new("hi"))));
    let proxy = proxy_over(&registry, Duration::ZERO);

    let err = proxy
        .invoke(Fail {
            message: "nope".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "greeter refused: nope");
    assert!(err.downcast_ref::<GreeterError>().is_some());
}

#[tokio::test]
async fn test_policy_side_effect_can_publish_instance() {
    let registry = Arc::new(SlotRegistry::<SingleKeyStore>::new());
    let proxy = proxy_over(&registry, Duration::ZERO);
    let publisher = registry.clone();
    proxy.set_unavailability_policy(Arc::new(policy_fn(move |_| {
        publisher.publish(Arc::new(SingleKeyStore::new(9, "a")));
        Ok(())
    })));

    let id = proxy
        .invoke(Load {
            key: "a".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(id, 9);
}

#[tokio::test]
async fn test_stalling_registry_is_bounded_by_timeout() {
    let registry = Arc::new(ScriptedRegistry::<Greeter>::new());
    registry.set_wait_behavior(WaitBehavior::Stall);
    let proxy = proxy_over(&registry, Duration::from_millis(30));

    let started = Instant::now();
    let err = proxy.invoke(SayHello).await.unwrap_err();
    let waited = started.elapsed();

    assert!(is_service_unavailable(&err));
    assert!(waited >= Duration::from_millis(30), "waited {waited:?}");
    assert!(waited < Duration::from_millis(500), "waited {waited:?}");
}

#[tokio::test]
async fn test_setting_same_policy_repeatedly() {
    let registry = Arc::new(ScriptedRegistry::<Greeter>::new());
    let proxy = proxy_over(&registry, Duration::ZERO);
    let policy = RecordingPolicy::new();
    let shared: Arc<dyn standby::DynUnavailabilityPolicy> = Arc::new(policy.clone());

    for _ in 0..3 {
        proxy.set_unavailability_policy(shared.clone());
    }
    let err = proxy.invoke(SayHello).await.unwrap_err();

    assert!(is_no_instance(&err));
    assert_eq!(policy.count(), 1);
    assert!(Arc::ptr_eq(&proxy.unavailability_policy().unwrap(), &shared));
}

#[tokio::test]
async fn test_explicit_fail_fast_matches_default() {
    let registry = Arc::new(ScriptedRegistry::<Greeter>::new());
    let with_default: DeferredProxy<_> = proxy_over(&registry, Duration::ZERO);
    let with_explicit: DeferredProxy<_> = proxy_over(&registry, Duration::ZERO);
    with_explicit.set_unavailability_policy(Arc::new(FailFast));

    let a = with_default.invoke(SayHello).await.unwrap_err();
    let b = with_explicit.invoke(SayHello).await.unwrap_err();

    assert_eq!(
        a.downcast_ref::<ProxyError>(),
        b.downcast_ref::<ProxyError>()
    );
}

#[test]
fn test_empty_filter_rejected() {
    let registry = Arc::new(SlotRegistry::<Greeter>::new());
    let err = DeferredProxy::new(registry, "", Duration::from_millis(10)).unwrap_err();
    assert_eq!(
        err,
        ProxyError::InvalidConfiguration("the filter parameter cannot be empty".to_string())
    );
}
