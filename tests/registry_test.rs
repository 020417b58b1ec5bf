//! Dialer Registry Tests
//!
//! Covers:
//! - Factory dispatch by scheme (called once, result unchanged)
//! - Unknown schemes
//! - Overwriting registrations
//! - Concurrent registration and lookup

use dialnet::base::neterror::NetError;
use dialnet::socket::{Dialer, DialerRegistry, Dialing, Network, SharedDialer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use url::Url;

/// Dialer that only reports which instance it is.
struct Tagged(&'static str);

impl Dialer for Tagged {
    fn dial<'a>(&'a self, _network: Network, _addr: &'a str) -> Dialing<'a> {
        let tag = self.0;
        Box::pin(async move { Err(NetError::invalid_proxy_config(tag, "tagged dialer")) })
    }
}

fn tagged(tag: &'static str) -> SharedDialer {
    Arc::new(Tagged(tag))
}

async fn tag_of(dialer: &SharedDialer) -> String {
    match dialer.dial(Network::Tcp, "example.com:80").await {
        Err(NetError::InvalidProxyConfig { scheme, .. }) => scheme,
        other => panic!("Expected tagged dialer, got {other:?}"),
    }
}

#[test]
fn test_resolve_invokes_factory_once_with_inputs() {
    let registry = DialerRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen: Arc<Mutex<Option<(Url, SharedDialer)>>> = Arc::new(Mutex::new(None));
    let produced = tagged("produced");

    {
        let calls = Arc::clone(&calls);
        let seen = Arc::clone(&seen);
        let produced = Arc::clone(&produced);
        registry.register("socks5", move |url: &Url, forward: SharedDialer| {
            calls.fetch_add(1, Ordering::SeqCst);
            *seen.lock().unwrap() = Some((url.clone(), forward));
            Ok(Arc::clone(&produced))
        });
    }

    let url = Url::parse("socks5://1.2.3.4:1080").unwrap();
    let forward = tagged("forward");
    let dialer = registry.resolve(&url, Arc::clone(&forward)).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&dialer, &produced));

    let (seen_url, seen_forward) = seen.lock().unwrap().take().unwrap();
    assert_eq!(seen_url, url);
    assert!(Arc::ptr_eq(&seen_forward, &forward));
}

#[test]
fn test_factory_error_is_returned_unchanged() {
    let registry = DialerRegistry::new();
    registry.register("http", |url: &Url, _forward: SharedDialer| {
        Err(NetError::invalid_proxy_config(url.scheme(), "missing port"))
    });

    let url = Url::parse("http://proxy.example.com").unwrap();
    let err = registry.resolve(&url, tagged("forward")).unwrap_err();

    match err {
        NetError::InvalidProxyConfig { scheme, reason } => {
            assert_eq!(scheme, "http");
            assert_eq!(reason, "missing port");
        }
        other => panic!("Expected InvalidProxyConfig, got {other:?}"),
    }
}

#[test]
fn test_unknown_scheme_has_no_side_effects() {
    let registry = DialerRegistry::new();
    let calls = Arc::new(AtomicUsize::new(0));
    {
        let calls = Arc::clone(&calls);
        registry.register("socks5", move |_url: &Url, forward: SharedDialer| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(forward)
        });
    }

    let url = Url::parse("foo://1.2.3.4:1080").unwrap();
    let err = registry.resolve(&url, tagged("forward")).unwrap_err();

    assert!(matches!(&err, NetError::UnknownUrlScheme(s) if s == "foo"));
    assert!(err.to_string().contains("foo"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(registry.schemes(), vec!["socks5".to_string()]);
}

#[tokio::test]
async fn test_reregistration_overwrites() {
    let registry = DialerRegistry::new();
    let first = tagged("first");
    let second = tagged("second");

    {
        let first = Arc::clone(&first);
        registry.register("x", move |_url: &Url, _forward: SharedDialer| Ok(Arc::clone(&first)));
    }
    {
        let second = Arc::clone(&second);
        registry.register("x", move |_url: &Url, _forward: SharedDialer| Ok(Arc::clone(&second)));
    }

    assert_eq!(registry.len(), 1);
    let url = Url::parse("x://host:1").unwrap();
    let dialer = registry.resolve(&url, tagged("forward")).unwrap();
    assert_eq!(tag_of(&dialer).await, "second");
}

#[test]
fn test_scheme_match_is_exact() {
    let registry = DialerRegistry::new();
    registry.register("SOCKS5", |_url: &Url, forward: SharedDialer| Ok(forward));

    // Url lowercases the scheme, so an uppercase registration never matches
    let url = Url::parse("SOCKS5://1.2.3.4:1080").unwrap();
    assert_eq!(url.scheme(), "socks5");
    assert!(matches!(
        registry.resolve(&url, tagged("forward")),
        Err(NetError::UnknownUrlScheme(s)) if s == "socks5"
    ));
}

#[test]
fn test_factory_may_touch_registry() {
    let registry = DialerRegistry::new();
    let inner = registry.clone();
    registry.register("lazy", move |_url: &Url, forward: SharedDialer| {
        // Registering from inside a factory must not deadlock
        inner.register("late", |_url: &Url, forward: SharedDialer| Ok(forward));
        Ok(forward)
    });

    let url = Url::parse("lazy://host:1").unwrap();
    assert!(registry.resolve(&url, tagged("forward")).is_ok());
    assert!(registry.contains("late"));
}

#[test]
fn test_concurrent_register_and_resolve() {
    let registry = DialerRegistry::with_defaults();
    let url = Url::parse("direct://").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            let url = url.clone();
            thread::spawn(move || {
                for j in 0..100 {
                    registry.register(format!("s{i}-{j}"), |_url: &Url, f: SharedDialer| Ok(f));
                    assert!(registry.resolve(&url, tagged("forward")).is_ok());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 1 + 8 * 100);
}
