//! Scheme-to-dialer registry.
//!
//! Proxy protocol implementations register a factory under their URL scheme;
//! [`Proxy::from_url`](super::Proxy::from_url) then builds a dialer for any
//! URL whose scheme has a factory. New protocols plug in without touching
//! this crate.
//!
//! Registration and lookup may interleave across threads: the table is a
//! `DashMap`, and a factory is cloned out of it before being invoked.

use super::dialer::SharedDialer;
use crate::base::neterror::NetError;
use dashmap::DashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};
use url::Url;

/// Scheme of the built-in pass-through factory.
pub const DIRECT_SCHEME: &str = "direct";

/// Builds a dialer from a proxy URL and the dialer used to reach the proxy.
pub type DialerFactory =
    Arc<dyn Fn(&Url, SharedDialer) -> Result<SharedDialer, NetError> + Send + Sync>;

static GLOBAL: LazyLock<DialerRegistry> = LazyLock::new(DialerRegistry::with_defaults);

/// Thread-safe map from URL scheme to [`DialerFactory`].
///
/// Clones share the same table.
#[derive(Clone, Default)]
pub struct DialerRegistry {
    factories: Arc<DashMap<String, DialerFactory>>,
}

impl DialerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `direct` scheme.
    ///
    /// `direct://` resolves to the forwarding dialer itself.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(DIRECT_SCHEME, |_url, forward| Ok(forward));
        registry
    }

    /// The process-wide registry used by [`Proxy::from_url`](super::Proxy::from_url).
    pub fn global() -> &'static DialerRegistry {
        &GLOBAL
    }

    /// Registers `factory` for `scheme`, replacing any previous factory.
    ///
    /// Schemes are matched exactly. URLs parsed by `url::Url` always carry a
    /// lowercase scheme, so register lowercase names.
    pub fn register<F>(&self, scheme: impl Into<String>, factory: F)
    where
        F: Fn(&Url, SharedDialer) -> Result<SharedDialer, NetError> + Send + Sync + 'static,
    {
        let scheme = scheme.into();
        if self.factories.insert(scheme.clone(), Arc::new(factory)).is_some() {
            tracing::debug!(scheme = %scheme, "replaced dialer factory");
        } else {
            tracing::trace!(scheme = %scheme, "registered dialer factory");
        }
    }

    /// Builds the dialer for `url` with the factory registered for its scheme.
    ///
    /// The factory's result, success or failure, is returned unchanged.
    pub fn resolve(&self, url: &Url, forward: SharedDialer) -> Result<SharedDialer, NetError> {
        let scheme = url.scheme();
        // Release the map guard before running user code
        let factory = self.factories.get(scheme).map(|entry| Arc::clone(entry.value()));

        match factory {
            Some(factory) => {
                tracing::trace!(scheme, "resolving dialer");
                factory(url, forward)
            }
            None => {
                tracing::debug!(scheme, "no dialer factory for scheme");
                Err(NetError::UnknownUrlScheme(scheme.to_string()))
            }
        }
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.factories.contains_key(scheme)
    }

    /// Registered schemes, sorted.
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        schemes.sort();
        schemes
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for DialerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialerRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::socket::dialer::{Dialer, Dialing, Network};

    struct Refusing;

    impl Dialer for Refusing {
        fn dial<'a>(&'a self, _network: Network, _addr: &'a str) -> Dialing<'a> {
            Box::pin(async { Err(NetError::ConnectionRefused) })
        }
    }

    #[test]
    fn test_new_is_empty() {
        let registry = DialerRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains(DIRECT_SCHEME));
    }

    #[test]
    fn test_defaults_contain_direct() {
        let registry = DialerRegistry::with_defaults();
        assert_eq!(registry.schemes(), vec!["direct".to_string()]);
    }

    #[test]
    fn test_direct_factory_returns_forward() {
        let registry = DialerRegistry::with_defaults();
        let forward: SharedDialer = Arc::new(Refusing);
        let url = Url::parse("direct://").unwrap();

        let dialer = registry.resolve(&url, Arc::clone(&forward)).unwrap();
        assert!(Arc::ptr_eq(&dialer, &forward));
    }

    #[test]
    fn test_clones_share_table() {
        let registry = DialerRegistry::new();
        let clone = registry.clone();
        clone.register("x", |_url, forward| Ok(forward));
        assert!(registry.contains("x"));
    }

    #[test]
    fn test_global_has_defaults() {
        assert!(DialerRegistry::global().contains(DIRECT_SCHEME));
        assert!(std::ptr::eq(DialerRegistry::global(), DialerRegistry::global()));
    }
}
