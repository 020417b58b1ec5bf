//! Core DNS resolution types and traits.
//!
//! The direct dialer resolves host names through the `Resolve` trait, so the
//! lookup strategy can be swapped without touching dial logic.

use crate::base::neterror::NetError;
use std::{collections::HashMap, fmt, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

/// A host name to resolve into IP addresses.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the host name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for an `Iterator` trait object over `SocketAddr`.
pub type Addrs = Box<dyn Iterator<Item = SocketAddr> + Send>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, NetError>> + Send>>;

/// Trait for DNS resolution.
///
/// Implementations must be thread-safe; a single resolver is shared by every
/// dial made through a [`DirectDialer`](crate::socket::DirectDialer).
///
/// Returned addresses carry port 0. Callers set the port of the target.
pub trait Resolve: Send + Sync {
    /// Resolves a host name to IP addresses.
    fn resolve(&self, name: Name) -> Resolving;
}

impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

/// Resolver that answers selected host names from a fixed table.
///
/// Names missing from the table fall through to the inner resolver. Handy
/// for tests and for pinning a proxy host to a known address.
///
/// ```rust,ignore
/// use dialnet::dns::{DnsResolverWithOverrides, GaiResolver};
///
/// let resolver = DnsResolverWithOverrides::new(Arc::new(GaiResolver::new()))
///     .with_override("proxy.internal", vec!["10.0.0.8:0".parse().unwrap()]);
/// ```
pub struct DnsResolverWithOverrides {
    inner: Arc<dyn Resolve>,
    overrides: Arc<HashMap<String, Vec<SocketAddr>>>,
}

impl DnsResolverWithOverrides {
    /// Creates a resolver with an empty override table.
    pub fn new(inner: Arc<dyn Resolve>) -> Self {
        Self {
            inner,
            overrides: Arc::new(HashMap::new()),
        }
    }

    /// Adds (or replaces) the addresses returned for `host`.
    ///
    /// Host names are matched case-insensitively.
    pub fn with_override(mut self, host: &str, addrs: Vec<SocketAddr>) -> Self {
        Arc::make_mut(&mut self.overrides).insert(host.to_ascii_lowercase(), addrs);
        self
    }

    /// Returns the number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Resolve for DnsResolverWithOverrides {
    fn resolve(&self, name: Name) -> Resolving {
        if let Some(addrs) = self.overrides.get(&name.as_str().to_ascii_lowercase()) {
            tracing::trace!(host = %name, count = addrs.len(), "DNS override hit");
            let addrs: Addrs = Box::new(addrs.clone().into_iter());
            return Box::pin(std::future::ready(Ok(addrs)));
        }
        self.inner.resolve(name)
    }
}

impl fmt::Debug for DnsResolverWithOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsResolverWithOverrides")
            .field("override_count", &self.overrides.len())
            .finish_non_exhaustive()
    }
}
