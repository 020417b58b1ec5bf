use super::dialer::{Dialer, Dialing, Network, SharedDialer};
use super::direct::DirectDialer;
use super::registry::DialerRegistry;
use super::stream::BoxedSocket;
use crate::base::neterror::NetError;
use std::fmt;
use url::Url;

/// A proxy URL bound to the dialer resolved for it.
///
/// Immutable once built. Cloning shares the dialer.
#[derive(Clone)]
pub struct Proxy {
    url: Url,
    dialer: SharedDialer,
}

impl Proxy {
    /// Wrap an already-resolved dialer.
    pub fn new(url: Url, dialer: SharedDialer) -> Self {
        Self { url, dialer }
    }

    /// Parse `raw`, resolve its scheme in the global registry with the direct
    /// dialer as forwarding hop, and wrap the result.
    ///
    /// A URL that fails to parse is never looked up.
    pub fn from_url(raw: &str) -> Result<Self, NetError> {
        ProxyBuilder::new(raw).build()
    }

    /// Start configuring a proxy for `raw`.
    pub fn builder(raw: &str) -> ProxyBuilder {
        ProxyBuilder::new(raw)
    }

    /// Connect to `addr` through the wrapped dialer.
    ///
    /// Pure delegation: no retry, no timeout, errors returned unchanged.
    pub async fn dial(&self, network: Network, addr: &str) -> Result<BoxedSocket, NetError> {
        self.dialer.dial(network, addr).await
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn dialer(&self) -> &SharedDialer {
        &self.dialer
    }

    pub fn into_parts(self) -> (Url, SharedDialer) {
        (self.url, self.dialer)
    }

    /// The URL with any password masked, for logs.
    pub fn redacted_url(&self) -> String {
        if self.url.password().is_none() {
            return self.url.to_string();
        }
        let mut url = self.url.clone();
        // Only fails for URLs that cannot carry credentials at all
        let _ = url.set_password(Some("***"));
        url.to_string()
    }
}

/// A proxy can itself serve as the forwarding dialer of another factory.
impl Dialer for Proxy {
    fn dial<'a>(&'a self, network: Network, addr: &'a str) -> Dialing<'a> {
        self.dialer.dial(network, addr)
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("url", &self.redacted_url())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted_url())
    }
}

/// Builder for [`Proxy`].
///
/// Defaults to the global registry and the direct forwarding dialer, which
/// makes `ProxyBuilder::new(raw).build()` the same as `Proxy::from_url(raw)`.
pub struct ProxyBuilder {
    raw: String,
    registry: Option<DialerRegistry>,
    forward: Option<SharedDialer>,
}

impl ProxyBuilder {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            registry: None,
            forward: None,
        }
    }

    /// Resolve the scheme in `registry` instead of the global one.
    pub fn registry(mut self, registry: DialerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Reach the proxy through `forward` instead of a direct connection.
    ///
    /// Passing another [`Proxy`] here chains the two.
    pub fn forward(mut self, forward: SharedDialer) -> Self {
        self.forward = Some(forward);
        self
    }

    /// Parse, resolve and wrap.
    pub fn build(self) -> Result<Proxy, NetError> {
        let url = Url::parse(&self.raw).map_err(|e| {
            tracing::debug!(error = %e, "malformed proxy URL");
            NetError::invalid_url(&self.raw, e)
        })?;

        let registry = self.registry.as_ref().unwrap_or_else(|| DialerRegistry::global());
        let forward = self.forward.unwrap_or_else(DirectDialer::shared);
        let dialer = registry.resolve(&url, forward)?;

        Ok(Proxy::new(url, dialer))
    }
}

impl fmt::Debug for ProxyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyBuilder")
            .field("custom_registry", &self.registry.is_some())
            .field("custom_forward", &self.forward.is_some())
            .finish_non_exhaustive()
    }
}
