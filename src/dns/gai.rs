//! System DNS resolver using getaddrinfo.
//!
//! Runs `getaddrinfo` on tokio's blocking pool so lookups never stall the
//! async runtime. This is the resolver the direct dialer uses by default,
//! which keeps `/etc/hosts` and the system resolver configuration in effect.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::{
    io,
    net::{IpAddr, SocketAddr, ToSocketAddrs},
    vec,
};

/// System DNS resolver using `getaddrinfo` in a thread pool.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            let host = name.as_str().to_string();
            let domain = host.clone();

            let result = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, "resolving via getaddrinfo");
                (host.as_str(), 0u16)
                    .to_socket_addrs()
                    .map(|iter| iter.collect::<Vec<_>>())
            })
            .await;

            let addrs = result
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    NetError::NameNotResolved
                })?
                .dns_context(&domain)?;

            if addrs.is_empty() {
                return Err(NetError::dns_failed(
                    &domain,
                    io::Error::new(io::ErrorKind::NotFound, "No addresses returned by getaddrinfo"),
                ));
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "DNS resolution complete");
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}

/// Addresses for a host that needed no DNS lookup.
#[derive(Debug)]
pub struct SocketAddrs {
    addrs: vec::IntoIter<SocketAddr>,
}

impl SocketAddrs {
    /// Parses `host` as an IP literal.
    ///
    /// Returns `None` for host names, which need a resolver. IPv6 literals
    /// may be given with or without surrounding brackets.
    pub fn try_parse(host: &str, port: u16) -> Option<Self> {
        let bare = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        let ip = bare.parse::<IpAddr>().ok()?;
        Some(Self {
            addrs: vec![SocketAddr::new(ip, port)].into_iter(),
        })
    }

    /// Returns the number of addresses left.
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    /// Returns true if no addresses are left.
    pub fn is_empty(&self) -> bool {
        self.addrs.len() == 0
    }
}

impl Iterator for SocketAddrs {
    type Item = SocketAddr;

    fn next(&mut self) -> Option<Self::Item> {
        self.addrs.next()
    }
}
