//! The dialer capability.
//!
//! A [`Dialer`] establishes a connection given a network and a `host:port`
//! address. The registry, the proxy facade and the direct dialer all depend
//! only on this trait, never on concrete proxy protocols.

use super::stream::BoxedSocket;
use crate::base::neterror::NetError;
use futures::future::BoxFuture;
use std::{fmt, net::SocketAddr, str::FromStr, sync::Arc};

/// Transport selector, named after the conventional network identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// TCP over IPv4 or IPv6
    Tcp,
    /// TCP over IPv4 only
    Tcp4,
    /// TCP over IPv6 only
    Tcp6,
    /// UDP over IPv4 or IPv6
    Udp,
    /// UDP over IPv4 only
    Udp4,
    /// UDP over IPv6 only
    Udp6,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Tcp => "tcp",
            Network::Tcp4 => "tcp4",
            Network::Tcp6 => "tcp6",
            Network::Udp => "udp",
            Network::Udp4 => "udp4",
            Network::Udp6 => "udp6",
        }
    }

    pub fn is_tcp(&self) -> bool {
        matches!(self, Network::Tcp | Network::Tcp4 | Network::Tcp6)
    }

    pub fn is_udp(&self) -> bool {
        !self.is_tcp()
    }

    /// Whether `addr` belongs to an address family this network may use.
    pub fn accepts(&self, addr: &SocketAddr) -> bool {
        match self {
            Network::Tcp | Network::Udp => true,
            Network::Tcp4 | Network::Udp4 => addr.is_ipv4(),
            Network::Tcp6 | Network::Udp6 => addr.is_ipv6(),
        }
    }
}

impl FromStr for Network {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Network::Tcp),
            "tcp4" => Ok(Network::Tcp4),
            "tcp6" => Ok(Network::Tcp6),
            "udp" => Ok(Network::Udp),
            "udp4" => Ok(Network::Udp4),
            "udp6" => Ok(Network::Udp6),
            other => Err(NetError::UnsupportedNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Future returned by [`Dialer::dial`].
pub type Dialing<'a> = BoxFuture<'a, Result<BoxedSocket, NetError>>;

/// Something that can open a connection.
///
/// Implementations must be thread-safe: one dialer is shared by every
/// connection made through a [`Proxy`](super::Proxy).
///
/// # Example
///
/// ```rust,ignore
/// use dialnet::socket::{Dialer, Dialing, Network};
///
/// struct Refuse;
///
/// impl Dialer for Refuse {
///     fn dial<'a>(&'a self, _network: Network, _addr: &'a str) -> Dialing<'a> {
///         Box::pin(async { Err(NetError::ConnectionRefused) })
///     }
/// }
/// ```
pub trait Dialer: Send + Sync {
    /// Connects to `addr` (a `host:port` string) over `network`.
    fn dial<'a>(&'a self, network: Network, addr: &'a str) -> Dialing<'a>;
}

impl<D: Dialer + ?Sized> Dialer for Arc<D> {
    fn dial<'a>(&'a self, network: Network, addr: &'a str) -> Dialing<'a> {
        (**self).dial(network, addr)
    }
}

impl<D: Dialer + ?Sized> Dialer for Box<D> {
    fn dial<'a>(&'a self, network: Network, addr: &'a str) -> Dialing<'a> {
        (**self).dial(network, addr)
    }
}

/// A dialer shared between the registry, factories and proxies.
pub type SharedDialer = Arc<dyn Dialer>;

impl fmt::Debug for dyn Dialer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialer").finish_non_exhaustive()
    }
}
