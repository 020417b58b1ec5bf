//! The direct dialer: a plain connection with no proxy in between.
//!
//! Used as the default forwarding dialer for every factory, and as the
//! dialer behind the built-in `direct` scheme.

use super::dialer::{Dialer, Dialing, Network, SharedDialer};
use super::stream::{BoxedSocket, UdpStream};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::dns::{GaiResolver, Name, Resolve, SocketAddrs};
use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::{Arc, LazyLock};
use tokio::net::{TcpStream, UdpSocket};

static DIRECT: LazyLock<SharedDialer> = LazyLock::new(|| Arc::new(DirectDialer::new()));

/// Connects straight to the target: DNS -> TCP connect or UDP bind+connect.
#[derive(Clone)]
pub struct DirectDialer {
    resolver: Arc<dyn Resolve>,
}

impl DirectDialer {
    /// Direct dialer using the system resolver.
    pub fn new() -> Self {
        Self::with_resolver(Arc::new(GaiResolver::new()))
    }

    /// Direct dialer resolving host names through `resolver`.
    pub fn with_resolver(resolver: Arc<dyn Resolve>) -> Self {
        Self { resolver }
    }

    /// The process-wide instance handed to factories as forwarding dialer.
    pub fn shared() -> SharedDialer {
        Arc::clone(&DIRECT)
    }

    async fn lookup(
        &self,
        network: Network,
        host: &str,
        port: u16,
    ) -> Result<Vec<SocketAddr>, NetError> {
        let candidates: Vec<SocketAddr> = match SocketAddrs::try_parse(host, port) {
            Some(literal) => literal.collect(),
            None => self
                .resolver
                .resolve(Name::new(host))
                .await?
                .map(|addr| SocketAddr::new(addr.ip(), port))
                .collect(),
        };

        let addrs: Vec<SocketAddr> =
            candidates.into_iter().filter(|a| network.accepts(a)).collect();
        if addrs.is_empty() {
            tracing::debug!(host, %network, "no address of a usable family");
            return Err(NetError::AddressUnreachable);
        }
        Ok(addrs)
    }

    async fn connect_tcp(
        addrs: &[SocketAddr],
        host: &str,
        port: u16,
    ) -> Result<BoxedSocket, NetError> {
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        tracing::debug!(%addr, error = %e, "failed to set TCP_NODELAY");
                    }
                    tracing::debug!(%addr, "direct TCP connection established");
                    return Ok(BoxedSocket::new(stream));
                }
                Err(e) => {
                    tracing::trace!(%addr, error = %e, "TCP connect attempt failed");
                    last_err = Some(e);
                }
            }
        }
        let err = last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::AddrNotAvailable));
        Err::<BoxedSocket, _>(err).connection_context(host, port)
    }

    async fn connect_udp(
        addrs: &[SocketAddr],
        host: &str,
        port: u16,
    ) -> Result<BoxedSocket, NetError> {
        let mut last_err = None;
        for addr in addrs {
            let local = if addr.is_ipv4() {
                SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 0)
            } else {
                SocketAddr::new(Ipv6Addr::UNSPECIFIED.into(), 0)
            };
            let socket = UdpSocket::bind(local).await.socket_context()?;
            match socket.connect(addr).await {
                Ok(()) => {
                    tracing::debug!(%addr, "direct UDP socket connected");
                    return Ok(BoxedSocket::new(UdpStream::new(socket)));
                }
                Err(e) => {
                    tracing::trace!(%addr, error = %e, "UDP connect attempt failed");
                    last_err = Some(e);
                }
            }
        }
        let err = last_err.unwrap_or_else(|| io::Error::from(io::ErrorKind::AddrNotAvailable));
        Err::<BoxedSocket, _>(err).connection_context(host, port)
    }
}

impl Default for DirectDialer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DirectDialer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectDialer").finish_non_exhaustive()
    }
}

impl Dialer for DirectDialer {
    fn dial<'a>(&'a self, network: Network, addr: &'a str) -> Dialing<'a> {
        Box::pin(async move {
            let (host, port) = split_host_port(addr)?;
            let addrs = self.lookup(network, host, port).await?;
            if network.is_tcp() {
                Self::connect_tcp(&addrs, host, port).await
            } else {
                Self::connect_udp(&addrs, host, port).await
            }
        })
    }
}

/// Splits `host:port`, accepting `[v6]:port` for IPv6 literals.
pub fn split_host_port(addr: &str) -> Result<(&str, u16), NetError> {
    let (host, port) = addr.rsplit_once(':').ok_or(NetError::AddressInvalid)?;
    let port = port.parse::<u16>().map_err(|_| NetError::AddressInvalid)?;

    let host = match host.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']').ok_or(NetError::AddressInvalid)?,
        // An unbracketed colon means an IPv6 literal missing its brackets
        None if host.contains(':') => return Err(NetError::AddressInvalid),
        None => host,
    };

    if host.is_empty() {
        return Err(NetError::AddressInvalid);
    }
    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("example.com:80").unwrap(), ("example.com", 80));
        assert_eq!(split_host_port("1.2.3.4:1080").unwrap(), ("1.2.3.4", 1080));
        assert_eq!(split_host_port("[::1]:443").unwrap(), ("::1", 443));
    }

    #[test]
    fn test_split_host_port_rejects_malformed() {
        for bad in ["example.com", "example.com:http", ":80", "::1:443", "[::1:443", "host:70000"] {
            assert!(
                matches!(split_host_port(bad), Err(NetError::AddressInvalid)),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_shared_is_process_wide() {
        let a = DirectDialer::shared();
        let b = DirectDialer::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_family_mismatch_is_unreachable() {
        let dialer = DirectDialer::new();
        let err = dialer.dial(Network::Tcp6, "127.0.0.1:9").await.unwrap_err();
        assert!(matches!(err, NetError::AddressUnreachable));
    }
}
