//! Dialers and the proxy facade.
//!
//! - [`dialer`]: the `Dialer` capability and `Network` selector
//! - [`registry`]: scheme → dialer factory map
//! - [`proxy`]: `Proxy` value pairing a URL with its dialer
//! - [`direct`]: plain TCP/UDP dialer, the default forwarding hop
//! - [`stream`]: connection handles returned by dialers

pub mod dialer;
pub mod direct;
pub mod proxy;
pub mod registry;
pub mod stream;

pub use dialer::{Dialer, Dialing, Network, SharedDialer};
pub use direct::DirectDialer;
pub use proxy::{Proxy, ProxyBuilder};
pub use registry::{DialerFactory, DialerRegistry, DIRECT_SCHEME};
pub use stream::{BoxedSocket, StreamSocket, UdpStream};
