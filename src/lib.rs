//! # dialnet
//!
//! A pluggable proxy dialer registry for Rust.
//!
//! `dialnet` maps URL schemes to connection-establishment strategies
//! ("dialers") and wraps a parsed proxy URL together with the dialer resolved
//! for it. Concrete proxy protocols live outside this crate and register
//! themselves under their scheme; the crate itself only ships the `direct`
//! dialer used as the default forwarding hop.
//!
//! ## Features
//!
//! - **Open Registry**: any scheme, any factory, registered at runtime
//! - **Uniform Dialing**: one `Dialer` trait for TCP and UDP connections
//! - **Proxy Facade**: `Proxy::from_url` composes parse, resolve and wrap
//! - **Pluggable DNS**: system `getaddrinfo`, hickory-dns, or static overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dialnet::socket::{Network, Proxy};
//!
//! #[tokio::main]
//! async fn main() {
//!     let proxy = Proxy::from_url("direct://").unwrap();
//!     let socket = proxy.dial(Network::Tcp, "example.com:80").await.unwrap();
//! }
//! ```
//!
//! ## Registering a scheme
//!
//! ```rust,ignore
//! use dialnet::socket::DialerRegistry;
//!
//! DialerRegistry::global().register("socks5", |url, forward| {
//!     Ok(std::sync::Arc::new(MySocks5Dialer::new(url, forward)?))
//! });
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions and error context helpers
//! - [`dns`] - Host name resolution used by the direct dialer
//! - [`socket`] - Dialer trait, registry, proxy facade and connection handles

pub mod base;
pub mod dns;
pub mod socket;

pub use base::neterror::NetError;
pub use socket::{Dialer, DialerRegistry, Network, Proxy, ProxyBuilder};
