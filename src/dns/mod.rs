//! DNS Resolution Module
//!
//! Pluggable host name resolution for the direct dialer:
//! - System resolver (getaddrinfo via thread pool)
//! - Async hickory-dns resolver
//! - Static host-to-address overrides
//!
//! # Example
//!
//! ```rust,ignore
//! use dialnet::dns::{HickoryResolver, Name, Resolve};
//!
//! let resolver = HickoryResolver::new();
//! let addrs = resolver.resolve(Name::new("example.com")).await?;
//! ```

mod gai;
mod hickory;
mod resolve;

pub use gai::{GaiResolver, SocketAddrs};
pub use hickory::HickoryResolver;
pub use resolve::{Addrs, DnsResolverWithOverrides, Name, Resolve, Resolving};
