//! Ergonomic error context helpers.
//!
//! Extension traits that turn `io::Error` results from socket and resolver
//! calls into context-rich `NetError` variants.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Attach the endpoint a connect attempt was made to.
    ///
    /// # Example
    /// ```ignore
    /// use dialnet::base::context::IoResultExt;
    ///
    /// let stream = TcpStream::connect(addr).await
    ///     .connection_context("example.com", 443)?;
    /// // Error: "Connection to example.com:443 failed: connection refused"
    /// ```
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError>;

    /// Attach the domain a lookup was made for.
    fn dns_context(self, domain: &str) -> Result<T, NetError>;

    /// Classify the error by kind only, for local socket setup calls.
    fn socket_context(self) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| NetError::connection_failed_to(host, port, e))
    }

    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| NetError::dns_failed(domain, e))
    }

    fn socket_context(self) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::trace!(error = %e, "socket setup failed");
            NetError::from_io_kind(e.kind())
        })
    }
}
