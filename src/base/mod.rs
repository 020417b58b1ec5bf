//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): network error codes in the style of
//!   Chromium's `net_error_list.h`
//! - [`IoResultExt`](context::IoResultExt): context helpers for IO results

pub mod context;
pub mod neterror;
