//! Admin console API
//!
//! Endpoint wrappers used by the administrative console. The console
//! talks to a few endpoints that answer without an envelope, so its
//! dispatcher runs in compat mode.

mod client;
pub mod request;
pub mod response;

pub use client::*;
pub use request::*;
pub use response::*;
