//! Judge front end API
//!
//! Endpoint wrappers used by contestants. Every endpoint here answers with
//! an envelope, so the dispatcher runs in strict mode and opens the login
//! dialog when the backend reports an expired session.

mod client;
pub mod request;

pub use client::*;
pub use request::*;
