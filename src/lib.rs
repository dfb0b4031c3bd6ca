//! ojfront - Online Judge Front End Client
//!
//! Typed client for the online judge REST backend, shared by the admin
//! console and the contestant-facing judge, plus the admin console's route
//! table.
//!
//! # Features
//!
//! - `{error, data}` envelope normalization with one notification per call
//! - Session-expiry detection that opens the login dialog
//! - CSRF cookie mirrored into the request header
//! - Admin route table with reverse routing
//!
//! # Architecture
//!
//! - **Endpoint wrappers** (`admin`, `oj`): one method per backend call
//! - **Dispatcher**: envelope rules and notifications
//! - **Transport**: the HTTP client behind a trait
//! - **Models**: backend records

pub mod admin;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod models;
pub mod notify;
pub mod oj;
pub mod params;
pub mod router;
pub mod transport;
pub mod version;
pub mod views;

// Re-export commonly used types
pub use admin::AdminApi;
pub use config::Config;
pub use dispatcher::Dispatcher;
pub use envelope::{Envelope, EnvelopeMode};
pub use error::{ClientError, ClientResult};
pub use notify::{Notifier, StoreDispatch, UiAction};
pub use oj::OjApi;
pub use params::QueryParams;
pub use router::RouteTable;
pub use transport::{ApiRequest, HttpTransport, Transport};
