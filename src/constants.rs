//! Application-wide constants
//!
//! This module contains all constant values used throughout the client.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// BACKEND DEFAULTS
// =============================================================================

/// Default backend origin when `OJ_API_BASE` is not set
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Default log filter for the binary
pub const DEFAULT_RUST_LOG: &str = "info";

// =============================================================================
// CSRF (double-submit cookie)
// =============================================================================

/// Request header the backend reads the CSRF token from
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Cookie the backend stores the CSRF token in
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Message shown after every successful mutating request
pub const SUCCESS_MESSAGE: &str = "Succeeded";

/// Network failure text used by the admin console
pub const ADMIN_NETWORK_ERROR_MESSAGE: &str = "Network error or server not responding";

/// Prefix the admin console puts before client-side request failures
pub const ADMIN_REQUEST_ERROR_PREFIX: &str = "An error occurred: ";

/// Network failure text used by the judge front end
pub const OJ_NETWORK_ERROR_MESSAGE: &str = "Network error or server unavailable";

/// Domain error prefix meaning the session has expired
pub const LOGIN_REQUIRED_PREFIX: &str = "Please login";

/// Message for a strict-mode body that carries no envelope
pub const MALFORMED_ENVELOPE_MESSAGE: &str = "Malformed response from server";

// =============================================================================
// BUILD INFO
// =============================================================================

/// Default build environment
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Commit placeholder when git is unavailable
pub const VERSION_FALLBACK_COMMIT: &str = "dev";

/// Number of commit hash characters embedded in the version
pub const VERSION_COMMIT_LENGTH: usize = 5;

// =============================================================================
// ROUTING
// =============================================================================

/// History base of the admin console
pub const ADMIN_ROUTER_BASE: &str = "/admin/";

/// Where unmatched admin paths are sent
pub const ADMIN_FALLBACK_REDIRECT: &str = "/login";

// =============================================================================
// PAGINATION & RANKING
// =============================================================================

/// Default ranking rule for the user rank list
pub const DEFAULT_RANK_RULE: &str = "acm";

// =============================================================================
// VALIDATION
// =============================================================================

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum contest title length
pub const MAX_CONTEST_TITLE_LENGTH: u64 = 256;

/// Maximum announcement title length
pub const MAX_ANNOUNCEMENT_TITLE_LENGTH: u64 = 64;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum AI message length accepted by the backend
pub const MAX_AI_MESSAGE_LENGTH: u64 = 4096;

/// Contest rule types
pub mod rule_types {
    pub const ACM: &str = "ACM";
    pub const OI: &str = "OI";

    /// All rule types
    pub const ALL: &[&str] = &[ACM, OI];
}
