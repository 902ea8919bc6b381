//! Application-wide constants
//!
//! This module contains all constant values used throughout the crate.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// HEADER
// =============================================================================

/// Name of the response header written by the post-action hook
pub const HEADER_ALLOW: &str = "Allow";

/// Separator placed between methods in the header value
pub const METHOD_SEPARATOR: &str = ", ";

/// Crate version, exposed for adapters that report it
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// PERMISSION ACTIONS
// =============================================================================

/// Default permission actions derived from HTTP methods
pub mod actions {
    pub const SHOW: &str = "show";
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DESTROY: &str = "destroy";
}

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_RUST_LOG: &str = "info";
