//! HTTP middleware

pub mod allow;
pub mod logging;

pub use allow::{allow_header_middleware, AllowSlots, AllowState};
pub use logging::logging_middleware;
