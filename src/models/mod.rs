//! Domain models
//!
//! This module contains the models served by the demonstration routes.

pub mod document;

pub use document::*;
