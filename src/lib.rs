//! Allow header computation for resource endpoints.
//!
//! Handler types declare, once, which HTTP methods map to which permission
//! checks. On every request the declarations that apply to the invoked
//! action are merged into an active rule set, and after the handler has run
//! each active method is authorized against its resolved resource. The
//! methods that pass become the `Allow` response header.
//!
//! # Example
//!
//! ```ignore
//! use allow_header::prelude::*;
//!
//! let registry = RuleRegistry::<ResourceSlots<Document>>::new()
//!     .with(RuleDeclaration::get().only(["show", "index"]))
//!     .with(RuleDeclaration::delete().only(["show"]));
//!
//! // Pre-action
//! let active = before_action(&registry, "show");
//!
//! // ... handler body fills the slots ...
//! let slots = ResourceSlots::new().with_explicit(document);
//!
//! // Post-action
//! let mut headers = HeaderMap::new();
//! after_action(&active, &AllowConfig::default(), &policy, &slots, &mut headers)?;
//! ```
//!
//! # Architecture
//!
//! - **Registry**: per-handler-type declarations and the filter step
//! - **Active rule set**: the per-request merge
//! - **Resolver**: rule override, then implicit strategy, then ambient slots
//! - **Computer**: resolution plus authorization per active method
//! - **Middleware**: the Axum binding of the pre/post-action hooks

pub mod action;
pub mod active;
pub mod authorize;
pub mod computer;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod models;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod scope;
pub mod state;
pub mod strategy;

// Re-export commonly used types
pub use config::Config;
pub use constants::{HEADER_ALLOW, VERSION};
pub use error::{AllowError, AllowResult};
pub use state::AppState;

/// Prelude module - import everything you need with `use allow_header::prelude::*`
pub mod prelude {
    pub use crate::action::{default_action_for, Action};
    pub use crate::active::{merge_declarations, ActiveRuleSet};
    pub use crate::authorize::{Authorizer, DenyAll};
    pub use crate::computer::{join_methods, AllowHeaderComputer};
    pub use crate::error::{AllowError, AllowResult};
    pub use crate::lifecycle::{after_action, before_action, before_action_for, ResponseHeaders};
    pub use crate::registry::{filter_declarations, DeclaresAllowRules, RuleRegistry};
    pub use crate::resolver::ResourceResolver;
    pub use crate::rule::{ActionFilter, Rule, RuleDeclaration};
    pub use crate::scope::{RequestScope, ResourceSlots};
    pub use crate::strategy::AllowConfig;
}
