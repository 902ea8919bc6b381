//! Framework-neutral request hooks.
//!
//! A host calls [`before_action`] before the handler body runs and
//! [`after_action`] once it has finished, whether or not the handler did
//! anything Allow-related.

use std::collections::HashMap;

use axum::http::{HeaderMap, HeaderValue, header::ALLOW};
use tracing::debug;

use crate::active::ActiveRuleSet;
use crate::authorize::Authorizer;
use crate::computer::AllowHeaderComputer;
use crate::constants::HEADER_ALLOW;
use crate::error::AllowResult;
use crate::registry::{DeclaresAllowRules, RuleRegistry};
use crate::scope::RequestScope;
use crate::strategy::AllowConfig;

/// Response-side header storage the Allow value is written into.
pub trait ResponseHeaders {
    /// Set `Allow`, replacing any previous value.
    fn set_allow(&mut self, value: &str) -> AllowResult<()>;
}

impl ResponseHeaders for HeaderMap {
    fn set_allow(&mut self, value: &str) -> AllowResult<()> {
        self.insert(ALLOW, HeaderValue::from_str(value)?);
        Ok(())
    }
}

impl ResponseHeaders for HashMap<String, String> {
    fn set_allow(&mut self, value: &str) -> AllowResult<()> {
        self.insert(HEADER_ALLOW.to_string(), value.to_string());
        Ok(())
    }
}

/// Pre-action hook: build the active rule set for the invoked action.
pub fn before_action<H: RequestScope>(
    registry: &RuleRegistry<H>,
    action: &str,
) -> ActiveRuleSet<H> {
    registry.active_rules(action)
}

/// [`before_action`] for handler types that carry their own registry.
pub fn before_action_for<H: DeclaresAllowRules>(action: &str) -> ActiveRuleSet<H> {
    before_action(H::allow_rules(), action)
}

/// Post-action hook: compute the header and write it into `headers`.
///
/// Returns the written value. On error nothing is written.
pub fn after_action<H, S>(
    active: &ActiveRuleSet<H>,
    config: &AllowConfig<H>,
    authorizer: &dyn Authorizer<H::Resource>,
    scope: &H,
    headers: &mut S,
) -> AllowResult<String>
where
    H: RequestScope,
    S: ResponseHeaders + ?Sized,
{
    let value = AllowHeaderComputer::new(active, config, authorizer).header_value(scope)?;
    headers.set_allow(&value)?;
    debug!(allow = %value, "Set Allow header");
    Ok(value)
}
