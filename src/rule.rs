//! Rule declarations, action filters, and the request-scoped active rule.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use axum::http::Method;

use crate::action::{default_action_for, Action};
use crate::scope::RequestScope;

/// Lazily evaluated resource override, run against the live request scope.
///
/// `Ok(None)` means "no resource from this tier" and resolution falls
/// through to the next one.
pub type ResourceOverride<H> = Arc<
    dyn Fn(&H) -> anyhow::Result<Option<<H as RequestScope>::Resource>> + Send + Sync,
>;

/// Which handler actions a declaration applies to.
///
/// Both sets empty means every action. `except` is checked first and wins
/// over `only` when an action appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFilter {
    only: BTreeSet<String>,
    except: BTreeSet<String>,
}

impl ActionFilter {
    /// Filter that applies to every action.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().and_only(actions)
    }

    pub fn except<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().and_except(actions)
    }

    pub fn and_only<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn and_except<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except.extend(actions.into_iter().map(Into::into));
        self
    }

    /// Whether a declaration guarded by this filter is active for `action`.
    pub fn applies_to(&self, action: &str) -> bool {
        if self.except.contains(action) {
            return false;
        }
        self.only.is_empty() || self.only.contains(action)
    }
}

/// Registry-level statement: HTTP method -> permission action, with an
/// optional resource override and an action filter.
pub struct RuleDeclaration<H: RequestScope> {
    method: Method,
    action: Option<Action>,
    filter: ActionFilter,
    resource_override: Option<ResourceOverride<H>>,
}

impl<H: RequestScope> RuleDeclaration<H> {
    /// Declare `method` with its default permission action and no filter.
    pub fn new(method: Method) -> Self {
        Self {
            action: default_action_for(&method),
            method,
            filter: ActionFilter::all(),
            resource_override: None,
        }
    }

    pub fn head() -> Self {
        Self::new(Method::HEAD)
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Check a different permission than the method's default.
    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn only<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = self.filter.and_only(actions);
        self
    }

    pub fn except<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = self.filter.and_except(actions);
        self
    }

    pub fn filter(mut self, filter: ActionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Resolve the resource for this method from the request scope.
    pub fn resource<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&H) -> anyhow::Result<Option<H::Resource>> + Send + Sync + 'static,
    {
        self.resource_override = Some(Arc::new(resolver));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn permission_action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn action_filter(&self) -> &ActionFilter {
        &self.filter
    }

    pub fn has_resource_override(&self) -> bool {
        self.resource_override.is_some()
    }

    /// Whether this declaration takes part in a request for `action`.
    pub fn is_active_for(&self, action: &str) -> bool {
        self.filter.applies_to(action)
    }

    /// The request-scoped rule this declaration contributes.
    pub fn to_rule(&self) -> Rule<H> {
        Rule {
            action: self.action.clone(),
            resource_override: self.resource_override.clone(),
        }
    }
}

impl<H: RequestScope> Clone for RuleDeclaration<H> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            action: self.action.clone(),
            filter: self.filter.clone(),
            resource_override: self.resource_override.clone(),
        }
    }
}

impl<H: RequestScope> fmt::Debug for RuleDeclaration<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDeclaration")
            .field("method", &self.method)
            .field("action", &self.action)
            .field("filter", &self.filter)
            .field("resource_override", &self.resource_override.is_some())
            .finish()
    }
}

/// Active rule for one HTTP method within a single request.
pub struct Rule<H: RequestScope> {
    action: Option<Action>,
    resource_override: Option<ResourceOverride<H>>,
}

impl<H: RequestScope> Rule<H> {
    pub fn permission_action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn resource_override(&self) -> Option<&ResourceOverride<H>> {
        self.resource_override.as_ref()
    }
}

impl<H: RequestScope> Clone for Rule<H> {
    fn clone(&self) -> Self {
        Self {
            action: self.action.clone(),
            resource_override: self.resource_override.clone(),
        }
    }
}

impl<H: RequestScope> fmt::Debug for Rule<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("action", &self.action)
            .field("resource_override", &self.resource_override.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ResourceSlots;

    type Slots = ResourceSlots<u32>;

    #[test]
    fn test_empty_filter_applies_everywhere() {
        let filter = ActionFilter::all();
        assert!(filter.applies_to("show"));
        assert!(filter.applies_to("index"));
    }

    #[test]
    fn test_only_filter() {
        let filter = ActionFilter::only(["show", "index"]);
        assert!(filter.applies_to("show"));
        assert!(filter.applies_to("index"));
        assert!(!filter.applies_to("update"));
    }

    #[test]
    fn test_except_filter() {
        let filter = ActionFilter::except(["destroy"]);
        assert!(filter.applies_to("show"));
        assert!(!filter.applies_to("destroy"));
    }

    #[test]
    fn test_except_checked_before_only() {
        // Documented choice: an action listed in both sets is excluded.
        let filter = ActionFilter::only(["show", "index"]).and_except(["show"]);
        assert!(!filter.applies_to("show"));
        assert!(filter.applies_to("index"));
        assert!(!filter.applies_to("update"));
    }

    #[test]
    fn test_declaration_defaults_from_method() {
        let decl = RuleDeclaration::<Slots>::delete();
        assert_eq!(decl.method(), &Method::DELETE);
        assert_eq!(decl.permission_action(), Some(&Action::DESTROY));
        assert!(!decl.has_resource_override());
        assert!(decl.is_active_for("anything"));
    }

    #[test]
    fn test_declaration_explicit_action_overrides_default() {
        let decl = RuleDeclaration::<Slots>::post().action("publish");
        assert_eq!(decl.permission_action(), Some(&Action::new("publish")));
    }

    #[test]
    fn test_unmapped_method_has_no_action() {
        let method = Method::from_bytes(b"PROPFIND").unwrap();
        let decl = RuleDeclaration::<Slots>::new(method);
        assert_eq!(decl.permission_action(), None);
    }

    #[test]
    fn test_rule_carries_override() {
        let decl =
            RuleDeclaration::<Slots>::get().resource(|slots| Ok(slots.instance("x").copied()));
        let rule = decl.to_rule();
        let slots = Slots::new().with_instance("x", 7);

        let resolver = rule.resource_override().unwrap();
        assert_eq!(resolver(&slots).unwrap(), Some(7));
    }
}
