//! Three-tier resource resolution.
//!
//! For each active rule the resource is looked up in order:
//! 1. the rule's own override,
//! 2. the configured implicit-resource strategy,
//! 3. the scope's explicit slot, then its current slot.
//!
//! A tier yielding `None` falls through. A present value always counts,
//! whatever it contains. Tiers are evaluated lazily and per rule.

use std::borrow::Cow;

use crate::rule::Rule;
use crate::scope::RequestScope;
use crate::strategy::AllowConfig;

/// Resolves the resource for one rule against a live request scope.
pub struct ResourceResolver<'a, H: RequestScope> {
    config: &'a AllowConfig<H>,
    scope: &'a H,
    fallback: Option<&'a H::Resource>,
}

impl<'a, H: RequestScope> ResourceResolver<'a, H> {
    pub fn new(config: &'a AllowConfig<H>, scope: &'a H) -> Self {
        Self {
            config,
            scope,
            fallback: None,
        }
    }

    /// Use `resource` in place of the implicit strategy and ambient slots.
    /// Rule overrides still take precedence.
    pub fn with_fallback(mut self, resource: &'a H::Resource) -> Self {
        self.fallback = Some(resource);
        self
    }

    pub fn resolve(&self, rule: &Rule<H>) -> anyhow::Result<Option<Cow<'a, H::Resource>>> {
        if let Some(resolver) = rule.resource_override() {
            if let Some(resource) = resolver(self.scope)? {
                return Ok(Some(Cow::Owned(resource)));
            }
        }
        self.implicit()
    }

    /// The resource used for rules without an override.
    pub fn implicit(&self) -> anyhow::Result<Option<Cow<'a, H::Resource>>> {
        if let Some(resource) = self.fallback {
            return Ok(Some(Cow::Borrowed(resource)));
        }

        if let Some(strategy) = self.config.implicit_resource() {
            if let Some(resource) = strategy(self.scope)? {
                return Ok(Some(Cow::Owned(resource)));
            }
        }

        Ok(self
            .scope
            .explicit_resource()
            .or_else(|| self.scope.current_resource())
            .map(Cow::Borrowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleDeclaration;
    use crate::scope::ResourceSlots;

    type Slots = ResourceSlots<i64>;

    fn resolved(resolver: &ResourceResolver<'_, Slots>, rule: &Rule<Slots>) -> Option<i64> {
        resolver.resolve(rule).unwrap().map(Cow::into_owned)
    }

    #[test]
    fn test_override_wins_over_everything() {
        let config = AllowConfig::new().with_implicit_resource(|_| Ok(Some(20)));
        let slots = Slots::new().with_explicit(30).with_current(40);
        let rule = RuleDeclaration::get().resource(|_| Ok(Some(10))).to_rule();

        let resolver = ResourceResolver::new(&config, &slots);
        assert_eq!(resolved(&resolver, &rule), Some(10));
    }

    #[test]
    fn test_absent_override_falls_through_to_strategy() {
        let config = AllowConfig::new().with_implicit_resource(|_| Ok(Some(20)));
        let slots = Slots::new().with_explicit(30);
        let rule = RuleDeclaration::get().resource(|_| Ok(None)).to_rule();

        let resolver = ResourceResolver::new(&config, &slots);
        assert_eq!(resolved(&resolver, &rule), Some(20));
    }

    #[test]
    fn test_strategy_returning_none_falls_through_to_slots() {
        let config = AllowConfig::new().with_implicit_resource(|_| Ok(None));
        let slots = Slots::new().with_current(40);
        let rule = RuleDeclaration::get().to_rule();

        let resolver = ResourceResolver::new(&config, &slots);
        assert_eq!(resolved(&resolver, &rule), Some(40));
    }

    #[test]
    fn test_explicit_slot_before_current_slot() {
        let config = AllowConfig::default();
        let slots = Slots::new().with_explicit(30).with_current(40);
        let rule = RuleDeclaration::get().to_rule();

        let resolver = ResourceResolver::new(&config, &slots);
        assert_eq!(resolved(&resolver, &rule), Some(30));
    }

    #[test]
    fn test_nothing_resolves_to_absent() {
        let config = AllowConfig::default();
        let slots = Slots::new();
        let rule = RuleDeclaration::get().to_rule();

        let resolver = ResourceResolver::new(&config, &slots);
        assert_eq!(resolved(&resolver, &rule), None);
    }

    #[test]
    fn test_zero_is_a_present_value() {
        // Documented choice: only `None` is absent, never a falsy value.
        let config = AllowConfig::new().with_implicit_resource(|_| Ok(Some(20)));
        let slots = Slots::new();
        let rule = RuleDeclaration::get().resource(|_| Ok(Some(0))).to_rule();

        let resolver = ResourceResolver::new(&config, &slots);
        assert_eq!(resolved(&resolver, &rule), Some(0));
    }

    #[test]
    fn test_fallback_replaces_strategy_and_slots() {
        let config = AllowConfig::new().with_implicit_resource(|_| Ok(Some(20)));
        let slots = Slots::new().with_explicit(30);
        let fallback = 50;

        let resolver = ResourceResolver::new(&config, &slots).with_fallback(&fallback);
        assert_eq!(resolved(&resolver, &RuleDeclaration::get().to_rule()), Some(50));

        let with_override = RuleDeclaration::get().resource(|_| Ok(Some(10))).to_rule();
        assert_eq!(resolved(&resolver, &with_override), Some(10));
    }

    #[test]
    fn test_override_reads_scope_at_resolution_time() {
        let config = AllowConfig::default();
        let rule = RuleDeclaration::get()
            .resource(|slots: &Slots| Ok(slots.instance("instance").copied()))
            .to_rule();

        let mut slots = Slots::new();
        slots.set_instance("instance", 7);

        let resolver = ResourceResolver::new(&config, &slots);
        assert_eq!(resolved(&resolver, &rule), Some(7));
    }

    #[test]
    fn test_override_error_propagates() {
        let config = AllowConfig::default();
        let slots = Slots::new().with_explicit(30);
        let rule = RuleDeclaration::get()
            .resource(|_| Err(anyhow::anyhow!("not loaded")))
            .to_rule();

        let resolver = ResourceResolver::new(&config, &slots);
        assert!(resolver.resolve(&rule).is_err());
    }

    #[test]
    fn test_strategy_error_propagates() {
        let config = AllowConfig::new()
            .with_implicit_resource(|_| Err(anyhow::anyhow!("session store unreachable")));
        let slots = Slots::new().with_explicit(30);

        let resolver = ResourceResolver::new(&config, &slots);
        let err = resolver
            .resolve(&RuleDeclaration::get().to_rule())
            .unwrap_err();
        assert_eq!(err.to_string(), "session store unreachable");

        // An override short-circuits before the strategy runs
        let with_override = RuleDeclaration::get().resource(|_| Ok(Some(10))).to_rule();
        assert_eq!(resolved(&resolver, &with_override), Some(10));
    }
}
