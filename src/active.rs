//! Per-request active rule set: the merge half of the filter/merge pipeline.

use std::fmt;

use axum::http::Method;
use indexmap::IndexMap;

use crate::rule::{Rule, RuleDeclaration};
use crate::scope::RequestScope;

/// Mapping from HTTP method to the rule used for this request.
///
/// Iteration follows the order in which methods were first introduced.
/// Inserting a method again replaces its rule but keeps its position.
pub struct ActiveRuleSet<H: RequestScope> {
    rules: IndexMap<Method, Rule<H>>,
}

impl<H: RequestScope> Default for ActiveRuleSet<H> {
    fn default() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }
}

impl<H: RequestScope> ActiveRuleSet<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the rule for a method. Returns the replaced rule.
    pub fn insert(&mut self, method: Method, rule: Rule<H>) -> Option<Rule<H>> {
        self.rules.insert(method, rule)
    }

    pub fn get(&self, method: &Method) -> Option<&Rule<H>> {
        self.rules.get(method)
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.rules.contains_key(method)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.rules.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Method, &Rule<H>)> {
        self.rules.iter()
    }
}

/// Merge already-filtered declarations; the last one per method wins.
pub fn merge_declarations<'a, H, I>(declarations: I) -> ActiveRuleSet<H>
where
    H: RequestScope + 'a,
    I: IntoIterator<Item = &'a RuleDeclaration<H>>,
{
    declarations.into_iter().collect()
}

impl<'a, H: RequestScope + 'a> FromIterator<&'a RuleDeclaration<H>> for ActiveRuleSet<H> {
    fn from_iter<I: IntoIterator<Item = &'a RuleDeclaration<H>>>(iter: I) -> Self {
        let mut active = ActiveRuleSet::new();
        for declaration in iter {
            active.insert(declaration.method().clone(), declaration.to_rule());
        }
        active
    }
}

impl<H: RequestScope> Clone for ActiveRuleSet<H> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<H: RequestScope> fmt::Debug for ActiveRuleSet<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.rules.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::scope::ResourceSlots;

    type Slots = ResourceSlots<u32>;

    #[test]
    fn test_merge_empty() {
        let active = merge_declarations::<Slots, _>(std::iter::empty());
        assert!(active.is_empty());
    }

    #[test]
    fn test_last_declaration_wins() {
        let declarations = vec![
            RuleDeclaration::<Slots>::get(),
            RuleDeclaration::<Slots>::get().action("list"),
        ];

        let active = merge_declarations(&declarations);

        assert_eq!(active.len(), 1);
        let rule = active.get(&Method::GET).unwrap();
        assert_eq!(rule.permission_action(), Some(&Action::new("list")));
    }

    #[test]
    fn test_overwrite_keeps_first_position() {
        let declarations = vec![
            RuleDeclaration::<Slots>::get(),
            RuleDeclaration::<Slots>::delete(),
            RuleDeclaration::<Slots>::post(),
            RuleDeclaration::<Slots>::get().action("list"),
        ];

        let active = merge_declarations(&declarations);
        let methods: Vec<_> = active.methods().cloned().collect();

        assert_eq!(methods, vec![Method::GET, Method::DELETE, Method::POST]);
    }
}
