//! RuleRegistry: the per-handler-type declaration list.
//!
//! A registry is built once, when the handler type is defined, and is
//! read-only afterwards. For every request it answers which declarations
//! apply to the invoked action (filter) and folds them into an
//! [`ActiveRuleSet`] (merge).

use tracing::debug;

use crate::active::{merge_declarations, ActiveRuleSet};
use crate::rule::RuleDeclaration;
use crate::scope::RequestScope;

/// Ordered list of rule declarations for one handler type.
///
/// # Example
///
/// ```ignore
/// use allow_header::prelude::*;
///
/// let registry = RuleRegistry::<ResourceSlots<Document>>::new()
///     // GET on show and index, checked against the loaded document
///     .with(RuleDeclaration::get()
///         .only(["show", "index"])
///         .resource(|slots| Ok(slots.instance("document").cloned())))
///     // DELETE only from the show action
///     .with(RuleDeclaration::delete().only(["show"]));
///
/// let active = registry.active_rules("show");
/// ```
pub struct RuleRegistry<H: RequestScope> {
    declarations: Vec<RuleDeclaration<H>>,
}

impl<H: RequestScope> Default for RuleRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: RequestScope> RuleRegistry<H> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Append a declaration.
    ///
    /// Nothing is validated here; a method without a permission action is
    /// kept and simply never authorizes.
    pub fn declare(&mut self, declaration: RuleDeclaration<H>) -> &mut Self {
        self.declarations.push(declaration);
        self
    }

    /// By-value variant of [`declare`](Self::declare) for static construction.
    pub fn with(mut self, declaration: RuleDeclaration<H>) -> Self {
        self.declare(declaration);
        self
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// All declarations in registration order.
    pub fn declarations(&self) -> &[RuleDeclaration<H>] {
        &self.declarations
    }

    /// Declarations whose filter passes for `action`, in registration order.
    pub fn active_for<'a>(
        &'a self,
        action: &'a str,
    ) -> impl Iterator<Item = &'a RuleDeclaration<H>> + 'a {
        filter_declarations(&self.declarations, action)
    }

    /// Build the active rule set for a request invoking `action`.
    pub fn active_rules(&self, action: &str) -> ActiveRuleSet<H> {
        let active = merge_declarations(self.active_for(action));
        debug!(
            action = %action,
            declared = self.declarations.len(),
            active = active.len(),
            "Built active allow rules"
        );
        active
    }
}

impl<H: RequestScope> Clone for RuleRegistry<H> {
    fn clone(&self) -> Self {
        Self {
            declarations: self.declarations.clone(),
        }
    }
}

impl<H: RequestScope> std::fmt::Debug for RuleRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.declarations.iter()).finish()
    }
}

/// Filter step: declarations active for `action`, order preserved.
pub fn filter_declarations<'a, H: RequestScope>(
    declarations: &'a [RuleDeclaration<H>],
    action: &'a str,
) -> impl Iterator<Item = &'a RuleDeclaration<H>> + 'a {
    declarations
        .iter()
        .filter(move |declaration| declaration.is_active_for(action))
}

/// Handler types that declare their allow rules once, at definition time.
///
/// ```ignore
/// static RULES: LazyLock<RuleRegistry<DocumentsController>> =
///     LazyLock::new(|| RuleRegistry::new().with(RuleDeclaration::get()));
///
/// impl DeclaresAllowRules for DocumentsController {
///     fn allow_rules() -> &'static RuleRegistry<Self> {
///         &RULES
///     }
/// }
/// ```
pub trait DeclaresAllowRules: RequestScope + Sized + 'static {
    fn allow_rules() -> &'static RuleRegistry<Self>;
}
