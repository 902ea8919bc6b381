//! Pluggable strategies for the Allow computation.
//!
//! `AllowConfig` carries the two optional hooks a host can plug in: an
//! implicit-resource strategy and an authorization predicate. It is handed
//! to the computer explicitly, so each test (or each tenant, or each route
//! group) can use its own instance.

use std::fmt;
use std::sync::Arc;

use crate::action::Action;
use crate::scope::RequestScope;

/// Produces the resource used when a rule declares no override.
pub type ImplicitResourceStrategy<H> = Arc<
    dyn Fn(&H) -> anyhow::Result<Option<<H as RequestScope>::Resource>> + Send + Sync,
>;

/// Replaces the external authorization check entirely.
pub type AuthorizationPredicate<H> = Arc<
    dyn Fn(&Action, Option<&<H as RequestScope>::Resource>, &H) -> anyhow::Result<bool>
        + Send
        + Sync,
>;

/// Strategy configuration. `Default` is the reset state: no strategy set.
pub struct AllowConfig<H: RequestScope> {
    implicit_resource: Option<ImplicitResourceStrategy<H>>,
    authorization_predicate: Option<AuthorizationPredicate<H>>,
}

impl<H: RequestScope> Default for AllowConfig<H> {
    fn default() -> Self {
        Self {
            implicit_resource: None,
            authorization_predicate: None,
        }
    }
}

impl<H: RequestScope> AllowConfig<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block-style configuration entry point.
    ///
    /// ```ignore
    /// let config = AllowConfig::configure(|cfg| {
    ///     cfg.set_authorization_predicate(|action, _, _| Ok(action != "show"));
    /// });
    /// ```
    pub fn configure(block: impl FnOnce(&mut Self)) -> Self {
        let mut config = Self::default();
        block(&mut config);
        config
    }

    pub fn with_implicit_resource<F>(mut self, strategy: F) -> Self
    where
        F: Fn(&H) -> anyhow::Result<Option<H::Resource>> + Send + Sync + 'static,
    {
        self.set_implicit_resource(strategy);
        self
    }

    pub fn with_authorization_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Action, Option<&H::Resource>, &H) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.set_authorization_predicate(predicate);
        self
    }

    pub fn set_implicit_resource<F>(&mut self, strategy: F) -> &mut Self
    where
        F: Fn(&H) -> anyhow::Result<Option<H::Resource>> + Send + Sync + 'static,
    {
        self.implicit_resource = Some(Arc::new(strategy));
        self
    }

    pub fn set_authorization_predicate<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Action, Option<&H::Resource>, &H) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.authorization_predicate = Some(Arc::new(predicate));
        self
    }

    pub fn clear_implicit_resource(&mut self) -> &mut Self {
        self.implicit_resource = None;
        self
    }

    pub fn clear_authorization_predicate(&mut self) -> &mut Self {
        self.authorization_predicate = None;
        self
    }

    /// Drop both strategies.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn implicit_resource(&self) -> Option<&ImplicitResourceStrategy<H>> {
        self.implicit_resource.as_ref()
    }

    pub fn authorization_predicate(&self) -> Option<&AuthorizationPredicate<H>> {
        self.authorization_predicate.as_ref()
    }
}

impl<H: RequestScope> Clone for AllowConfig<H> {
    fn clone(&self) -> Self {
        Self {
            implicit_resource: self.implicit_resource.clone(),
            authorization_predicate: self.authorization_predicate.clone(),
        }
    }
}

impl<H: RequestScope> fmt::Debug for AllowConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowConfig")
            .field("implicit_resource", &self.implicit_resource.is_some())
            .field("authorization_predicate", &self.authorization_predicate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ResourceSlots;

    type Slots = ResourceSlots<u32>;

    #[test]
    fn test_default_has_no_strategies() {
        let config = AllowConfig::<Slots>::default();
        assert!(config.implicit_resource().is_none());
        assert!(config.authorization_predicate().is_none());
    }

    #[test]
    fn test_configure_block() {
        let config = AllowConfig::<Slots>::configure(|cfg| {
            cfg.set_authorization_predicate(|action, _, _| Ok(action != "show"));
        });

        let predicate = config.authorization_predicate().unwrap();
        let slots = Slots::new();
        assert!(!predicate(&Action::SHOW, None, &slots).unwrap());
        assert!(predicate(&Action::DESTROY, None, &slots).unwrap());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut config = AllowConfig::<Slots>::new()
            .with_implicit_resource(|_| Ok(Some(1)))
            .with_authorization_predicate(|_, _, _| Ok(true));

        config.reset();

        assert!(config.implicit_resource().is_none());
        assert!(config.authorization_predicate().is_none());
    }

    #[test]
    fn test_clear_single_strategy() {
        let mut config = AllowConfig::<Slots>::new()
            .with_implicit_resource(|_| Ok(Some(1)))
            .with_authorization_predicate(|_, _, _| Ok(true));

        config.clear_implicit_resource();

        assert!(config.implicit_resource().is_none());
        assert!(config.authorization_predicate().is_some());
    }

    #[test]
    fn test_last_write_wins() {
        let config = AllowConfig::<Slots>::new()
            .with_implicit_resource(|_| Ok(Some(1)))
            .with_implicit_resource(|_| Ok(Some(2)));

        let strategy = config.implicit_resource().unwrap();
        assert_eq!(strategy(&Slots::new()).unwrap(), Some(2));
    }
}
