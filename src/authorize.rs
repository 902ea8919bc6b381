//! Authorization predicate evaluation.

use crate::action::Action;
use crate::scope::RequestScope;
use crate::strategy::AllowConfig;

/// External authorization check, consulted when no predicate is configured.
pub trait Authorizer<R>: Send + Sync {
    fn can(&self, action: &Action, resource: Option<&R>) -> anyhow::Result<bool>;
}

impl<R, F> Authorizer<R> for F
where
    F: Fn(&Action, Option<&R>) -> anyhow::Result<bool> + Send + Sync,
{
    fn can(&self, action: &Action, resource: Option<&R>) -> anyhow::Result<bool> {
        self(action, resource)
    }
}

/// Authorizer that never allows anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl<R> Authorizer<R> for DenyAll {
    fn can(&self, _action: &Action, _resource: Option<&R>) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// Decide `action` on `resource`: the configured predicate if any, the
/// external authorizer otherwise. Never both.
pub fn authorize<H: RequestScope>(
    config: &AllowConfig<H>,
    authorizer: &dyn Authorizer<H::Resource>,
    action: &Action,
    resource: Option<&H::Resource>,
    scope: &H,
) -> anyhow::Result<bool> {
    match config.authorization_predicate() {
        Some(predicate) => predicate(action, resource, scope),
        None => authorizer.can(action, resource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ResourceSlots;

    type Slots = ResourceSlots<u32>;

    fn below_four(_: &Action, resource: Option<&u32>) -> anyhow::Result<bool> {
        Ok(resource.is_some_and(|n| *n < 4))
    }

    #[test]
    fn test_falls_back_to_authorizer() {
        let config = AllowConfig::<Slots>::default();
        let slots = Slots::new();

        assert!(authorize(&config, &below_four, &Action::SHOW, Some(&3), &slots).unwrap());
        assert!(!authorize(&config, &below_four, &Action::SHOW, Some(&5), &slots).unwrap());
    }

    #[test]
    fn test_predicate_replaces_authorizer() {
        let config = AllowConfig::<Slots>::new().with_authorization_predicate(|_, _, _| Ok(true));
        let slots = Slots::new();

        assert!(authorize(&config, &DenyAll, &Action::DESTROY, None, &slots).unwrap());
    }

    #[test]
    fn test_predicate_sees_scope() {
        let config = AllowConfig::<Slots>::new().with_authorization_predicate(
            |_, _, scope: &Slots| Ok(scope.instance("owner").is_some()),
        );

        let anonymous = Slots::new();
        let owner = Slots::new().with_instance("owner", 1);

        assert!(!authorize(&config, &DenyAll, &Action::UPDATE, None, &anonymous).unwrap());
        assert!(authorize(&config, &DenyAll, &Action::UPDATE, None, &owner).unwrap());
    }

    #[test]
    fn test_errors_propagate() {
        let config = AllowConfig::<Slots>::new()
            .with_authorization_predicate(|_, _, _| Err(anyhow::anyhow!("policy store down")));

        let err = authorize(&config, &DenyAll, &Action::SHOW, None, &Slots::new()).unwrap_err();
        assert_eq!(err.to_string(), "policy store down");
    }
}
