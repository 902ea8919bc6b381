//! Allow header computation.

use axum::http::Method;
use tracing::{debug, trace};

use crate::active::ActiveRuleSet;
use crate::authorize::{authorize, Authorizer};
use crate::constants::METHOD_SEPARATOR;
use crate::error::{AllowError, AllowResult};
use crate::resolver::ResourceResolver;
use crate::scope::RequestScope;
use crate::strategy::AllowConfig;

/// Turns an active rule set into the list of allowed methods.
///
/// Methods come out in active-set order. The first resolution or
/// authorization error aborts the computation; nothing partial is returned.
pub struct AllowHeaderComputer<'a, H: RequestScope> {
    rules: &'a ActiveRuleSet<H>,
    config: &'a AllowConfig<H>,
    authorizer: &'a dyn Authorizer<H::Resource>,
}

impl<'a, H: RequestScope> AllowHeaderComputer<'a, H> {
    pub fn new(
        rules: &'a ActiveRuleSet<H>,
        config: &'a AllowConfig<H>,
        authorizer: &'a dyn Authorizer<H::Resource>,
    ) -> Self {
        Self {
            rules,
            config,
            authorizer,
        }
    }

    pub fn compute(&self, scope: &H) -> AllowResult<Vec<Method>> {
        self.run(ResourceResolver::new(self.config, scope), scope)
    }

    /// Like [`compute`](Self::compute), with `resource` standing in for the
    /// implicit strategy and the ambient slots.
    pub fn compute_with_resource(
        &self,
        scope: &H,
        resource: &H::Resource,
    ) -> AllowResult<Vec<Method>> {
        self.run(
            ResourceResolver::new(self.config, scope).with_fallback(resource),
            scope,
        )
    }

    /// Comma-joined header value; empty when nothing is allowed.
    pub fn header_value(&self, scope: &H) -> AllowResult<String> {
        Ok(join_methods(&self.compute(scope)?))
    }

    fn run(&self, resolver: ResourceResolver<'_, H>, scope: &H) -> AllowResult<Vec<Method>> {
        let mut allowed = Vec::with_capacity(self.rules.len());

        for (method, rule) in self.rules.iter() {
            let resource = resolver
                .resolve(rule)
                .map_err(|source| AllowError::Resolution {
                    method: method.clone(),
                    source,
                })?;

            let Some(action) = rule.permission_action() else {
                debug!(method = %method, "No permission action for method, denying");
                continue;
            };

            let permitted =
                authorize(self.config, self.authorizer, action, resource.as_deref(), scope)
                    .map_err(|source| AllowError::Authorization {
                        method: method.clone(),
                        action: action.clone(),
                        source,
                    })?;

            trace!(
                method = %method,
                action = %action,
                resource = resource.is_some(),
                allowed = permitted,
                "Evaluated allow rule"
            );

            if permitted {
                allowed.push(method.clone());
            }
        }

        Ok(allowed)
    }
}

/// Join methods with the header separator.
pub fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(METHOD_SEPARATOR)
}
