//! Allow header middleware
//!
//! Binds the pre/post-action hooks to an Axum route. Handlers see an
//! [`AllowSlots`] handle in request extensions and fill it with the
//! resources they load; the middleware computes the header after the
//! handler returns.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::{
    authorize::Authorizer,
    error::AllowError,
    lifecycle,
    registry::RuleRegistry,
    scope::ResourceSlots,
    strategy::AllowConfig,
};

/// Rules, strategies and authorizer shared by the routes of one resource
pub struct AllowState<R: Clone> {
    inner: Arc<AllowStateInner<R>>,
    action: Option<Arc<str>>,
}

impl<R: Clone> Clone for AllowState<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            action: self.action.clone(),
        }
    }
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AllowStateInner<R: Clone> {
    registry: RuleRegistry<ResourceSlots<R>>,
    config: AllowConfig<ResourceSlots<R>>,
    authorizer: Box<dyn Authorizer<R>>,
}

impl<R: Clone + Send + Sync + 'static> AllowState<R> {
    pub fn new(
        registry: RuleRegistry<ResourceSlots<R>>,
        config: AllowConfig<ResourceSlots<R>>,
        authorizer: impl Authorizer<R> + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(AllowStateInner {
                registry,
                config,
                authorizer: Box::new(authorizer),
            }),
            action: None,
        }
    }

    /// Copy of this state bound to the handler action `action`.
    ///
    /// The middleware refuses to run on a state that was never bound.
    pub fn for_action(&self, action: impl Into<Arc<str>>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            action: Some(action.into()),
        }
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn registry(&self) -> &RuleRegistry<ResourceSlots<R>> {
        &self.inner.registry
    }

    pub fn config(&self) -> &AllowConfig<ResourceSlots<R>> {
        &self.inner.config
    }

    pub fn authorizer(&self) -> &dyn Authorizer<R> {
        self.inner.authorizer.as_ref()
    }
}

/// Per-request resource slots, shared between the handler and the middleware
pub struct AllowSlots<R>(Arc<Mutex<ResourceSlots<R>>>);

impl<R> Clone for AllowSlots<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> Default for AllowSlots<R> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(ResourceSlots::new())))
    }
}

impl<R> AllowSlots<R> {
    pub fn set_explicit(&self, resource: R) {
        self.lock().set_explicit(resource);
    }

    pub fn set_current(&self, resource: R) {
        self.lock().set_current(resource);
    }

    pub fn set_instance(&self, name: impl Into<String>, resource: R) {
        self.lock().set_instance(name, resource);
    }

    fn lock(&self) -> MutexGuard<'_, ResourceSlots<R>> {
        // Poisoning is ignored: every write is a single slot assignment.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R, S> FromRequestParts<S> for AllowSlots<R>
where
    R: Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = AllowError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AllowSlots<R>>()
            .cloned()
            .ok_or_else(|| {
                AllowError::Configuration("allow header middleware is not installed".to_string())
            })
    }
}

/// Allow header middleware
///
/// ```ignore
/// let allow = AllowState::new(registry, AllowConfig::default(), authorizer);
///
/// Router::new().route(
///     "/documents/{id}",
///     get(show).layer(middleware::from_fn_with_state(
///         allow.for_action("show"),
///         allow_header_middleware::<Document>,
///     )),
/// );
/// ```
pub async fn allow_header_middleware<R>(
    State(state): State<AllowState<R>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AllowError>
where
    R: Clone + Send + Sync + 'static,
{
    let Some(action) = state.action() else {
        return Err(AllowError::Configuration(
            "no handler action bound; use AllowState::for_action".to_string(),
        ));
    };
    let active = lifecycle::before_action(state.registry(), action);

    let slots = AllowSlots::<R>::default();
    request.extensions_mut().insert(slots.clone());

    let mut response = next.run(request).await;

    let scope = slots.lock();
    lifecycle::after_action(
        &active,
        state.config(),
        state.authorizer(),
        &*scope,
        response.headers_mut(),
    )
    .inspect_err(|e| {
        error!(action = %action, error = %e, "Allow header computation failed")
    })?;
    drop(scope);

    Ok(response)
}
