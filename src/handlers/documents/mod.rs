//! Document handlers

mod handler;
pub mod request;
pub mod rules;

pub use handler::*;
pub use request::*;
pub use rules::*;

use axum::{handler::Handler, middleware, routing::get, Router};

use crate::{middleware::allow_header_middleware, models::DocumentResource, state::AppState};

/// Document routes, each bound to its handler action for the Allow header
pub fn routes() -> Router<AppState> {
    let allow = allow_state();
    let on = |action: &'static str| {
        middleware::from_fn_with_state(
            allow.for_action(action),
            allow_header_middleware::<DocumentResource>,
        )
    };

    Router::new()
        .route(
            "/documents",
            get(handler::index.layer(on("index"))).post(handler::create.layer(on("create"))),
        )
        .route(
            "/documents/{id}",
            get(handler::show.layer(on("show")))
                .put(handler::update.layer(on("update")))
                .patch(handler::update.layer(on("update")))
                .delete(handler::destroy.layer(on("destroy"))),
        )
}
