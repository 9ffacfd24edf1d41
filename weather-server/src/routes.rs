use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};

use crate::{
    config::Config,
    handler::{self, AppState},
    middleware::{self, Auth, RequestDeadline},
};

/// Construct the router: the single current-weather route plus the
/// logging, auth, and deadline middleware, outermost first.
pub fn app(state: AppState, conf: &Config) -> Router {
    let auth = Auth {
        base_url: conf.auth_service_url.clone(),
    };
    Router::new()
        .route("/", get(handler::get_current_by_coords))
        .layer(from_fn_with_state(
            RequestDeadline(conf.read_write_timeout()),
            middleware::deadline,
        ))
        .layer(from_fn_with_state(auth, middleware::authorize))
        .layer(from_fn(middleware::log_context))
        .with_state(state)
}
