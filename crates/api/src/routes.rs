//! Route-Definitionen fuer die REST-API (/v1/...)

use axum::{
    routing::{get, post},
    Router,
};
use pforte_observability::{health_router, HealthState};
use tower_http::trace::TraceLayer;

use crate::{handlers, AppState};

/// Erstellt den /v1/-Router ohne State
pub fn v1_router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/v1/auth/register", post(handlers::auth::register))
        .route("/v1/auth/login", post(handlers::auth::login))
        .route("/v1/auth/authenticate", post(handlers::auth::authenticate))
        .route("/v1/auth/logout", post(handlers::auth::logout))
        // Benutzer
        .route("/v1/users/:id", get(handlers::users::get_user))
}

/// Vollstaendige Anwendung: API, Health-Check und Request-Tracing
pub fn router(state: AppState, health: HealthState) -> Router {
    v1_router()
        .with_state(state)
        .merge(health_router(health))
        .layer(TraceLayer::new_for_http())
}
