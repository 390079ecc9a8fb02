use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod health;
pub mod middleware_auth;
pub mod tasks;
pub mod users;

use crate::state::AppState;
use middleware_auth::AuthUser;

pub fn routes(state: AppState) -> Router {
    let task_router = Router::new()
        .route("/", post(tasks::routes::create).get(tasks::routes::list))
        .route(
            "/{id}",
            patch(tasks::routes::toggle).delete(tasks::routes::delete),
        )
        .route("/{id}/toggle", patch(tasks::routes::toggle));

    let api_router = Router::new()
        .route("/me", get(me_handler))
        .nest("/tasks", task_router)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_auth::require_session,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health::health))
        .route("/auth/session", post(auth::sign_in).delete(auth::sign_out))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Welcome to the task list API"
}

async fn me_handler(user: AuthUser) -> Json<AuthUser> {
    Json(user)
}
