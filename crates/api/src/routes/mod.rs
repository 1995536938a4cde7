pub mod admin;
pub mod dashboard;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /dashboard/...        live crop sessions (see routes::dashboard)
/// /admin/...            relational CRUD (see routes::admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
}
