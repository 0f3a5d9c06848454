//! Dashboard routes: the page endpoint and its API twin.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::{CurrentUser, Session};
use crate::services::access::{self, Access};
use crate::services::dashboard::{self, DashboardView};
use crate::AppState;

/// GET /dashboard — dashboard view, or a redirect to login without a session.
pub async fn page(State(state): State<AppState>, Session(session): Session) -> Response {
    match access::gate(session.as_ref()) {
        Access::Granted(user) => {
            let view = load_view(&state, user).await;
            ApiResponse::success(view).into_response()
        }
        Access::RedirectToLogin => Redirect::to(&state.config.login_path).into_response(),
    }
}

/// GET /api/v1/dashboard — dashboard view for API clients (401 without a session).
pub async fn api(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    Ok(ApiResponse::success(load_view(&state, &user).await))
}

async fn load_view(state: &AppState, user: &CurrentUser) -> DashboardView {
    let snapshot = dashboard::load(&state.upstream, &user.token).await;
    tracing::info!(
        user = %user.username,
        user_id = %user.user_id,
        role = %user.role,
        feeds = ?snapshot.feeds,
        "Dashboard loaded"
    );
    dashboard::build_view(&snapshot)
}
