use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{LoginRequest, TokenResponse},
    error::AppResult,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/token", post(login))
}

#[utoipa::path(
    post,
    path = "/api/login/token",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Access token issued", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Incorrect username or password")
    ),
    tag = "Token"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TokenResponse>>)> {
    let resp = auth_service::login(&state, payload).await?;
    Ok((StatusCode::ACCEPTED, Json(resp)))
}
