use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use data_model_hh::models::{AppError, User};
use data_model_hh::schema::users;

use super::session::{create_logout_cookie, create_session_cookie};
use super::token::{Claims, generate_token};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct IssueTokenResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    pub success: bool,
    pub user: Claims,
}

/// GET /authenticate
/// Only reachable through `require_auth`; echoes the claims the middleware
/// attached to the request.
pub async fn get_authenticate(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(AuthenticateResponse {
        success: true,
        user: claims,
    })
}

/// POST /jwt
/// Mints a session token for an already-registered identity. Issuance is
/// scoped to known users: an unknown email gets `success: false` and no
/// cookie, and client-supplied claims are never signed.
pub async fn post_issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Response, AppError> {
    let mut conn = state.pool.get().await?;

    let user = users::table
        .filter(users::email.eq(&request.email))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await;

    match user {
        Ok(user) => {
            let token = generate_token(user.id, &user.email, &state.auth.token_secret, state.auth.token_ttl_seconds)?;
            let cookie = create_session_cookie(&token, state.auth.token_ttl_seconds, state.auth.deploy_mode);

            debug!(email = %user.email, "issued session token");

            Ok((
                StatusCode::OK,
                [(header::SET_COOKIE, cookie.to_string())],
                Json(IssueTokenResponse { success: true }),
            )
                .into_response())
        }
        Err(diesel::result::Error::NotFound) => {
            warn!(email = %request.email, "token requested for unknown identity");
            Ok((StatusCode::OK, Json(IssueTokenResponse { success: false })).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout
/// Clears the session cookie. Tokens are stateless, so this is purely
/// client-side invalidation.
pub async fn post_logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = create_logout_cookie(state.auth.deploy_mode);

    debug!("User logged out");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(serde_json::json!({"success": true})),
    )
}
