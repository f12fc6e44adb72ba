use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::session::parse_session_cookie;
use super::token::verify_token;
use crate::routes::AppState;

/// Middleware guarding session-only routes.
///
/// Verification is a single decision point: either the decoded claims are
/// attached to the request and it is forwarded, or a 401 terminates it. The
/// wrapped handler never runs when verification fails.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response, Response> {
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_session_cookie);

    let Some(token) = token else {
        debug!("No session cookie, returning 401");
        return Err(unauthorized_response());
    };

    match verify_token(&token, &state.auth.token_secret) {
        Ok(claims) => {
            debug!("Request authenticated");
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            debug!("Session token rejected: {}", e);
            Err(unauthorized_response())
        }
    }
}

fn unauthorized_response() -> Response {
    let body = Json(serde_json::json!({
        "message": "not authorized"
    }));

    (StatusCode::UNAUTHORIZED, body).into_response()
}
