use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::{debug, error, warn};

use data_model_hh::models::{
    LoginRequest, LoginResponse, LookupUserError, RegisterRequest, RegisterResponse, User, UserRecordResponse,
};
use data_model_hh::schema::users;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::create_session_cookie;
use crate::auth::token::generate_token;
use crate::routes::AppState;

/// Looks up the user registered under an email, if any.
pub async fn find_user_by_email(conn: &mut AsyncPgConnection, email: &str) -> Result<User, diesel::result::Error> {
    users::table
        .filter(users::email.eq(email))
        .select(User::as_select())
        .first(conn)
        .await
}

/// POST /register
/// Stores a new user with a bcrypt-hashed password and logs them in by
/// setting the session cookie. Every outcome answers 200; callers inspect
/// the body. Duplicate emails are detected by the unique constraint on the
/// insert itself, so concurrent registrations cannot both succeed.
pub async fn post_register(State(state): State<AppState>, Json(request): Json<RegisterRequest>) -> Response {
    let mut conn = match state.pool.get().await {
        Ok(c) => c,
        Err(e) => {
            error!("register: could not check out a connection: {}", e);
            return Json(RegisterResponse::error()).into_response();
        }
    };

    let password_hash = match hash_password(&request.password) {
        Ok(h) => h,
        Err(e) => {
            error!("register: password hashing failed: {}", e);
            return Json(RegisterResponse::error()).into_response();
        }
    };

    let user = User::from_registration(request.email, password_hash, request.profile);

    match diesel::insert_into(users::table).values(&user).execute(&mut conn).await {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            debug!(email = %user.email, "registration attempt for existing email");
            return Json(RegisterResponse::user_exists()).into_response();
        }
        Err(e) => {
            error!("register: insert failed: {}", e);
            return Json(RegisterResponse::error()).into_response();
        }
    }

    match generate_token(user.id, &user.email, &state.auth.token_secret, state.auth.token_ttl_seconds) {
        Ok(token) => {
            let cookie = create_session_cookie(&token, state.auth.token_ttl_seconds, state.auth.deploy_mode);

            debug!(email = %user.email, "registered new user");

            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie.to_string())],
                Json(RegisterResponse::created(user.id)),
            )
                .into_response()
        }
        Err(e) => {
            // The row exists at this point; report the insert without a session.
            error!("register: token signing failed: {}", e);
            Json(RegisterResponse::created(user.id)).into_response()
        }
    }
}

/// POST /userLogin
/// Checks credentials and, on success, sets the session cookie and echoes the
/// token in the body. Unknown user and bad password both answer 200 with a
/// null token, distinguished only by the message.
pub async fn post_user_login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    let mut conn = match state.pool.get().await {
        Ok(c) => c,
        Err(e) => {
            error!("login: could not check out a connection: {}", e);
            return Json(LoginResponse::error()).into_response();
        }
    };

    let user = match find_user_by_email(&mut conn, &request.email).await {
        Ok(u) => u,
        Err(diesel::result::Error::NotFound) => {
            debug!(email = %request.email, "login for unknown email");
            return Json(LoginResponse::user_not_found()).into_response();
        }
        Err(e) => {
            error!("login: lookup failed: {}", e);
            return Json(LoginResponse::error()).into_response();
        }
    };

    match verify_password(&request.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!(email = %request.email, "failed login attempt");
            return Json(LoginResponse::invalid_password()).into_response();
        }
        Err(e) => {
            error!("login: password verification failed: {}", e);
            return Json(LoginResponse::error()).into_response();
        }
    }

    match generate_token(user.id, &user.email, &state.auth.token_secret, state.auth.token_ttl_seconds) {
        Ok(token) => {
            let cookie = create_session_cookie(&token, state.auth.token_ttl_seconds, state.auth.deploy_mode);

            debug!(email = %user.email, "successful login");

            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie.to_string())],
                Json(LoginResponse::success(token)),
            )
                .into_response()
        }
        Err(e) => {
            error!("login: token signing failed: {}", e);
            Json(LoginResponse::error()).into_response()
        }
    }
}

/// GET /userByEmail/{email}
/// Returns the stored record (without the password hash) or 404.
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, LookupUserError> {
    let mut conn = state.pool.get().await?;

    let user = find_user_by_email(&mut conn, &email).await?;

    Ok((StatusCode::OK, Json(UserRecordResponse::from(user))))
}
