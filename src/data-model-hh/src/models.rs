use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::db::PoolError;

// users table model (database representation)
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Bcrypt hash. The plaintext password is never stored.
    pub password_hash: String,
    /// Arbitrary additional registration fields, persisted verbatim.
    pub profile: Value,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new row from a registration request whose password has already
    /// been hashed.
    pub fn from_registration(email: String, password_hash: String, profile: Map<String, Value>) -> Self {
        User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            profile: Value::Object(profile),
            created_at: Utc::now(),
        }
    }
}

// houses table model (database representation)
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::houses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct House {
    pub id: Uuid,
    /// The client-supplied listing document, persisted as-is.
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

impl House {
    pub fn from_document(data: Value) -> Self {
        House {
            id: Uuid::new_v4(),
            data,
            created_at: Utc::now(),
        }
    }
}

// API Payload Types

/// Input payload for POST /register. Fields beyond email and password are
/// carried through to the stored profile unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Response payload for POST /register.
///
/// `insertedId` is always present and null on any non-created outcome; the
/// message is only attached when the row was not created. Clients inspect the
/// body, not the status code (the endpoint answers 200 either way).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "insertedId")]
    pub inserted_id: Option<Uuid>,
}

impl RegisterResponse {
    pub fn created(id: Uuid) -> Self {
        RegisterResponse {
            message: None,
            inserted_id: Some(id),
        }
    }

    pub fn user_exists() -> Self {
        RegisterResponse {
            message: Some("user exists".to_string()),
            inserted_id: None,
        }
    }

    pub fn error() -> Self {
        RegisterResponse {
            message: Some("error".to_string()),
            inserted_id: None,
        }
    }
}

/// Input payload for POST /userLogin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response payload for POST /userLogin. The token is echoed in the body as
/// well as the session cookie; both failure shapes answer 200 with a null
/// token and differ only in the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String) -> Self {
        LoginResponse {
            message: "Login successful".to_string(),
            token: Some(token),
        }
    }

    pub fn user_not_found() -> Self {
        LoginResponse {
            message: "User not found".to_string(),
            token: None,
        }
    }

    pub fn invalid_password() -> Self {
        LoginResponse {
            message: "Invalid password".to_string(),
            token: None,
        }
    }

    pub fn error() -> Self {
        LoginResponse {
            message: "Error".to_string(),
            token: None,
        }
    }
}

/// Response payload for GET /userByEmail/{email}. The stored password hash is
/// deliberately not part of this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecordResponse {
    pub id: Uuid,
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserRecordResponse {
    fn from(user: User) -> Self {
        let profile = match user.profile {
            Value::Object(map) => map,
            // Non-object profiles cannot be flattened; surface nothing extra.
            _ => Map::new(),
        };
        UserRecordResponse {
            id: user.id,
            email: user.email,
            profile,
            created_at: user.created_at,
        }
    }
}

/// Response payload for POST /houses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseInsertResponse {
    #[serde(rename = "insertedId")]
    pub inserted_id: Uuid,
}

// API Error Types

/// Error for GET /userByEmail/{email}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum LookupUserError {
    /// No user is registered under the requested email
    #[serde(rename = "not_found")]
    NotFound,
    /// Unknown error occurred
    #[serde(rename = "unknown")]
    Unknown(String),
}

/// Catch-all error that renders as a 500 with the error text in the body.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": self.0.to_string()
            })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

macro_rules! from_error {
    ($lib_err:path, $err_type:tt) => {
        /// Converts a `$lib_err` into an `$err_type::Unknown`.
        impl From<$lib_err> for $err_type {
            fn from(e: $lib_err) -> Self {
                $err_type::Unknown(format!("{:?}", e))
            }
        }
    };
}

macro_rules! from_diesel_not_found_error {
    ($err_type:tt) => {
        /// Converts a `diesel::result::Error::NotFound` into an `$err_type::NotFound`
        /// otherwise it's a `$err_type::Unknown(diesel::result::Error)`.
        impl From<diesel::result::Error> for $err_type {
            fn from(e: diesel::result::Error) -> Self {
                match e {
                    diesel::result::Error::NotFound => $err_type::NotFound,
                    _ => $err_type::Unknown(format!("{:?}", e)),
                }
            }
        }
    };
}

impl IntoResponse for LookupUserError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            LookupUserError::NotFound => StatusCode::NOT_FOUND,
            LookupUserError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

from_error!(PoolError, LookupUserError);
from_diesel_not_found_error!(LookupUserError);
