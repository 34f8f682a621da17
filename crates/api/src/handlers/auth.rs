//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinelog_core::error::CoreError;
use cinelog_core::types::DbId;
use cinelog_core::validation::schemas::{login_schema, register_schema};
use cinelog_core::validation::{evaluate, Schema};
use cinelog_db::models::user::{CreateUser, UserResponse};
use cinelog_db::repositories::UserRepo;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::JsonObject;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Returned for both unknown emails and wrong passwords.
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and sign it in. Returns 201 with a token.
pub async fn register(
    State(state): State<AppState>,
    JsonObject(payload): JsonObject,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let payload = checked(&register_schema(), payload)?;
    let name = text(&payload, "name");
    let email = text(&payload, "email").to_lowercase();

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists".into(),
        )));
    }

    let password_hash = hash_password(&text(&payload, "password"))
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still hit `uq_users_email`; that
    // surfaces as a 409 through the sqlx error mapping.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User registered");

    let token = issue_token(&state, user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    JsonObject(payload): JsonObject,
) -> AppResult<Json<AuthResponse>> {
    let payload = checked(&login_schema(), payload)?;
    let email = text(&payload, "email").to_lowercase();

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(BAD_CREDENTIALS.into())))?;

    let password_valid = verify_password(&text(&payload, "password"), &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            BAD_CREDENTIALS.into(),
        )));
    }

    let token = issue_token(&state, user.id)?;
    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim the identity fields and run `schema` over the payload.
///
/// Passwords are checked as sent; whitespace in them is significant.
fn checked(schema: &Schema, mut payload: Map<String, Value>) -> AppResult<Map<String, Value>> {
    for field in ["name", "email"] {
        if let Some(Value::String(s)) = payload.get_mut(field) {
            *s = s.trim().to_string();
        }
    }

    let result = evaluate(schema, &payload);
    if !result.is_valid {
        return Err(AppError::Core(CoreError::InvalidFields(
            result.into_field_errors(),
        )));
    }
    Ok(payload)
}

/// Read a text field the schema already required.
fn text(payload: &Map<String, Value>, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn issue_token(state: &AppState, user_id: DbId) -> AppResult<String> {
    generate_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
