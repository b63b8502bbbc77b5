/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - create an account and get a token
/// - `POST /auth/login` - exchange credentials for a token
///
/// Tokens are 24 hour HS256 JWTs; all project and task routes consume
/// them through the bearer middleware in `app.rs`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (strength-checked before hashing)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Token response for both register and login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Authenticated user ID
    pub user_id: String,

    /// Bearer access token (24h)
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

fn validation_details(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Register a new user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `409 Conflict`: email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate().map_err(validation_details)?;

    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let access_token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(TokenResponse {
        user_id: user.id.to_string(),
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Login with email and password
///
/// # Errors
///
/// - `401 Unauthorized`: unknown email or wrong password (the two are
///   not distinguished in the response)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate().map_err(validation_details)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let access_token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(TokenResponse {
        user_id: user.id.to_string(),
        access_token,
        token_type: "bearer".to_string(),
    }))
}
