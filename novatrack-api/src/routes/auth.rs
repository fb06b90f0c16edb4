/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /accounts/register` - Create an operator account (provisioning-gated)
/// - `POST /auth/login` - Exchange credentials for a session token
///
/// Registration is not open self-service: when an invite code is configured
/// it must accompany the request, and without one only the first account may
/// register (bootstrap). Every account carries the single `admin` role.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{extract::State, http::StatusCode};
use novatrack_shared::{
    auth::{credentials, jwt, password},
    models::account::{Account, AccountPublic, CreateAccount},
    validation::{collect_errors, LoginInput, RegisterInput},
};
use serde::Serialize;
use validator::Validate;

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Outcome message
    pub message: String,

    /// Created account, without the password hash
    pub user: AccountPublic,
}

/// Login response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    /// Signed session token carrying the role claim
    pub token: String,

    pub email: String,
    pub nombre: String,
    pub role: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub data: SessionPayload,
}

/// Registers a new operator account
///
/// # Endpoint
///
/// ```text
/// POST /accounts/register
/// Content-Type: application/json
///
/// {
///   "email": "operador@example.com",
///   "password": "clave_segura",
///   "nombre": "Operador",
///   "inviteCode": "..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed, or email already registered
/// - `401 Unauthorized`: provisioning gate rejected the request
/// - `500 Internal Server Error`: server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterInput>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()
        .map_err(|e| ApiError::ValidationError(collect_errors(&e)))?;

    // Provisioning gate (explicit, instead of open self-service admin
    // creation): invite code when configured, first-account bootstrap
    // otherwise.
    match &state.config.auth.invite_code {
        Some(code) => {
            let supplied = req.invite_code.as_deref().map(str::trim).unwrap_or("");
            if supplied != code.trim() {
                return Err(ApiError::Unauthorized(
                    "Código de invitación inválido".to_string(),
                ));
            }
        }
        None => {
            let existing = Account::count(&state.db).await?;
            if existing > 0 {
                return Err(ApiError::Unauthorized(
                    "El registro está deshabilitado".to_string(),
                ));
            }
        }
    }

    // Plaintext stops here; only the hash crosses into persistence.
    let password_hash = password::hash_password(&req.password)?;

    let account = Account::create(
        &state.db,
        CreateAccount {
            email: req.email,
            password_hash,
            nombre: req.nombre,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Usuario registrado exitosamente como administrador".to_string(),
            user: account.into(),
        }),
    ))
}

/// Exchanges credentials for a session token
///
/// Runs the login state machine: stored account first, configured fallback
/// operator second, anything unexpected collapses to rejection.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "email": "operador@example.com", "password": "clave_segura" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: credentials rejected
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginInput>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()
        .map_err(|e| ApiError::ValidationError(collect_errors(&e)))?;

    let operator = credentials::authorize(
        &state.db,
        state.config.auth.fallback_operator.as_ref(),
        &req.email,
        &req.password,
    )
    .await
    .ok_or_else(|| ApiError::Unauthorized("Correo o contraseña incorrectos".to_string()))?;

    let claims = jwt::Claims::new(operator.subject, operator.role);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        data: SessionPayload {
            token,
            email: operator.email,
            nombre: operator.nombre,
            role: operator.role.as_str().to_string(),
        },
    }))
}
