/// Ticket endpoints
///
/// The public surface accepts submissions and serves the polled list; the
/// admin surface mutates. Admin handlers run behind the session middleware
/// and still re-check the role claim before touching persistence.
///
/// # Endpoints
///
/// - `GET    /tickets` - List tickets, newest first (public; optional
///   `estado` / `buscar` filters)
/// - `POST   /tickets` - Submit a ticket (public)
/// - `GET    /tickets/stats` - Per-status counts (public)
/// - `PUT    /tickets/:id` - Operator edit (admin)
/// - `DELETE /tickets/:id` - Operator delete (admin)

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension,
};
use novatrack_shared::{
    dashboard::{self, StatusFilter},
    models::ticket::{StatusCounts, Ticket, TicketStatus},
    validation::{TicketInput, TicketPatch},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for successful data responses: `{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Envelope for message-only responses: `{"message": ...}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Optional list filters, applying the dashboard matching rules server-side
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Status filter: "Todos", "Pendiente", "En proceso", or "Finalizada"
    pub estado: Option<String>,

    /// Free-text search over name (case-insensitive) and cedula (substring)
    pub buscar: Option<String>,
}

fn parse_status_filter(value: &str) -> Result<StatusFilter, ApiError> {
    match value {
        "Todos" => Ok(StatusFilter::Todos),
        "Pendiente" => Ok(StatusFilter::Solo(TicketStatus::Pendiente)),
        "En proceso" => Ok(StatusFilter::Solo(TicketStatus::EnProceso)),
        "Finalizada" => Ok(StatusFilter::Solo(TicketStatus::Finalizada)),
        _ => Err(ApiError::BadRequest("Estado inválido".to_string())),
    }
}

fn parse_ticket_id(id: &str) -> Result<Uuid, ApiError> {
    // Well-formedness is checked here so malformed ids never reach the
    // storage driver.
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest("ID inválido".to_string()))
}

fn require_admin(auth: &AuthContext) -> Result<(), ApiError> {
    match auth.role {
        novatrack_shared::auth::jwt::Role::Admin => Ok(()),
    }
}

/// Lists tickets, newest first
///
/// # Endpoint
///
/// ```text
/// GET /tickets
/// GET /tickets?estado=Finalizada&buscar=maría
/// ```
///
/// # Response
///
/// ```json
/// { "data": [ { "id": "...", "estado": "Pendiente", ... } ] }
/// ```
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<DataResponse<Vec<Ticket>>>> {
    let filter = match query.estado.as_deref() {
        Some(value) => parse_status_filter(value)?,
        None => StatusFilter::Todos,
    };
    let search = query.buscar.unwrap_or_default();

    let tickets = Ticket::list(&state.db).await?;

    if filter == StatusFilter::Todos && search.is_empty() {
        return Ok(Json(DataResponse { data: tickets }));
    }

    let filtered = dashboard::filter_tickets(&tickets, filter, &search)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DataResponse { data: filtered }))
}

/// Submits a new ticket
///
/// Validation failures return 400 with field-level details. The stored
/// ticket is always created in `Pendiente`, regardless of any `estado` the
/// submitter included.
///
/// # Endpoint
///
/// ```text
/// POST /tickets
/// Content-Type: application/json
///
/// {
///   "cedula": "1032456789",
///   "nombreCompleto": "Ana María Pérez",
///   "correo": "ana@example.com",
///   "celular": "3001234567",
///   "descripcion": "El ascensor de la torre B no funciona"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed (field details included)
/// - `500 Internal Server Error`: persistence failure
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(input): Json<TicketInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<Ticket>>)> {
    let data = input.validated().map_err(ApiError::ValidationError)?;

    let ticket = Ticket::create(&state.db, data).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

/// Per-status ticket counts for the dashboard stat cards
///
/// # Endpoint
///
/// ```text
/// GET /tickets/stats
/// ```
pub async fn ticket_stats(
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<StatusCounts>>> {
    let counts = Ticket::status_counts(&state.db).await?;

    Ok(Json(DataResponse { data: counts }))
}

/// Applies an operator edit (partial update)
///
/// # Endpoint
///
/// ```text
/// PUT /tickets/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "estado": "En proceso" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed id or validation failure
/// - `401 Unauthorized`: missing/invalid admin session
/// - `404 Not Found`: id does not resolve
pub async fn update_ticket(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    Json(patch): Json<TicketPatch>,
) -> ApiResult<Json<DataResponse<Ticket>>> {
    require_admin(&auth)?;

    let id = parse_ticket_id(&id)?;
    let data = patch.validated().map_err(ApiError::ValidationError)?;

    let updated = Ticket::update(&state.db, id, data)
        .await?
        .ok_or_else(|| ApiError::NotFound("Novedad no encontrada".to_string()))?;

    Ok(Json(DataResponse { data: updated }))
}

/// Deletes a ticket
///
/// # Endpoint
///
/// ```text
/// DELETE /tickets/:id
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed id
/// - `401 Unauthorized`: missing/invalid admin session
/// - `404 Not Found`: id does not resolve
pub async fn delete_ticket(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    require_admin(&auth)?;

    let id = parse_ticket_id(&id)?;

    let deleted = Ticket::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Novedad no encontrada".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Novedad eliminada".to_string(),
    }))
}
