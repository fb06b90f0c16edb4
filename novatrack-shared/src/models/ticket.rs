/// Ticket model and database operations
///
/// A ticket ("novedad") is a record submitted through the public form and
/// triaged by an operator through three states.
///
/// # State Machine
///
/// ```text
/// Pendiente → En proceso → Finalizada
/// ```
///
/// Tickets are always created as `Pendiente`; the submitter cannot choose a
/// state. Only an authenticated operator moves a ticket forward (or edits /
/// deletes it).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE ticket_status AS ENUM ('Pendiente', 'En proceso', 'Finalizada');
///
/// CREATE TABLE tickets (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     cedula VARCHAR(15) NOT NULL,
///     nombre_completo VARCHAR(120) NOT NULL,
///     correo VARCHAR(255) NOT NULL,
///     celular VARCHAR(10) NOT NULL,
///     descripcion VARCHAR(500) NOT NULL,
///     estado ticket_status NOT NULL DEFAULT 'Pendiente',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use novatrack_shared::models::ticket::{CreateTicket, Ticket};
/// use novatrack_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let ticket = Ticket::create(&pool, CreateTicket {
///     cedula: "1032456789".to_string(),
///     nombre_completo: "Ana María Pérez".to_string(),
///     correo: "ana@example.com".to_string(),
///     celular: "3001234567".to_string(),
///     descripcion: "El ascensor de la torre B no funciona".to_string(),
/// }).await?;
///
/// assert_eq!(ticket.estado.as_str(), "Pendiente");
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Ticket triage status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status")]
pub enum TicketStatus {
    /// Submitted, not yet picked up by an operator
    Pendiente,

    /// An operator is working on it
    #[serde(rename = "En proceso")]
    #[sqlx(rename = "En proceso")]
    EnProceso,

    /// Resolved and closed
    Finalizada,
}

impl TicketStatus {
    /// Returns the status label as stored in the database and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pendiente => "Pendiente",
            TicketStatus::EnProceso => "En proceso",
            TicketStatus::Finalizada => "Finalizada",
        }
    }
}

/// Ticket model representing a submitted novedad
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket ID
    pub id: Uuid,

    /// Submitter's identification number (5-15 digits)
    pub cedula: String,

    /// Submitter's full name
    pub nombre_completo: String,

    /// Submitter's email address
    pub correo: String,

    /// Submitter's mobile number (exactly 10 digits)
    pub celular: String,

    /// Free-text description of the incident or request
    pub descripcion: String,

    /// Current triage status
    pub estado: TicketStatus,

    /// When the ticket was submitted
    pub created_at: DateTime<Utc>,

    /// When the ticket was last modified by an operator
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new ticket
///
/// Deliberately carries no `estado`: creation always lands in `Pendiente`
/// via the column default, regardless of anything the submitter sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub cedula: String,
    pub nombre_completo: String,
    pub correo: String,
    pub celular: String,
    pub descripcion: String,
}

/// Input for an operator edit
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub cedula: Option<String>,
    pub nombre_completo: Option<String>,
    pub correo: Option<String>,
    pub celular: Option<String>,
    pub descripcion: Option<String>,
    pub estado: Option<TicketStatus>,
}

impl UpdateTicket {
    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.cedula.is_none()
            && self.nombre_completo.is_none()
            && self.correo.is_none()
            && self.celular.is_none()
            && self.descripcion.is_none()
            && self.estado.is_none()
    }
}

/// Per-status ticket totals for the dashboard stat cards
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: i64,
    pub pendientes: i64,
    pub en_proceso: i64,
    pub finalizadas: i64,
}

impl Ticket {
    /// Creates a new ticket in Pendiente state
    ///
    /// The INSERT never mentions `estado`; the column default guarantees the
    /// invariant even if a caller smuggled a status into the request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTicket) -> Result<Self, sqlx::Error> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (cedula, nombre_completo, correo, celular, descripcion)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, cedula, nombre_completo, correo, celular, descripcion,
                      estado, created_at, updated_at
            "#,
        )
        .bind(data.cedula)
        .bind(data.nombre_completo)
        .bind(data.correo)
        .bind(data.celular)
        .bind(data.descripcion)
        .fetch_one(pool)
        .await?;

        Ok(ticket)
    }

    /// Lists all tickets, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tickets = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT id, cedula, nombre_completo, correo, celular, descripcion,
                   estado, created_at, updated_at
            FROM tickets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tickets)
    }

    /// Finds a ticket by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT id, cedula, nombre_completo, correo, celular, descripcion,
                   estado, created_at, updated_at
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(ticket)
    }

    /// Applies a partial operator edit
    ///
    /// Only non-None fields in `data` are written; `updated_at` is always
    /// bumped. Returns the updated ticket, or `None` when the id does not
    /// resolve to a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTicket,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            // Nothing to write; still bump updated_at so the edit is visible
            // to pollers, matching a full-form save with no changes.
            let ticket = sqlx::query_as::<_, Ticket>(
                r#"
                UPDATE tickets
                SET updated_at = NOW()
                WHERE id = $1
                RETURNING id, cedula, nombre_completo, correo, celular, descripcion,
                          estado, created_at, updated_at
                "#,
            )
            .bind(id)
            .fetch_optional(pool)
            .await?;

            return Ok(ticket);
        }

        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tickets SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.cedula.is_some() {
            bind_count += 1;
            query.push_str(&format!(", cedula = ${}", bind_count));
        }
        if data.nombre_completo.is_some() {
            bind_count += 1;
            query.push_str(&format!(", nombre_completo = ${}", bind_count));
        }
        if data.correo.is_some() {
            bind_count += 1;
            query.push_str(&format!(", correo = ${}", bind_count));
        }
        if data.celular.is_some() {
            bind_count += 1;
            query.push_str(&format!(", celular = ${}", bind_count));
        }
        if data.descripcion.is_some() {
            bind_count += 1;
            query.push_str(&format!(", descripcion = ${}", bind_count));
        }
        if data.estado.is_some() {
            bind_count += 1;
            query.push_str(&format!(", estado = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, cedula, nombre_completo, correo, celular, \
             descripcion, estado, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Ticket>(&query).bind(id);

        if let Some(cedula) = data.cedula {
            q = q.bind(cedula);
        }
        if let Some(nombre_completo) = data.nombre_completo {
            q = q.bind(nombre_completo);
        }
        if let Some(correo) = data.correo {
            q = q.bind(correo);
        }
        if let Some(celular) = data.celular {
            q = q.bind(celular);
        }
        if let Some(descripcion) = data.descripcion {
            q = q.bind(descripcion);
        }
        if let Some(estado) = data.estado {
            q = q.bind(estado);
        }

        let ticket = q.fetch_optional(pool).await?;

        Ok(ticket)
    }

    /// Deletes a ticket
    ///
    /// Returns `true` when a record was removed, `false` when the id did not
    /// resolve.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tickets per status for the dashboard stat cards
    pub async fn status_counts(pool: &PgPool) -> Result<StatusCounts, sqlx::Error> {
        let row: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE estado = 'Pendiente'),
                   COUNT(*) FILTER (WHERE estado = 'En proceso'),
                   COUNT(*) FILTER (WHERE estado = 'Finalizada')
            FROM tickets
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(StatusCounts {
            total: row.0,
            pendientes: row.1,
            en_proceso: row.2,
            finalizadas: row.3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(TicketStatus::Pendiente.as_str(), "Pendiente");
        assert_eq!(TicketStatus::EnProceso.as_str(), "En proceso");
        assert_eq!(TicketStatus::Finalizada.as_str(), "Finalizada");
    }

    #[test]
    fn test_status_serde_uses_product_labels() {
        let json = serde_json::to_string(&TicketStatus::EnProceso).unwrap();
        assert_eq!(json, "\"En proceso\"");

        let parsed: TicketStatus = serde_json::from_str("\"Finalizada\"").unwrap();
        assert_eq!(parsed, TicketStatus::Finalizada);
    }

    #[test]
    fn test_ticket_wire_shape_is_camel_case() {
        let patch: UpdateTicket =
            serde_json::from_str(r#"{"nombreCompleto": "Ana", "estado": "En proceso"}"#).unwrap();
        assert_eq!(patch.nombre_completo.as_deref(), Some("Ana"));
        assert_eq!(patch.estado, Some(TicketStatus::EnProceso));
        assert!(patch.cedula.is_none());
    }

    #[test]
    fn test_create_ticket_has_no_status_field() {
        // A submitter-supplied estado is simply not part of the create input;
        // deserialization ignores unknown fields.
        let data: CreateTicket = serde_json::from_str(
            r#"{
                "cedula": "12345",
                "nombreCompleto": "Ana María Pérez",
                "correo": "ana@example.com",
                "celular": "3001234567",
                "descripcion": "Se dañó la puerta del sótano",
                "estado": "Finalizada"
            }"#,
        )
        .unwrap();
        assert_eq!(data.cedula, "12345");
    }

    #[test]
    fn test_update_ticket_is_empty() {
        assert!(UpdateTicket::default().is_empty());
        assert!(!UpdateTicket {
            estado: Some(TicketStatus::Finalizada),
            ..Default::default()
        }
        .is_empty());
    }
}
