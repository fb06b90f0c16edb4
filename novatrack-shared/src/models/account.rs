/// Operator account model and database operations
///
/// Accounts authenticate against the admin surface. There is a single role,
/// `admin`; the interesting policy lives in the registration handler, which
/// gates who may create an account at all.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     nombre VARCHAR(120) NOT NULL,
///     role VARCHAR(20) NOT NULL DEFAULT 'admin',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Emails are lowercased here, at the write/lookup boundary, so the UNIQUE
/// constraint is effectively case-insensitive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Operator account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID
    pub id: Uuid,

    /// Email address (stored lowercased, unique)
    pub email: String,

    /// Argon2id password hash
    ///
    /// Never serialized in API responses; see `AccountPublic`.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Display name
    pub nombre: String,

    /// Role; the only value in the product is "admin"
    pub role: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new account
///
/// The caller is responsible for hashing the password before this point;
/// plaintext never crosses the persistence boundary.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub email: String,
    pub password_hash: String,
    pub nombre: String,
}

/// Account shape returned by the API: everything except the hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPublic {
    pub id: Uuid,
    pub email: String,
    pub nombre: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountPublic {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            nombre: account.nombre,
            role: account.role,
            created_at: account.created_at,
        }
    }
}

impl Account {
    /// Creates a new operator account
    ///
    /// The email is lowercased and trimmed before the INSERT. A duplicate
    /// email surfaces as a unique-constraint violation from the driver.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateAccount) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, nombre)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, nombre, role, created_at, updated_at
            "#,
        )
        .bind(data.email.trim().to_lowercase())
        .bind(data.password_hash)
        .bind(data.nombre.trim())
        .fetch_one(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by email address (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, nombre, role, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Counts registered accounts
    ///
    /// Used by the bootstrap registration rule: with no invite code
    /// configured, only the first account may self-register.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(pool)
            .await?;

        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_shape_drops_hash() {
        let account = Account {
            id: Uuid::new_v4(),
            email: "operador@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=3,p=4$salt$hash".to_string(),
            nombre: "Operador".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let public = AccountPublic::from(account.clone());
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("operador@example.com"));

        // The full model skips the hash on serialization as well.
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("password"));
    }
}
