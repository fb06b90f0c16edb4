/// Database-backed integration tests
///
/// These tests drive the router against a live PostgreSQL instance and
/// cover the flows that reach persistence: stored-state invariants,
/// missing-id resolution, and duplicate registration.
///
/// They are ignored by default; point `TEST_DATABASE_URL` at a disposable
/// database and run with `cargo test -- --ignored`. Tables are truncated on
/// setup, so never aim this at real data.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use novatrack_api::app::{build_router, AppState};
use novatrack_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};
use novatrack_shared::auth::jwt::{create_token, Claims, Role};
use novatrack_shared::db::migrations::run_migrations;
use novatrack_shared::models::account::Account;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt as _;
use uuid::Uuid;

const JWT_SECRET: &str = "db-integration-secret-at-least-32-bytes";
const INVITE_CODE: &str = "codigo-secreto";

/// Test context over a live database
struct TestContext {
    db: PgPool,
    app: Router,
}

impl TestContext {
    /// Connects to `TEST_DATABASE_URL`, migrates, and starts from empty tables
    async fn new() -> anyhow::Result<Self> {
        let url = std::env::var("TEST_DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("TEST_DATABASE_URL is required for these tests"))?;

        let db = PgPool::connect(&url).await?;
        run_migrations(&db).await?;

        sqlx::query("TRUNCATE tickets, accounts").execute(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
                fallback_operator: None,
                invite_code: Some(INVITE_CODE.to_string()),
            },
        };

        let app = build_router(AppState::new(db.clone(), config));

        Ok(Self { db, app })
    }

    fn admin_token(&self) -> String {
        let claims = Claims::new("account-test".to_string(), Role::Admin);
        create_token(&claims, JWT_SECRET).expect("token")
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_ticket_body() -> Value {
    json!({
        "cedula": "1032456789",
        "nombreCompleto": "Ana María Pérez",
        "correo": "ana@example.com",
        "celular": "3001234567",
        "descripcion": "El ascensor de la torre B no funciona"
    })
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL at TEST_DATABASE_URL"]
async fn test_stored_ticket_is_pendiente_regardless_of_body() {
    let ctx = TestContext::new().await.unwrap();

    let mut body = valid_ticket_body();
    body["estado"] = json!("Finalizada");

    let (status, response) = send(ctx.app.clone(), json_request("POST", "/tickets", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["data"]["estado"], "Pendiente");

    // The stored record, not just the response, is Pendiente.
    let (status, listed) = send(
        ctx.app.clone(),
        Request::builder()
            .method("GET")
            .uri("/tickets")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let tickets = listed["data"].as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["estado"], "Pendiente");
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL at TEST_DATABASE_URL"]
async fn test_mutating_a_missing_id_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let missing = Uuid::new_v4();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/tickets/{}", missing))
        .header("authorization", format!("Bearer {}", ctx.admin_token()))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "estado": "Finalizada" }).to_string()))
        .unwrap();
    let (status, body) = send(ctx.app.clone(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Novedad no encontrada");

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tickets/{}", missing))
        .header("authorization", format!("Bearer {}", ctx.admin_token()))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(ctx.app.clone(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL at TEST_DATABASE_URL"]
async fn test_duplicate_email_registration_is_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let register = |email: &str| {
        json_request(
            "POST",
            "/accounts/register",
            json!({
                "email": email,
                "password": "clave_segura",
                "nombre": "Operador",
                "inviteCode": INVITE_CODE
            }),
        )
    };

    let (status, body) = send(ctx.app.clone(), register("Operador@Example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "operador@example.com");

    // Same email, different casing: rejected, and only one record exists.
    let (status, body) = send(ctx.app.clone(), register("operador@example.com")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Este correo electrónico ya está registrado");

    assert_eq!(Account::count(&ctx.db).await.unwrap(), 1);
}
