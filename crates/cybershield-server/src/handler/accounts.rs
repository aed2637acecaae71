//! Account registration and login handlers.
//!
//! There are no sessions: a successful login returns the account id and
//! username, and later requests identify the account by username.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use cybershield_postgres::PgClient;
use cybershield_postgres::model::NewAccount;
use cybershield_postgres::query::AccountRepository;
use validator::Validate;

use super::request::{LoginAccount, RegisterAccount};
use super::response::{LoggedIn, Message};
use crate::extract::Json;
use crate::handler::{ErrorKind, Result};
use crate::service::{PasswordHasher, PasswordStrength, ServiceState};

/// Tracing target for account operations.
const TRACING_TARGET: &str = "cybershield_server::handler::accounts";

#[tracing::instrument(skip_all)]
async fn register(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    State(password_strength): State<PasswordStrength>,
    request: Option<Json<RegisterAccount>>,
) -> Result<(StatusCode, Json<Message>)> {
    let Json(request) = request.unwrap_or_default();
    request.validate().map_err(|_| {
        ErrorKind::BadRequest
            .with_message("All fields are required")
            .with_resource("account")
    })?;

    password_strength.validate_password(
        &request.password,
        &[request.username.as_str(), request.email.as_str()],
    )?;

    let password_hash = password_hasher.hash_password(&request.password)?;
    let new_account = NewAccount {
        username: request.username,
        email_address: request.email,
        phone_number: request.phone,
        password_hash,
    };

    let mut conn = pg_client.get_connection().await?;
    let account = conn.create_account(new_account).await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "account registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(Message::new("User registered successfully")),
    ))
}

#[tracing::instrument(skip_all)]
async fn login(
    State(pg_client): State<PgClient>,
    State(password_hasher): State<PasswordHasher>,
    request: Option<Json<LoginAccount>>,
) -> Result<Json<LoggedIn>> {
    let Json(request) = request.unwrap_or_default();
    request.validate().map_err(|_| {
        ErrorKind::BadRequest
            .with_message("Identifier and password are required")
            .with_resource("account")
    })?;

    let mut conn = pg_client.get_connection().await?;
    let Some(account) = conn.find_account_by_identifier(&request.identifier).await? else {
        password_hasher.verify_dummy_password(&request.password);
        tracing::debug!(target: TRACING_TARGET, "login for unknown identifier");
        return Err(ErrorKind::Unauthorized.with_resource("account"));
    };

    password_hasher.verify_password(&request.password, &account.password_hash)?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        "login succeeded"
    );

    Ok(Json(LoggedIn::from(account)))
}

/// Returns a [`Router`] with all account routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[cfg(test)]
mod tests {
    use cybershield_core::mock::{MockFetcher, MockProvider};
    use serde_json::{Value, json};

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn register_requires_every_field() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::new(), MockFetcher::new())?;

        let response = server
            .post("/api/register")
            .json(&json!({"username": "alice", "email": "alice@example.com", "password": "x"}))
            .await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "All fields are required");
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_weak_password() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::new(), MockFetcher::new())?;

        let response = server
            .post("/api/register")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "phone": "+1 555 0100",
                "password": "password"
            }))
            .await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Password is too weak");
        Ok(())
    }

    #[tokio::test]
    async fn register_reports_unreachable_database() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::new(), MockFetcher::new())?;

        let response = server
            .post("/api/register")
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "phone": "+1 555 0100",
                "password": "correct-Horse-battery-st4ple!"
            }))
            .await;
        response.assert_status_internal_server_error();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Database connection failed");
        Ok(())
    }

    #[tokio::test]
    async fn login_requires_identifier_and_password() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::new(), MockFetcher::new())?;

        let response = server.post("/api/login").json(&json!({"identifier": "alice"})).await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Identifier and password are required");
        Ok(())
    }

    #[tokio::test]
    async fn login_without_body_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server(MockProvider::new(), MockFetcher::new())?;

        let response = server.post("/api/login").await;
        response.assert_status_bad_request();
        Ok(())
    }
}
