//! Password vault handlers.
//!
//! Entries are encrypted with a per-account key before they reach the
//! database and decrypted only when listed.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use cybershield_postgres::model::{Account, NewVaultEntry};
use cybershield_postgres::query::{AccountRepository, VaultEntryRepository};
use cybershield_postgres::{PgClient, PgConn};
use validator::Validate;

use super::request::{DeletePassword, StorePassword};
use super::response::{Message, VaultPassword, VaultPasswords};
use crate::extract::{Json, Path};
use crate::handler::{ErrorKind, Result};
use crate::service::{ServiceState, VaultCipher};

/// Tracing target for vault operations.
const TRACING_TARGET: &str = "cybershield_server::handler::vault";

/// Looks up the account owning the vault, or fails with `404`.
async fn find_owner(conn: &mut PgConn, username: &str) -> Result<Account> {
    conn.find_account_by_username(username)
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("User not found")
                .with_resource("account")
        })
}

#[tracing::instrument(skip_all)]
async fn store_password(
    State(pg_client): State<PgClient>,
    State(vault_cipher): State<VaultCipher>,
    request: Option<Json<StorePassword>>,
) -> Result<(StatusCode, Json<Message>)> {
    let Json(request) = request.unwrap_or_default();
    request.validate().map_err(|_| {
        ErrorKind::BadRequest
            .with_message("Missing fields")
            .with_resource("vault_entry")
    })?;

    let mut conn = pg_client.get_connection().await?;
    let account = find_owner(&mut conn, &request.username).await?;

    let password_ciphertext = vault_cipher.encrypt(account.id, &request.password)?;
    let entry = conn
        .create_vault_entry(NewVaultEntry {
            account_id: account.id,
            website: request.website,
            password_ciphertext,
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        entry_id = entry.id,
        "vault entry stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(Message::new("Password stored successfully")),
    ))
}

#[tracing::instrument(skip_all)]
async fn list_passwords(
    State(pg_client): State<PgClient>,
    State(vault_cipher): State<VaultCipher>,
    Path(username): Path<String>,
) -> Result<Json<VaultPasswords>> {
    let mut conn = pg_client.get_connection().await?;
    let account = find_owner(&mut conn, &username).await?;

    let entries = conn.list_vault_entries(account.id).await?;
    let passwords = entries
        .into_iter()
        .map(|entry| -> Result<VaultPassword> {
            let password = vault_cipher.decrypt(account.id, &entry.password_ciphertext)?;
            Ok(VaultPassword {
                id: entry.id,
                website: entry.website,
                password,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        target: TRACING_TARGET,
        account_id = %account.id,
        count = passwords.len(),
        "vault entries listed"
    );

    Ok(Json(VaultPasswords { passwords }))
}

#[tracing::instrument(skip_all)]
async fn delete_password(
    State(pg_client): State<PgClient>,
    Path(entry_id): Path<i64>,
    request: Option<Json<DeletePassword>>,
) -> Result<Json<Message>> {
    let Json(request) = request.unwrap_or_default();
    request.validate().map_err(|_| {
        ErrorKind::BadRequest
            .with_message("Username required")
            .with_resource("vault_entry")
    })?;

    let mut conn = pg_client.get_connection().await?;
    let account = find_owner(&mut conn, &request.username).await?;

    if !conn.delete_vault_entry(account.id, entry_id).await? {
        return Err(ErrorKind::NotFound
            .with_message("No password entry deleted. Check id and user.")
            .with_resource("vault_entry"));
    }

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %account.id,
        entry_id = entry_id,
        "vault entry deleted"
    );

    Ok(Json(Message::new("Password deleted successfully")))
}

/// Returns a [`Router`] with all vault routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/store-password", post(store_password))
        .route("/user-passwords/{username}", get(list_passwords))
        .route("/delete-password/{id}", delete(delete_password))
}
