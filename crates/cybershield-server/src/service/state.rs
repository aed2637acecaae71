use cybershield_core::Analyzer;
use cybershield_postgres::PgClient;

use crate::service::{PasswordHasher, PasswordStrength, Result, ServiceConfig, VaultCipher};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Every field
/// is cheap to clone and shared across requests.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pg_client: PgClient,
    analyzer: Analyzer,

    password_hasher: PasswordHasher,
    password_strength: PasswordStrength,
    vault_cipher: VaultCipher,
}

impl ServiceState {
    /// Connects to Postgres, applies migrations and assembles the state.
    pub async fn from_config(config: &ServiceConfig, analyzer: Analyzer) -> Result<Self> {
        let pg_client = config.connect_postgres().await?;
        Self::with_pg_client(config, pg_client, analyzer)
    }

    /// Assembles the state around an existing Postgres client.
    pub fn with_pg_client(
        config: &ServiceConfig,
        pg_client: PgClient,
        analyzer: Analyzer,
    ) -> Result<Self> {
        let service_state = Self {
            pg_client,
            analyzer,

            password_hasher: PasswordHasher::new(),
            password_strength: config.password_strength(),
            vault_cipher: config.vault_cipher()?,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);
impl_di!(analyzer: Analyzer);

impl_di!(password_hasher: PasswordHasher);
impl_di!(password_strength: PasswordStrength);
impl_di!(vault_cipher: VaultCipher);
