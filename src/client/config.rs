use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::client::utils::credential_store::{CredentialStore, FileStore, KeyringStore, MemoryStore};

pub const DEV_API_BASE: &str = "http://localhost:8080";
pub const PROD_API_BASE: &str = "https://group8-backend-0037104cd0e1.herokuapp.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEnv {
    Development,
    Production,
}

impl BuildEnv {
    pub fn api_base(&self) -> &'static str {
        match self {
            BuildEnv::Development => DEV_API_BASE,
            BuildEnv::Production => PROD_API_BASE,
        }
    }
}

/// Which credential store backs the token accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Native encrypted-at-rest store
    Keyring,
    /// Browser-storage analogue
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub build_env: BuildEnv,
    pub api_base: String,
    pub store_backend: StoreBackend,
    pub web_storage_path: PathBuf,
    pub keyring_fallback: bool,
    pub google_client_id: Option<String>,
    pub github_client_id: Option<String>,
    pub redirect_uri: String,
    pub log_level: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let build_env = match lookup("APP_ENV").as_deref().map(str::trim) {
            Some("development") | Some("dev") => BuildEnv::Development,
            _ => BuildEnv::Production,
        };
        let api_base = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| build_env.api_base().to_string());
        let store_backend = match lookup("CREDENTIAL_STORE").as_deref() {
            Some("file") | Some("web") => StoreBackend::File,
            Some("memory") => StoreBackend::Memory,
            _ => StoreBackend::Keyring,
        };
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            build_env,
            api_base: api_base.trim_end_matches('/').to_string(),
            store_backend,
            web_storage_path: lookup("WEB_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data").join("web_storage.json")),
            keyring_fallback: lookup("KEYRING_FALLBACK").map(|v| v == "true" || v == "1").unwrap_or(false),
            google_client_id: non_empty("GOOGLE_CLIENT_ID"),
            github_client_id: non_empty("GITHUB_CLIENT_ID"),
            redirect_uri: lookup("OAUTH_REDIRECT_URI")
                .unwrap_or_else(|| "http://localhost:8081/LoginPage".to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Build the credential store selected by `CREDENTIAL_STORE`.
    pub fn open_store(&self) -> Arc<dyn CredentialStore> {
        match self.store_backend {
            StoreBackend::Keyring => {
                let fallback = self.keyring_fallback.then(|| PathBuf::from("data"));
                Arc::new(KeyringStore::new(fallback))
            }
            StoreBackend::File => Arc::new(FileStore::new(self.web_storage_path.clone())),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        }
    }
}
