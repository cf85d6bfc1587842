use crate::error::{DeskError, Result};
use std::env;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the listings backend
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Root of the backend, without the `/api` suffix
    pub backend_url: Url,
    pub request_timeout: Duration,
    /// Token to start with, e.g. for scripted admin runs
    pub api_token: Option<String>,
}

impl DeskConfig {
    /// Loads `.env` if present, then reads `BACKEND_URL`, `REQUEST_TIMEOUT_SECS`
    /// and `API_TOKEN` from the environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let backend_url = env::var("BACKEND_URL")
            .map_err(|_| DeskError::Config("BACKEND_URL deve ser definida".to_string()))?;

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                DeskError::Config(format!("REQUEST_TIMEOUT_SECS inválido: {raw}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let api_token = env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty());

        Self::new(&backend_url, Duration::from_secs(request_timeout), api_token)
    }

    pub fn new(backend_url: &str, request_timeout: Duration, api_token: Option<String>) -> Result<Self> {
        let backend_url = Url::parse(backend_url.trim())
            .map_err(|e| DeskError::Config(format!("BACKEND_URL inválida: {e}")))?;
        Ok(Self { backend_url, request_timeout, api_token })
    }

    /// `{backend}/api/{path}`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.backend_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
