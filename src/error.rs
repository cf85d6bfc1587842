use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    /// Caught before any request is sent
    #[error("{0}")]
    Validation(String),

    #[error("Backend respondeu {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Falha de comunicação: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Resposta inválida: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Sessão expirada ou ausente")]
    NotAuthenticated,

    #[error("Configuração inválida: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DeskError>;

impl DeskError {
    /// Builds a backend error from a non-2xx response body, preferring the
    /// server's own `detail` or `error` message.
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                ["detail", "error", "message"]
                    .iter()
                    .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
            })
            .unwrap_or_else(|| fallback.to_string());
        DeskError::Backend { status, message }
    }

    /// Short text suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            DeskError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_detail_from_body() {
        let err = DeskError::from_response(400, r#"{"detail":"Arquivo muito grande"}"#, "Erro");
        assert_eq!(err.user_message(), "Arquivo muito grande");
    }

    #[test]
    fn falls_back_when_body_is_not_json() {
        let err = DeskError::from_response(502, "<html>Bad gateway</html>", "Erro ao salvar");
        assert_eq!(err.user_message(), "Erro ao salvar");
        assert!(matches!(err, DeskError::Backend { status: 502, .. }));
    }
}
