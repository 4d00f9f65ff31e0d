// ============================================================================
// ERRORS - Errores tipados de autenticación, estadísticas y storage
// ============================================================================

use thiserror::Error;

/// Error al hacer login. Solo `InvalidCredentials` es un rechazo del backend;
/// el resto son fallos de transporte o de contrato.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username and password are required")]
    MissingCredentials,

    #[error("network error: {0}")]
    Network(String),

    #[error("authentication server returned HTTP {status}")]
    Server { status: u16 },

    #[error("malformed authentication response: {0}")]
    MalformedResponse(String),

    /// Ya hay un login en curso desde este formulario
    #[error("login already in progress")]
    InProgress,
}

impl AuthError {
    /// Texto que se muestra en el formulario de login
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid username or password".to_string(),
            AuthError::MissingCredentials => "Please enter your username and password".to_string(),
            AuthError::Network(_) => "Cannot reach the server. Check your connection and try again".to_string(),
            AuthError::Server { status } => format!("Login failed (server error {})", status),
            AuthError::MalformedResponse(_) => "Login failed: unexpected server response".to_string(),
            AuthError::InProgress => "Signing in...".to_string(),
        }
    }
}

/// Error al leer estadísticas. Nunca llega a la vista: `StatsFetcher::load`
/// lo colapsa a un resumen en cero.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("malformed response body: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("could not serialize session: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
