use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_SESSION_STORAGE_KEY: &str = "testDashboard_session";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_storage_key: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_storage_key: DEFAULT_SESSION_STORAGE_KEY.to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    /// (`build.rs` vuelca el `.env` en `rustc-env`)
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("SESSION_STORAGE_KEY"),
            option_env!("ENVIRONMENT"),
            option_env!("LOG_LEVEL"),
        )
    }

    fn from_values(
        api_base_url: Option<&str>,
        session_storage_key: Option<&str>,
        environment: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        let pick = |value: Option<&str>, default: String| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(default)
        };

        Self {
            api_base_url: pick(api_base_url, defaults.api_base_url)
                .trim_end_matches('/')
                .to_string(),
            session_storage_key: pick(session_storage_key, defaults.session_storage_key),
            environment: pick(environment, defaults.environment),
            log_level: pick(log_level, defaults.log_level),
        }
    }

    /// Nivel de log para wasm-logger; valores desconocidos caen en Info
    pub fn log_level(&self) -> log::Level {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_to_local_backend() {
        let config = AppConfig::from_values(None, None, None, None);
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.session_storage_key, "testDashboard_session");
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = AppConfig::from_values(Some("https://qa.example.com/api/"), None, None, None);
        assert_eq!(config.api_base_url, "https://qa.example.com/api");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = AppConfig::from_values(Some("  "), Some(""), Some("production"), Some("DEBUG"));
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.session_storage_key, "testDashboard_session");
        assert_eq!(config.environment, "production");
        assert_eq!(config.log_level(), log::Level::Debug);
    }
}
