/// Rutas de la API, relativas a `AppConfig::api_base_url`
pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const RUN_METRICS_PATH: &str = "/runs/metrics";
pub const USER_STATS_PATH: &str = "/users/me/stats";
pub const CURRENT_USER_PATH: &str = "/users/me";

/// Id del contenedor raíz en index.html
pub const APP_ROOT_ID: &str = "app";
