// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio: arma URLs, pone el bearer y traduce status/body
// a errores tipados. La decisión admin/usuario vive en StatsFetcher.
// ============================================================================

use serde_json::json;

use crate::config::{AppConfig, CONFIG};
use crate::errors::{AuthError, FetchError};
use crate::models::{AdminMetrics, Credentials, CurrentUserResponse, LoginResponse, StatsSummary};
use crate::services::http::{GlooHttpClient, HttpClient};
use crate::utils::constants::{AUTH_LOGIN_PATH, CURRENT_USER_PATH, RUN_METRICS_PATH, USER_STATS_PATH};

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient<C: HttpClient = GlooHttpClient> {
    base_url: String,
    http: C,
}

impl ApiClient<GlooHttpClient> {
    pub fn new() -> Self {
        Self::with_client(&CONFIG, GlooHttpClient::new())
    }
}

impl Default for ApiClient<GlooHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> ApiClient<C> {
    pub fn with_client(config: &AppConfig, http: C) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            http,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Login. 400/401/403 del backend significan credenciales rechazadas.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let url = self.url(AUTH_LOGIN_PATH);
        log::info!("🔐 [API] Login para usuario: {}", credentials.username);

        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });
        let response = self
            .http
            .post_json(&url, &body)
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        match response.status {
            200..=299 => {}
            400 | 401 | 403 => return Err(AuthError::InvalidCredentials),
            status => return Err(AuthError::Server { status }),
        }

        let login: LoginResponse = response
            .json()
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        if login.token.trim().is_empty() {
            return Err(AuthError::MalformedResponse("empty token".to_string()));
        }
        Ok(login)
    }

    /// Perfil del usuario autenticado
    pub async fn current_user(&self, token: &str) -> Result<CurrentUserResponse, FetchError> {
        self.get_json(CURRENT_USER_PATH, token).await
    }

    /// Métricas globales (admin)
    pub async fn run_metrics(&self, token: &str) -> Result<AdminMetrics, FetchError> {
        self.get_json(RUN_METRICS_PATH, token).await
    }

    /// Estadísticas del usuario, ya en formato StatsSummary
    pub async fn my_stats(&self, token: &str) -> Result<StatsSummary, FetchError> {
        self.get_json(USER_STATS_PATH, token).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, FetchError> {
        let url = self.url(path);
        log::debug!("🌐 [API] GET {}", url);
        self.http
            .get(&url, Some(token))
            .await?
            .error_for_status()?
            .json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::fake::FakeHttpClient;
    use futures::executor::block_on;

    const BASE: &str = "http://api.test/api";

    fn client(fake: &FakeHttpClient) -> ApiClient<FakeHttpClient> {
        let config = AppConfig {
            api_base_url: BASE.to_string(),
            ..AppConfig::default()
        };
        ApiClient::with_client(&config, fake.clone())
    }

    #[test]
    fn login_posts_credentials() {
        let fake = FakeHttpClient::new();
        fake.respond(&format!("{BASE}/auth/login"), 200, r#"{"token":"jwt","roles":["ROLE_USER"]}"#);

        let resp = block_on(client(&fake).login(&Credentials::new("ana", "pw"))).unwrap();
        assert_eq!(resp.token, "jwt");

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].body.as_ref().unwrap()["username"], "ana");
    }

    #[test]
    fn login_rejection_is_invalid_credentials() {
        let fake = FakeHttpClient::new();
        fake.respond(&format!("{BASE}/auth/login"), 401, "");
        let err = block_on(client(&fake).login(&Credentials::new("ana", "bad"))).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[test]
    fn login_server_and_body_failures_are_distinct() {
        let fake = FakeHttpClient::new();
        fake.respond(&format!("{BASE}/auth/login"), 502, "");
        let err = block_on(client(&fake).login(&Credentials::new("ana", "pw"))).unwrap_err();
        assert_eq!(err, AuthError::Server { status: 502 });

        fake.respond(&format!("{BASE}/auth/login"), 200, r#"{"token":""}"#);
        let err = block_on(client(&fake).login(&Credentials::new("ana", "pw"))).unwrap_err();
        assert!(matches!(err, AuthError::MalformedResponse(_)));
    }

    #[test]
    fn stats_requests_carry_bearer_token() {
        let fake = FakeHttpClient::new();
        fake.respond(&format!("{BASE}/users/me/stats"), 200, r#"{"passed":1}"#);

        let stats = block_on(client(&fake).my_stats("tok")).unwrap();
        assert_eq!(stats.passed, 1);
        assert_eq!(fake.calls()[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn non_success_status_is_fetch_error() {
        let fake = FakeHttpClient::new();
        fake.respond(&format!("{BASE}/runs/metrics"), 500, "");
        let err = block_on(client(&fake).run_metrics("tok")).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }
}
