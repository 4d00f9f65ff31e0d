// ============================================================================
// STATS SERVICE - Lectura de estadísticas según rol
// ============================================================================
// Admin → /runs/metrics (se normaliza), usuario → /users/me/stats (tal cual).
// Cualquier fallo se registra y se sustituye por un resumen en cero: el
// dashboard siempre se renderiza.
// ============================================================================

use crate::errors::FetchError;
use crate::models::{Session, StatsSummary};
use crate::services::api_client::ApiClient;
use crate::services::http::{GlooHttpClient, HttpClient};

/// Identifica la última petición lanzada: solo se vuelve a pedir si cambia
/// el token o el rol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsKey {
    pub token: String,
    pub is_admin: bool,
}

impl StatsKey {
    pub fn for_session(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            is_admin: session.is_admin(),
        }
    }
}

#[derive(Clone)]
pub struct StatsFetcher<C: HttpClient = GlooHttpClient> {
    api: ApiClient<C>,
}

impl StatsFetcher<GlooHttpClient> {
    pub fn new() -> Self {
        Self::with_api(ApiClient::new())
    }
}

impl Default for StatsFetcher<GlooHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> StatsFetcher<C> {
    pub fn with_api(api: ApiClient<C>) -> Self {
        Self { api }
    }

    /// Una única petición, sin reintentos
    pub async fn fetch(&self, session: &Session) -> Result<StatsSummary, FetchError> {
        let stats = if session.is_admin() {
            let metrics = self.api.run_metrics(&session.token).await?;
            StatsSummary::from(metrics)
        } else {
            self.api.my_stats(&session.token).await?
        };
        stats.validate()
    }

    /// Igual que `fetch` pero nunca falla: el error se loguea y se devuelve
    /// el resumen por defecto.
    pub async fn load(&self, session: &Session) -> StatsSummary {
        match self.fetch(session).await {
            Ok(stats) => {
                log::info!(
                    "📊 [STATS] {} passed / {} failed / {} pending ({:.1}%)",
                    stats.passed,
                    stats.failed,
                    stats.pending,
                    stats.pass_rate
                );
                stats
            }
            Err(e) => {
                log::error!("❌ [STATS] Error cargando estadísticas: {}", e);
                StatsSummary::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{Role, User};
    use crate::services::http::fake::FakeHttpClient;
    use futures::executor::block_on;

    const BASE: &str = "http://api.test/api";
    const METRICS: &str = "http://api.test/api/runs/metrics";
    const USER_STATS: &str = "http://api.test/api/users/me/stats";

    fn fetcher(fake: &FakeHttpClient) -> StatsFetcher<FakeHttpClient> {
        let config = AppConfig {
            api_base_url: BASE.to_string(),
            ..AppConfig::default()
        };
        StatsFetcher::with_api(ApiClient::with_client(&config, fake.clone()))
    }

    fn admin() -> Session {
        Session::new("admin-token", User::new("root", [Role::Admin, Role::User]), None)
    }

    fn user() -> Session {
        Session::new("user-token", User::new("ana", [Role::User]), None)
    }

    #[test]
    fn admin_uses_metrics_endpoint_only() {
        let fake = FakeHttpClient::new();
        fake.respond(METRICS, 200, r#"{"passed":7,"failed":3,"total":10,"passRate":70}"#);

        let stats = block_on(fetcher(&fake).load(&admin()));
        assert_eq!(
            stats,
            StatsSummary {
                passed: 7,
                failed: 3,
                pending: 0,
                pass_rate: 70.0,
                suite_count: 0,
                total_test_cases: 10,
            }
        );
        assert_eq!(fake.urls(), vec![METRICS.to_string()]);
        assert_eq!(fake.calls()[0].bearer.as_deref(), Some("admin-token"));
    }

    #[test]
    fn user_uses_personal_endpoint_only() {
        let fake = FakeHttpClient::new();
        fake.respond(
            USER_STATS,
            200,
            r#"{"passed":5,"failed":1,"pending":4,"passRate":83.3,"suiteCount":2,"totalTestCases":10}"#,
        );

        let stats = block_on(fetcher(&fake).load(&user()));
        assert_eq!(stats.pending, 4);
        assert_eq!(stats.suite_count, 2);
        assert_eq!(stats.total_test_cases, 10);
        assert_eq!(fake.urls(), vec![USER_STATS.to_string()]);
    }

    #[test]
    fn server_error_degrades_to_zero() {
        let fake = FakeHttpClient::new();
        fake.respond(USER_STATS, 500, "Internal Server Error");
        let f = fetcher(&fake);

        assert!(matches!(block_on(f.fetch(&user())), Err(FetchError::Status { status: 500, .. })));
        assert_eq!(block_on(f.load(&user())), StatsSummary::default());
    }

    #[test]
    fn network_error_degrades_to_zero() {
        let fake = FakeHttpClient::new();
        fake.fail(METRICS, FetchError::Network("connection refused".into()));
        assert_eq!(block_on(fetcher(&fake).load(&admin())), StatsSummary::default());
    }

    #[test]
    fn malformed_body_degrades_to_zero() {
        let fake = FakeHttpClient::new();
        fake.respond(USER_STATS, 200, "<!doctype html>");
        fake.respond(METRICS, 200, r#"{"passed":"many"}"#);
        let f = fetcher(&fake);

        assert!(matches!(block_on(f.fetch(&user())), Err(FetchError::Malformed(_))));
        assert_eq!(block_on(f.load(&user())), StatsSummary::default());
        assert_eq!(block_on(f.load(&admin())), StatsSummary::default());
    }

    #[test]
    fn negative_pass_rate_degrades_to_zero() {
        let fake = FakeHttpClient::new();
        fake.respond(USER_STATS, 200, r#"{"passed":1,"passRate":-12.5}"#);
        fake.respond(METRICS, 200, r#"{"passed":1,"total":1,"passRate":-3}"#);
        let f = fetcher(&fake);

        assert!(matches!(block_on(f.fetch(&user())), Err(FetchError::Malformed(_))));
        assert_eq!(block_on(f.load(&user())), StatsSummary::default());
        assert_eq!(block_on(f.load(&admin())), StatsSummary::default());
    }

    #[test]
    fn unauthorized_is_not_special() {
        let fake = FakeHttpClient::new();
        fake.respond(USER_STATS, 401, "");
        assert_eq!(block_on(fetcher(&fake).load(&user())), StatsSummary::default());
    }

    #[test]
    fn key_changes_with_token_or_role() {
        let a = StatsKey::for_session(&user());
        let mut promoted = user();
        promoted.user.roles.insert(Role::Admin);
        assert_ne!(a, StatsKey::for_session(&promoted));
        assert_eq!(a, StatsKey::for_session(&user()));
    }
}
