// ============================================================================
// SESSION STORE - Sesión de autenticación (token + usuario + roles)
// ============================================================================
// Único escritor de la sesión. Persiste en storage durable y notifica a los
// dependientes (RouteGuard, dashboard) en cada cambio.
// ============================================================================

use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::config::CONFIG;
use crate::errors::AuthError;
use crate::models::{Credentials, Session};
use crate::services::auth_service::authenticate;
use crate::services::{ApiClient, HttpClient};
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::utils::storage::{LocalSessionStorage, SessionStorage};

#[derive(Clone)]
pub struct SessionStore {
    state: ReactiveState<Option<Session>>,
    storage: Rc<dyn SessionStorage>,
}

impl SessionStore {
    /// Store vacío sobre un storage dado (no lee lo persistido)
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        Self {
            state: ReactiveState::new(None),
            storage,
        }
    }

    /// Store inicializado con la sesión persistida, si sigue vigente
    pub fn restore(storage: Rc<dyn SessionStorage>, now: DateTime<Utc>) -> Self {
        let restored = match storage.load() {
            Some(session) if session.is_expired(now) => {
                log::info!("⌛ [SESSION] Sesión guardada de {} caducada, se descarta", session.user.username);
                storage.clear();
                None
            }
            Some(session) => {
                log::info!("💾 [SESSION] Sesión restaurada para {}", session.user.username);
                Some(session)
            }
            None => None,
        };

        Self {
            state: ReactiveState::new(restored),
            storage,
        }
    }

    /// Store del navegador: localStorage bajo la clave configurada
    pub fn browser() -> Self {
        let storage = Rc::new(LocalSessionStorage::new(CONFIG.session_storage_key.clone()));
        Self::restore(storage, Utc::now())
    }

    /// Login contra el backend. Si falla, la sesión queda vacía.
    pub async fn login<C: HttpClient>(
        &self,
        api: &ApiClient<C>,
        credentials: &Credentials,
    ) -> Result<Session, AuthError> {
        match authenticate(api, credentials).await {
            Ok(session) => {
                if let Err(e) = self.storage.save(&session) {
                    log::error!("❌ [SESSION] Error guardando sesión: {}", e);
                }
                self.state.set(Some(session.clone()));
                Ok(session)
            }
            Err(e) => {
                log::warn!("⚠️ [SESSION] Login fallido: {}", e);
                self.logout();
                Err(e)
            }
        }
    }

    /// Borra la sesión. Idempotente: sin sesión no se notifica.
    pub fn logout(&self) {
        self.storage.clear();
        if self.state.with(Option::is_none) {
            return;
        }
        log::info!("👋 [SESSION] Logout");
        self.state.set(None);
    }

    /// Destruye la sesión si el token ha caducado. Devuelve true si la borró.
    pub fn expire_if_needed(&self, now: DateTime<Utc>) -> bool {
        let expired = self
            .state
            .with(|s| s.as_ref().map(|s| s.is_expired(now)).unwrap_or(false));
        if expired {
            log::info!("⌛ [SESSION] Token caducado, cerrando sesión");
            self.logout();
        }
        expired
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(Option::is_some)
    }

    /// Suscribirse a cambios de sesión
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(Option<&Session>) + 'static,
    {
        self.state.subscribe(move |session| callback(session.as_ref()))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{Role, User};
    use crate::services::http::fake::FakeHttpClient;
    use crate::utils::storage::MemorySessionStorage;
    use chrono::{Duration, TimeZone};
    use futures::executor::block_on;
    use std::cell::RefCell;

    const BASE: &str = "http://api.test/api";

    fn api(fake: &FakeHttpClient) -> ApiClient<FakeHttpClient> {
        let config = AppConfig {
            api_base_url: BASE.to_string(),
            ..AppConfig::default()
        };
        ApiClient::with_client(&config, fake.clone())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn user_session(expires_at: Option<DateTime<Utc>>) -> Session {
        Session::new("tok", User::new("ana", [Role::User]), expires_at)
    }

    #[test]
    fn successful_login_stores_persists_and_notifies() {
        let fake = FakeHttpClient::new();
        fake.respond(
            &format!("{BASE}/auth/login"),
            200,
            r#"{"token":"tok","username":"root","roles":["ROLE_ADMIN"]}"#,
        );
        let storage = MemorySessionStorage::new();
        let store = SessionStore::new(Rc::new(storage.clone()));

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |s| sink.borrow_mut().push(s.map(|s| s.user.username.clone())));

        let session = block_on(store.login(&api(&fake), &Credentials::new("root", "pw"))).unwrap();
        assert!(session.is_admin());
        assert_eq!(store.current_session(), Some(session.clone()));
        assert_eq!(storage.load(), Some(session));
        assert_eq!(*events.borrow(), vec![Some("root".to_string())]);
    }

    #[test]
    fn rejected_login_leaves_session_empty() {
        let fake = FakeHttpClient::new();
        fake.respond(&format!("{BASE}/auth/login"), 401, "");
        let storage = MemorySessionStorage::new();
        let store = SessionStore::new(Rc::new(storage.clone()));

        let err = block_on(store.login(&api(&fake), &Credentials::new("ana", "bad"))).unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(store.current_session().is_none());
        assert!(storage.raw().is_none());
    }

    #[test]
    fn logout_is_idempotent() {
        let storage = MemorySessionStorage::new();
        storage.save(&user_session(None)).unwrap();
        let store = SessionStore::restore(Rc::new(storage.clone()), now());
        assert!(store.is_authenticated());

        let notifications = Rc::new(RefCell::new(0));
        let counter = notifications.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.logout();
        store.logout();
        assert!(!store.is_authenticated());
        assert!(storage.raw().is_none());
        assert_eq!(*notifications.borrow(), 1);
    }

    #[test]
    fn restore_discards_expired_session() {
        let storage = MemorySessionStorage::new();
        storage.save(&user_session(Some(now() - Duration::minutes(1)))).unwrap();

        let store = SessionStore::restore(Rc::new(storage.clone()), now());
        assert!(store.current_session().is_none());
        assert!(storage.raw().is_none());
    }

    #[test]
    fn restore_keeps_valid_session() {
        let storage = MemorySessionStorage::new();
        let session = user_session(Some(now() + Duration::hours(1)));
        storage.save(&session).unwrap();

        let store = SessionStore::restore(Rc::new(storage), now());
        assert_eq!(store.current_session(), Some(session));
    }

    #[test]
    fn expiry_detection_logs_out() {
        let storage = MemorySessionStorage::new();
        storage.save(&user_session(Some(now() + Duration::minutes(5)))).unwrap();
        let store = SessionStore::restore(Rc::new(storage), now());

        assert!(!store.expire_if_needed(now()));
        assert!(store.expire_if_needed(now() + Duration::minutes(5)));
        assert!(!store.is_authenticated());
        assert!(!store.expire_if_needed(now() + Duration::hours(1)));
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let storage = MemorySessionStorage::new();
        storage.save(&user_session(None)).unwrap();
        let store = SessionStore::restore(Rc::new(storage), now());

        let called = Rc::new(RefCell::new(false));
        let flag = called.clone();
        let id = store.subscribe(move |_| *flag.borrow_mut() = true);
        assert!(store.unsubscribe(id));

        store.logout();
        assert!(!*called.borrow());
    }
}
