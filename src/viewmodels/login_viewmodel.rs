// ============================================================================
// LOGIN VIEWMODEL - Estado del formulario y envío
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::AuthError;
use crate::models::{Credentials, Session};
use crate::services::{ApiClient, HttpClient};
use crate::state::session_store::SessionStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Default)]
pub struct LoginViewModel {
    form: Rc<RefCell<LoginForm>>,
}

impl LoginViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> LoginForm {
        self.form.borrow().clone()
    }

    pub fn set_username(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.username = value.to_string();
        form.error = None;
    }

    pub fn set_password(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.password = value.to_string();
        form.error = None;
    }

    pub fn can_submit(&self) -> bool {
        let form = self.form.borrow();
        !form.loading && !form.username.trim().is_empty() && !form.password.is_empty()
    }

    /// Enviar el formulario. Un envío en curso bloquea los siguientes.
    pub async fn submit<C: HttpClient>(
        &self,
        store: &SessionStore,
        api: &ApiClient<C>,
    ) -> Result<Session, AuthError> {
        let credentials = {
            let mut form = self.form.borrow_mut();
            if form.loading {
                return Err(AuthError::InProgress);
            }
            let credentials = Credentials::new(form.username.clone(), form.password.clone());
            if credentials.normalized().is_none() {
                let err = AuthError::MissingCredentials;
                form.error = Some(err.user_message());
                return Err(err);
            }
            form.loading = true;
            form.error = None;
            credentials
        };

        let result = store.login(api, &credentials).await;

        let mut form = self.form.borrow_mut();
        form.loading = false;
        match &result {
            Ok(_) => form.password.clear(),
            Err(e) => form.error = Some(e.user_message()),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::http::fake::FakeHttpClient;
    use crate::utils::storage::MemorySessionStorage;
    use futures::executor::block_on;

    fn setup(status: u16, body: &str) -> (FakeHttpClient, ApiClient<FakeHttpClient>, SessionStore) {
        let fake = FakeHttpClient::new();
        fake.respond("http://api.test/api/auth/login", status, body);
        let config = AppConfig {
            api_base_url: "http://api.test/api".to_string(),
            ..AppConfig::default()
        };
        let api = ApiClient::with_client(&config, fake.clone());
        let store = SessionStore::new(Rc::new(MemorySessionStorage::new()));
        (fake, api, store)
    }

    #[test]
    fn empty_form_shows_error_without_request() {
        let (fake, api, store) = setup(200, r#"{"token":"t"}"#);
        let vm = LoginViewModel::new();
        vm.set_username("ana");
        assert!(!vm.can_submit());

        let err = block_on(vm.submit(&store, &api)).unwrap_err();
        assert_eq!(err, AuthError::MissingCredentials);
        assert_eq!(vm.form().error.as_deref(), Some("Please enter your username and password"));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn rejected_login_shows_visible_error() {
        let (_, api, store) = setup(401, "");
        let vm = LoginViewModel::new();
        vm.set_username("ana");
        vm.set_password("wrong");

        assert!(block_on(vm.submit(&store, &api)).is_err());
        let form = vm.form();
        assert_eq!(form.error.as_deref(), Some("Invalid username or password"));
        assert!(!form.loading);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn successful_login_clears_password() {
        let (_, api, store) = setup(200, r#"{"token":"t","username":"ana","roles":["ROLE_USER"]}"#);
        let vm = LoginViewModel::new();
        vm.set_username("ana");
        vm.set_password("pw");
        assert!(vm.can_submit());

        let session = block_on(vm.submit(&store, &api)).unwrap();
        assert_eq!(session.user.username, "ana");
        assert!(vm.form().password.is_empty());
        assert!(store.is_authenticated());
    }

    #[test]
    fn second_submit_while_loading_is_rejected_locally() {
        let (fake, api, store) = setup(200, r#"{"token":"t","username":"ana","roles":["ROLE_USER"]}"#);
        let vm = LoginViewModel::new();
        vm.set_username("ana");
        vm.set_password("pw");
        vm.form.borrow_mut().loading = true;

        assert!(!vm.can_submit());
        assert_eq!(block_on(vm.submit(&store, &api)).unwrap_err(), AuthError::InProgress);
        assert!(vm.form().error.is_none());
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn typing_clears_previous_error() {
        let (_, api, store) = setup(401, "");
        let vm = LoginViewModel::new();
        vm.set_username("ana");
        vm.set_password("wrong");
        let _ = block_on(vm.submit(&store, &api));
        assert!(vm.form().error.is_some());

        vm.set_password("right");
        assert!(vm.form().error.is_none());
    }
}
