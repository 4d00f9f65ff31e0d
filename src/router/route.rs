/// Vistas navegables del cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/` - landing pública
    Landing,
    /// `/login` - pública, redirige si ya hay sesión
    Login,
    /// `/home` - dashboard, requiere sesión
    Home,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Home => "/home",
        }
    }

    /// Parsear un pathname. Ignora query, fragmento y barra final.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Landing),
            "/login" => Some(Route::Login),
            "/home" => Some(Route::Home),
            _ => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path(""), Some(Route::Landing));
        assert_eq!(Route::from_path("/login"), Some(Route::Login));
        assert_eq!(Route::from_path("/home/"), Some(Route::Home));
        assert_eq!(Route::from_path("/home?tab=1#top"), Some(Route::Home));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn path_round_trips() {
        for route in [Route::Landing, Route::Login, Route::Home] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }

    #[test]
    fn only_home_is_protected() {
        assert!(Route::Home.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Landing.is_protected());
    }
}
