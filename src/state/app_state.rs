// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Contexto explícito que se pasa a las vistas: sesión, guard, ruta actual y
// viewmodels. Nada de globals salvo la instancia de App en lib.rs.
// ============================================================================

use std::rc::Rc;

use chrono::Utc;

use crate::router::guard::{Navigation, RouteGuard};
use crate::router::route::Route;
use crate::services::{ApiClient, StatsFetcher};
use crate::state::reactivity::ReactiveState;
use crate::state::session_store::SessionStore;
use crate::viewmodels::{DashboardViewModel, LoginViewModel};

#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub guard: Rc<RouteGuard>,
    pub route: ReactiveState<Route>,
    pub dashboard: DashboardViewModel,
    pub login: LoginViewModel,
    pub api: ApiClient,
    pub stats_fetcher: StatsFetcher,
}

impl AppState {
    /// Estado del navegador: sesión restaurada de localStorage
    pub fn new() -> Self {
        Self::with_store(SessionStore::browser())
    }

    pub fn with_store(session: SessionStore) -> Self {
        // El guard se suscribe primero: cuando llegan los demás callbacks ya
        // refleja la sesión nueva.
        let guard = Rc::new(RouteGuard::attach(&session));
        let route = ReactiveState::new(Route::Landing);
        let dashboard = DashboardViewModel::new();

        {
            let guard = guard.clone();
            let route = route.clone();
            let dashboard = dashboard.clone();
            session.subscribe(move |current| {
                if current.is_none() {
                    dashboard.reset();
                }
                let requested = route.get();
                let target = guard.resolve(requested).target();
                if target != requested {
                    route.set(target);
                }
            });
        }

        Self {
            session,
            guard,
            route,
            dashboard,
            login: LoginViewModel::new(),
            api: ApiClient::new(),
            stats_fetcher: StatsFetcher::new(),
        }
    }

    /// Pedir una ruta: comprueba caducidad, pasa por el guard y fija la ruta final.
    /// Salir de /home desmonta el dashboard: al volver se piden estadísticas otra vez.
    pub fn navigate(&self, requested: Route) -> Navigation {
        self.session.expire_if_needed(Utc::now());
        let navigation = self.guard.resolve(requested);
        if navigation.target() != Route::Home {
            self.dashboard.reset();
        }
        if self.route.get() != navigation.target() {
            self.route.set(navigation.target());
        }
        navigation
    }

    pub fn current_route(&self) -> Route {
        self.route.get()
    }

    /// Suscribirse a cambios de estado crítico (ruta, sesión, estadísticas)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback = Rc::new(callback);
        {
            let cb = callback.clone();
            self.route.subscribe(move |_| cb());
        }
        {
            let cb = callback.clone();
            self.session.subscribe(move |_| cb());
        }
        self.dashboard.subscribe(move |_| callback());
    }
}
