// ============================================================================
// ROUTE GUARD - Máquina de dos estados sobre el SessionStore
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::router::route::Route;
use crate::state::reactivity::SubscriptionId;
use crate::state::session_store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Authenticated,
    Anonymous,
}

impl GuardState {
    pub fn from_authenticated(authenticated: bool) -> Self {
        if authenticated {
            GuardState::Authenticated
        } else {
            GuardState::Anonymous
        }
    }
}

/// Resultado de pedir una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Navigation {
    /// Ruta que termina mostrándose
    pub fn target(&self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => *route,
        }
    }
}

/// Decisión pura, sin estado
pub fn decide(state: GuardState, requested: Route) -> Navigation {
    match (state, requested) {
        (GuardState::Anonymous, route) if route.is_protected() => Navigation::Redirect(Route::Login),
        (GuardState::Authenticated, Route::Login) => Navigation::Redirect(Route::Home),
        (_, route) => Navigation::Render(route),
    }
}

/// Guard enganchado al store: su estado sigue cada cambio de sesión
pub struct RouteGuard {
    state: Rc<Cell<GuardState>>,
    store: SessionStore,
    subscription: Cell<Option<SubscriptionId>>,
}

impl RouteGuard {
    /// Estado inicial según lo que tenga el store (p.ej. sesión restaurada)
    pub fn attach(store: &SessionStore) -> Self {
        let state = Rc::new(Cell::new(GuardState::from_authenticated(store.is_authenticated())));

        let observed = state.clone();
        let subscription = store.subscribe(move |session| {
            let next = GuardState::from_authenticated(session.is_some());
            if observed.replace(next) != next {
                log::debug!("🛡️ [GUARD] {:?}", next);
            }
        });

        Self {
            state,
            store: store.clone(),
            subscription: Cell::new(Some(subscription)),
        }
    }

    pub fn state(&self) -> GuardState {
        self.state.get()
    }

    pub fn resolve(&self, requested: Route) -> Navigation {
        let navigation = decide(self.state(), requested);
        if let Navigation::Redirect(to) = navigation {
            log::info!("🛡️ [GUARD] {} → {}", requested.path(), to.path());
        }
        navigation
    }

    /// Deja de seguir al store
    pub fn detach(&self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
    }
}

impl Drop for RouteGuard {
    fn drop(&mut self) {
        self.detach();
    }
}
