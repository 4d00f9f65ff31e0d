// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Une estado, router e historial del navegador. La vista se re-renderiza
// completa en cada cambio de estado (batcheado en lib.rs).
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::router::guard::Navigation;
use crate::router::{history, Route};
use crate::state::app_state::AppState;
use crate::utils::constants::APP_ROOT_ID;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str(&format!("No #{} element found", APP_ROOT_ID)))?;

        let state = AppState::new();
        if let Some(session) = state.session.current_session() {
            log::info!("💾 [APP] Sesión restaurada para {}", session.user.username);
        }

        state.subscribe_to_changes(crate::schedule_rerender);

        Ok(Self { state, root })
    }

    /// Primera navegación: la URL con la que se abrió la app pasa por el guard
    pub fn start(&mut self) -> Result<(), JsValue> {
        let requested = history::current_route();
        if let Navigation::Redirect(target) = self.state.navigate(requested) {
            log::info!("🛡️ [APP] URL inicial redirigida a {}", target.path());
        }
        self.render()
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)?;

        // Redirecciones por cambios de sesión (logout, caducidad) y paths desconocidos
        history::sync(self.state.current_route())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Navegación iniciada por el usuario (botones, login correcto)
pub fn go(state: &AppState, route: Route) {
    let target = state.navigate(route).target();
    if history::current_route() != target {
        if let Err(e) = history::push(target) {
            log::error!("❌ [ROUTER] pushState falló: {:?}", e);
        }
    }
}
