// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica)
// ============================================================================

pub mod landing;
pub mod login;
pub mod dashboard;
pub mod shared;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::router::Route;
use crate::state::app_state::AppState;

pub use dashboard::render_dashboard;
pub use landing::render_landing;
pub use login::render_login;

/// Renderizar la vista de la ruta actual (ya pasada por el guard)
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    match state.current_route() {
        Route::Landing => render_landing(state),
        Route::Login => render_login(state),
        Route::Home => match state.session.current_session() {
            Some(session) => render_dashboard(state, &session),
            // El guard ya redirige; por si la sesión cayó entre medias
            None => render_login(state),
        },
    }
}
