// ============================================================================
// TEST DASHBOARD PWA - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación API
// - State: SessionStore + estado global con Rc<RefCell>
// - Router: rutas del cliente y guard de autenticación
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

mod app;
mod dom;
mod views;

use std::cell::{Cell, RefCell};

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::router::history;

// Instancia global de App (una por pestaña)
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static RENDER_SCHEDULED: Cell<bool> = Cell::new(false);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Test Dashboard - Rust + MVVM ({})", CONFIG.environment);

    let mut app = App::new()?;
    app.start()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    // Atrás/adelante del navegador: la ruta vuelve a pasar por el guard
    history::on_pop_state(|requested| {
        APP.with(|app_cell| {
            if let Some(ref app) = *app_cell.borrow() {
                app.state().navigate(requested);
            }
        });
        schedule_rerender();
    })?;

    Ok(())
}

/// Re-render completo inmediato
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
        }
    });
}

/// Agrupa varias notificaciones seguidas en un solo render
pub fn schedule_rerender() {
    if RENDER_SCHEDULED.with(|flag| flag.replace(true)) {
        return;
    }
    Timeout::new(0, || {
        RENDER_SCHEDULED.with(|flag| flag.set(false));
        rerender_app();
    })
    .forget();
}

/// Re-render llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
