// ============================================================================
// HISTORY - pushState / popstate del navegador
// ============================================================================
// Listener global: se registra UNA VEZ desde lib.rs, por eso forget() es seguro.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::router::route::Route;

fn history() -> Result<web_sys::History, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .history()
}

fn current_path() -> Option<String> {
    web_sys::window().and_then(|w| w.location().pathname().ok())
}

/// Ruta actual según `location.pathname`. Paths desconocidos → Landing.
pub fn current_route() -> Route {
    current_path()
        .and_then(|path| Route::from_path(&path))
        .unwrap_or(Route::Landing)
}

/// La barra de direcciones no muestra el path canónico de `route`
/// (p.ej. `/admin` pintando Landing)
pub fn out_of_sync(pathname: &str, route: Route) -> bool {
    pathname != route.path()
}

/// Sustituye la URL si no coincide con la ruta que se está mostrando
pub fn sync(route: Route) -> Result<(), JsValue> {
    match current_path() {
        Some(path) if !out_of_sync(&path, route) => Ok(()),
        _ => replace(route),
    }
}

/// Navegación del usuario: nueva entrada en el historial
pub fn push(route: Route) -> Result<(), JsValue> {
    history()?.push_state_with_url(&JsValue::NULL, "", Some(route.path()))
}

/// Redirección del guard: sustituye la entrada actual
pub fn replace(route: Route) -> Result<(), JsValue> {
    history()?.replace_state_with_url(&JsValue::NULL, "", Some(route.path()))
}

/// Botones atrás/adelante
pub fn on_pop_state<F>(mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Route) + 'static,
{
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let closure = Closure::wrap(Box::new(move |_e: web_sys::PopStateEvent| {
        handler(current_route());
    }) as Box<dyn FnMut(web_sys::PopStateEvent)>);
    window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
