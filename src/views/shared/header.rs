use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, text_element, ElementBuilder};
use crate::models::Session;
use crate::state::app_state::AppState;

/// Cabecera del área autenticada: usuario, badge de admin y logout
pub fn render_header(state: &AppState, session: &Session) -> Result<Element, JsValue> {
    let user = ElementBuilder::new("div")?
        .class("app-header-user")
        .child(text_element("span", "app-header-username", &session.user.username)?)?;
    let user = if session.is_admin() {
        user.child(text_element("span", "badge badge-admin", "ADMIN")?)?
    } else {
        user
    };

    let logout = text_element("button", "btn btn-outline btn-logout", "Logout")?;
    {
        let state = state.clone();
        on_click(&logout, move |_| state.session.logout())?;
    }

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(text_element("div", "app-header-brand", "Test Framework")?)?
        .child(user.child(logout)?.build())?
        .build())
}
