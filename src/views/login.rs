// ============================================================================
// LOGIN VIEW - Formulario de acceso
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement};

use crate::app::go;
use crate::dom::{on_click, on_input_value, on_submit, text_element, ElementBuilder};
use crate::router::Route;
use crate::state::app_state::AppState;

/// Grupo label + input
fn form_group(
    id: &str,
    label: &str,
    input_type: &str,
    value: &str,
    disabled: bool,
    on_change: impl FnMut(String) + 'static,
) -> Result<Element, JsValue> {
    let mut input = ElementBuilder::new("input")?
        .class("form-input")
        .id(id)?
        .attr("type", input_type)?
        .attr("name", id)?
        .attr("value", value)?
        .attr("autocomplete", if input_type == "password" { "current-password" } else { "username" })?;
    if disabled {
        input = input.attr("disabled", "true")?;
    }
    let input = input.build();
    on_input_value(&input, on_change)?;

    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(input)?
        .build())
}

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let vm = state.login.clone();
    let form_state = vm.form();

    let mut submit = ElementBuilder::new("button")?
        .class("btn btn-primary login-submit")
        .attr("type", "submit")?
        .text(if form_state.loading { "Signing in..." } else { "Sign In" });
    if !vm.can_submit() {
        submit = submit.attr("disabled", "true")?;
    }
    let submit = submit.build();

    // Escribir no re-renderiza: el botón se habilita desde aquí
    let sync_submit = {
        let vm = vm.clone();
        let submit = submit.clone();
        move || {
            if let Some(button) = submit.dyn_ref::<HtmlButtonElement>() {
                button.set_disabled(!vm.can_submit());
            }
        }
    };

    let username_group = {
        let vm = vm.clone();
        let sync_submit = sync_submit.clone();
        form_group("username", "Username", "text", &form_state.username, form_state.loading, move |v| {
            vm.set_username(&v);
            sync_submit();
        })?
    };
    let password_group = {
        let vm = vm.clone();
        form_group("password", "Password", "password", &form_state.password, form_state.loading, move |v| {
            vm.set_password(&v);
            sync_submit();
        })?
    };

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .child(username_group)?
        .child(password_group)?
        .build();

    // Error visible del último intento
    if let Some(message) = &form_state.error {
        let error = ElementBuilder::new("div")?
            .class("login-error")
            .attr("role", "alert")?
            .text(message)
            .build();
        form.append_child(&error)?;
    }

    form.append_child(&submit)?;

    {
        let state = state.clone();
        on_submit(&form, move || {
            let state = state.clone();
            spawn_local(async move {
                match state.login.submit(&state.session, &state.api).await {
                    Ok(_) => go(&state, Route::Home),
                    Err(e) => log::warn!("⚠️ [LOGIN] {}", e),
                }
                crate::schedule_rerender();
            });
            crate::schedule_rerender();
        })?;
    }

    let back = text_element("button", "btn btn-link", "← Back")?;
    {
        let state = state.clone();
        on_click(&back, move |_| go(&state, Route::Landing))?;
    }

    let container = ElementBuilder::new("div")?
        .class("login-container")
        .child(
            ElementBuilder::new("div")?
                .class("login-header")
                .child(text_element("div", "login-logo", "TF")?)?
                .child(text_element("h1", "", "Sign in to Test Framework")?)?
                .build(),
        )?
        .child(form)?
        .child(back)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("login-screen")
        .child(container)?
        .build())
}
