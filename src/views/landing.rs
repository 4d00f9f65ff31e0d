// ============================================================================
// LANDING VIEW - Página pública
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::go;
use crate::dom::{on_click, text_element, ElementBuilder};
use crate::router::Route;
use crate::state::app_state::AppState;

const FEATURES: [(&str, &str); 3] = [
    (
        "⚡ Parallel Execution",
        "Run UI and API tests concurrently with isolated thread pools for optimized performance and stability.",
    ),
    (
        "📊 Real-Time Metrics",
        "Track pass rate, execution time, flaky tests, and performance trends through dynamic dashboards.",
    ),
    (
        "🔐 Secure & Role-Based",
        "JWT-secured authentication with Admin and User role-based access control.",
    ),
];

/// Botón que lleva a /login
fn login_button(state: &AppState, class: &str, label: &str) -> Result<Element, JsValue> {
    let button = text_element("button", class, label)?;
    let state = state.clone();
    on_click(&button, move |_| go(&state, Route::Login))?;
    Ok(button)
}

pub fn render_landing(state: &AppState) -> Result<Element, JsValue> {
    let brand = ElementBuilder::new("div")?
        .class("landing-brand")
        .child(text_element("div", "landing-logo", "TF")?)?
        .child(text_element("h1", "", "Test Framework")?)?
        .build();

    let actions = ElementBuilder::new("div")?
        .class("landing-actions")
        .child(login_button(state, "btn btn-outline", "Sign In")?)?
        .child(login_button(state, "btn btn-primary", "Get Started")?)?
        .build();

    let nav = ElementBuilder::new("nav")?
        .class("landing-nav")
        .child(brand)?
        .child(actions)?
        .build();

    let hero = ElementBuilder::new("section")?
        .class("landing-hero")
        .child(text_element("h2", "", "Enterprise-Grade Automated Testing Platform")?)?
        .child(text_element(
            "p",
            "landing-subtitle",
            "Execute, monitor, and analyze your UI and API test suites with real-time metrics, flaky test detection, and intelligent reporting.",
        )?)?
        .child(login_button(state, "btn btn-primary btn-large", "🚀 Start Testing")?)?
        .build();

    let mut cards = Vec::with_capacity(FEATURES.len());
    for (title, body) in FEATURES {
        cards.push(
            ElementBuilder::new("div")?
                .class("feature-card")
                .child(text_element("h3", "", title)?)?
                .child(text_element("p", "", body)?)?
                .build(),
        );
    }
    let features = ElementBuilder::new("section")?
        .class("landing-features")
        .children(cards)?
        .build();

    let footer = text_element("footer", "landing-footer", "© 2026 Test Framework")?;

    Ok(ElementBuilder::new("div")?
        .class("landing-page")
        .children([nav, hero, features, footer])?
        .build())
}
