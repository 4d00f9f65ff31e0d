// ============================================================================
// DASHBOARD VIEW - Tarjetas, gráfico y banners
// ============================================================================
// Toda la lógica condicional viene resuelta en DashboardModel; aquí solo se
// traduce a DOM.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{text_element, ElementBuilder};
use crate::models::Session;
use crate::state::app_state::AppState;
use crate::viewmodels::dashboard_viewmodel::{
    ready_to_execute_text, Banner, ChartSegment, DashboardModel,
};
use crate::views::shared::render_header;

const WHY_AUTOMATION: [(&str, &str); 4] = [
    (
        "🚀 Faster Release Cycles",
        "Automated testing dramatically reduces the time required for regression testing, allowing teams to deploy new features and updates more frequently.",
    ),
    (
        "💰 Cost Efficiency",
        "Automated tests can run thousands of times without additional cost and catch bugs early, when they are cheaper to fix.",
    ),
    (
        "🎯 Improved Accuracy & Consistency",
        "Automated tests execute the same steps precisely every time, eliminating human error and providing consistent, reliable results.",
    ),
    (
        "🛡️ Enhanced Code Quality & Confidence",
        "Comprehensive automated coverage gives developers the confidence to refactor without fear of breaking existing functionality.",
    ),
];

/// Lanza la petición de estadísticas si cambió token/rol o es un montaje nuevo
fn ensure_stats(state: &AppState, session: &Session) {
    if let Some(pending) = state.dashboard.refresh(&state.stats_fetcher, session) {
        log::info!("📊 [STATS] Cargando estadísticas ({})", if session.is_admin() { "admin" } else { "user" });
        spawn_local(pending);
    }
}

fn stat_card(class: &str, label: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(&format!("stat-card {}", class))
        .child(text_element("div", "stat-card-label", label)?)?
        .child(text_element("div", "stat-card-value", value)?)?
        .build())
}

/// CSS conic-gradient con los segmentos en orden
fn pie_gradient(segments: &[ChartSegment]) -> String {
    let mut start = 0.0;
    let stops: Vec<String> = segments
        .iter()
        .map(|s| {
            let end = start + s.percent;
            let stop = format!("{} {:.2}% {:.2}%", s.color, start, end);
            start = end;
            stop
        })
        .collect();
    format!("background: conic-gradient({});", stops.join(", "))
}

fn render_chart(model: &DashboardModel) -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card chart-card")
        .child(text_element("h3", "", "Test Results Overview")?)?
        .build();

    if !model.has_data {
        let empty = ElementBuilder::new("div")?
            .class("empty-state")
            .child(text_element("div", "empty-state-icon", "📊")?)?
            .child(text_element("p", "empty-state-title", "No test results yet")?)?
            .child(text_element("p", "empty-state-hint", "Execute your test suites to see the results here")?)?
            .build();
        section.append_child(&empty)?;
        return Ok(section);
    }

    let mut legend = Vec::with_capacity(model.segments.len());
    for segment in &model.segments {
        legend.push(
            ElementBuilder::new("li")?
                .attr("style", &format!("--segment-color: {}", segment.color))?
                .text(&segment.caption())
                .build(),
        );
    }

    let pie = ElementBuilder::new("div")?
        .class("pie-chart")
        .attr("style", &pie_gradient(&model.segments))?
        .attr("role", "img")?
        .attr("aria-label", "Test results pie chart")?
        .build();

    let chart = ElementBuilder::new("div")?
        .class("chart")
        .child(pie)?
        .child(ElementBuilder::new("ul")?.class("chart-legend").children(legend)?.build())?
        .build();

    let cards = ElementBuilder::new("div")?
        .class("stat-cards")
        .child(stat_card("stat-passed", "Passed", &model.passed.to_string())?)?
        .child(stat_card("stat-failed", "Failed", &model.failed.to_string())?)?
        .child(stat_card("stat-pending", "Pending", &model.pending.to_string())?)?
        .child(stat_card("stat-rate", "Pass Rate", &model.pass_rate_label)?)?
        .build();

    let grid = ElementBuilder::new("div")?
        .class("chart-grid")
        .child(chart)?
        .child(cards)?
        .build();
    section.append_child(&grid)?;
    Ok(section)
}

fn render_banner(banner: &Banner) -> Result<Element, JsValue> {
    match banner {
        Banner::SuiteOverview { suites, cases } => Ok(ElementBuilder::new("section")?
            .class("card suite-overview")
            .child(text_element("h3", "", "📋 Test Suite Overview")?)?
            .child(stat_card("", "Total Suites", &suites.to_string())?)?
            .child(stat_card("", "Total Test Cases", &cases.to_string())?)?
            .build()),
        Banner::GetStarted => Ok(ElementBuilder::new("section")?
            .class("banner banner-warning")
            .child(text_element("div", "banner-icon", "🚀")?)?
            .child(text_element("h3", "", "Ready to Start Testing?")?)?
            .child(text_element(
                "p",
                "",
                "You haven't created any test suites yet. Get started by creating your first test suite!",
            )?)?
            .build()),
        Banner::ReadyToExecute { suites, cases } => Ok(ElementBuilder::new("section")?
            .class("banner banner-info")
            .child(text_element("div", "banner-icon", "⏳")?)?
            .child(text_element("h3", "", "Test Suites Ready to Execute")?)?
            .child(text_element("p", "", &ready_to_execute_text(*suites, *cases))?)?
            .build()),
    }
}

fn render_admin_content() -> Result<Element, JsValue> {
    let section = ElementBuilder::new("section")?
        .class("card admin-content")
        .child(text_element("h3", "", "Why Automated Testing Matters")?)?
        .build();
    for (title, body) in WHY_AUTOMATION {
        let item = ElementBuilder::new("div")?
            .class("admin-content-item")
            .child(text_element("h4", "", title)?)?
            .child(text_element("p", "", body)?)?
            .build();
        section.append_child(&item)?;
    }
    Ok(section)
}

pub fn render_dashboard(state: &AppState, session: &Session) -> Result<Element, JsValue> {
    ensure_stats(state, session);

    let page = ElementBuilder::new("div")?
        .class("dashboard")
        .child(render_header(state, session)?)?
        .build();

    let Some(model) = state.dashboard.model(session) else {
        let loading = text_element("div", "loading", "Loading...")?;
        page.append_child(&loading)?;
        return Ok(page);
    };

    let main = ElementBuilder::new("main")?
        .class("dashboard-content")
        .child(text_element("h2", "dashboard-title", model.title)?)?
        .build();

    if let Some(info) = &model.info_banner {
        let note = text_element("div", "banner banner-note", &format!("ℹ️ {}", info))?;
        main.append_child(&note)?;
    }

    let chart = render_chart(&model)?;
    main.append_child(&chart)?;

    for banner in &model.banners {
        let block = render_banner(banner)?;
        main.append_child(&block)?;
    }

    if model.show_admin_content {
        let admin = render_admin_content()?;
        main.append_child(&admin)?;
    }

    page.append_child(&main)?;
    Ok(page)
}
