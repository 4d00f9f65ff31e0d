// ============================================================================
// DASHBOARD VIEWMODEL - Estadísticas + decisiones de presentación
// ============================================================================
// Estado de carga de las estadísticas y todo lo que la vista necesita ya
// decidido: título, tarjetas, segmentos del gráfico y qué banner mostrar.
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use crate::models::{Session, StatsSummary};
use crate::services::stats_service::{StatsFetcher, StatsKey};
use crate::services::HttpClient;
use crate::state::reactivity::{ReactiveState, SubscriptionId};

pub const PASSED_COLOR: &str = "#10b981";
pub const FAILED_COLOR: &str = "#ef4444";
pub const PENDING_COLOR: &str = "#f59e0b";

#[derive(Debug, Clone, PartialEq)]
pub enum StatsState {
    Loading,
    Ready(StatsSummary),
}

/// Segmento del gráfico circular
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSegment {
    pub label: &'static str,
    pub value: u64,
    pub color: &'static str,
    pub percent: f64,
}

impl ChartSegment {
    /// "Passed: 7 (70.0%)"
    pub fn caption(&self) -> String {
        format!("{}: {} ({:.1}%)", self.label, self.value, self.percent)
    }
}

/// Bloques condicionales del dashboard de usuario
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    /// Resumen de suites y casos
    SuiteOverview { suites: u64, cases: u64 },
    /// Aún no hay suites
    GetStarted,
    /// Hay suites pero ninguna ejecutada
    ReadyToExecute { suites: u64, cases: u64 },
}

/// Todo lo que pinta la vista de dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    pub title: &'static str,
    pub is_admin: bool,
    pub info_banner: Option<String>,
    pub has_data: bool,
    pub segments: Vec<ChartSegment>,
    pub passed: u64,
    pub failed: u64,
    pub pending: u64,
    pub pass_rate_label: String,
    pub banners: Vec<Banner>,
    pub show_admin_content: bool,
}

fn plural(count: u64, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}

/// Texto del banner informativo de usuario
pub fn info_banner_text(stats: &StatsSummary) -> String {
    let mut text = format!("Statistics calculated from {}", plural(stats.suite_count, "test suite"));
    if stats.total_test_cases > 0 {
        text.push_str(&format!(" containing {}", plural(stats.total_test_cases, "test case")));
    }
    text
}

/// Texto del banner "Test Suites Ready to Execute"
pub fn ready_to_execute_text(suites: u64, cases: u64) -> String {
    format!(
        "You have {} with {}, but they haven't been executed yet.",
        plural(suites, "test suite"),
        plural(cases, "test case")
    )
}

pub fn chart_segments(stats: &StatsSummary) -> Vec<ChartSegment> {
    let total = (stats.passed + stats.failed + stats.pending) as f64;
    [
        ("Passed", stats.passed, PASSED_COLOR),
        ("Failed", stats.failed, FAILED_COLOR),
        ("Pending", stats.pending, PENDING_COLOR),
    ]
    .into_iter()
    .filter(|(_, value, _)| *value > 0)
    .map(|(label, value, color)| ChartSegment {
        label,
        value,
        color,
        percent: value as f64 * 100.0 / total,
    })
    .collect()
}

pub fn build_dashboard(is_admin: bool, stats: &StatsSummary) -> DashboardModel {
    let has_data = stats.has_data();

    let mut banners = Vec::new();
    if !is_admin {
        if stats.suite_count > 0 {
            banners.push(Banner::SuiteOverview {
                suites: stats.suite_count,
                cases: stats.total_test_cases,
            });
        } else {
            banners.push(Banner::GetStarted);
        }
        if stats.suite_count > 0 && !has_data {
            banners.push(Banner::ReadyToExecute {
                suites: stats.suite_count,
                cases: stats.total_test_cases,
            });
        }
    }

    DashboardModel {
        title: if is_admin { "Admin Dashboard" } else { "My Dashboard" },
        is_admin,
        info_banner: (!is_admin).then(|| info_banner_text(stats)),
        has_data,
        segments: chart_segments(stats),
        passed: stats.passed,
        failed: stats.failed,
        pending: stats.pending,
        pass_rate_label: format!("{:.1}%", stats.pass_rate),
        banners,
        show_admin_content: is_admin,
    }
}

/// ViewModel con estado: guarda la clave de la última petición para lanzar
/// exactamente una por montaje o cambio de token/rol.
#[derive(Clone)]
pub struct DashboardViewModel {
    stats: ReactiveState<StatsState>,
    last_key: Rc<RefCell<Option<StatsKey>>>,
}

impl Default for DashboardViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardViewModel {
    pub fn new() -> Self {
        Self {
            stats: ReactiveState::new(StatsState::Loading),
            last_key: Rc::new(RefCell::new(None)),
        }
    }

    pub fn stats(&self) -> StatsState {
        self.stats.get()
    }

    /// Modelo listo para pintar, `None` mientras carga
    pub fn model(&self, session: &Session) -> Option<DashboardModel> {
        match self.stats.get() {
            StatsState::Loading => None,
            StatsState::Ready(stats) => Some(build_dashboard(session.is_admin(), &stats)),
        }
    }

    /// Devuelve la clave si hay que lanzar una petición nueva (y pasa a Loading)
    pub fn begin_request(&self, session: &Session) -> Option<StatsKey> {
        let key = StatsKey::for_session(session);
        if self.last_key.borrow().as_ref() == Some(&key) {
            return None;
        }
        *self.last_key.borrow_mut() = Some(key.clone());
        self.stats.set(StatsState::Loading);
        Some(key)
    }

    /// Las respuestas se aplican en orden de llegada
    pub fn apply(&self, stats: StatsSummary) {
        self.stats.set(StatsState::Ready(stats));
    }

    /// Olvidar la última petición (logout o salida de /home): el siguiente
    /// montaje vuelve a pedir. Sin nada que olvidar no notifica.
    pub fn reset(&self) {
        let had_key = self.last_key.borrow_mut().take().is_some();
        if had_key || self.stats.get() != StatsState::Loading {
            self.stats.set(StatsState::Loading);
        }
    }

    /// Petición pendiente si cambió la clave; `None` si ya se pidió.
    /// El future aplica el resultado al terminar.
    pub fn refresh<C>(
        &self,
        fetcher: &StatsFetcher<C>,
        session: &Session,
    ) -> Option<impl Future<Output = ()> + 'static>
    where
        C: HttpClient + Clone + 'static,
    {
        self.begin_request(session)?;
        let vm = self.clone();
        let fetcher = fetcher.clone();
        let session = session.clone();
        Some(async move {
            let stats = fetcher.load(&session).await;
            vm.apply(stats);
        })
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&StatsState) + 'static,
    {
        self.stats.subscribe(callback)
    }
}
