use serde::{Deserialize, Serialize};

use crate::errors::FetchError;

/// Resumen que muestra el dashboard. Todos los campos a cero cuando no hay datos.
/// `pass_rate` viene del backend tal cual, no se recalcula.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSummary {
    pub passed: u64,
    pub failed: u64,
    pub pending: u64,
    pub pass_rate: f64,
    pub suite_count: u64,
    pub total_test_cases: u64,
}

impl StatsSummary {
    pub fn has_data(&self) -> bool {
        self.passed > 0 || self.failed > 0 || self.pending > 0
    }

    /// Los contadores ya son `u64`; el porcentaje tiene que estar en 0..=100
    pub fn validate(self) -> Result<Self, FetchError> {
        if (0.0..=100.0).contains(&self.pass_rate) {
            Ok(self)
        } else {
            Err(FetchError::Malformed(format!("passRate fuera de rango: {}", self.pass_rate)))
        }
    }
}

/// Respuesta de `GET /runs/metrics` (solo admin). Campos nulos o ausentes valen 0.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetrics {
    #[serde(default)]
    pub passed: Option<u64>,
    #[serde(default)]
    pub failed: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pass_rate: Option<f64>,
}

impl From<AdminMetrics> for StatsSummary {
    fn from(metrics: AdminMetrics) -> Self {
        Self {
            passed: metrics.passed.unwrap_or(0),
            failed: metrics.failed.unwrap_or(0),
            pending: 0,
            pass_rate: metrics.pass_rate.unwrap_or(0.0),
            suite_count: 0,
            total_test_cases: metrics.total.unwrap_or(0),
        }
    }
}
