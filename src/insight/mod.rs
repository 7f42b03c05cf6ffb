// ==========================================
// Panel Logístico Salar - Análisis automático
// ==========================================
// Contrato del servicio de análisis del día y su
// degradación: ante cualquier falla del proveedor
// el panel recibe un análisis de reemplazo, nunca
// un error.
// ==========================================

pub mod gemini;

pub use gemini::GeminiInsightClient;

use crate::domain::dispatch::DispatchRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Columnas del extracto que se envía al proveedor
pub const INSIGHT_COLUMNS: [&str; 6] = [
    "Producto",
    "Destino",
    "Ton_Prog",
    "Ton_Real",
    "Eq_Prog",
    "Eq_Real",
];

/// Texto del análisis de reemplazo
const FALLBACK_SUMMARY: &str = "Error al generar análisis automático.";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("falta la clave de API del proveedor de análisis")]
    MissingApiKey,

    #[error("error HTTP contra el proveedor de análisis: {0}")]
    Http(#[from] reqwest::Error),

    #[error("respuesta del proveedor con forma inesperada: {0}")]
    MalformedResponse(String),
}

pub type InsightResult<T> = Result<T, InsightError>;

/// Indicador sugerido por el análisis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
}

/// Análisis del día: resumen ejecutivo + indicadores sugeridos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardInsight {
    pub summary: String,
    pub suggested_kpis: Vec<Kpi>,
}

impl DashboardInsight {
    /// Análisis de reemplazo ante falla del proveedor
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            suggested_kpis: Vec::new(),
        }
    }
}

/// Servicio de análisis del día de despacho
#[async_trait]
pub trait InsightService: Send + Sync {
    async fn analyze_day(
        &self,
        records: &[DispatchRecord],
        date: NaiveDate,
    ) -> InsightResult<DashboardInsight>;
}

/// Invoca el servicio y degrada a reemplazo ante cualquier error
///
/// El panel siempre recibe un análisis; el error queda en el log.
pub async fn analyze_or_fallback(
    service: &dyn InsightService,
    records: &[DispatchRecord],
    date: NaiveDate,
) -> DashboardInsight {
    match service.analyze_day(records, date).await {
        Ok(insight) => insight,
        Err(e) => {
            warn!(fecha = %date, error = %e, "análisis automático degradado a reemplazo");
            DashboardInsight::fallback()
        }
    }
}
