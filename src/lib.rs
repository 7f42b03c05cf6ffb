// ==========================================
// Panel Logístico Salar - Biblioteca núcleo
// ==========================================
// Flujo: planilla Excel → ingesta/normalización → colección canónica
//        → agregación → armado de reportes / servicio de análisis
// La capa visual (menús, dibujo de gráficos, rasterizado PDF) vive
// fuera de este crate y consume la API pública.
// ==========================================

// ==========================================
// Declaración de módulos
// ==========================================

// Capa de dominio - registros canónicos y tipos de celda
pub mod domain;

// Capa de ingesta - lectura y normalización de planillas
pub mod importer;

// Capa de motor - agregación y resúmenes de jornada
pub mod engine;

// Servicio de análisis remoto (colaborador externo)
pub mod insight;

// Armado de reportes (consumidor de renderizadores externos)
pub mod report;

// Configuración
pub mod config;

// Sistema de logs
pub mod logging;

// Capa de aplicación - estado compartido
pub mod app;

// ==========================================
// Reexportación de tipos núcleo
// ==========================================

// Dominio
pub use domain::arrival::{ArrivalDataset, ArrivalFilter, ArrivalRecord};
pub use domain::dispatch::{DispatchDataset, DispatchRecord};
pub use domain::types::{CellValue, ChartConfig, ChartKind, RawSheet};

// Ingesta
pub use importer::{
    ArrivalImporter, ColumnResolver, DispatchImporter, ImportError, ImportResult, IngestSummary,
    WorkbookParser,
};

// Motor
pub use engine::aggregator::{aggregate, build_chart, AggregatedGroup, ChartView, GroupField, Measure};
pub use engine::day_summary::{day_stats, hourly_profile, product_list, DayStats, HourlyProfile};

// Análisis
pub use insight::{analyze_or_fallback, DashboardInsight, GeminiInsightClient, InsightService, Kpi};

// Reportes
pub use report::{DocumentRenderer, PageGeometry, ReportDocument, ReportPage, ReportSections};

// Aplicación
pub use app::AppState;

// ==========================================
// Constantes del sistema
// ==========================================

// Versión del sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nombre del sistema
pub const APP_NAME: &str = "Panel Logístico Salar";
