// ==========================================
// Panel Logístico Salar - Módulo de importación
// ==========================================
// Tubería de ingesta de planillas: lectura del
// libro, resolución de columnas, normalización de
// fechas/nombres/medidas y armado de registros
// canónicos con resumen de lote.
// ==========================================

pub mod arrival_importer;
pub mod column_resolver;
pub mod date_normalizer;
pub mod dispatch_importer;
pub mod error;
pub mod name_normalizer;
pub mod workbook_parser;

pub use arrival_importer::{ArrivalImporter, ArrivalIngest};
pub use column_resolver::{ArrivalColumns, ColumnResolver, DispatchColumns};
pub use dispatch_importer::{DispatchImporter, DispatchIngest};
pub use error::{ImportError, ImportResult};
pub use workbook_parser::WorkbookParser;

use uuid::Uuid;

/// Resumen de un lote de ingesta
///
/// `total_rows` cuenta las filas de datos de la hoja (sin encabezado);
/// `imported + skipped == total_rows`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IngestSummary {
    pub batch_id: Uuid,
    pub file_name: String,
    pub sheet_name: String,
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub elapsed_ms: u128,
}
