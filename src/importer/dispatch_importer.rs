// ==========================================
// Panel Logístico Salar - Ingesta de despachos
// ==========================================
// Flujo: resolver columnas (una vez) → normalizar
// fecha / categóricos / medidas por fila → registro
// canónico. Las filas malformadas se omiten en
// silencio; el único fatal de contenido es la falta
// de filas de datos.
// ==========================================

use crate::domain::dispatch::DispatchRecord;
use crate::domain::types::{CellValue, RawSheet};
use crate::importer::column_resolver::DispatchColumns;
use crate::importer::date_normalizer::{coerce_number, normalize_date};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::name_normalizer::{
    normalize_dispatch_destination, normalize_product, NO_DESTINATION, NO_PRODUCT,
};
use crate::importer::{IngestSummary, WorkbookParser};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const EMPTY_CELL: CellValue = CellValue::Empty;

fn cell_at(row: &[CellValue], idx: usize) -> &CellValue {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}

/// Resultado de la ingesta de una hoja de despachos
#[derive(Debug, Clone)]
pub struct DispatchIngest {
    pub records: Vec<DispatchRecord>,
    pub total_rows: usize,
    pub skipped_rows: usize,
}

pub struct DispatchImporter;

impl DispatchImporter {
    /// Ingesta una hoja ya decodificada
    ///
    /// # Retorna
    /// - Ok(DispatchIngest): registros canónicos + conteos
    /// - Err(InsufficientRows): la hoja no tiene filas de datos
    pub fn ingest(sheet: &RawSheet) -> ImportResult<DispatchIngest> {
        if sheet.rows.len() < 2 {
            return Err(ImportError::InsufficientRows {
                rows: sheet.rows.len(),
            });
        }

        let columns = DispatchColumns::resolve(&sheet.rows[0]);
        debug!(?columns, hoja = %sheet.name, "columnas de despacho resueltas");

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in &sheet.rows[1..] {
            match Self::ingest_row(row, &columns) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        Ok(DispatchIngest {
            total_rows: sheet.data_rows(),
            skipped_rows: skipped,
            records,
        })
    }

    /// Una fila de datos → registro canónico, o None para omitirla
    fn ingest_row(row: &[CellValue], columns: &DispatchColumns) -> Option<DispatchRecord> {
        if row.len() < 2 {
            return None;
        }

        // La fecha es el único campo obligatorio
        let date = normalize_date(cell_at(row, columns.date))?;

        let product = cell_at(row, columns.product)
            .as_text()
            .map(|s| normalize_product(&s))
            .unwrap_or_else(|| NO_PRODUCT.to_string());

        let destination = cell_at(row, columns.destination)
            .as_text()
            .map(|s| normalize_dispatch_destination(&s))
            .unwrap_or_else(|| NO_DESTINATION.to_string());

        Some(DispatchRecord {
            date,
            product,
            destination,
            ton_planned: coerce_number(cell_at(row, columns.ton_planned)),
            ton_actual: coerce_number(cell_at(row, columns.ton_actual)),
            equipment_planned: coerce_number(cell_at(row, columns.equipment_planned)),
            equipment_actual: coerce_number(cell_at(row, columns.equipment_actual)),
            regulation_actual: coerce_number(cell_at(row, columns.regulation_actual)),
        })
    }

    /// Ingesta desde archivo: lectura + normalización + resumen de lote
    ///
    /// # Parámetros
    /// - file_path: ruta del libro (.xlsx/.xlsm)
    /// - preferred_sheet: hoja preferida ("Base de Datos" en despachos)
    #[instrument(skip(file_path, preferred_sheet), fields(batch_id))]
    pub fn import_file(
        file_path: &Path,
        preferred_sheet: Option<&str>,
    ) -> ImportResult<(Vec<DispatchRecord>, IngestSummary)> {
        let start = Instant::now();
        let batch_id = Uuid::new_v4();
        let file_name = file_name_of(file_path);

        info!(batch_id = %batch_id, archivo = %file_name, "inicio de ingesta de despachos");

        // Paso 1: lectura y decodificación del libro
        let sheet = WorkbookParser::read_sheet(file_path, preferred_sheet)?;
        debug!(hoja = %sheet.name, filas = sheet.data_rows(), "libro decodificado");

        // Paso 2: normalización fila a fila
        let ingest = Self::ingest(&sheet)?;

        let summary = IngestSummary {
            batch_id,
            file_name,
            sheet_name: sheet.name,
            total_rows: ingest.total_rows,
            imported: ingest.records.len(),
            skipped: ingest.skipped_rows,
            elapsed_ms: start.elapsed().as_millis(),
        };

        info!(
            batch_id = %batch_id,
            total = summary.total_rows,
            importadas = summary.imported,
            omitidas = summary.skipped,
            ms = summary.elapsed_ms as u64,
            "ingesta de despachos completada"
        );

        Ok((ingest.records, summary))
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("desconocido")
        .to_string()
}
