// ==========================================
// Panel Logístico Salar - Ingesta de llegadas
// ==========================================
// Llegada de equipos de transporte: misma
// estructura que la ruta de despachos, con dos
// diferencias de regla: la celda de empresa
// ausente omite la fila (distinto de texto en
// blanco, que recibe centinela) y el destino no
// aplica el colapso a planta de litio.
// ==========================================

use crate::domain::arrival::ArrivalRecord;
use crate::domain::types::{CellValue, RawSheet};
use crate::importer::column_resolver::ArrivalColumns;
use crate::importer::date_normalizer::{normalize_date, normalize_hour};
use crate::importer::dispatch_importer::file_name_of;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::name_normalizer::{normalize_company, normalize_destination};
use crate::importer::{IngestSummary, WorkbookParser};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const EMPTY_CELL: CellValue = CellValue::Empty;

fn cell_at(row: &[CellValue], idx: usize) -> &CellValue {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}

/// Resultado de la ingesta de una hoja de llegadas
#[derive(Debug, Clone)]
pub struct ArrivalIngest {
    pub records: Vec<ArrivalRecord>,
    pub total_rows: usize,
    pub skipped_rows: usize,
}

pub struct ArrivalImporter;

impl ArrivalImporter {
    pub fn ingest(sheet: &RawSheet) -> ImportResult<ArrivalIngest> {
        if sheet.rows.len() < 2 {
            return Err(ImportError::InsufficientRows {
                rows: sheet.rows.len(),
            });
        }

        let columns = ArrivalColumns::resolve(&sheet.rows[0]);
        debug!(?columns, hoja = %sheet.name, "columnas de llegadas resueltas");

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in &sheet.rows[1..] {
            match Self::ingest_row(row, &columns) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        Ok(ArrivalIngest {
            total_rows: sheet.data_rows(),
            skipped_rows: skipped,
            records,
        })
    }

    fn ingest_row(row: &[CellValue], columns: &ArrivalColumns) -> Option<ArrivalRecord> {
        if row.len() < 2 {
            return None;
        }

        // Celda de empresa ausente = fila estructuralmente incompleta.
        // Texto en blanco sí pasa: la normalización le asigna centinela.
        let company_cell = cell_at(row, columns.company);
        if matches!(company_cell, CellValue::Empty) {
            return None;
        }

        let date = normalize_date(cell_at(row, columns.date))?;

        let company = company_cell
            .as_text()
            .map(|s| normalize_company(&s))
            .unwrap_or_else(|| normalize_company(""));

        let destination = cell_at(row, columns.destination)
            .as_text()
            .map(|s| normalize_destination(&s))
            .unwrap_or_else(|| normalize_destination(""));

        Some(ArrivalRecord {
            date,
            destination,
            company,
            hour: normalize_hour(cell_at(row, columns.hour)),
        })
    }

    /// Ingesta desde archivo de llegadas (primera hoja del libro)
    #[instrument(skip(file_path), fields(batch_id))]
    pub fn import_file(file_path: &Path) -> ImportResult<(Vec<ArrivalRecord>, IngestSummary)> {
        let start = Instant::now();
        let batch_id = Uuid::new_v4();
        let file_name = file_name_of(file_path);

        info!(batch_id = %batch_id, archivo = %file_name, "inicio de ingesta de llegadas");

        let sheet = WorkbookParser::read_sheet(file_path, None)?;
        debug!(hoja = %sheet.name, filas = sheet.data_rows(), "libro decodificado");

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
            "ingesta de llegadas completada"
        );

        Ok((ingest.records, summary))
    }
}
