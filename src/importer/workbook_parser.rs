// ==========================================
// Panel Logístico Salar - Lector de libros Excel
// ==========================================
// Soporta: Excel (.xlsx/.xlsm)
// Hoja preferida "Base de Datos"; si no existe se
// usa la primera. Las celdas se decodifican a
// CellValue en esta frontera.
// ==========================================

use crate::domain::types::{CellValue, RawSheet};
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use std::path::Path;

pub struct WorkbookParser;

impl WorkbookParser {
    /// Lee y decodifica una hoja del libro
    ///
    /// # Parámetros
    /// - file_path: ruta del archivo (.xlsx/.xlsm)
    /// - preferred_sheet: nombre de hoja preferido; None = primera hoja
    ///
    /// # Retorna
    /// - Ok(RawSheet): hoja decodificada (fila 0 = encabezado)
    /// - Err: error fatal de archivo
    pub fn read_sheet(
        file_path: &Path,
        preferred_sheet: Option<&str>,
    ) -> ImportResult<RawSheet> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xlsm" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // El contenedor .xlsm comparte el formato zip de .xlsx
        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::WorkbookError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::EmptyWorkbook);
        }

        let sheet_name = preferred_sheet
            .and_then(|wanted| sheet_names.iter().find(|n| n.as_str() == wanted))
            .unwrap_or(&sheet_names[0])
            .clone();

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::WorkbookError(e.to_string()))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(CellValue::from).collect())
            .collect();

        Ok(RawSheet::new(sheet_name, rows))
    }
}
