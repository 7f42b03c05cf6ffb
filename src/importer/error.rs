// ==========================================
// Panel Logístico Salar - Errores de ingesta
// ==========================================
// Herramienta: macro derive de thiserror
// Política: los fallos de fila se omiten en
// silencio; aquí viven solo los fatales de archivo
// ==========================================

use thiserror::Error;

/// Errores de la capa de ingesta
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Errores de archivo =====
    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de archivo no soportado: {0} (solo .xlsx/.xlsm)")]
    UnsupportedFormat(String),

    #[error("No se pudo leer el archivo: {0}")]
    FileReadError(String),

    #[error("No se pudo leer el libro Excel: {0}")]
    WorkbookError(String),

    #[error("El libro no contiene hojas de cálculo")]
    EmptyWorkbook,

    // ===== Errores de contenido =====
    #[error("Archivo insuficiente: se requieren encabezado y datos, hay {rows} fila(s)")]
    InsufficientRows { rows: usize },

    // ===== Control de concurrencia =====
    #[error("Ya hay una ingesta en curso; la carga fue rechazada")]
    IngestInProgress,

    // ===== Error genérico =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::WorkbookError(err.to_string())
    }
}

/// Alias de Result para la ingesta
pub type ImportResult<T> = Result<T, ImportError>;
