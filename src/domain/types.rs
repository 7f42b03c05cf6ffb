// ==========================================
// Panel Logístico Salar - Tipos base
// ==========================================
// CellValue: variante etiquetada de celda cruda,
// decodificada en la frontera de ingesta para no
// esparcir sondeo de tipos por el resto del código
// ==========================================

use calamine::Data;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - celda cruda de planilla
// ==========================================

/// Valor crudo de una celda de planilla
///
/// Conjunto cerrado de representaciones posibles; todo lo que no sea
/// texto, número, fecha o booleano se degrada a `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Texto de la celda para campos categóricos
    ///
    /// `None` solo para celdas ausentes; números y booleanos se
    /// representan como texto (igual que `String(valor)` en la planilla
    /// de origen).
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format!("{}", n)),
            CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            CellValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            CellValue::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) => CellValue::DateTime(naive),
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            // Celdas de error se tratan como ausentes
            Data::Error(_) => CellValue::Empty,
            Data::Empty => CellValue::Empty,
        }
    }
}

// ==========================================
// RawSheet - hoja decodificada
// ==========================================

/// Hoja de planilla ya decodificada a celdas etiquetadas
///
/// La fila 0 es el encabezado; las filas de datos vienen después.
#[derive(Debug, Clone)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cantidad de filas de datos (sin el encabezado)
    pub fn data_rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

// ==========================================
// Configuración de gráficos
// ==========================================

/// Tipo de gráfico soportado por el renderizador externo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
}

/// Configuración de un gráfico del tablero
///
/// El renderizador es un colaborador externo: este crate solo entrega
/// la agregación ya calculada junto a esta configuración.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub group_by: crate::engine::aggregator::GroupField,
    pub measures: Vec<crate::engine::aggregator::Measure>,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_decode_from_calamine() {
        assert_eq!(
            CellValue::from(&Data::String("NITRATO".to_string())),
            CellValue::Text("NITRATO".to_string())
        );
        assert_eq!(CellValue::from(&Data::Float(12.5)), CellValue::Number(12.5));
        assert_eq!(CellValue::from(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_as_text_number_without_decimals() {
        // String(33) en la planilla de origen produce "33", no "33.0"
        assert_eq!(CellValue::Number(33.0).as_text(), Some("33".to_string()));
        assert_eq!(CellValue::Number(2.5).as_text(), Some("2.5".to_string()));
        assert_eq!(CellValue::Empty.as_text(), None);
    }
}
