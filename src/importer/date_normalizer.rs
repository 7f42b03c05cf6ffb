// ==========================================
// Panel Logístico Salar - Normalizador de fechas
// ==========================================
// Convierte representaciones heterogéneas (fecha
// nativa, número de serie de planilla, texto en
// varios formatos) a fecha canónica. Total: nunca
// falla, devuelve None en el peor caso.
// ==========================================

use crate::domain::types::CellValue;
use chrono::{DateTime, NaiveDate, Timelike};

/// Offset de época de planilla: 1899-12-30 queda 25569 días
/// antes del epoch Unix
pub const SHEET_EPOCH_OFFSET_DAYS: f64 = 25569.0;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Cadena canónica `YYYY-MM-DD`
pub fn canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normaliza una celda cruda a fecha canónica
///
/// Reglas en orden según la representación de la celda:
/// - fecha nativa → su porción de fecha
/// - número → número de serie de planilla
/// - texto → prefijo ISO, luego DD-MM-YYYY, luego cadena de formatos
///   genéricos, y como último recurso cadena numérica como serie
///   (superconjunto de las dos variantes que convivían en el origen)
pub fn normalize_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Number(n) => serial_to_date(*n),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Número de serie de planilla → fecha
///
/// `(serie - 25569) * 86400` segundos desde el epoch Unix; fuera del
/// rango representable devuelve None.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let seconds = (serial - SHEET_EPOCH_OFFSET_DAYS) * SECONDS_PER_DAY;
    DateTime::from_timestamp(seconds as i64, 0).map(|dt| dt.date_naive())
}

fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let clean = raw.trim();
    if clean.is_empty() {
        return None;
    }

    // Ya viene en YYYY-MM-DD (con o sin componente de hora)
    if let Some(prefix) = clean.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    // Tres partes con primera de largo 2 → DD-MM-YYYY
    let parts: Vec<&str> = clean.split(['-', '/']).collect();
    if parts.len() == 3 && parts[0].len() == 2 {
        if let (Ok(day), Ok(month), Ok(year)) = (
            parts[0].parse::<u32>(),
            parts[1].parse::<u32>(),
            parts[2].parse::<i32>(),
        ) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    // Cadena de formatos genéricos
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(clean, format) {
            return Some(date);
        }
    }

    // Cadena numérica: número de serie escrito como texto
    if let Ok(serial) = clean.parse::<f64>() {
        return serial_to_date(serial);
    }

    None
}

/// Normaliza una celda de hora de entrada a 0-23
///
/// - texto "HH:MM" → la parte entera inicial
/// - fecha nativa → su hora
/// - número → fracción de día por 24 (se toma la parte fraccionaria,
///   así los números de serie con fecha incluida también resuelven)
/// - inparseable o fuera de rango → 0
pub fn normalize_hour(cell: &CellValue) -> u8 {
    let hour: i64 = match cell {
        CellValue::Text(s) => s
            .trim()
            .split(':')
            .next()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(0),
        CellValue::DateTime(dt) => dt.hour() as i64,
        CellValue::Number(n) if n.is_finite() && *n >= 0.0 => (n.fract() * 24.0).floor() as i64,
        _ => 0,
    };

    if (0..=23).contains(&hour) {
        hour as u8
    } else {
        0
    }
}

/// Coerción numérica con 0 por defecto
///
/// Invariante de dominio: las medidas nunca quedan NaN ni infinitas.
pub fn coerce_number(cell: &CellValue) -> f64 {
    let value = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        CellValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        CellValue::DateTime(_) | CellValue::Empty => 0.0,
    };

    if value.is_finite() {
        value
    } else {
        0.0
    }
}
