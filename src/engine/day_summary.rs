// ==========================================
// Panel Logístico Salar - Resúmenes del día
// ==========================================
// Indicadores diarios de despacho (totales y
// cumplimiento) y perfil horario de llegadas por
// destino en grilla de 24 horas.
// ==========================================

use crate::domain::arrival::ArrivalRecord;
use crate::domain::dispatch::DispatchRecord;
use serde::Serialize;

// ==========================================
// Despachos
// ==========================================

/// Indicadores del día de despacho
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStats {
    pub total_planned: f64,
    pub total_actual: f64,
    pub total_equipment_actual: f64,
    /// Cumplimiento real/programado en porcentaje; 0 si no hubo programa
    pub compliance_pct: f64,
    pub product_count: usize,
}

pub fn day_stats(records: &[DispatchRecord]) -> DayStats {
    let total_planned: f64 = records.iter().map(|r| r.ton_planned).sum();
    let total_actual: f64 = records.iter().map(|r| r.ton_actual).sum();
    let total_equipment_actual: f64 = records.iter().map(|r| r.equipment_actual).sum();

    let compliance_pct = if total_planned > 0.0 {
        total_actual / total_planned * 100.0
    } else {
        0.0
    };

    DayStats {
        total_planned,
        total_actual,
        total_equipment_actual,
        compliance_pct,
        product_count: product_list(records).len(),
    }
}

/// Productos del día, ordenados y sin duplicados
pub fn product_list(records: &[DispatchRecord]) -> Vec<String> {
    let mut products: Vec<String> = records.iter().map(|r| r.product.clone()).collect();
    products.sort();
    products.dedup();
    products
}

// ==========================================
// Llegadas
// ==========================================

/// Una hora del perfil: conteo de llegadas por destino
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    pub hour: u8,
    pub counts: Vec<usize>,
}

/// Perfil horario de llegadas: 24 filas fijas, una columna por destino
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyProfile {
    pub destinations: Vec<String>,
    pub rows: Vec<HourRow>,
    /// Total por destino sobre las 24 horas
    pub totals: Vec<usize>,
}

/// Construye el perfil horario sobre los destinos pedidos
///
/// Las llegadas a destinos fuera de la lista no se cuentan. Las 24
/// filas existen siempre, incluso en horas sin movimiento.
pub fn hourly_profile(records: &[ArrivalRecord], destinations: &[String]) -> HourlyProfile {
    let mut rows: Vec<HourRow> = (0..24)
        .map(|hour| HourRow {
            hour,
            counts: vec![0; destinations.len()],
        })
        .collect();

    for record in records {
        if let Some(col) = destinations.iter().position(|d| d == &record.destination) {
            rows[record.hour as usize].counts[col] += 1;
        }
    }

    let totals = (0..destinations.len())
        .map(|col| rows.iter().map(|r| r.counts[col]).sum())
        .collect();

    HourlyProfile {
        destinations: destinations.to_vec(),
        rows,
        totals,
    }
}
