// ==========================================
// Panel Logístico Salar - Dominio de despachos
// ==========================================
// Registro canónico de despacho diario y su
// colección snapshot (reemplazo total por carga)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DispatchRecord - registro canónico de despacho
// ==========================================
// Inmutable una vez creado; toda vista derivada
// (filtros, agregados) es una proyección pura.
// Los nombres serde conservan las etiquetas de la
// planilla de origen (contrato con UI y análisis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Fecha canónica de la jornada (obligatoria)
    #[serde(rename = "Fecha")]
    pub date: NaiveDate,

    /// Producto normalizado en mayúsculas (centinela: SIN PRODUCTO)
    #[serde(rename = "Producto")]
    pub product: String,

    /// Destino normalizado y colapsado por alias (centinela: S/D)
    #[serde(rename = "Destino")]
    pub destination: String,

    /// Tonelaje programado
    #[serde(rename = "Ton_Prog")]
    pub ton_planned: f64,

    /// Tonelaje real
    #[serde(rename = "Ton_Real")]
    pub ton_actual: f64,

    /// Equipos programados
    #[serde(rename = "Eq_Prog")]
    pub equipment_planned: f64,

    /// Equipos reales
    #[serde(rename = "Eq_Real")]
    pub equipment_actual: f64,

    /// Regulación real
    #[serde(rename = "Regulacion_Real")]
    pub regulation_actual: f64,
}

impl DispatchRecord {
    /// Fecha en forma canónica `YYYY-MM-DD`
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

// ==========================================
// DispatchDataset - colección snapshot
// ==========================================

/// Colección canónica de despachos de una carga
///
/// Se construye exactamente una vez por archivo subido y se reemplaza
/// completa; nunca se actualiza de forma incremental.
#[derive(Debug, Clone, Default)]
pub struct DispatchDataset {
    records: Vec<DispatchRecord>,
}

impl DispatchDataset {
    pub fn new(records: Vec<DispatchRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fechas disponibles, más reciente primero
    ///
    /// El tablero selecciona por defecto la primera de esta lista.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates.reverse();
        dates
    }

    /// Vista efímera de una jornada
    pub fn for_date(&self, date: NaiveDate) -> Vec<&DispatchRecord> {
        self.records.iter().filter(|r| r.date == date).collect()
    }
}
