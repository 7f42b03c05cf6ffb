// ==========================================
// Panel Logístico Salar - Dominio de llegadas
// ==========================================
// Registro canónico de llegada de equipos
// (control horario por empresa y destino)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ArrivalRecord - llegada de un equipo
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    /// Fecha canónica de la jornada (obligatoria)
    #[serde(rename = "fecha")]
    pub date: NaiveDate,

    /// Destino normalizado (centinela: S/D)
    #[serde(rename = "destino")]
    pub destination: String,

    /// Empresa transportista normalizada por tabla de alias
    /// (centinela: SIN EMPRESA)
    #[serde(rename = "empresa")]
    pub company: String,

    /// Hora de entrada, 0-23 (0 si la celda es inparseable)
    #[serde(rename = "hora")]
    pub hour: u8,
}

impl ArrivalRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

// ==========================================
// ArrivalFilter - criterios de vista
// ==========================================

/// Criterios de filtrado de la vista de llegadas
///
/// Las vistas filtradas son efímeras: se recalculan cada vez que cambia
/// la colección o los criterios.
#[derive(Debug, Clone)]
pub struct ArrivalFilter {
    pub date: NaiveDate,
    pub destinations: Vec<String>,
    pub companies: Vec<String>,
    /// Rango horario inclusivo [desde, hasta]
    pub hour_range: (u8, u8),
}

impl ArrivalFilter {
    /// Filtro de jornada completa sobre todos los destinos y empresas
    pub fn full_day(date: NaiveDate, destinations: Vec<String>, companies: Vec<String>) -> Self {
        Self {
            date,
            destinations,
            companies,
            hour_range: (0, 23),
        }
    }

    fn matches(&self, record: &ArrivalRecord) -> bool {
        record.date == self.date
            && self.destinations.iter().any(|d| d == &record.destination)
            && self.companies.iter().any(|c| c == &record.company)
            && record.hour >= self.hour_range.0
            && record.hour <= self.hour_range.1
    }
}

// ==========================================
// ArrivalDataset - colección snapshot
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ArrivalDataset {
    records: Vec<ArrivalRecord>,
}

impl ArrivalDataset {
    pub fn new(records: Vec<ArrivalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ArrivalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fechas disponibles en orden ascendente
    ///
    /// El control horario selecciona por defecto la última.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Destinos presentes en una jornada, ordenados
    pub fn destinations_for_date(&self, date: NaiveDate) -> Vec<String> {
        let mut out: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.date == date)
            .map(|r| r.destination.clone())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Empresas presentes en una jornada, ordenadas
    pub fn companies_for_date(&self, date: NaiveDate) -> Vec<String> {
        let mut out: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.date == date)
            .map(|r| r.company.clone())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Vista filtrada efímera
    pub fn filter(&self, filter: &ArrivalFilter) -> Vec<&ArrivalRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }
}
