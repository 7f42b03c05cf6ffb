// ==========================================
// Panel Logístico Salar - Motor de agregación
// ==========================================
// Agrupa registros de despacho por un campo
// categórico y suma medidas numéricas. Orden
// determinista: primera medida descendente y, en
// empate, clave ascendente. Top-N configurable.
// ==========================================

use crate::domain::dispatch::DispatchRecord;
use crate::domain::types::{ChartConfig, ChartKind};
use crate::importer::date_normalizer::canonical;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Tope por defecto de grupos por gráfico
pub const DEFAULT_TOP_N: usize = 10;

// ==========================================
// Campos de agrupación y medidas
// ==========================================

/// Campo categórico por el que se agrupa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupField {
    Product,
    Destination,
    Date,
}

impl GroupField {
    /// Etiqueta de presentación (coincide con la columna de origen)
    pub fn label(&self) -> &'static str {
        match self {
            GroupField::Product => "Producto",
            GroupField::Destination => "Destino",
            GroupField::Date => "Fecha",
        }
    }

    /// Clave de agrupación del registro
    pub fn key_of(&self, record: &DispatchRecord) -> String {
        match self {
            GroupField::Product => record.product.clone(),
            GroupField::Destination => record.destination.clone(),
            GroupField::Date => canonical(record.date),
        }
    }
}

impl FromStr for GroupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRODUCTO" => Ok(GroupField::Product),
            "DESTINO" => Ok(GroupField::Destination),
            "FECHA" => Ok(GroupField::Date),
            other => Err(format!("campo de agrupación desconocido: {other}")),
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Medida numérica a sumar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Measure {
    TonPlanned,
    TonActual,
    EquipPlanned,
    EquipActual,
    RegulationActual,
}

impl Measure {
    pub fn label(&self) -> &'static str {
        match self {
            Measure::TonPlanned => "Ton_Prog",
            Measure::TonActual => "Ton_Real",
            Measure::EquipPlanned => "Eq_Prog",
            Measure::EquipActual => "Eq_Real",
            Measure::RegulationActual => "Regulacion_Real",
        }
    }

    pub fn value(&self, record: &DispatchRecord) -> f64 {
        match self {
            Measure::TonPlanned => record.ton_planned,
            Measure::TonActual => record.ton_actual,
            Measure::EquipPlanned => record.equipment_planned,
            Measure::EquipActual => record.equipment_actual,
            Measure::RegulationActual => record.regulation_actual,
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TON_PROG" => Ok(Measure::TonPlanned),
            "TON_REAL" => Ok(Measure::TonActual),
            "EQ_PROG" => Ok(Measure::EquipPlanned),
            "EQ_REAL" => Ok(Measure::EquipActual),
            "REGULACION_REAL" => Ok(Measure::RegulationActual),
            other => Err(format!("medida desconocida: {other}")),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// Agregación
// ==========================================

/// Un grupo agregado: clave + suma de cada medida pedida
///
/// `sums` conserva el orden de las medidas solicitadas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedGroup {
    pub key: String,
    pub sums: Vec<f64>,
}

/// Agrega los registros por `group`, sumando `measures`
///
/// Las claves vacías (tras trim) se excluyen. El orden de salida es
/// por la primera medida descendente y, en empate, clave ascendente;
/// se trunca a `top_n` grupos.
pub fn aggregate(
    records: &[DispatchRecord],
    group: GroupField,
    measures: &[Measure],
    top_n: usize,
) -> Vec<AggregatedGroup> {
    let mut sums: HashMap<String, Vec<f64>> = HashMap::new();

    for record in records {
        let key = group.key_of(record);
        if key.trim().is_empty() {
            continue;
        }
        let entry = sums.entry(key).or_insert_with(|| vec![0.0; measures.len()]);
        for (slot, measure) in entry.iter_mut().zip(measures) {
            *slot += measure.value(record);
        }
    }

    let mut groups: Vec<AggregatedGroup> = sums
        .into_iter()
        .map(|(key, sums)| AggregatedGroup { key, sums })
        .collect();

    groups.sort_by(|a, b| {
        let pa = a.sums.first().copied().unwrap_or(0.0);
        let pb = b.sums.first().copied().unwrap_or(0.0);
        pb.total_cmp(&pa).then_with(|| a.key.cmp(&b.key))
    });
    groups.truncate(top_n);
    groups
}

// ==========================================
// Gráficos
// ==========================================

/// Gráfico materializado: configuración + grupos agregados
#[derive(Debug, Clone, Serialize)]
pub struct ChartView {
    pub config: ChartConfig,
    pub groups: Vec<AggregatedGroup>,
}

/// Materializa un gráfico a partir de su configuración
pub fn build_chart(records: &[DispatchRecord], config: &ChartConfig) -> ChartView {
    ChartView {
        config: config.clone(),
        groups: aggregate(records, config.group_by, &config.measures, DEFAULT_TOP_N),
    }
}

/// Tablero fijo del panel de despachos
pub fn default_charts() -> Vec<ChartConfig> {
    vec![
        ChartConfig {
            kind: ChartKind::Bar,
            group_by: GroupField::Product,
            measures: vec![Measure::TonPlanned],
            title: "Tonelaje Programado por Producto".to_string(),
        },
        ChartConfig {
            kind: ChartKind::Bar,
            group_by: GroupField::Product,
            measures: vec![Measure::TonActual],
            title: "Tonelaje Real por Producto".to_string(),
        },
        ChartConfig {
            kind: ChartKind::Bar,
            group_by: GroupField::Product,
            measures: vec![Measure::EquipActual],
            title: "Equipos Reales por Tipo de Producto".to_string(),
        },
        ChartConfig {
            kind: ChartKind::Pie,
            group_by: GroupField::Destination,
            measures: vec![Measure::TonActual],
            title: "Distribución de Carga por Destino".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(product: &str, destination: &str, ton_actual: f64) -> DispatchRecord {
        DispatchRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            product: product.to_string(),
            destination: destination.to_string(),
            ton_planned: 100.0,
            ton_actual,
            equipment_planned: 4.0,
            equipment_actual: 3.0,
            regulation_actual: 0.0,
        }
    }

    #[test]
    fn test_sums_per_group() {
        let records = vec![
            record("A", "X", 10.0),
            record("A", "X", 20.0),
            record("B", "Y", 5.0),
        ];

        let groups = aggregate(&records, GroupField::Product, &[Measure::TonActual], 10);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "A");
        assert_eq!(groups[0].sums, vec![30.0]);
        assert_eq!(groups[1].key, "B");
        assert_eq!(groups[1].sums, vec![5.0]);
    }

    #[test]
    fn test_multiple_measures_keep_request_order() {
        let records = vec![record("A", "X", 10.0)];
        let groups = aggregate(
            &records,
            GroupField::Product,
            &[Measure::TonActual, Measure::TonPlanned],
            10,
        );
        assert_eq!(groups[0].sums, vec![10.0, 100.0]);
    }

    #[test]
    fn test_sort_desc_with_lexical_tiebreak() {
        let records = vec![
            record("ZETA", "X", 10.0),
            record("ALFA", "X", 10.0),
            record("MEDIO", "X", 50.0),
        ];

        let groups = aggregate(&records, GroupField::Product, &[Measure::TonActual], 10);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["MEDIO", "ALFA", "ZETA"]);
    }

    #[test]
    fn test_top_n_truncation() {
        let records: Vec<_> = (0..15)
            .map(|i| record(&format!("P{i:02}"), "X", i as f64))
            .collect();

        let groups = aggregate(&records, GroupField::Product, &[Measure::TonActual], 10);
        assert_eq!(groups.len(), 10);
        // El mayor sobrevive, los menores se truncan
        assert_eq!(groups[0].key, "P14");
    }

    #[test]
    fn test_empty_keys_excluded() {
        let records = vec![record("", "X", 99.0), record("A", "X", 1.0)];

        let groups = aggregate(&records, GroupField::Product, &[Measure::TonActual], 10);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "A");
    }

    #[test]
    fn test_group_by_date_uses_canonical_key() {
        let groups = aggregate(&[record("A", "X", 1.0)], GroupField::Date, &[Measure::TonActual], 10);
        assert_eq!(groups[0].key, "2024-03-15");
    }

    #[test]
    fn test_labels_parse_roundtrip() {
        for field in [GroupField::Product, GroupField::Destination, GroupField::Date] {
            assert_eq!(field.label().parse::<GroupField>().unwrap(), field);
        }
        for measure in [
            Measure::TonPlanned,
            Measure::TonActual,
            Measure::EquipPlanned,
            Measure::EquipActual,
            Measure::RegulationActual,
        ] {
            assert_eq!(measure.label().parse::<Measure>().unwrap(), measure);
        }
        assert!("bodega".parse::<GroupField>().is_err());
    }

    #[test]
    fn test_default_dashboard_shape() {
        let charts = default_charts();
        assert_eq!(charts.len(), 4);
        assert_eq!(charts[3].kind, ChartKind::Pie);
        assert_eq!(charts[3].group_by, GroupField::Destination);
    }

    #[test]
    fn test_build_chart_applies_config() {
        let records = vec![record("NITRATO", "TOCOPILLA", 40.0)];
        let view = build_chart(&records, &default_charts()[1]);
        assert_eq!(view.config.title, "Tonelaje Real por Producto");
        assert_eq!(view.groups[0].sums, vec![40.0]);
    }
}
