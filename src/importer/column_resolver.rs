// ==========================================
// Panel Logístico Salar - Resolución de columnas
// ==========================================
// Las planillas de origen renombran y reordenan
// columnas entre períodos de reporte; se busca el
// encabezado por subcadena (sin distinguir caso)
// con un índice posicional de respaldo.
// ==========================================

use crate::domain::types::CellValue;

/// Resolutor de índices de columna a partir del encabezado
///
/// Se construye una vez por archivo; el mapa campo→índice resultante
/// se reutiliza para todas las filas de datos.
pub struct ColumnResolver {
    headers: Vec<String>,
}

impl ColumnResolver {
    pub fn new(header_row: &[CellValue]) -> Self {
        let headers = header_row
            .iter()
            .map(|cell| cell.as_text().unwrap_or_default().trim().to_uppercase())
            .collect();
        Self { headers }
    }

    /// Índice de la primera celda de encabezado que contiene `name`
    /// como subcadena; si ninguna lo contiene, `fallback`
    pub fn resolve(&self, name: &str, fallback: usize) -> usize {
        let needle = name.trim().to_uppercase();
        self.headers
            .iter()
            .position(|h| h.contains(&needle))
            .unwrap_or(fallback)
    }
}

// ==========================================
// Mapas de columnas por dominio
// ==========================================

/// Columnas de la planilla de despachos
///
/// Los respaldos posicionales replican el layout histórico del archivo
/// de despachos de la gerencia.
#[derive(Debug, Clone, Copy)]
pub struct DispatchColumns {
    pub date: usize,
    pub product: usize,
    pub destination: usize,
    pub ton_planned: usize,
    pub ton_actual: usize,
    pub equipment_planned: usize,
    pub equipment_actual: usize,
    pub regulation_actual: usize,
}

impl DispatchColumns {
    pub fn resolve(header_row: &[CellValue]) -> Self {
        let resolver = ColumnResolver::new(header_row);
        Self {
            date: resolver.resolve("FECHA", 1),
            product: resolver.resolve("PRODUCTO", 31),
            destination: resolver.resolve("DESTINO", 32),
            ton_planned: resolver.resolve("TON_PROG", 33),
            ton_actual: resolver.resolve("TON_REAL", 34),
            equipment_planned: resolver.resolve("EQ_PROG", 35),
            equipment_actual: resolver.resolve("EQ_REAL", 36),
            regulation_actual: resolver.resolve("REGULACION", 46),
        }
    }
}

/// Columnas de la planilla de llegada de equipos
#[derive(Debug, Clone, Copy)]
pub struct ArrivalColumns {
    pub date: usize,
    pub destination: usize,
    pub company: usize,
    pub hour: usize,
}

impl ArrivalColumns {
    pub fn resolve(header_row: &[CellValue]) -> Self {
        let resolver = ColumnResolver::new(header_row);
        Self {
            date: resolver.resolve("FECHA", 0),
            destination: resolver.resolve("DESTINO", 3),
            company: resolver.resolve("EMPRESA", 11),
            hour: resolver.resolve("HORA", 14),
        }
    }
}
