// ==========================================
// Panel Logístico Salar - Capa de dominio
// ==========================================
// Registros canónicos y tipos base compartidos
// entre ingesta, motor y reportes
// ==========================================

pub mod arrival;
pub mod dispatch;
pub mod types;

pub use arrival::{ArrivalDataset, ArrivalFilter, ArrivalRecord};
pub use dispatch::{DispatchDataset, DispatchRecord};
pub use types::{CellValue, ChartConfig, ChartKind, RawSheet};
