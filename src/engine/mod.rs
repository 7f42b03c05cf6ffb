// ==========================================
// Panel Logístico Salar - Motor analítico
// ==========================================

pub mod aggregator;
pub mod day_summary;
