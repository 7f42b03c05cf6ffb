// ==========================================
// Panel Logístico Salar - Capa de aplicación
// ==========================================

pub mod state;

pub use state::AppState;
