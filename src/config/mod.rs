// ==========================================
// Panel Logístico Salar - Configuración
// ==========================================
// Valores por defecto del núcleo con overrides
// por variable de entorno (útil en pruebas/CI)
// ==========================================

use std::env;

/// Hoja preferida dentro del libro de despachos
pub const PREFERRED_SHEET: &str = "Base de Datos";

/// Configuración de la aplicación
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub import: ImportConfig,
    pub insight: InsightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            import: ImportConfig::default(),
            insight: InsightConfig::default(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración aplicando overrides de entorno
    pub fn from_env() -> Self {
        Self {
            import: ImportConfig::default(),
            insight: InsightConfig::from_env(),
        }
    }
}

/// Configuración de la ingesta de planillas
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Nombre de hoja preferido; si no existe se usa la primera
    pub preferred_sheet: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            preferred_sheet: PREFERRED_SHEET.to_string(),
        }
    }
}

/// Configuración del servicio de análisis remoto
///
/// El contrato del servicio (muestra de registros + fecha → resumen y KPIs)
/// está fijo; aquí solo viven endpoint, modelo y credencial.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Clave de API; si falta, el análisis cae directo al fallback
    pub api_key: Option<String>,
    /// Base del endpoint generateContent
    pub endpoint: String,
    /// Identificador del modelo remoto
    pub model: String,
    /// Cantidad de registros enviados como muestra
    pub sample_size: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            sample_size: 10,
        }
    }
}

impl InsightConfig {
    /// Overrides de entorno: SALAR_INSIGHT_API_KEY (o GEMINI_API_KEY),
    /// SALAR_INSIGHT_ENDPOINT, SALAR_INSIGHT_MODEL
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = env::var("SALAR_INSIGHT_API_KEY").or_else(|_| env::var("GEMINI_API_KEY")) {
            let trimmed = key.trim();
            if !trimmed.is_empty() {
                config.api_key = Some(trimmed.to_string());
            }
        }
        if let Ok(endpoint) = env::var("SALAR_INSIGHT_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(model) = env::var("SALAR_INSIGHT_MODEL") {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }

        config
    }
}
