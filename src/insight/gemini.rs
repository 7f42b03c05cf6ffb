// ==========================================
// Panel Logístico Salar - Cliente Gemini
// ==========================================
// Proveedor concreto del análisis del día: envía
// una muestra de registros y pide JSON con resumen
// e indicadores sugeridos.
// ==========================================

use crate::config::InsightConfig;
use crate::domain::dispatch::DispatchRecord;
use crate::insight::{
    DashboardInsight, InsightError, InsightResult, InsightService, Kpi, INSIGHT_COLUMNS,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

// TODO: soportar consultas de seguimiento en conversación, no solo el
// análisis inicial del día.

pub struct GeminiInsightClient {
    http: reqwest::Client,
    config: InsightConfig,
}

impl GeminiInsightClient {
    pub fn new(config: InsightConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn prompt(&self, records: &[DispatchRecord], date: NaiveDate) -> InsightResult<String> {
        let sample: Vec<&DispatchRecord> =
            records.iter().take(self.config.sample_size).collect();
        let sample_json = serde_json::to_string(&sample)
            .map_err(|e| InsightError::MalformedResponse(e.to_string()))?;

        Ok(format!(
            "Eres un analista de logística de una operación de litio en el \
             Salar de Atacama. Analiza los despachos del día {date} y responde \
             SOLO con JSON de la forma \
             {{\"summary\": string, \"suggestedKPIs\": [{{\"label\": string, \"value\": string}}]}}. \
             El resumen es ejecutivo, en español, de 2 a 3 frases. \
             Columnas disponibles: {columns}. Muestra de registros: {sample}",
            date = date,
            columns = INSIGHT_COLUMNS.join(", "),
            sample = sample_json,
        ))
    }
}

#[async_trait]
impl InsightService for GeminiInsightClient {
    async fn analyze_day(
        &self,
        records: &[DispatchRecord],
        date: NaiveDate,
    ) -> InsightResult<DashboardInsight> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(InsightError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, api_key
        );

        let body = json!({
            "contents": [{
                "parts": [{ "text": self.prompt(records, date)? }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        });

        debug!(modelo = %self.config.model, fecha = %date, "solicitud de análisis enviada");

        let response: Value = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_insight_payload(&response)
    }
}

#[derive(Deserialize)]
struct RawInsight {
    summary: String,
    #[serde(rename = "suggestedKPIs", default)]
    suggested_kpis: Vec<Kpi>,
}

/// Extrae el análisis del sobre de respuesta del proveedor
fn parse_insight_payload(response: &Value) -> InsightResult<DashboardInsight> {
    let text = response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            InsightError::MalformedResponse("sin texto en candidates[0]".to_string())
        })?;

    let raw: RawInsight = serde_json::from_str(text)
        .map_err(|e| InsightError::MalformedResponse(e.to_string()))?;

    Ok(DashboardInsight {
        summary: raw.summary,
        suggested_kpis: raw.suggested_kpis,
    })
}
