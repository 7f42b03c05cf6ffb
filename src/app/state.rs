// ==========================================
// Panel Logístico Salar - Estado de la aplicación
// ==========================================
// Conjuntos de datos vigentes del panel. Cada
// carga reemplaza el conjunto completo y solo se
// publica si la ingesta terminó bien; una segunda
// carga concurrente se rechaza de plano.
// ==========================================

use crate::config::AppConfig;
use crate::domain::arrival::ArrivalDataset;
use crate::domain::dispatch::DispatchDataset;
use crate::importer::{ArrivalImporter, DispatchImporter, ImportError, ImportResult, IngestSummary};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Estado compartido del panel
pub struct AppState {
    config: AppConfig,
    dispatch: RwLock<Option<Arc<DispatchDataset>>>,
    arrivals: RwLock<Option<Arc<ArrivalDataset>>>,
    ingest_in_flight: AtomicBool,
}

/// Marca de ingesta en curso; se libera al soltarse
struct IngestGuard<'a>(&'a AtomicBool);

impl Drop for IngestGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dispatch: RwLock::new(None),
            arrivals: RwLock::new(None),
            ingest_in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Toma la marca de ingesta; si ya hay una en curso, rechaza
    fn begin_ingest(&self) -> ImportResult<IngestGuard<'_>> {
        self.ingest_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ImportError::IngestInProgress)?;
        Ok(IngestGuard(&self.ingest_in_flight))
    }

    /// Carga un archivo de despachos y reemplaza el conjunto vigente
    ///
    /// Si la ingesta falla, el conjunto anterior queda intacto.
    pub async fn load_dispatch_file(&self, file_path: &Path) -> ImportResult<IngestSummary> {
        let _guard = self.begin_ingest()?;

        let (records, summary) = DispatchImporter::import_file(
            file_path,
            Some(self.config.import.preferred_sheet.as_str()),
        )?;

        let dataset = Arc::new(DispatchDataset::new(records));
        *self.dispatch.write().await = Some(dataset);

        info!(archivo = %summary.file_name, registros = summary.imported, "conjunto de despachos reemplazado");
        Ok(summary)
    }

    /// Carga un archivo de llegadas y reemplaza el conjunto vigente
    pub async fn load_arrival_file(&self, file_path: &Path) -> ImportResult<IngestSummary> {
        let _guard = self.begin_ingest()?;

        let (records, summary) = ArrivalImporter::import_file(file_path)?;

        let dataset = Arc::new(ArrivalDataset::new(records));
        *self.arrivals.write().await = Some(dataset);

        info!(archivo = %summary.file_name, registros = summary.imported, "conjunto de llegadas reemplazado");
        Ok(summary)
    }

    /// Instantánea del conjunto de despachos vigente
    pub async fn dispatch_snapshot(&self) -> Option<Arc<DispatchDataset>> {
        self.dispatch.read().await.clone()
    }

    /// Instantánea del conjunto de llegadas vigente
    pub async fn arrival_snapshot(&self) -> Option<Arc<ArrivalDataset>> {
        self.arrivals.read().await.clone()
    }
}
