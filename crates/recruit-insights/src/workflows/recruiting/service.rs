use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::cache::{DatasetFingerprint, ReportCache, ReportKey};
use super::engine::AggregationEngine;
use super::export::{to_csv_bytes, ExportError};
use super::report::{DashboardReport, FilterOptions};
use super::selection::FilterSelection;
use super::store::RecordStore;
use crate::config::AnalyticsConfig;
use crate::workflows::ats_import::{CandidateImportError, CandidateImporter};

/// A parsed export together with the fingerprint of its raw bytes.
#[derive(Debug)]
pub struct LoadedDataset {
    pub fingerprint: DatasetFingerprint,
    pub store: RecordStore,
}

/// Presentation-side facade: parses uploads, runs the engine and memoizes reports.
pub struct DashboardService {
    engine: AggregationEngine,
    cache: Mutex<ReportCache>,
}

impl DashboardService {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            engine: AggregationEngine::new(config.state_rules()),
            cache: Mutex::new(ReportCache::new(
                config.report_cache_ttl,
                config.report_cache_entries,
            )),
        }
    }

    pub fn engine(&self) -> &AggregationEngine {
        &self.engine
    }

    pub fn load(&self, csv: &[u8]) -> Result<LoadedDataset, ServiceError> {
        let fingerprint = DatasetFingerprint::of(csv);
        let store = CandidateImporter::from_reader(csv)?;
        debug!(dataset = %fingerprint, records = store.len(), "dataset loaded");
        Ok(LoadedDataset { fingerprint, store })
    }

    /// Full dashboard for `selection`. Identical uploads reuse the cached report.
    pub fn report(
        &self,
        csv: &[u8],
        selection: &FilterSelection,
    ) -> Result<Arc<DashboardReport>, ServiceError> {
        let key = ReportKey::new(DatasetFingerprint::of(csv), selection.clone());
        if let Some(report) = self.cache().get(&key) {
            debug!(dataset = %key.dataset, "report served from cache");
            return Ok(report);
        }

        let dataset = self.load(csv)?;
        let report = Arc::new(DashboardReport::build(
            &self.engine,
            &dataset.store,
            selection,
        ));
        info!(
            dataset = %dataset.fingerprint,
            candidates = report.kpis.candidates,
            hires = report.kpis.hires,
            "report computed"
        );

        self.cache().insert(key, Arc::clone(&report));
        Ok(report)
    }

    pub fn options(&self, csv: &[u8]) -> Result<FilterOptions, ServiceError> {
        let dataset = self.load(csv)?;
        Ok(dataset.store.filter_options())
    }

    /// Filtered records as CSV bytes.
    pub fn export(&self, csv: &[u8], selection: &FilterSelection) -> Result<Vec<u8>, ServiceError> {
        let dataset = self.load(csv)?;
        let view = self.engine.filter(&dataset.store, selection);
        info!(dataset = %dataset.fingerprint, rows = view.len(), "exporting filtered candidates");
        Ok(to_csv_bytes(&view)?)
    }

    pub fn cached_reports(&self) -> usize {
        self.cache().len()
    }

    fn cache(&self) -> MutexGuard<'_, ReportCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Import(#[from] CandidateImportError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
