//! Filtering and KPI aggregation over candidate pipeline exports.
//!
//! [`RecordStore`] holds an immutable snapshot of an export, [`AggregationEngine`]
//! turns a [`FilterSelection`] into views and metrics, and [`DashboardService`]
//! wires both to the CSV loader, the report cache and the HTTP router.

pub mod cache;
pub mod domain;
pub mod engine;
pub mod export;
pub mod report;
pub mod router;
pub mod selection;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use cache::{DatasetFingerprint, ReportCache, ReportKey};
pub use domain::{
    CandidateId, CandidateRecord, Dimension, DimensionValue, ProcessStateRules,
    DEFAULT_ACCEPTED_STATE, DEFAULT_OFFER_MARKER,
};
pub use engine::{AggregationEngine, FilteredView, HiredSubset, MonthBasis};
pub use export::{write_csv, ExportError, EXPORT_FILE_NAME};
pub use report::{
    BreakdownEntry, DashboardReport, DurationDistribution, FilterOptions, GroupedBreakdown,
    KpiSnapshot, MonthlyCount, SourceShare,
};
pub use router::{dashboard_router, DashboardRequest};
pub use selection::FilterSelection;
pub use service::{DashboardService, LoadedDataset, ServiceError};
pub use store::{DataError, RecordStore};
