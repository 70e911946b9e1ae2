use super::super::domain::{Dimension, DimensionValue};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub candidates: usize,
    pub hires: usize,
    pub offers_extended: usize,
    pub offers_accepted: usize,
    pub conversion_rate: f64,
    pub offer_acceptance_rate: f64,
    pub average_hiring_duration: Option<f64>,
    pub average_cost_per_hire: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_source: Option<SourceShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    /// `None` groups the hires with no value for the dimension.
    pub key: Option<DimensionValue>,
    pub key_label: String,
    pub avg_duration: Option<f64>,
    pub avg_cost: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBreakdown {
    pub dimension: Dimension,
    pub dimension_label: &'static str,
    pub entries: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceShare {
    pub source: String,
    pub count: usize,
    pub percentage: f64,
}

/// Five-number summary of hiring durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationDistribution {
    pub count: usize,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub dimensions: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub kpis: KpiSnapshot,
    pub breakdowns: Vec<GroupedBreakdown>,
    pub source_mix: Vec<SourceShare>,
    pub hires_by_month: Vec<MonthlyCount>,
    pub candidates_by_month: Vec<MonthlyCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_distribution: Option<DurationDistribution>,
}

impl DashboardReport {
    pub fn breakdown(&self, dimension: Dimension) -> Option<&GroupedBreakdown> {
        self.breakdowns
            .iter()
            .find(|breakdown| breakdown.dimension == dimension)
    }
}
