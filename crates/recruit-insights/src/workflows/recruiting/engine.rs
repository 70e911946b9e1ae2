use super::domain::{CandidateRecord, Dimension, DimensionValue, ProcessStateRules};
use super::report::views::{
    BreakdownEntry, DurationDistribution, KpiSnapshot, MonthlyCount, SourceShare,
};
use super::selection::FilterSelection;
use super::store::RecordStore;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const UNSPECIFIED_LABEL: &str = "Unspecified";

/// Records of a store that satisfy every dimension of a selection.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a CandidateRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a CandidateRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CandidateRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Part of a [`FilteredView`] whose process state is the accepted offer.
#[derive(Debug, Clone, Default)]
pub struct HiredSubset<'a> {
    records: Vec<&'a CandidateRecord>,
}

impl<'a> HiredSubset<'a> {
    pub fn records(&self) -> &[&'a CandidateRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CandidateRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Which field places a record in a calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthBasis {
    #[default]
    ApplicationDate,
    ApplicationMonth,
}

impl MonthBasis {
    fn month_of(self, record: &CandidateRecord) -> Option<NaiveDate> {
        match self {
            Self::ApplicationDate => record.application_date,
            Self::ApplicationMonth => record.application_month,
        }
    }
}

/// Stateless KPI calculator; every call recomputes from its inputs.
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    rules: ProcessStateRules,
}

impl AggregationEngine {
    pub fn new(rules: ProcessStateRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ProcessStateRules {
        &self.rules
    }

    /// Keeps a record iff each dimension's value is in that dimension's allowed set.
    /// Unrestricted dimensions allow every observed value, so nulls never pass.
    pub fn filter<'a>(
        &self,
        store: &'a RecordStore,
        selection: &FilterSelection,
    ) -> FilteredView<'a> {
        let defaults: BTreeMap<Dimension, BTreeSet<DimensionValue>> = Dimension::ordered()
            .into_iter()
            .filter(|dimension| selection.allowed(*dimension).is_none())
            .map(|dimension| (dimension, store.distinct_values(dimension)))
            .collect();

        let constraints: Vec<(Dimension, &BTreeSet<DimensionValue>)> = Dimension::ordered()
            .into_iter()
            .filter_map(|dimension| {
                selection
                    .allowed(dimension)
                    .or_else(|| defaults.get(&dimension))
                    .map(|allowed| (dimension, allowed))
            })
            .collect();

        let records = store
            .records()
            .iter()
            .filter(|record| {
                constraints.iter().all(|(dimension, allowed)| {
                    dimension
                        .value_of(record)
                        .is_some_and(|value| allowed.contains(&value))
                })
            })
            .collect();

        FilteredView { records }
    }

    pub fn hired<'a>(&self, view: &FilteredView<'a>) -> HiredSubset<'a> {
        let records = view
            .iter()
            .filter(|record| self.rules.is_hired(record))
            .collect();
        HiredSubset { records }
    }

    pub fn offers_extended<'a>(&self, view: &FilteredView<'a>) -> Vec<&'a CandidateRecord> {
        view.iter()
            .filter(|record| self.rules.is_offer(record))
            .collect()
    }

    pub fn conversion_rate(&self, view: &FilteredView<'_>, hired: &HiredSubset<'_>) -> f64 {
        percentage(hired.len(), view.len())
    }

    pub fn offer_acceptance_rate(&self, view: &FilteredView<'_>) -> f64 {
        let offers = self.offers_extended(view);
        let accepted = count_accepted(&offers);
        percentage(accepted, offers.len())
    }

    pub fn average_hiring_duration(&self, hired: &HiredSubset<'_>) -> Option<f64> {
        mean(hired.iter().filter_map(|record| record.hiring_duration_days))
    }

    pub fn average_cost_per_hire(&self, hired: &HiredSubset<'_>) -> Option<f64> {
        mean(hired.iter().filter_map(|record| record.recruitment_cost))
    }

    /// Per-key averages and counts, ascending by key with the null group last.
    pub fn group_breakdown(
        &self,
        hired: &HiredSubset<'_>,
        dimension: Dimension,
    ) -> Vec<BreakdownEntry> {
        let mut groups: BTreeMap<DimensionValue, Vec<&CandidateRecord>> = BTreeMap::new();
        let mut unassigned = Vec::new();

        for record in hired.iter() {
            match dimension.value_of(record) {
                Some(value) => groups.entry(value).or_default().push(record),
                None => unassigned.push(record),
            }
        }

        let mut entries: Vec<BreakdownEntry> = groups
            .into_iter()
            .map(|(key, members)| breakdown_entry(Some(key), &members))
            .collect();
        if !unassigned.is_empty() {
            entries.push(breakdown_entry(None, &unassigned));
        }

        entries
    }

    /// Record counts per calendar month, oldest first. Records without a month are skipped.
    pub fn monthly_trend(
        &self,
        records: &[&CandidateRecord],
        basis: MonthBasis,
    ) -> Vec<MonthlyCount> {
        let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
        for record in records {
            if let Some(date) = basis.month_of(record) {
                *counts.entry((date.year(), date.month())).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .map(|((year, month), count)| MonthlyCount {
                year,
                month,
                label: format!("{year:04}-{month:02}"),
                count,
            })
            .collect()
    }

    /// Share of hires per source, ascending by source name.
    pub fn source_shares(&self, hired: &HiredSubset<'_>) -> Vec<SourceShare> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in hired.iter() {
            if let Some(source) = record.source.as_deref() {
                *counts.entry(source).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .map(|(source, count)| SourceShare {
                source: source.to_string(),
                count,
                percentage: percentage(count, hired.len()),
            })
            .collect()
    }

    /// Source with the largest share of hires; ties go to the lexicographically first.
    pub fn top_source(&self, hired: &HiredSubset<'_>) -> Option<SourceShare> {
        self.source_shares(hired)
            .into_iter()
            .fold(None::<SourceShare>, |best, share| match best {
                Some(current) if current.count >= share.count => Some(current),
                _ => Some(share),
            })
    }

    pub fn duration_distribution(&self, hired: &HiredSubset<'_>) -> Option<DurationDistribution> {
        let mut durations: Vec<f64> = hired
            .iter()
            .filter_map(|record| record.hiring_duration_days)
            .collect();
        if durations.is_empty() {
            return None;
        }
        durations.sort_by(f64::total_cmp);

        Some(DurationDistribution {
            count: durations.len(),
            min: durations[0],
            lower_quartile: quantile(&durations, 0.25),
            median: quantile(&durations, 0.5),
            upper_quartile: quantile(&durations, 0.75),
            max: durations[durations.len() - 1],
        })
    }

    pub fn snapshot(&self, view: &FilteredView<'_>, hired: &HiredSubset<'_>) -> KpiSnapshot {
        let offers = self.offers_extended(view);
        let offers_accepted = count_accepted(&offers);

        KpiSnapshot {
            candidates: view.len(),
            hires: hired.len(),
            offers_extended: offers.len(),
            offers_accepted,
            conversion_rate: self.conversion_rate(view, hired),
            offer_acceptance_rate: percentage(offers_accepted, offers.len()),
            average_hiring_duration: self.average_hiring_duration(hired),
            average_cost_per_hire: self.average_cost_per_hire(hired),
            top_source: self.top_source(hired),
        }
    }
}

fn breakdown_entry(key: Option<DimensionValue>, members: &[&CandidateRecord]) -> BreakdownEntry {
    let key_label = key
        .as_ref()
        .map_or_else(|| UNSPECIFIED_LABEL.to_string(), ToString::to_string);

    BreakdownEntry {
        key,
        key_label,
        avg_duration: mean(members.iter().filter_map(|record| record.hiring_duration_days)),
        avg_cost: mean(members.iter().filter_map(|record| record.recruitment_cost)),
        count: members.len(),
    }
}

fn count_accepted(offers: &[&CandidateRecord]) -> usize {
    offers
        .iter()
        .filter(|record| record.offer_accepted == Some(true))
        .count()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
