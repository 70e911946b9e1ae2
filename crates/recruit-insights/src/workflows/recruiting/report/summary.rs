use super::super::domain::Dimension;
use super::super::engine::{AggregationEngine, MonthBasis};
use super::super::selection::FilterSelection;
use super::super::store::RecordStore;
use super::views::{DashboardReport, GroupedBreakdown};

impl DashboardReport {
    /// Runs every dashboard computation for one selection over one store.
    pub fn build(
        engine: &AggregationEngine,
        store: &RecordStore,
        selection: &FilterSelection,
    ) -> DashboardReport {
        let view = engine.filter(store, selection);
        let hired = engine.hired(&view);

        let breakdowns = Dimension::breakdowns()
            .into_iter()
            .map(|dimension| GroupedBreakdown {
                dimension,
                dimension_label: dimension.label(),
                entries: engine.group_breakdown(&hired, dimension),
            })
            .collect();

        DashboardReport {
            kpis: engine.snapshot(&view, &hired),
            breakdowns,
            source_mix: engine.source_shares(&hired),
            hires_by_month: engine.monthly_trend(hired.records(), month_basis(store)),
            candidates_by_month: engine.monthly_trend(view.records(), MonthBasis::ApplicationDate),
            duration_distribution: engine.duration_distribution(&hired),
        }
    }
}

/// Prefer the explicit month column whenever the export carries one.
fn month_basis(store: &RecordStore) -> MonthBasis {
    if store
        .records()
        .iter()
        .any(|record| record.application_month.is_some())
    {
        MonthBasis::ApplicationMonth
    } else {
        MonthBasis::ApplicationDate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruiting::domain::CandidateRecord;
    use chrono::NaiveDate;

    fn hire(id: &str, source: &str, month: Option<u32>) -> CandidateRecord {
        let mut record = CandidateRecord::new(id, "Offer accepted");
        record.application_year = Some(2024);
        record.application_date = NaiveDate::from_ymd_opt(2024, 2, 14);
        record.application_month = month.and_then(|month| NaiveDate::from_ymd_opt(2024, month, 1));
        record.department = Some("Sales".to_string());
        record.level = Some("Mid".to_string());
        record.position = Some("Account Executive".to_string());
        record.source = Some(source.to_string());
        record.offer_accepted = Some(true);
        record.hiring_duration_days = Some(21.0);
        record.recruitment_cost = Some(1500.0);
        record
    }

    #[test]
    fn report_contains_breakdowns_for_each_comparison_dimension() {
        let store = RecordStore::new(vec![
            hire("c-1", "LinkedIn", None),
            hire("c-2", "Referral", None),
        ])
        .expect("store builds");
        let report =
            DashboardReport::build(&AggregationEngine::default(), &store, &FilterSelection::all());

        assert_eq!(report.breakdowns.len(), 4);
        assert_eq!(report.breakdowns[0].dimension, Dimension::Source);
        let source = report.breakdown(Dimension::Source).expect("source breakdown");
        assert_eq!(source.entries.len(), 2);
        assert_eq!(report.kpis.hires, 2);
        assert_eq!(report.hires_by_month.len(), 1);
        assert_eq!(report.hires_by_month[0].label, "2024-02");
        assert_eq!(report.candidates_by_month[0].count, 2);
    }

    #[test]
    fn hires_follow_explicit_month_column_when_present() {
        let store = RecordStore::new(vec![
            hire("c-1", "LinkedIn", Some(5)),
            hire("c-2", "Referral", None),
        ])
        .expect("store builds");
        let report =
            DashboardReport::build(&AggregationEngine::default(), &store, &FilterSelection::all());

        assert_eq!(report.hires_by_month.len(), 1);
        assert_eq!(report.hires_by_month[0].label, "2024-05");
        assert_eq!(report.hires_by_month[0].count, 1);
    }
}
