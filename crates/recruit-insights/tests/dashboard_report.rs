use recruit_insights::workflows::ats_import::CandidateImporter;
use recruit_insights::workflows::recruiting::{
    AggregationEngine, DashboardReport, Dimension, DimensionValue, FilterSelection,
    ProcessStateRules, RecordStore,
};

fn pipeline() -> RecordStore {
    let data = include_bytes!("../fixtures/recruitment_pipeline.csv");
    CandidateImporter::from_reader(&data[..]).expect("pipeline export imports")
}

fn engine() -> AggregationEngine {
    AggregationEngine::new(ProcessStateRules::new("Oferta aceptada", "Oferta"))
}

fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

#[test]
fn full_selection_matches_pipeline_totals() {
    let store = pipeline();
    let report = DashboardReport::build(&engine(), &store, &FilterSelection::all());

    let kpis = &report.kpis;
    assert_eq!(kpis.candidates, 12);
    assert_eq!(kpis.hires, 6);
    assert!(approx(kpis.conversion_rate, 50.0));
    assert_eq!(kpis.offers_extended, 8);
    assert_eq!(kpis.offers_accepted, 6);
    assert!(approx(kpis.offer_acceptance_rate, 75.0));
    assert!(approx(
        kpis.average_hiring_duration.expect("durations present"),
        182.0 / 6.0
    ));
    assert!(approx(
        kpis.average_cost_per_hire.expect("costs present"),
        13100.0 / 6.0
    ));

    // Three sources tie at two hires each.
    let top = kpis.top_source.as_ref().expect("top source");
    assert_eq!(top.source, "LinkedIn");
    assert_eq!(top.count, 2);
    assert!(approx(top.percentage, 100.0 / 3.0));
}

#[test]
fn breakdowns_partition_the_hired_subset() {
    let store = pipeline();
    let report = DashboardReport::build(&engine(), &store, &FilterSelection::all());

    for dimension in Dimension::breakdowns() {
        let breakdown = report.breakdown(dimension).expect("breakdown present");
        let total: usize = breakdown.entries.iter().map(|entry| entry.count).sum();
        assert_eq!(total, report.kpis.hires, "{dimension} breakdown");
    }

    let departments = report
        .breakdown(Dimension::Department)
        .expect("department breakdown");
    let labels: Vec<&str> = departments
        .entries
        .iter()
        .map(|entry| entry.key_label.as_str())
        .collect();
    assert_eq!(labels, vec!["Tecnología", "Ventas"]);
    assert_eq!(departments.entries[0].count, 4);
    assert_eq!(departments.entries[0].avg_duration, Some(33.25));
    assert_eq!(departments.entries[1].avg_duration, Some(24.5));
}

#[test]
fn monthly_series_cover_every_hire_and_candidate() {
    let store = pipeline();
    let report = DashboardReport::build(&engine(), &store, &FilterSelection::all());

    let hires: Vec<(&str, usize)> = report
        .hires_by_month
        .iter()
        .map(|month| (month.label.as_str(), month.count))
        .collect();
    assert_eq!(
        hires,
        vec![
            ("2023-10", 1),
            ("2023-11", 1),
            ("2024-01", 1),
            ("2024-02", 1),
            ("2024-03", 2),
        ]
    );

    let candidates: usize = report.candidates_by_month.iter().map(|m| m.count).sum();
    assert_eq!(candidates, 12);
}

#[test]
fn duration_distribution_summarizes_hires() {
    let store = pipeline();
    let report = DashboardReport::build(&engine(), &store, &FilterSelection::all());

    let distribution = report.duration_distribution.expect("durations present");
    assert_eq!(distribution.count, 6);
    assert_eq!(distribution.min, 21.0);
    assert_eq!(distribution.lower_quartile, 28.0);
    assert_eq!(distribution.median, 28.0);
    assert_eq!(distribution.upper_quartile, 33.25);
    assert_eq!(distribution.max, 42.0);
}

#[test]
fn year_selection_narrows_every_metric() {
    let store = pipeline();
    let selection = FilterSelection::only(Dimension::ApplicationYear, 2024);
    let report = DashboardReport::build(&engine(), &store, &selection);

    assert_eq!(report.kpis.candidates, 8);
    assert_eq!(report.kpis.hires, 4);
    assert!(approx(report.kpis.conversion_rate, 50.0));
    assert!(report
        .source_mix
        .iter()
        .all(|share| share.count <= report.kpis.hires));
}

#[test]
fn selections_on_several_dimensions_intersect() {
    let store = pipeline();
    let engine = engine();
    let selection = FilterSelection::all()
        .with(Dimension::Department, ["Tecnología"])
        .with(Dimension::Level, ["Senior", "Mid"]);

    let view = engine.filter(&store, &selection);
    let ids: Vec<&str> = view
        .iter()
        .map(|record| record.candidate_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["R001", "R003", "R009", "R012"]);

    let hired = engine.hired(&view);
    assert_eq!(hired.len(), 3);
    assert!(hired
        .iter()
        .all(|record| record.department == Some("Tecnología".to_string())));
    assert!(!view
        .iter()
        .any(|record| record.level.as_deref() == Some("Junior")));
    assert!(store
        .distinct_values(Dimension::Department)
        .contains(&DimensionValue::from("Marketing")));
}
