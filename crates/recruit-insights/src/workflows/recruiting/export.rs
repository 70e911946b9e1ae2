use super::domain::CandidateRecord;
use super::engine::FilteredView;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

pub const EXPORT_FILE_NAME: &str = "recruiting_filtered.csv";

const EXPORT_HEADERS: [&str; 13] = [
    "candidate_id",
    "application_date",
    "offer_date",
    "application_year",
    "application_month",
    "department",
    "level",
    "position",
    "source",
    "process_state",
    "offer_accepted",
    "hiring_duration_days",
    "recruitment_cost",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode filtered records: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush filtered records: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    candidate_id: &'a str,
    application_date: Option<NaiveDate>,
    offer_date: Option<NaiveDate>,
    application_year: Option<i32>,
    application_month: Option<String>,
    department: Option<&'a str>,
    level: Option<&'a str>,
    position: Option<&'a str>,
    source: Option<&'a str>,
    process_state: &'a str,
    offer_accepted: Option<bool>,
    hiring_duration_days: Option<f64>,
    recruitment_cost: Option<f64>,
}

impl<'a> From<&'a CandidateRecord> for ExportRow<'a> {
    fn from(record: &'a CandidateRecord) -> Self {
        Self {
            candidate_id: &record.candidate_id.0,
            application_date: record.application_date,
            offer_date: record.offer_date,
            application_year: record.application_year,
            application_month: record
                .application_month
                .map(|month| month.format("%Y-%m").to_string()),
            department: record.department.as_deref(),
            level: record.level.as_deref(),
            position: record.position.as_deref(),
            source: record.source.as_deref(),
            process_state: &record.process_state,
            offer_accepted: record.offer_accepted,
            hiring_duration_days: record.hiring_duration_days,
            recruitment_cost: record.recruitment_cost,
        }
    }
}

/// Writes the view as UTF-8 CSV; missing values become empty cells.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;
    for record in view.iter() {
        csv_writer.serialize(ExportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(view: &FilteredView<'_>) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(view, &mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruiting::{AggregationEngine, FilterSelection, RecordStore};

    #[test]
    fn exports_header_and_one_row_per_record() {
        let mut hired = CandidateRecord::new("c-1", "Offer accepted");
        hired.application_year = Some(2024);
        hired.application_date = NaiveDate::from_ymd_opt(2024, 4, 2);
        hired.application_month = NaiveDate::from_ymd_opt(2024, 4, 1);
        hired.department = Some("Sales".to_string());
        hired.level = Some("Mid".to_string());
        hired.position = Some("Account Executive".to_string());
        hired.source = Some("Referral".to_string());
        hired.offer_accepted = Some(true);
        hired.recruitment_cost = Some(1250.5);

        let store = RecordStore::new(vec![hired]).expect("store builds");
        let engine = AggregationEngine::default();
        let view = engine.filter(&store, &FilterSelection::all());

        let bytes = to_csv_bytes(&view).expect("export succeeds");
        let text = String::from_utf8(bytes).expect("utf-8 output");
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "candidate_id,application_date,offer_date,application_year,application_month,\
department,level,position,source,process_state,offer_accepted,hiring_duration_days,recruitment_cost"
            )
        );
        assert_eq!(
            lines.next(),
            Some("c-1,2024-04-02,,2024,2024-04,Sales,Mid,Account Executive,Referral,Offer accepted,true,,1250.5")
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_view_exports_header_only() {
        let store = RecordStore::default();
        let view = AggregationEngine::default().filter(&store, &FilterSelection::all());
        let bytes = to_csv_bytes(&view).expect("export succeeds");
        let text = String::from_utf8(bytes).expect("utf-8 output");
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("candidate_id,"));
    }
}
