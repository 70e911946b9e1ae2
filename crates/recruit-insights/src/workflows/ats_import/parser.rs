use super::mapping::{column_for_header, Column};
use super::CandidateImportError;
use super::normalizer::normalize_category;
use crate::workflows::recruiting::{CandidateId, CandidateRecord, DataError};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ParsedExport {
    pub(crate) records: Vec<CandidateRecord>,
    /// Non-empty cells that could not be read as their column's type.
    pub(crate) coerced_cells: usize,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParsedExport, CandidateImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let (headers, present) = canonical_headers(csv_reader.headers()?);
    ensure_required_columns(&present)?;
    csv_reader.set_headers(headers);

    let mut records = Vec::new();
    let mut coerced_cells = 0;

    for (index, row) in csv_reader.deserialize::<CandidateRow>().enumerate() {
        let row = row?;
        let (record, coerced) = row.into_record(index + 1)?;
        coerced_cells += coerced;
        records.push(record);
    }

    Ok(ParsedExport {
        records,
        coerced_cells,
    })
}

/// Rewrites recognized headers to their canonical key. Only the first header
/// resolving to a column is used; later duplicates are parked under an inert name.
fn canonical_headers(raw: &csv::StringRecord) -> (csv::StringRecord, HashSet<Column>) {
    let mut present = HashSet::new();
    let headers = raw
        .iter()
        .enumerate()
        .map(|(index, header)| match column_for_header(header) {
            Some(column) if present.insert(column) => column.key().to_string(),
            Some(_) => format!("duplicate_column_{index}"),
            None => header.to_string(),
        })
        .collect();
    (headers, present)
}

fn ensure_required_columns(present: &HashSet<Column>) -> Result<(), DataError> {
    if let Some(missing) = Column::required()
        .into_iter()
        .find(|column| !present.contains(column))
    {
        return Err(DataError::MissingColumn {
            column: missing.key(),
        });
    }

    if !present.contains(&Column::ApplicationYear) && !present.contains(&Column::ApplicationDate) {
        return Err(DataError::MissingColumn {
            column: Column::ApplicationYear.key(),
        });
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    candidate_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    offer_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_year: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_month: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    department: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    level: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    position: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    process_state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    offer_accepted: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    hiring_duration_days: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    recruitment_cost: Option<String>,
}

impl CandidateRow {
    fn into_record(self, row: usize) -> Result<(CandidateRecord, usize), DataError> {
        let candidate_id = self
            .candidate_id
            .as_deref()
            .and_then(normalize_category)
            .ok_or(DataError::MissingCandidateId { row })?;

        let mut coerced = 0;
        let application_date = coerce(self.application_date.as_deref(), parse_date, &mut coerced);
        let offer_date = coerce(self.offer_date.as_deref(), parse_date, &mut coerced);
        let application_year = coerce(self.application_year.as_deref(), parse_year, &mut coerced)
            .or_else(|| application_date.map(|date| date.year()));
        let application_month =
            coerce(self.application_month.as_deref(), parse_month, &mut coerced);
        let offer_accepted = coerce(self.offer_accepted.as_deref(), parse_bool, &mut coerced);
        let hiring_duration_days = coerce(
            self.hiring_duration_days.as_deref(),
            parse_amount,
            &mut coerced,
        );
        let recruitment_cost = coerce(self.recruitment_cost.as_deref(), parse_amount, &mut coerced);

        let record = CandidateRecord {
            candidate_id: CandidateId(candidate_id),
            application_date,
            offer_date,
            application_year,
            application_month,
            department: self.department.as_deref().and_then(normalize_category),
            level: self.level.as_deref().and_then(normalize_category),
            position: self.position.as_deref().and_then(normalize_category),
            source: self.source.as_deref().and_then(normalize_category),
            process_state: self
                .process_state
                .as_deref()
                .and_then(normalize_category)
                .unwrap_or_default(),
            offer_accepted,
            hiring_duration_days,
            recruitment_cost,
        };

        Ok((record, coerced))
    }
}

fn coerce<T>(raw: Option<&str>, parse: fn(&str) -> Option<T>, coerced: &mut usize) -> Option<T> {
    let raw = raw?;
    let parsed = parse(raw);
    if parsed.is_none() {
        *coerced += 1;
    }
    parsed
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_datetime(value).map(|dt| dt.date())
}

/// Month cells hold either a full date or `YYYY-MM`; both resolve to the first of the month.
fn parse_month(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    parse_date(trimmed)
        .or_else(|| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").ok())
        .and_then(|date| date.with_day(1))
}

fn parse_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    // Spreadsheet exports often write integer columns as `2024.0`.
    let float = trimmed.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() <= f64::from(i32::MAX) {
        Some(float as i32)
    } else {
        None
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "sí" | "si" | "verdadero" => Some(true),
        "false" | "no" | "n" | "0" | "falso" => Some(false),
        _ => None,
    }
}

fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '€' | '$' | '£' | '_') && !c.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}
