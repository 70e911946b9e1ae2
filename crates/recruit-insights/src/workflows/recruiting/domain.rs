use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ACCEPTED_STATE: &str = "Offer accepted";
pub const DEFAULT_OFFER_MARKER: &str = "Offer";

/// Identifier wrapper for a candidate process row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One applicant-process instance from the pipeline export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub candidate_id: CandidateId,
    pub application_date: Option<NaiveDate>,
    pub offer_date: Option<NaiveDate>,
    pub application_year: Option<i32>,
    /// First day of the month the export attributes the application to.
    pub application_month: Option<NaiveDate>,
    pub department: Option<String>,
    pub level: Option<String>,
    pub position: Option<String>,
    pub source: Option<String>,
    pub process_state: String,
    pub offer_accepted: Option<bool>,
    pub hiring_duration_days: Option<f64>,
    pub recruitment_cost: Option<f64>,
}

impl CandidateRecord {
    /// Bare record carrying only an id and a process state.
    pub fn new(candidate_id: impl Into<String>, process_state: impl Into<String>) -> Self {
        Self {
            candidate_id: CandidateId(candidate_id.into()),
            application_date: None,
            offer_date: None,
            application_year: None,
            application_month: None,
            department: None,
            level: None,
            position: None,
            source: None,
            process_state: process_state.into(),
            offer_accepted: None,
            hiring_duration_days: None,
            recruitment_cost: None,
        }
    }
}

/// Categorical axes a pipeline can be sliced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ApplicationYear,
    Department,
    Level,
    Position,
    Source,
}

impl Dimension {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::ApplicationYear,
            Self::Department,
            Self::Level,
            Self::Position,
            Self::Source,
        ]
    }

    /// Dimensions the dashboard compares hires across.
    pub const fn breakdowns() -> [Self; 4] {
        [Self::Source, Self::Level, Self::Department, Self::Position]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ApplicationYear => "application_year",
            Self::Department => "department",
            Self::Level => "level",
            Self::Position => "position",
            Self::Source => "source",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ApplicationYear => "Application Year",
            Self::Department => "Department",
            Self::Level => "Level",
            Self::Position => "Position",
            Self::Source => "Recruitment Source",
        }
    }

    pub fn value_of(self, record: &CandidateRecord) -> Option<DimensionValue> {
        let text = |value: &Option<String>| value.clone().map(DimensionValue::Text);
        match self {
            Self::ApplicationYear => record.application_year.map(DimensionValue::Year),
            Self::Department => text(&record.department),
            Self::Level => text(&record.level),
            Self::Position => text(&record.position),
            Self::Source => text(&record.source),
        }
    }

    /// Brings a caller supplied value into the representation stored records use.
    pub fn normalize(self, value: DimensionValue) -> DimensionValue {
        match (self, value) {
            (Self::ApplicationYear, DimensionValue::Text(raw)) => match raw.trim().parse() {
                Ok(year) => DimensionValue::Year(year),
                Err(_) => DimensionValue::Text(raw),
            },
            (Self::ApplicationYear, value) => value,
            (_, DimensionValue::Year(number)) => DimensionValue::Text(number.to_string()),
            (_, value) => value,
        }
    }

    pub fn parse_value(self, raw: &str) -> Result<DimensionValue, String> {
        let trimmed = raw.trim();
        match self {
            Self::ApplicationYear => trimmed
                .parse()
                .map(DimensionValue::Year)
                .map_err(|err| format!("'{raw}' is not a valid application year ({err})")),
            _ if trimmed.is_empty() => Err(format!("{} value must not be empty", self.key())),
            _ => Ok(DimensionValue::Text(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "application_year" | "year" => Ok(Self::ApplicationYear),
            "department" => Ok(Self::Department),
            "level" => Ok(Self::Level),
            "position" => Ok(Self::Position),
            "source" | "recruitment_source" => Ok(Self::Source),
            other => Err(format!("unknown dimension '{other}'")),
        }
    }
}

/// Value observed for a [`Dimension`]; a single dimension only ever holds one variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Year(i32),
    Text(String),
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i32> for DimensionValue {
    fn from(value: i32) -> Self {
        Self::Year(value)
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DimensionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Labels that classify a process state as hired or offer-bearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStateRules {
    pub accepted_state: String,
    pub offer_marker: String,
}

impl Default for ProcessStateRules {
    fn default() -> Self {
        Self {
            accepted_state: DEFAULT_ACCEPTED_STATE.to_string(),
            offer_marker: DEFAULT_OFFER_MARKER.to_string(),
        }
    }
}

impl ProcessStateRules {
    pub fn new(accepted_state: impl Into<String>, offer_marker: impl Into<String>) -> Self {
        Self {
            accepted_state: accepted_state.into(),
            offer_marker: offer_marker.into(),
        }
    }

    /// Exact match against the accepted-offer label.
    pub fn is_hired(&self, record: &CandidateRecord) -> bool {
        record.process_state == self.accepted_state
    }

    /// Case-sensitive substring match; covers every offer-bearing state.
    pub fn is_offer(&self, record: &CandidateRecord) -> bool {
        record.process_state.contains(self.offer_marker.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_dimension_normalizes_textual_years() {
        assert_eq!(
            Dimension::ApplicationYear.normalize(DimensionValue::from(" 2024 ")),
            DimensionValue::Year(2024)
        );
        assert_eq!(
            Dimension::Department.normalize(DimensionValue::from("2024")),
            DimensionValue::Text("2024".to_string())
        );
    }

    #[test]
    fn parse_value_rejects_bad_years_and_blank_text() {
        assert!(Dimension::ApplicationYear.parse_value("twenty").is_err());
        assert!(Dimension::Source.parse_value("   ").is_err());
        assert_eq!(
            Dimension::Source.parse_value(" LinkedIn "),
            Ok(DimensionValue::Text("LinkedIn".to_string()))
        );
    }

    #[test]
    fn dimension_parses_cli_spellings() {
        assert_eq!("year".parse::<Dimension>(), Ok(Dimension::ApplicationYear));
        assert_eq!(
            "Recruitment-Source".parse::<Dimension>(),
            Ok(Dimension::Source)
        );
        assert!("salary".parse::<Dimension>().is_err());
    }

    #[test]
    fn state_rules_distinguish_hired_from_offer_bearing() {
        let rules = ProcessStateRules::default();
        let extended = CandidateRecord::new("c-1", "Offer extended");
        let accepted = CandidateRecord::new("c-2", "Offer accepted");
        let lowercase = CandidateRecord::new("c-3", "offer accepted");

        assert!(rules.is_offer(&extended));
        assert!(!rules.is_hired(&extended));
        assert!(rules.is_offer(&accepted));
        assert!(rules.is_hired(&accepted));
        assert!(!rules.is_offer(&lowercase));
        assert!(!rules.is_hired(&lowercase));
    }

    #[test]
    fn dimension_values_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            DimensionValue::Year(2023),
            DimensionValue::from("Sales"),
        ])
        .expect("serialize");
        assert_eq!(json, r#"[2023,"Sales"]"#);
    }
}
