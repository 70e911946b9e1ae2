use super::domain::{CandidateId, CandidateRecord, Dimension, DimensionValue};
use super::report::views::FilterOptions;
use std::collections::{BTreeSet, HashSet};

/// Structural problems with a candidate export.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("required column `{column}` is missing from the candidate export")]
    MissingColumn { column: &'static str },
    #[error("row {row} has no candidate id")]
    MissingCandidateId { row: usize },
    #[error("candidate `{0}` appears more than once")]
    DuplicateCandidate(CandidateId),
}

/// Immutable set of candidate records with column-aware accessors.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<CandidateRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<CandidateRecord>) -> Result<Self, DataError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.candidate_id) {
                return Err(DataError::DuplicateCandidate(record.candidate_id.clone()));
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &CandidateId) -> Option<&CandidateRecord> {
        self.records.iter().find(|record| &record.candidate_id == id)
    }

    /// Distinct non-null values for `dimension`, in ascending order.
    pub fn distinct_values(&self, dimension: Dimension) -> BTreeSet<DimensionValue> {
        self.records
            .iter()
            .filter_map(|record| dimension.value_of(record))
            .collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        let dimensions = Dimension::ordered()
            .into_iter()
            .map(|dimension| (dimension, self.distinct_values(dimension)))
            .collect();
        FilterOptions { dimensions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, department: Option<&str>, level: Option<&str>) -> CandidateRecord {
        let mut record = CandidateRecord::new(id, "Screening");
        record.application_year = Some(2024);
        record.department = department.map(str::to_string);
        record.level = level.map(str::to_string);
        record
    }

    #[test]
    fn rejects_duplicate_candidate_ids() {
        let error = RecordStore::new(vec![
            record("c-1", Some("Sales"), None),
            record("c-1", Some("Finance"), None),
        ])
        .expect_err("duplicate ids rejected");

        match error {
            DataError::DuplicateCandidate(id) => assert_eq!(id.0, "c-1"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn distinct_values_skip_nulls_and_are_sorted() {
        let store = RecordStore::new(vec![
            record("c-1", Some("Sales"), Some("Senior")),
            record("c-2", Some("Engineering"), None),
            record("c-3", Some("Sales"), Some("Junior")),
        ])
        .expect("store builds");

        let departments: Vec<_> = store
            .distinct_values(Dimension::Department)
            .into_iter()
            .collect();
        assert_eq!(
            departments,
            vec![
                DimensionValue::from("Engineering"),
                DimensionValue::from("Sales")
            ]
        );
        assert_eq!(store.distinct_values(Dimension::Level).len(), 2);
        assert!(store.distinct_values(Dimension::Source).is_empty());
        assert_eq!(
            store.distinct_values(Dimension::Department),
            store.distinct_values(Dimension::Department)
        );
    }

    #[test]
    fn filter_options_cover_every_dimension() {
        let store = RecordStore::new(vec![record("c-1", Some("Sales"), None)]).expect("store");
        let options = store.filter_options();

        assert_eq!(options.dimensions.len(), Dimension::ordered().len());
        assert!(options.dimensions[&Dimension::ApplicationYear]
            .contains(&DimensionValue::Year(2024)));
        assert!(options.dimensions[&Dimension::Position].is_empty());
    }

    #[test]
    fn empty_store_is_valid() {
        let store = RecordStore::new(Vec::new()).expect("empty store");
        assert!(store.is_empty());
        assert!(store.get(&CandidateId("missing".to_string())).is_none());
    }
}
