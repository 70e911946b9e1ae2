use super::normalizer::normalize_header;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical columns of a candidate pipeline export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Column {
    CandidateId,
    ApplicationDate,
    OfferDate,
    ApplicationYear,
    ApplicationMonth,
    Department,
    Level,
    Position,
    Source,
    ProcessState,
    OfferAccepted,
    HiringDurationDays,
    RecruitmentCost,
}

impl Column {
    pub(crate) const fn key(self) -> &'static str {
        match self {
            Self::CandidateId => "candidate_id",
            Self::ApplicationDate => "application_date",
            Self::OfferDate => "offer_date",
            Self::ApplicationYear => "application_year",
            Self::ApplicationMonth => "application_month",
            Self::Department => "department",
            Self::Level => "level",
            Self::Position => "position",
            Self::Source => "source",
            Self::ProcessState => "process_state",
            Self::OfferAccepted => "offer_accepted",
            Self::HiringDurationDays => "hiring_duration_days",
            Self::RecruitmentCost => "recruitment_cost",
        }
    }

    /// Columns every export must carry. The year may instead be derived from the date.
    pub(crate) const fn required() -> [Self; 6] {
        [
            Self::CandidateId,
            Self::Department,
            Self::Level,
            Self::Position,
            Self::Source,
            Self::ProcessState,
        ]
    }
}

static HEADER_MAP: OnceLock<HashMap<String, Column>> = OnceLock::new();

pub(crate) fn column_for_header(header: &str) -> Option<Column> {
    header_map().get(&normalize_header(header)).copied()
}

fn header_map() -> &'static HashMap<String, Column> {
    HEADER_MAP.get_or_init(|| {
        const HEADER_TO_COLUMN: &[(&str, Column)] = &[
            // Identity
            ("candidate_id", Column::CandidateId),
            ("candidate", Column::CandidateId),
            ("id", Column::CandidateId),
            ("id_candidato", Column::CandidateId),
            // Dates
            ("application_date", Column::ApplicationDate),
            ("applied_on", Column::ApplicationDate),
            ("fecha_aplicacion", Column::ApplicationDate),
            ("fecha_aplicación", Column::ApplicationDate),
            ("offer_date", Column::OfferDate),
            ("fecha_oferta", Column::OfferDate),
            ("application_year", Column::ApplicationYear),
            ("year", Column::ApplicationYear),
            ("año_aplicacion", Column::ApplicationYear),
            ("año_aplicación", Column::ApplicationYear),
            ("ano_aplicacion", Column::ApplicationYear),
            ("application_month", Column::ApplicationMonth),
            ("mes_aplicacion", Column::ApplicationMonth),
            ("mes_aplicación", Column::ApplicationMonth),
            // Categories
            ("department", Column::Department),
            ("departamento", Column::Department),
            ("level", Column::Level),
            ("seniority", Column::Level),
            ("nivel", Column::Level),
            ("position", Column::Position),
            ("role", Column::Position),
            ("puesto", Column::Position),
            ("source", Column::Source),
            ("recruitment_source", Column::Source),
            ("fuente_reclutamiento", Column::Source),
            // Pipeline state
            ("process_state", Column::ProcessState),
            ("status", Column::ProcessState),
            ("estado_proceso", Column::ProcessState),
            ("offer_accepted", Column::OfferAccepted),
            ("oferta_aceptada", Column::OfferAccepted),
            // Metrics
            ("hiring_duration_days", Column::HiringDurationDays),
            ("time_to_hire_days", Column::HiringDurationDays),
            ("tiempo_contratacion_dias", Column::HiringDurationDays),
            ("tiempo_contratación_días", Column::HiringDurationDays),
            ("recruitment_cost", Column::RecruitmentCost),
            ("cost_per_hire", Column::RecruitmentCost),
            ("costo_reclutamiento", Column::RecruitmentCost),
        ];

        let mut map = HashMap::with_capacity(HEADER_TO_COLUMN.len());
        for (header, column) in HEADER_TO_COLUMN {
            map.insert(normalize_header(header), *column);
        }
        map
    })
}
