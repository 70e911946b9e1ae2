use clap::Args;
use recruit_insights::config::AppConfig;
use recruit_insights::error::AppError;
use recruit_insights::workflows::ats_import::CandidateImporter;
use recruit_insights::workflows::recruiting::{
    write_csv, AggregationEngine, DashboardReport, Dimension, DimensionValue, FilterOptions,
    FilterSelection, RecordStore, EXPORT_FILE_NAME,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, warn};

/// Repeatable per-dimension filters. A dimension without flags is unrestricted.
#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Application year to keep (repeatable)
    #[arg(long = "year")]
    pub(crate) years: Vec<i32>,
    /// Department to keep (repeatable)
    #[arg(long = "department")]
    pub(crate) departments: Vec<String>,
    /// Seniority level to keep (repeatable)
    #[arg(long = "level")]
    pub(crate) levels: Vec<String>,
    /// Position to keep (repeatable)
    #[arg(long = "position")]
    pub(crate) positions: Vec<String>,
    /// Recruitment source to keep (repeatable)
    #[arg(long = "source")]
    pub(crate) sources: Vec<String>,
    /// Generic `dimension=value` filter, e.g. `recruitment-source=Referral` (repeatable)
    #[arg(long = "filter", value_parser = parse_filter)]
    pub(crate) pairs: Vec<(Dimension, DimensionValue)>,
}

impl FilterArgs {
    pub(crate) fn selection(&self) -> FilterSelection {
        let mut allowed: BTreeMap<Dimension, Vec<DimensionValue>> = BTreeMap::new();
        for year in &self.years {
            allowed
                .entry(Dimension::ApplicationYear)
                .or_default()
                .push(DimensionValue::Year(*year));
        }

        for (dimension, values) in [
            (Dimension::Department, &self.departments),
            (Dimension::Level, &self.levels),
            (Dimension::Position, &self.positions),
            (Dimension::Source, &self.sources),
        ] {
            for value in values {
                allowed
                    .entry(dimension)
                    .or_default()
                    .push(DimensionValue::from(value.as_str()));
            }
        }

        for (dimension, value) in &self.pairs {
            allowed.entry(*dimension).or_default().push(value.clone());
        }

        FilterSelection::from(allowed)
    }
}

fn parse_filter(raw: &str) -> Result<(Dimension, DimensionValue), String> {
    let (dimension, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DIMENSION=VALUE, got '{raw}'"))?;
    let dimension: Dimension = dimension.parse()?;
    let value = dimension.parse_value(value)?;
    Ok((dimension, value))
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Candidate pipeline export (CSV, English or Spanish headers). Hires are counted on
    /// APP_ACCEPTED_STATE, so Spanish exports usually need it set to "Oferta aceptada"
    #[arg(long)]
    pub(crate) csv: PathBuf,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OptionsArgs {
    /// Candidate pipeline export (CSV, English or Spanish headers)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the options as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Candidate pipeline export (CSV, English or Spanish headers)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Destination file (defaults to recruiting_filtered.csv)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = AggregationEngine::new(config.analytics.state_rules());
    let store = CandidateImporter::from_path(&args.csv)?;
    if accepted_state_unseen(&engine, &store) {
        warn!(
            accepted_state = %engine.rules().accepted_state,
            records = store.len(),
            "no record carries the accepted-offer label; set APP_ACCEPTED_STATE to match the export"
        );
    }
    let report = DashboardReport::build(&engine, &store, &args.filters.selection());

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{json}");
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// True when the export has records but none of them would count as a hire.
fn accepted_state_unseen(engine: &AggregationEngine, store: &RecordStore) -> bool {
    !store.is_empty()
        && !store
            .records()
            .iter()
            .any(|record| engine.rules().is_hired(record))
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let store = CandidateImporter::from_path(&args.csv)?;
    let options = store.filter_options();

    if args.json {
        let json = serde_json::to_string_pretty(&options).map_err(std::io::Error::from)?;
        println!("{json}");
    } else {
        print!("{}", render_options(&options));
    }
    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = AggregationEngine::new(config.analytics.state_rules());
    let store = CandidateImporter::from_path(&args.csv)?;
    let view = engine.filter(&store, &args.filters.selection());

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    let file = File::create(&output)?;
    write_csv(&view, BufWriter::new(file))?;

    info!(rows = view.len(), path = %output.display(), "filtered export written");
    println!("Wrote {} candidates to {}", view.len(), output.display());
    Ok(())
}

pub(crate) fn render_report(report: &DashboardReport) -> String {
    let kpis = &report.kpis;
    let mut out = String::new();

    out.push_str("Recruiting dashboard\n");
    out.push_str(&format!(
        "Candidates: {} | Hires: {} | Conversion: {}\n",
        kpis.candidates,
        kpis.hires,
        format_percentage(kpis.conversion_rate)
    ));
    out.push_str(&format!(
        "Offers extended: {} | Accepted: {} | Acceptance rate: {}\n",
        kpis.offers_extended,
        kpis.offers_accepted,
        format_percentage(kpis.offer_acceptance_rate)
    ));
    out.push_str(&format!(
        "Average time to hire: {} | Average cost per hire: {}\n",
        format_days(kpis.average_hiring_duration),
        format_currency(kpis.average_cost_per_hire)
    ));
    match &kpis.top_source {
        Some(top) => out.push_str(&format!(
            "Top source: {} ({} of hires)\n",
            top.source,
            format_percentage(top.percentage)
        )),
        None => out.push_str("Top source: n/a\n"),
    }

    for breakdown in &report.breakdowns {
        out.push_str(&format!("\nBy {}\n", breakdown.dimension_label));
        if breakdown.entries.is_empty() {
            out.push_str("- no hires\n");
        }
        for entry in &breakdown.entries {
            out.push_str(&format!(
                "- {}: {} hires, {} avg, {} avg cost\n",
                entry.key_label,
                entry.count,
                format_days(entry.avg_duration),
                format_currency(entry.avg_cost)
            ));
        }
    }

    if !report.hires_by_month.is_empty() {
        out.push_str("\nHires by month\n");
        for month in &report.hires_by_month {
            out.push_str(&format!("- {}: {}\n", month.label, month.count));
        }
    }

    if let Some(distribution) = &report.duration_distribution {
        out.push_str(&format!(
            "\nTime to hire (days): min {:.0} | q1 {:.1} | median {:.1} | q3 {:.1} | max {:.0}\n",
            distribution.min,
            distribution.lower_quartile,
            distribution.median,
            distribution.upper_quartile,
            distribution.max
        ));
    }

    out
}

pub(crate) fn render_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    for (dimension, values) in &options.dimensions {
        let listed: Vec<String> = values.iter().map(DimensionValue::to_string).collect();
        out.push_str(&format!("{}: {}\n", dimension.label(), listed.join(", ")));
    }
    out
}

fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

fn format_days(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |days| format!("{days:.1} days"))
}

/// Whole currency units with thousands separators, e.g. `$12,500`.
fn format_currency(value: Option<f64>) -> String {
    let Some(amount) = value else {
        return "n/a".to_string();
    };

    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0.0 && rounded > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
