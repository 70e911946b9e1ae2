mod summary;
pub mod views;

pub use views::{
    BreakdownEntry, DashboardReport, DurationDistribution, FilterOptions, GroupedBreakdown,
    KpiSnapshot, MonthlyCount, SourceShare,
};
