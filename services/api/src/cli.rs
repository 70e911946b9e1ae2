use crate::report::{run_export, run_options, run_report, ExportArgs, OptionsArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruit Insights",
    about = "Serve and compute recruiting pipeline dashboards from ATS exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print KPIs, breakdowns and monthly trends for a filtered export
    Report(ReportArgs),
    /// List the selectable values of every filter dimension
    Options(OptionsArgs),
    /// Write the filtered candidate rows to a CSV file
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Options(args) => run_options(args),
        Command::Export(args) => run_export(args),
    }
}
