use crate::render::{run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use layoff_trends::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Layoff Trends",
    about = "Clean company layoff exports and report on layoff trends",
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
    /// Clean a layoff CSV export and print the trend reports
    Report(ReportArgs),
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layoff_trends::pipeline::ReportKind;

    #[test]
    fn report_command_collects_repeated_report_flags() {
        let cli = Cli::try_parse_from([
            "layoff-trends",
            "report",
            "--csv",
            "layoffs.csv",
            "--report",
            "by_company",
            "--report",
            "monthly-trend",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(
                    args.reports,
                    vec![ReportKind::ByCompany, ReportKind::MonthlyTrend]
                );
                assert!(args.json);
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn unknown_report_names_are_rejected() {
        let result = Cli::try_parse_from([
            "layoff-trends",
            "report",
            "--csv",
            "layoffs.csv",
            "--report",
            "payroll",
        ]);
        assert!(result.is_err());
    }
}
