use clap::Args;
use layoff_trends::config::AppConfig;
use layoff_trends::error::AppError;
use layoff_trends::pipeline::report::ReportSet;
use layoff_trends::pipeline::{LayoffPipeline, LayoffReport, ReportKind};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Layoff CSV export to clean and analyse
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Report to print (repeatable, defaults to the full catalog)
    #[arg(long = "report", value_parser = crate::infra::parse_report)]
    pub(crate) reports: Vec<ReportKind>,
    /// Emit JSON instead of plain text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { csv, reports, json } = args;

    let config = AppConfig::load()?;
    let pipeline = LayoffPipeline::new(config.reports);
    let report = pipeline.run_path(&csv, &reports)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report, &reports));
    }

    Ok(())
}

fn selected(kinds: &[ReportKind]) -> Vec<ReportKind> {
    if kinds.is_empty() {
        ReportKind::ordered().to_vec()
    } else {
        kinds.to_vec()
    }
}

fn label_or_null(value: Option<&str>) -> &str {
    value.unwrap_or("(unknown)")
}

fn optional_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |amount| format!("{amount}"))
}

pub(crate) fn render_text(report: &LayoffReport, kinds: &[ReportKind]) -> String {
    let overview = &report.overview;
    let mut lines = vec![
        "Layoff trends".to_string(),
        format!(
            "{} records, {} companies, {} employees laid off",
            overview.records, overview.companies, overview.total_laid_off
        ),
    ];
    if let (Some(first), Some(last)) = (overview.first_date, overview.last_date) {
        lines.push(format!("Date range: {first} -> {last}"));
    }

    for kind in selected(kinds) {
        lines.push(format!("\n{}", kind.label()));
        let section = render_section(&report.reports, kind);
        if section.is_empty() {
            lines.push("- none".to_string());
        } else {
            lines.extend(section);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_section(reports: &ReportSet, kind: ReportKind) -> Vec<String> {
    match kind {
        ReportKind::ByCompany => rows(&reports.by_company, |row| {
            format!("- {}: {}", row.company, row.total_laid_off)
        }),
        ReportKind::ByIndustry => rows(&reports.by_industry, |row| {
            let industry = label_or_null(row.industry.as_deref());
            format!("- {industry}: {}", row.total_laid_off)
        }),
        ReportKind::ByCountry => rows(&reports.by_country, |row| {
            format!("- {}: {}", row.country, row.total_laid_off)
        }),
        ReportKind::MonthlyTrend => rows(&reports.monthly_trend, |row| {
            format!("- {}: {}", row.month, row.total_laid_off)
        }),
        ReportKind::TopPercentage => rows(&reports.top_percentage, |row| {
            format!(
                "- {} ({}): {:.0}% ({} people)",
                row.company,
                row.location,
                row.percentage_laid_off * 100.0,
                row.total_laid_off
            )
        }),
        ReportKind::FundingImpact => rows(&reports.funding_impact, |row| {
            format!(
                "- {}: raised {}M, laid off {} ({:.0}%)",
                row.company,
                row.funds_raised,
                row.total_laid_off,
                row.percentage_laid_off * 100.0
            )
        }),
        ReportKind::ByStage => rows(&reports.by_stage, |row| {
            let stage = label_or_null(row.stage.as_deref());
            format!("- {stage}: {}", row.total_laid_off)
        }),
        ReportKind::CumulativeTrend => rows(&reports.cumulative_trend, |row| {
            format!(
                "- {}: +{} (running {})",
                row.date, row.total_laid_off, row.cumulative_total
            )
        }),
        ReportKind::ConsecutiveMonths => rows(&reports.consecutive_months, |row| {
            format!(
                "- {}: {} ({}) after {} ({})",
                row.company, row.month, row.total_laid_off, row.prev_month, row.prev_total_laid_off
            )
        }),
        ReportKind::IndustryYearOverYear => rows(&reports.industry_year_over_year, |row| {
            let industry = label_or_null(row.industry.as_deref());
            let change = row
                .change
                .map_or_else(|| "n/a".to_string(), |delta| format!("{delta:+}"));
            format!(
                "- {industry} {}: {} (change {change})",
                row.year, row.total_laid_off
            )
        }),
        ReportKind::FundingCorrelation => rows(&reports.funding_correlation, |row| {
            format!(
                "- {}: funding {} ({}M) -> layoffs {} ({}), {} days",
                row.company,
                row.funding_date,
                row.funds_raised,
                row.layoff_date,
                row.total_laid_off,
                row.days_difference
            )
        }),
        ReportKind::DualRanking => rows(&reports.dual_ranking, |row| {
            format!(
                "- #{} {}: {:.0}% laid off, funding #{} ({})",
                row.layoff_rank,
                row.company,
                row.percentage_laid_off * 100.0,
                row.funding_rank,
                optional_amount(row.funds_raised)
            )
        }),
        ReportKind::MultiLocation => rows(&reports.multi_location, |row| {
            format!("- {} / {}", row.location, row.other_location)
        }),
    }
}

fn rows<T>(section: &Option<Vec<T>>, line: impl Fn(&T) -> String) -> Vec<String> {
    section.iter().flatten().map(line).collect()
}
