mod aggregates;
mod joins;
pub mod views;
mod windows;

use super::domain::CleanedLayoffs;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;
use views::{
    CompanyTotal, ConsecutiveMonth, CountryTotal, CumulativePoint, DatasetOverview, DualRank,
    FundingCorrelation, FundingImpact, IndustryTotal, IndustryYearChange, LocationPair,
    MonthlyTotal, PercentageLayoff, StageTotal,
};

/// The fixed catalog of trend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    ByCompany,
    ByIndustry,
    ByCountry,
    MonthlyTrend,
    TopPercentage,
    FundingImpact,
    ByStage,
    CumulativeTrend,
    ConsecutiveMonths,
    IndustryYearOverYear,
    FundingCorrelation,
    DualRanking,
    MultiLocation,
}

impl ReportKind {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::ByCompany,
            Self::ByIndustry,
            Self::ByCountry,
            Self::MonthlyTrend,
            Self::TopPercentage,
            Self::FundingImpact,
            Self::ByStage,
            Self::CumulativeTrend,
            Self::ConsecutiveMonths,
            Self::IndustryYearOverYear,
            Self::FundingCorrelation,
            Self::DualRanking,
            Self::MultiLocation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ByCompany => "Total layoffs per company",
            Self::ByIndustry => "Layoffs by industry",
            Self::ByCountry => "Layoffs by country",
            Self::MonthlyTrend => "Monthly trend",
            Self::TopPercentage => "Top percentage layoffs",
            Self::FundingImpact => "Funding impact",
            Self::ByStage => "Layoffs by stage",
            Self::CumulativeTrend => "Cumulative trend",
            Self::ConsecutiveMonths => "Consecutive-month layoffs",
            Self::IndustryYearOverYear => "Year-over-year industry change",
            Self::FundingCorrelation => "Funding-vs-layoff correlation",
            Self::DualRanking => "Dual ranking",
            Self::MultiLocation => "Multi-location companies",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::ByCompany => "by_company",
            Self::ByIndustry => "by_industry",
            Self::ByCountry => "by_country",
            Self::MonthlyTrend => "monthly_trend",
            Self::TopPercentage => "top_percentage",
            Self::FundingImpact => "funding_impact",
            Self::ByStage => "by_stage",
            Self::CumulativeTrend => "cumulative_trend",
            Self::ConsecutiveMonths => "consecutive_months",
            Self::IndustryYearOverYear => "industry_year_over_year",
            Self::FundingCorrelation => "funding_correlation",
            Self::DualRanking => "dual_ranking",
            Self::MultiLocation => "multi_location",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report '{0}'")]
pub struct UnknownReport(pub String);

impl FromStr for ReportKind {
    type Err = UnknownReport;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().replace('-', "_").to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| UnknownReport(value.to_string()))
    }
}

/// Row caps applied by the capped reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub monthly_trend: usize,
    pub top_percentage: usize,
    pub funding_correlation: usize,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            monthly_trend: 100,
            top_percentage: 10,
            funding_correlation: 1000,
        }
    }
}

/// Output of one pipeline run. Reports that were not requested stay `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoffReport {
    pub overview: DatasetOverview,
    pub reports: ReportSet,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_company: Option<Vec<CompanyTotal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_industry: Option<Vec<IndustryTotal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_country: Option<Vec<CountryTotal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_trend: Option<Vec<MonthlyTotal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_percentage: Option<Vec<PercentageLayoff>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_impact: Option<Vec<FundingImpact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_stage: Option<Vec<StageTotal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_trend: Option<Vec<CumulativePoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consecutive_months: Option<Vec<ConsecutiveMonth>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_year_over_year: Option<Vec<IndustryYearChange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_correlation: Option<Vec<FundingCorrelation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dual_ranking: Option<Vec<DualRank>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_location: Option<Vec<LocationPair>>,
}

impl LayoffReport {
    pub fn build(layoffs: &CleanedLayoffs, limits: &ReportLimits) -> Self {
        Self::build_selected(layoffs, limits, &ReportKind::ordered())
    }

    pub fn build_selected(
        layoffs: &CleanedLayoffs,
        limits: &ReportLimits,
        kinds: &[ReportKind],
    ) -> Self {
        let mut reports = ReportSet::default();

        for &kind in kinds {
            let rows = match kind {
                ReportKind::ByCompany => {
                    store(&mut reports.by_company, aggregates::by_company(layoffs))
                }
                ReportKind::ByIndustry => {
                    store(&mut reports.by_industry, aggregates::by_industry(layoffs))
                }
                ReportKind::ByCountry => {
                    store(&mut reports.by_country, aggregates::by_country(layoffs))
                }
                ReportKind::MonthlyTrend => store(
                    &mut reports.monthly_trend,
                    aggregates::monthly_trend(layoffs, limits.monthly_trend),
                ),
                ReportKind::TopPercentage => store(
                    &mut reports.top_percentage,
                    aggregates::top_percentage(layoffs, limits.top_percentage),
                ),
                ReportKind::FundingImpact => store(
                    &mut reports.funding_impact,
                    aggregates::funding_impact(layoffs),
                ),
                ReportKind::ByStage => store(&mut reports.by_stage, aggregates::by_stage(layoffs)),
                ReportKind::CumulativeTrend => store(
                    &mut reports.cumulative_trend,
                    windows::cumulative_trend(layoffs),
                ),
                ReportKind::ConsecutiveMonths => store(
                    &mut reports.consecutive_months,
                    windows::consecutive_months(layoffs),
                ),
                ReportKind::IndustryYearOverYear => store(
                    &mut reports.industry_year_over_year,
                    windows::industry_year_over_year(layoffs),
                ),
                ReportKind::FundingCorrelation => store(
                    &mut reports.funding_correlation,
                    joins::funding_correlation(layoffs, limits.funding_correlation),
                ),
                ReportKind::DualRanking => {
                    store(&mut reports.dual_ranking, windows::dual_ranking(layoffs))
                }
                ReportKind::MultiLocation => {
                    store(&mut reports.multi_location, joins::multi_location(layoffs))
                }
            };
            debug!(report = kind.slug(), rows, "computed layoff report");
        }

        Self {
            overview: aggregates::overview(layoffs),
            reports,
        }
    }
}

fn store<T>(slot: &mut Option<Vec<T>>, rows: Vec<T>) -> usize {
    let count = rows.len();
    *slot = Some(rows);
    count
}
