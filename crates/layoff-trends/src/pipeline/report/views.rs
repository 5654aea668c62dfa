use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyTotal {
    pub company: String,
    pub total_laid_off: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryTotal {
    pub industry: Option<String>,
    pub total_laid_off: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryTotal {
    pub country: String,
    pub total_laid_off: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTotal {
    pub stage: Option<String>,
    pub total_laid_off: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub total_laid_off: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentageLayoff {
    pub company: String,
    pub location: String,
    pub percentage_laid_off: f64,
    pub total_laid_off: u64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingImpact {
    pub company: String,
    pub funds_raised: f64,
    pub total_laid_off: u64,
    pub percentage_laid_off: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub total_laid_off: u64,
    pub cumulative_total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsecutiveMonth {
    pub company: String,
    pub month: String,
    pub total_laid_off: u64,
    pub prev_month: String,
    pub prev_total_laid_off: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryYearChange {
    pub industry: Option<String>,
    pub year: i32,
    pub total_laid_off: u64,
    /// Total of the industry's previous recorded year, if any.
    pub previous_total: Option<u64>,
    pub change: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingCorrelation {
    pub company: String,
    pub funding_date: NaiveDate,
    pub funds_raised: f64,
    pub layoff_date: NaiveDate,
    pub total_laid_off: u64,
    /// Days from the funding row's date to the layoff row's date.
    pub days_difference: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualRank {
    pub company: String,
    pub total_laid_off: u64,
    pub percentage_laid_off: f64,
    pub funds_raised: Option<f64>,
    pub layoff_rank: usize,
    pub funding_rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LocationPair {
    pub location: String,
    pub other_location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub records: usize,
    pub companies: usize,
    pub total_laid_off: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}
