use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row as delivered by the ingestion source, before cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoffRecord {
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub total_laid_off: Option<u64>,
    pub percentage_laid_off: Option<f64>,
    pub date: Option<NaiveDateTime>,
    pub stage: Option<String>,
    pub country: String,
    /// Millions raised by the company; `None` when unknown.
    pub funds_raised: Option<f64>,
}

impl LayoffRecord {
    /// Minimal record for a company; every optional column starts empty.
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            location: String::new(),
            industry: None,
            total_laid_off: None,
            percentage_laid_off: None,
            date: None,
            stage: None,
            country: String::new(),
            funds_raised: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_total_laid_off(mut self, total: u64) -> Self {
        self.total_laid_off = Some(total);
        self
    }

    pub fn with_percentage_laid_off(mut self, percentage: f64) -> Self {
        self.percentage_laid_off = Some(percentage);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date.and_hms_opt(0, 0, 0);
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.date = Some(timestamp);
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_funds_raised(mut self, funds: f64) -> Self {
        self.funds_raised = Some(funds);
        self
    }
}

/// A record after the cleaning stage. Layoff counts are always present and
/// `industry` is lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedLayoff {
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub total_laid_off: u64,
    pub percentage_laid_off: f64,
    pub date: Option<NaiveDate>,
    pub stage: Option<String>,
    pub country: String,
    pub funds_raised: Option<f64>,
}

impl CleanedLayoff {
    /// `YYYY-MM` bucket used by the monthly reports.
    pub fn month(&self) -> Option<String> {
        self.date.map(|date| date.format("%Y-%m").to_string())
    }
}

impl From<CleanedLayoff> for LayoffRecord {
    fn from(cleaned: CleanedLayoff) -> Self {
        Self {
            company: cleaned.company,
            location: cleaned.location,
            industry: cleaned.industry,
            total_laid_off: Some(cleaned.total_laid_off),
            percentage_laid_off: Some(cleaned.percentage_laid_off),
            date: cleaned.date.and_then(|date| date.and_hms_opt(0, 0, 0)),
            stage: cleaned.stage,
            country: cleaned.country,
            funds_raised: cleaned.funds_raised,
        }
    }
}

/// The full cleaned record set every report reads from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedLayoffs {
    records: Vec<CleanedLayoff>,
}

impl CleanedLayoffs {
    pub(crate) fn new(records: Vec<CleanedLayoff>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CleanedLayoff] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_laid_off(&self) -> u64 {
        self.records.iter().map(|record| record.total_laid_off).sum()
    }

    pub fn into_records(self) -> Vec<CleanedLayoff> {
        self.records
    }
}
