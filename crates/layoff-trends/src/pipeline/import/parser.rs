use super::normalizer::{is_missing, normalize_text};
use super::LayoffImportError;
use crate::pipeline::domain::LayoffRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<LayoffRecord>, LayoffImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(index as u64 + 2, |position| position.line());
        let row: LayoffRow = record.deserialize(Some(&headers))?;
        records.push(row.into_record(line)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct LayoffRow {
    company: String,
    #[serde(default, deserialize_with = "missing_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "missing_as_none")]
    industry: Option<String>,
    #[serde(default, deserialize_with = "missing_as_none")]
    total_laid_off: Option<String>,
    #[serde(default, deserialize_with = "missing_as_none")]
    percentage_laid_off: Option<String>,
    #[serde(default, deserialize_with = "missing_as_none")]
    date: Option<String>,
    #[serde(default, deserialize_with = "missing_as_none")]
    stage: Option<String>,
    #[serde(default, deserialize_with = "missing_as_none")]
    country: Option<String>,
    #[serde(
        default,
        alias = "funds_raised_millions",
        deserialize_with = "missing_as_none"
    )]
    funds_raised: Option<String>,
}

impl LayoffRow {
    fn into_record(self, line: u64) -> Result<LayoffRecord, LayoffImportError> {
        let total_laid_off = self
            .total_laid_off
            .as_deref()
            .map(|raw| parse_count(raw).ok_or_else(|| invalid(line, "total_laid_off", raw)))
            .transpose()?;

        let percentage_laid_off = self
            .percentage_laid_off
            .as_deref()
            .map(|raw| {
                parse_fraction(raw).ok_or_else(|| invalid(line, "percentage_laid_off", raw))
            })
            .transpose()?;

        let funds_raised = self
            .funds_raised
            .as_deref()
            .map(|raw| parse_amount(raw).ok_or_else(|| invalid(line, "funds_raised", raw)))
            .transpose()?;

        let date = self
            .date
            .as_deref()
            .map(|raw| {
                parse_datetime(raw).ok_or_else(|| LayoffImportError::InvalidDate {
                    line,
                    value: raw.to_string(),
                })
            })
            .transpose()?;

        Ok(LayoffRecord {
            company: normalize_text(&self.company),
            location: self.location.as_deref().map(normalize_text).unwrap_or_default(),
            industry: self.industry.as_deref().map(normalize_text),
            total_laid_off,
            percentage_laid_off,
            date,
            stage: self.stage.as_deref().map(normalize_text),
            country: self.country.as_deref().map(normalize_text).unwrap_or_default(),
            funds_raised,
        })
    }
}

fn invalid(line: u64, column: &'static str, value: &str) -> LayoffImportError {
    LayoffImportError::InvalidField {
        line,
        column,
        value: value.to_string(),
    }
}

fn missing_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !is_missing(value)))
}

/// Whole, non-negative counts. Spreadsheet exports sometimes write `12.0`.
fn parse_count(value: &str) -> Option<u64> {
    let trimmed = value.trim().replace(',', "");
    if let Ok(count) = trimmed.parse::<u64>() {
        return Some(count);
    }

    match trimmed.parse::<f64>() {
        Ok(float) if float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64 => {
            Some(float as u64)
        }
        _ => None,
    }
}

fn parse_fraction(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|fraction| (0.0..=1.0).contains(fraction))
        .map(unsigned_zero)
}

fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
        .map(unsigned_zero)
}

/// `-0` passes the range checks but orders below `0` under `total_cmp`.
pub(crate) fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_accepts_integral_floats_only() {
        assert_eq!(parse_count("120"), Some(120));
        assert_eq!(parse_count("1,200"), Some(1200));
        assert_eq!(parse_count("12.0"), Some(12));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn parse_fraction_rejects_values_outside_unit_range() {
        assert_eq!(parse_fraction("0.25"), Some(0.25));
        assert_eq!(parse_fraction("1"), Some(1.0));
        assert_eq!(parse_fraction("1.5"), None);
        assert_eq!(parse_fraction("abc"), None);
    }

    #[test]
    fn negative_zero_is_read_as_zero() {
        let fraction = parse_fraction("-0").expect("zero is in range");
        assert!(fraction.is_sign_positive());
        let amount = parse_amount("-0.0").expect("zero funding is valid");
        assert!(amount.is_sign_positive());
    }

    #[test]
    fn offset_timestamps_keep_their_written_date() {
        let parsed = parse_datetime("2023-03-06T23:30:00-05:00").expect("rfc3339 parses");
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2023, 3, 6).expect("valid date"));
        assert_eq!(parsed.time().to_string(), "23:30:00");
    }

    #[test]
    fn parse_amount_strips_currency_formatting() {
        assert_eq!(parse_amount("$1,250.5"), Some(1250.5));
        assert_eq!(parse_amount("-1"), None);
    }
}
