mod normalizer;
mod parser;

pub(crate) use parser::unsigned_zero;

use crate::pipeline::domain::LayoffRecord;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LayoffImportError {
    #[error("failed to read layoff export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid layoff CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: column `{column}` has unusable value '{value}'")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: '{value}' is not a recognised date")]
    InvalidDate { line: u64, value: String },
}

/// Loads raw layoff rows from CSV exports.
pub struct LayoffImporter;

impl LayoffImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LayoffRecord>, LayoffImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LayoffRecord>, LayoffImportError> {
        let records = parser::parse_records(reader)?;
        info!(rows = records.len(), "imported layoff records");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    const HEADER: &str = "company,location,industry,total_laid_off,percentage_laid_off,date,stage,country,funds_raised_millions\n";

    #[test]
    fn parse_datetime_supports_iso_us_and_rfc3339() {
        let iso = parser::parse_datetime_for_tests("2023-01-04").expect("iso date");
        assert_eq!(iso.date(), NaiveDate::from_ymd_opt(2023, 1, 4).unwrap());

        let us = parser::parse_datetime_for_tests("3/6/2023").expect("us date");
        assert_eq!(us.date(), NaiveDate::from_ymd_opt(2023, 3, 6).unwrap());

        let rfc = parser::parse_datetime_for_tests("2023-03-06T18:30:00Z").expect("rfc date");
        assert_eq!(rfc.date(), NaiveDate::from_ymd_opt(2023, 3, 6).unwrap());

        assert!(parser::parse_datetime_for_tests("  ").is_none());
        assert!(parser::parse_datetime_for_tests("soon").is_none());
    }

    #[test]
    fn importer_treats_null_markers_as_missing() {
        let csv = format!(
            "{HEADER}Atlassian,Sydney,Other,500,0.05,3/6/2023,Post-IPO,Australia,210\n\
             Stealth,SF Bay Area,NULL,NULL,,NULL,Unknown,United States,NULL\n"
        );
        let records = LayoffImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_laid_off, Some(500));
        assert_eq!(records[0].funds_raised, Some(210.0));
        assert_eq!(
            records[0].date.map(|dt| dt.date()),
            NaiveDate::from_ymd_opt(2023, 3, 6)
        );

        let stealth = &records[1];
        assert!(stealth.industry.is_none());
        assert!(stealth.total_laid_off.is_none());
        assert!(stealth.percentage_laid_off.is_none());
        assert!(stealth.date.is_none());
        assert!(stealth.funds_raised.is_none());
        assert_eq!(stealth.location, "SF Bay Area");
    }

    #[test]
    fn importer_keeps_calendar_date_of_offset_timestamps() {
        let csv = format!(
            "{HEADER}Amazon,Seattle,Retail,150,,2023-03-06T23:30:00-05:00,Post-IPO,United States,108\n"
        );
        let records = LayoffImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        let cleaned = crate::pipeline::clean(records);
        assert_eq!(
            cleaned.records()[0].date,
            NaiveDate::from_ymd_opt(2023, 3, 6)
        );
    }

    #[test]
    fn importer_reports_line_of_malformed_count() {
        let csv = format!(
            "{HEADER}A,NYC,Retail,10,0.1,2023-01-01,Seed,United States,5\n\
             B,NYC,Retail,many,0.1,2023-01-01,Seed,United States,5\n"
        );
        let error = LayoffImporter::from_reader(Cursor::new(csv)).expect_err("bad count");

        match error {
            LayoffImportError::InvalidField { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "total_laid_off");
                assert_eq!(value, "many");
            }
            other => panic!("expected invalid field, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_unknown_date_format() {
        let csv = format!("{HEADER}A,NYC,Retail,10,0.1,January,Seed,United States,5\n");
        let error = LayoffImporter::from_reader(Cursor::new(csv)).expect_err("bad date");
        assert!(matches!(error, LayoffImportError::InvalidDate { line: 2, .. }));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = LayoffImporter::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            LayoffImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
