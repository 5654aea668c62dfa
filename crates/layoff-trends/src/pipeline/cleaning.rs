use super::domain::{CleanedLayoff, CleanedLayoffs, LayoffRecord};
use super::import::unsigned_zero;
use tracing::debug;

/// Fills missing layoff counts with zero, drops the time component of dates
/// and lower-cases industries. Re-cleaning cleaned data is a no-op.
pub fn clean(records: Vec<LayoffRecord>) -> CleanedLayoffs {
    let mut defaulted_totals = 0usize;
    let mut defaulted_percentages = 0usize;

    let cleaned = records
        .into_iter()
        .map(|record| {
            if record.total_laid_off.is_none() {
                defaulted_totals += 1;
            }
            if record.percentage_laid_off.is_none() {
                defaulted_percentages += 1;
            }
            clean_record(record)
        })
        .collect::<Vec<_>>();

    debug!(
        records = cleaned.len(),
        defaulted_totals, defaulted_percentages, "cleaned layoff records"
    );

    CleanedLayoffs::new(cleaned)
}

fn clean_record(record: LayoffRecord) -> CleanedLayoff {
    CleanedLayoff {
        company: record.company,
        location: record.location,
        industry: record.industry.map(|industry| industry.to_lowercase()),
        total_laid_off: record.total_laid_off.unwrap_or(0),
        percentage_laid_off: record.percentage_laid_off.map_or(0.0, unsigned_zero),
        date: record.date.map(|timestamp| timestamp.date()),
        stage: record.stage,
        country: record.country,
        funds_raised: record.funds_raised.map(unsigned_zero),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw_records() -> Vec<LayoffRecord> {
        let timestamp = NaiveDate::from_ymd_opt(2023, 1, 18)
            .unwrap()
            .and_hms_opt(14, 45, 0)
            .unwrap();
        vec![
            LayoffRecord::new("Microsoft")
                .with_industry("Other")
                .with_total_laid_off(10_000)
                .with_timestamp(timestamp),
            LayoffRecord::new("Stealth").with_industry("CRYPTO"),
        ]
    }

    #[test]
    fn clean_defaults_missing_counts_to_zero() {
        let cleaned = clean(raw_records());
        let stealth = &cleaned.records()[1];
        assert_eq!(stealth.total_laid_off, 0);
        assert_eq!(stealth.percentage_laid_off, 0.0);
        assert!(stealth.date.is_none());
    }

    #[test]
    fn clean_lowercases_industry_and_truncates_time() {
        let cleaned = clean(raw_records());
        let microsoft = &cleaned.records()[0];
        assert_eq!(microsoft.industry.as_deref(), Some("other"));
        assert_eq!(microsoft.date, NaiveDate::from_ymd_opt(2023, 1, 18));
        assert_eq!(cleaned.records()[1].industry.as_deref(), Some("crypto"));
    }

    #[test]
    fn clean_is_idempotent() {
        let once = clean(raw_records());
        let twice = clean(
            once.clone()
                .into_records()
                .into_iter()
                .map(LayoffRecord::from)
                .collect(),
        );
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_unsigns_negative_zero() {
        let cleaned = clean(vec![LayoffRecord::new("Stealth")
            .with_percentage_laid_off(-0.0)
            .with_funds_raised(-0.0)]);
        let record = &cleaned.records()[0];
        assert!(record.percentage_laid_off.is_sign_positive());
        assert!(record.funds_raised.is_some_and(f64::is_sign_positive));
    }

    #[test]
    fn clean_never_drops_rows() {
        assert_eq!(clean(raw_records()).len(), 2);
        assert!(clean(Vec::new()).is_empty());
    }
}
