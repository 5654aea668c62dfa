use super::super::domain::{CleanedLayoff, CleanedLayoffs};
use super::views::{
    CompanyTotal, CountryTotal, DatasetOverview, FundingImpact, IndustryTotal, MonthlyTotal,
    PercentageLayoff, StageTotal,
};
use std::collections::{BTreeMap, HashSet};

/// Sums `total_laid_off` per key, largest sum first. Equal sums fall back to
/// key order so output is independent of input order.
pub(crate) fn sum_by<K, F>(records: &[CleanedLayoff], key: F) -> Vec<(K, u64)>
where
    K: Ord,
    F: Fn(&CleanedLayoff) -> K,
{
    let mut sums: BTreeMap<K, u64> = BTreeMap::new();
    for record in records {
        *sums.entry(key(record)).or_default() += record.total_laid_off;
    }

    let mut rows: Vec<(K, u64)> = sums.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

pub(crate) fn by_company(layoffs: &CleanedLayoffs) -> Vec<CompanyTotal> {
    sum_by(layoffs.records(), |record| record.company.clone())
        .into_iter()
        .map(|(company, total_laid_off)| CompanyTotal {
            company,
            total_laid_off,
        })
        .collect()
}

pub(crate) fn by_industry(layoffs: &CleanedLayoffs) -> Vec<IndustryTotal> {
    sum_by(layoffs.records(), |record| record.industry.clone())
        .into_iter()
        .map(|(industry, total_laid_off)| IndustryTotal {
            industry,
            total_laid_off,
        })
        .collect()
}

pub(crate) fn by_country(layoffs: &CleanedLayoffs) -> Vec<CountryTotal> {
    sum_by(layoffs.records(), |record| record.country.clone())
        .into_iter()
        .map(|(country, total_laid_off)| CountryTotal {
            country,
            total_laid_off,
        })
        .collect()
}

pub(crate) fn by_stage(layoffs: &CleanedLayoffs) -> Vec<StageTotal> {
    sum_by(layoffs.records(), |record| record.stage.clone())
        .into_iter()
        .map(|(stage, total_laid_off)| StageTotal {
            stage,
            total_laid_off,
        })
        .collect()
}

/// Newest month first. Undated rows have no month and are skipped.
pub(crate) fn monthly_trend(layoffs: &CleanedLayoffs, limit: usize) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<String, u64> = BTreeMap::new();
    for record in layoffs.records() {
        if let Some(month) = record.month() {
            *months.entry(month).or_default() += record.total_laid_off;
        }
    }

    months
        .into_iter()
        .rev()
        .take(limit)
        .map(|(month, total_laid_off)| MonthlyTotal {
            month,
            total_laid_off,
        })
        .collect()
}

pub(crate) fn top_percentage(layoffs: &CleanedLayoffs, limit: usize) -> Vec<PercentageLayoff> {
    let mut rows: Vec<&CleanedLayoff> = layoffs
        .records()
        .iter()
        .filter(|record| !record.percentage_laid_off.is_nan())
        .collect();
    rows.sort_by(|a, b| {
        b.percentage_laid_off
            .total_cmp(&a.percentage_laid_off)
            .then_with(|| a.company.cmp(&b.company))
            .then_with(|| a.date.cmp(&b.date))
    });

    rows.into_iter()
        .take(limit)
        .map(|record| PercentageLayoff {
            company: record.company.clone(),
            location: record.location.clone(),
            percentage_laid_off: record.percentage_laid_off,
            total_laid_off: record.total_laid_off,
            date: record.date,
        })
        .collect()
}

pub(crate) fn funding_impact(layoffs: &CleanedLayoffs) -> Vec<FundingImpact> {
    let mut rows: Vec<FundingImpact> = layoffs
        .records()
        .iter()
        .filter_map(|record| {
            record.funds_raised.map(|funds_raised| FundingImpact {
                company: record.company.clone(),
                funds_raised,
                total_laid_off: record.total_laid_off,
                percentage_laid_off: record.percentage_laid_off,
                date: record.date,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        b.funds_raised
            .total_cmp(&a.funds_raised)
            .then_with(|| a.company.cmp(&b.company))
            .then_with(|| a.date.cmp(&b.date))
    });
    rows
}

pub(crate) fn overview(layoffs: &CleanedLayoffs) -> DatasetOverview {
    let records = layoffs.records();
    let companies = records
        .iter()
        .map(|record| record.company.as_str())
        .collect::<HashSet<_>>()
        .len();

    DatasetOverview {
        records: records.len(),
        companies,
        total_laid_off: layoffs.total_laid_off(),
        first_date: records.iter().filter_map(|record| record.date).min(),
        last_date: records.iter().filter_map(|record| record.date).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::cleaning::clean;
    use crate::pipeline::domain::LayoffRecord;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn sample() -> CleanedLayoffs {
        clean(vec![
            LayoffRecord::new("Amazon")
                .with_industry("Retail")
                .with_country("United States")
                .with_total_laid_off(8_000)
                .with_date(date(2023, 1, 4))
                .with_funds_raised(108.0),
            LayoffRecord::new("Amazon")
                .with_industry("retail")
                .with_country("United States")
                .with_total_laid_off(10_000)
                .with_date(date(2022, 11, 16)),
            LayoffRecord::new("Booking")
                .with_industry("Travel")
                .with_country("Netherlands")
                .with_total_laid_off(4_375)
                .with_percentage_laid_off(0.25)
                .with_date(date(2023, 1, 20))
                .with_funds_raised(0.0),
            LayoffRecord::new("Katerra")
                .with_industry("Construction")
                .with_country("United States")
                .with_percentage_laid_off(1.0)
                .with_stage("Unknown"),
        ])
    }

    #[test]
    fn company_totals_are_sorted_by_sum() {
        let rows = by_company(&sample());
        assert_eq!(rows[0].company, "Amazon");
        assert_eq!(rows[0].total_laid_off, 18_000);
        assert_eq!(rows[1].company, "Booking");
        assert_eq!(rows[2].total_laid_off, 0);
    }

    #[test]
    fn industry_groups_merge_after_lowercasing() {
        let rows = by_industry(&sample());
        assert_eq!(rows[0].industry.as_deref(), Some("retail"));
        assert_eq!(rows[0].total_laid_off, 18_000);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn stage_groups_keep_missing_stage_as_its_own_group() {
        let rows = by_stage(&sample());
        assert_eq!(rows[0].stage, None);
        assert_eq!(rows[0].total_laid_off, 22_375);
        assert_eq!(rows[1].stage.as_deref(), Some("Unknown"));
    }

    #[test]
    fn monthly_trend_is_newest_first_and_capped() {
        let rows = monthly_trend(&sample(), 100);
        let months: Vec<&str> = rows.iter().map(|row| row.month.as_str()).collect();
        assert_eq!(months, vec!["2023-01", "2022-11"]);
        assert_eq!(rows[0].total_laid_off, 12_375);

        assert_eq!(monthly_trend(&sample(), 1).len(), 1);
    }

    #[test]
    fn top_percentage_orders_by_share_of_workforce() {
        let rows = top_percentage(&sample(), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].company, "Katerra");
        assert_eq!(rows[1].company, "Booking");
    }

    #[test]
    fn funding_impact_skips_unknown_funding() {
        let rows = funding_impact(&sample());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].funds_raised, 108.0);
        assert_eq!(rows[1].company, "Booking");
    }

    #[test]
    fn overview_counts_distinct_companies_and_date_range() {
        let overview = overview(&sample());
        assert_eq!(overview.records, 4);
        assert_eq!(overview.companies, 3);
        assert_eq!(overview.total_laid_off, 22_375);
        assert_eq!(overview.first_date, Some(date(2022, 11, 16)));
        assert_eq!(overview.last_date, Some(date(2023, 1, 20)));
    }
}
