use super::super::domain::CleanedLayoffs;
use super::views::{ConsecutiveMonth, CumulativePoint, DualRank, IndustryYearChange};
use chrono::{Datelike, Months, NaiveDate};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Running total of per-date sums, oldest date first.
pub(crate) fn cumulative_trend(layoffs: &CleanedLayoffs) -> Vec<CumulativePoint> {
    let mut daily: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in layoffs.records() {
        if let Some(date) = record.date {
            *daily.entry(date).or_default() += record.total_laid_off;
        }
    }

    let mut cumulative_total = 0u64;
    daily
        .into_iter()
        .map(|(date, total_laid_off)| {
            cumulative_total = cumulative_total.saturating_add(total_laid_off);
            CumulativePoint {
                date,
                total_laid_off,
                cumulative_total,
            }
        })
        .collect()
}

/// Months in which a company laid people off right after another month with
/// layoffs. The previous month must be the calendar month directly before.
pub(crate) fn consecutive_months(layoffs: &CleanedLayoffs) -> Vec<ConsecutiveMonth> {
    let mut monthly: BTreeMap<(&str, NaiveDate), u64> = BTreeMap::new();
    for record in layoffs.records() {
        if let Some(month) = record.date.and_then(first_of_month) {
            *monthly.entry((record.company.as_str(), month)).or_default() +=
                record.total_laid_off;
        }
    }

    let mut rows = Vec::new();
    let mut previous: Option<((&str, NaiveDate), u64)> = None;
    for ((company, month), total_laid_off) in monthly {
        if let Some(((prev_company, prev_month), prev_total)) = previous {
            let follows = prev_month.checked_add_months(Months::new(1)) == Some(month);
            if prev_company == company && follows {
                rows.push(ConsecutiveMonth {
                    company: company.to_string(),
                    month: format_month(month),
                    total_laid_off,
                    prev_month: format_month(prev_month),
                    prev_total_laid_off: prev_total,
                });
            }
        }
        previous = Some(((company, month), total_laid_off));
    }

    rows
}

/// Per-industry yearly totals with the delta against the industry's previous
/// recorded year.
pub(crate) fn industry_year_over_year(layoffs: &CleanedLayoffs) -> Vec<IndustryYearChange> {
    let mut yearly: BTreeMap<(Option<&str>, i32), u64> = BTreeMap::new();
    for record in layoffs.records() {
        if let Some(date) = record.date {
            *yearly
                .entry((record.industry.as_deref(), date.year()))
                .or_default() += record.total_laid_off;
        }
    }

    let mut rows: Vec<IndustryYearChange> = Vec::with_capacity(yearly.len());
    let mut previous: Option<(Option<&str>, u64)> = None;
    for ((industry, year), total_laid_off) in yearly {
        let previous_total = match previous {
            Some((prev_industry, prev_total)) if prev_industry == industry => Some(prev_total),
            _ => None,
        };
        rows.push(IndustryYearChange {
            industry: industry.map(str::to_string),
            year,
            total_laid_off,
            previous_total,
            change: previous_total.map(|prev| signed_change(total_laid_off, prev)),
        });
        previous = Some((industry, total_laid_off));
    }

    rows
}

/// Ranks every record by percentage laid off and separately by funds raised,
/// both descending. Unknown funding ranks last.
pub(crate) fn dual_ranking(layoffs: &CleanedLayoffs) -> Vec<DualRank> {
    let records = layoffs.records();
    let layoff_ranks = competition_ranks(records, |a, b| {
        b.percentage_laid_off.total_cmp(&a.percentage_laid_off)
    });
    let funding_ranks = competition_ranks(records, |a, b| {
        descending_known_first(a.funds_raised, b.funds_raised)
    });

    let mut rows: Vec<DualRank> = records
        .iter()
        .zip(layoff_ranks.into_iter().zip(funding_ranks))
        .map(|(record, (layoff_rank, funding_rank))| DualRank {
            company: record.company.clone(),
            total_laid_off: record.total_laid_off,
            percentage_laid_off: record.percentage_laid_off,
            funds_raised: record.funds_raised,
            layoff_rank,
            funding_rank,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.layoff_rank
            .cmp(&b.layoff_rank)
            .then_with(|| a.funding_rank.cmp(&b.funding_rank))
            .then_with(|| a.company.cmp(&b.company))
    });
    rows
}

/// Standard competition ranking ("1224"): ties share a rank and the next
/// distinct value skips by the size of the tie. Returned in input order.
pub(crate) fn competition_ranks<T, F>(items: &[T], compare: F) -> Vec<usize>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| compare(&items[a], &items[b]));

    let mut ranks = vec![0; items.len()];
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = match position.checked_sub(1).map(|prev| order[prev]) {
            Some(prev) if compare(&items[prev], &items[index]) == Ordering::Equal => ranks[prev],
            _ => position + 1,
        };
    }
    ranks
}

/// Year-over-year delta, saturating at the `i64` bounds.
fn signed_change(current: u64, previous: u64) -> i64 {
    if current >= previous {
        i64::try_from(current - previous).unwrap_or(i64::MAX)
    } else {
        i64::try_from(previous - current).map_or(i64::MIN, |drop| -drop)
    }
}

fn descending_known_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

fn format_month(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}
