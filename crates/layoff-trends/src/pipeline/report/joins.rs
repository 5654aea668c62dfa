use super::super::domain::{CleanedLayoff, CleanedLayoffs};
use super::views::{FundingCorrelation, LocationPair};
use std::collections::{BTreeMap, BTreeSet};

fn group_by_company(layoffs: &CleanedLayoffs) -> BTreeMap<&str, Vec<&CleanedLayoff>> {
    let mut groups: BTreeMap<&str, Vec<&CleanedLayoff>> = BTreeMap::new();
    for record in layoffs.records() {
        groups
            .entry(record.company.as_str())
            .or_default()
            .push(record);
    }
    groups
}

/// Pairs each funding row of a company with that company's layoff rows on
/// other dates and measures the days in between.
pub(crate) fn funding_correlation(
    layoffs: &CleanedLayoffs,
    limit: usize,
) -> Vec<FundingCorrelation> {
    let mut rows = Vec::new();

    for (company, group) in group_by_company(layoffs) {
        for funding in &group {
            let (Some(funds_raised), Some(funding_date)) = (funding.funds_raised, funding.date)
            else {
                continue;
            };

            for layoff in &group {
                let Some(layoff_date) = layoff.date else {
                    continue;
                };
                if layoff_date == funding_date {
                    continue;
                }

                rows.push(FundingCorrelation {
                    company: company.to_string(),
                    funding_date,
                    funds_raised,
                    layoff_date,
                    total_laid_off: layoff.total_laid_off,
                    days_difference: (layoff_date - funding_date).num_days(),
                });
            }
        }
    }

    rows.sort_by(|a, b| {
        a.company
            .cmp(&b.company)
            .then_with(|| a.days_difference.cmp(&b.days_difference))
            .then_with(|| a.funding_date.cmp(&b.funding_date))
    });
    rows.truncate(limit);
    rows
}

/// Distinct ordered pairs of differing locations recorded for one company.
pub(crate) fn multi_location(layoffs: &CleanedLayoffs) -> Vec<LocationPair> {
    let mut pairs: BTreeSet<LocationPair> = BTreeSet::new();

    for group in group_by_company(layoffs).into_values() {
        let locations: BTreeSet<&str> = group
            .iter()
            .map(|record| record.location.as_str())
            .collect();

        for location in &locations {
            for other in &locations {
                if location != other {
                    pairs.insert(LocationPair {
                        location: location.to_string(),
                        other_location: other.to_string(),
                    });
                }
            }
        }
    }

    pairs.into_iter().collect()
}
