// src/data_analysis/seasonal.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::data_analysis::date_binning::MonthYears;
use crate::error::{AnalysisError, Result};
use crate::season::Season;

/// Per-season (year, total) series, years ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonalValues {
    pub values: BTreeMap<Season, Vec<(i32, u64)>>,
}

impl SeasonalValues {
    pub fn years(&self, season: Season) -> Vec<i32> {
        self.values
            .get(&season)
            .map(|v| v.iter().map(|(y, _)| *y).collect())
            .unwrap_or_default()
    }

    pub fn totals(&self, season: Season) -> Vec<u64> {
        self.values
            .get(&season)
            .map(|v| v.iter().map(|(_, t)| *t).collect())
            .unwrap_or_default()
    }
}

/// Years common to every listed month, ascending.
pub fn get_intersection(month_years: &MonthYears, months: &[u32]) -> Vec<i32> {
    let mut months_iter = months.iter();
    let Some(base) = months_iter.next() else {
        return Vec::new();
    };
    let mut result: BTreeSet<i32> = month_years
        .get(base)
        .map(|years| years.iter().copied().collect())
        .unwrap_or_default();
    for month in months_iter {
        let years: BTreeSet<i32> = month_years
            .get(month)
            .map(|years| years.iter().copied().collect())
            .unwrap_or_default();
        result = result.intersection(&years).copied().collect();
    }
    result.into_iter().collect()
}

/// Combines per-month values into the four seasons and the annual total.
///
/// `monthly_values[m][i]` is the count of calendar month `m` in year
/// `month_years[m][i]`. Only years present in every month of a season are
/// summed, so no season total is built from a partial season.
pub fn calc_seasonal_values(
    monthly_values: &BTreeMap<u32, Vec<u64>>,
    month_years: &MonthYears,
) -> SeasonalValues {
    let mut values = BTreeMap::new();

    for season in Season::FOUR.into_iter().chain(std::iter::once(Season::Annual)) {
        let months = season.months();
        let years = get_intersection(month_years, months);

        let series: Vec<(i32, u64)> = years
            .into_iter()
            .map(|year| {
                let total = months
                    .iter()
                    .map(|month| {
                        let index = month_years
                            .get(month)
                            .and_then(|ys| ys.iter().position(|&y| y == year));
                        index
                            .and_then(|i| monthly_values.get(month).and_then(|v| v.get(i)))
                            .copied()
                            .unwrap_or(0)
                    })
                    .sum();
                (year, total)
            })
            .collect();
        values.insert(season, series);
    }

    SeasonalValues { values }
}

/// Seasonal line plots need every calendar month to cover more than one year.
pub fn check_sufficient_years(month_years: &MonthYears) -> Result<()> {
    for month in 1..=12u32 {
        let years = month_years.get(&month).map_or(0, Vec::len);
        if years <= 1 {
            return Err(AnalysisError::InsufficientYears { month, years });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::date_binning::{bin_dates, crop_dates};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_intersection_across_months() {
        let mut month_years = MonthYears::new();
        month_years.insert(12, vec![1979, 1980]);
        month_years.insert(1, vec![1980, 1981]);
        month_years.insert(2, vec![1980, 1981]);
        assert_eq!(get_intersection(&month_years, &[12, 1, 2]), vec![1980]);
        assert!(get_intersection(&month_years, &[]).is_empty());
    }

    #[test]
    fn test_partial_seasons_are_excluded() {
        // March 1979 to November 1981: DJF only complete (same-year label) for 1980 and 1981
        let range = crop_dates(d(1979, 3, 1), d(1981, 11, 30)).unwrap();
        let bins = bin_dates(&[], range.start_month(), range.end_month());
        let seasonal = calc_seasonal_values(&bins.monthly_values, &range.month_years);
        assert_eq!(seasonal.years(Season::Djf), vec![1980]);
        assert_eq!(seasonal.years(Season::Mam), vec![1979, 1980, 1981]);
        assert_eq!(seasonal.years(Season::Annual), vec![1980]);
    }

    #[test]
    fn test_season_total_is_sum_of_constituent_months() {
        let range = crop_dates(d(1979, 1, 1), d(1981, 12, 31)).unwrap();
        let dates: Vec<NaiveDate> = d(1979, 1, 1)
            .iter_days()
            .take_while(|day| *day <= d(1981, 12, 31))
            .enumerate()
            .filter(|(i, _)| i % 7 == 0 || i % 11 == 0)
            .map(|(_, day)| day)
            .collect();
        let bins = bin_dates(&dates, range.start_month(), range.end_month());
        let seasonal = calc_seasonal_values(&bins.monthly_values, &range.month_years);

        for season in Season::FOUR {
            for (year, total) in &seasonal.values[&season] {
                let expected: u64 = season
                    .months()
                    .iter()
                    .map(|&m| {
                        bins.histogram[&crate::data_analysis::date_binning::YearMonth::new(*year, m)]
                    })
                    .sum();
                assert_eq!(*total, expected, "{season} {year}");
            }
        }
        let annual: u64 = seasonal.totals(Season::Annual).iter().sum();
        assert_eq!(annual as usize, dates.len());
    }

    #[test]
    fn test_check_sufficient_years() {
        let short = crop_dates(d(1979, 1, 1), d(1980, 6, 30)).unwrap();
        match check_sufficient_years(&short.month_years) {
            Err(AnalysisError::InsufficientYears { month, years }) => {
                assert_eq!((month, years), (7, 1));
            }
            other => panic!("expected InsufficientYears, got {other:?}"),
        }
        let long = crop_dates(d(1979, 1, 1), d(1980, 12, 31)).unwrap();
        assert!(check_sufficient_years(&long.month_years).is_ok());
    }
}
