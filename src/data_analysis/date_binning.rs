// src/data_analysis/date_binning.rs

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AnalysisError, Result};

/// Calendar month -> years in which that month is covered, ascending.
pub type MonthYears = BTreeMap<u32, Vec<i32>>;

/// A calendar month of a specific year. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        YearMonth { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            YearMonth::new(self.year + 1, 1)
        } else {
            YearMonth::new(self.year, self.month + 1)
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            YearMonth::new(self.year - 1, 12)
        } else {
            YearMonth::new(self.year, self.month - 1)
        }
    }

    pub fn first_day(self) -> NaiveDate {
        // Month is always 1..=12 and day 1 exists in every month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or(NaiveDate::MAX)
    }

    pub fn num_days(self) -> u32 {
        self.last_day().day()
    }

    /// Every month from `self` to `end`, both inclusive.
    pub fn months_through(self, end: YearMonth) -> impl Iterator<Item = YearMonth> {
        std::iter::successors(Some(self), move |m| {
            let next = m.next();
            (next <= end).then_some(next)
        })
        .take_while(move |m| *m <= end)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of leap years in `[y1, y2)`.
pub fn leap_days(y1: i32, y2: i32) -> u32 {
    (y1..y2).filter(|&y| is_leap_year(y)).count() as u32
}

/// Days in `month` of a non-leap year.
pub fn common_year_month_days(month: u32) -> u32 {
    YearMonth::new(2001, month).num_days()
}

/// A date range cropped to complete calendar months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub month_years: MonthYears,
}

impl CroppedRange {
    pub fn start_month(&self) -> YearMonth {
        YearMonth::from_date(self.start)
    }

    pub fn end_month(&self) -> YearMonth {
        YearMonth::from_date(self.end)
    }
}

/// Adjusts a start and end date so the range only includes complete months.
///
/// A start that is not the 1st moves to the 1st of the following month; an end
/// that is not the last day of its month moves to the last day of the previous
/// month. Cropping an already-cropped range returns it unchanged.
pub fn crop_dates(start_date: NaiveDate, end_date: NaiveDate) -> Result<CroppedRange> {
    let mut start_month = YearMonth::from_date(start_date);
    if start_date.day() != 1 {
        start_month = start_month.next();
    }

    let mut end_month = YearMonth::from_date(end_date);
    if end_date != end_month.last_day() {
        end_month = end_month.prev();
    }

    if start_month > end_month {
        return Err(AnalysisError::NoCompleteMonth {
            start: start_date.to_string(),
            end: end_date.to_string(),
        });
    }

    let mut month_years: MonthYears = (1..=12).map(|m| (m, Vec::new())).collect();
    for ym in start_month.months_through(end_month) {
        if let Some(years) = month_years.get_mut(&ym.month) {
            years.push(ym.year);
        }
    }

    Ok(CroppedRange {
        start: start_month.first_day(),
        end: end_month.last_day(),
        month_years,
    })
}

/// Year/month bounds of complete data for a date-ordered list of dates.
///
/// Incomplete start or end months are not included.
pub fn get_date_bounds(dates: &[NaiveDate]) -> Result<CroppedRange> {
    match (dates.first(), dates.last()) {
        (Some(&first), Some(&last)) => crop_dates(first, last),
        _ => Err(AnalysisError::EmptySelection),
    }
}

/// Monthly histogram of a date list and its per-calendar-month partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyBins {
    /// Count per (year, month) across the whole span, including empty months.
    pub histogram: BTreeMap<YearMonth, u64>,
    /// Calendar month (1..=12) -> sum over all years.
    pub monthly_totals: BTreeMap<u32, u64>,
    /// Calendar month (1..=12) -> per-year counts in chronological order.
    pub monthly_values: BTreeMap<u32, Vec<u64>>,
}

/// Counts dates per calendar month between `start` and `end` (inclusive months).
///
/// Bins are half-open `[1st of month, 1st of next month)`; dates outside the
/// span are ignored.
pub fn bin_dates(dates: &[NaiveDate], start: YearMonth, end: YearMonth) -> MonthlyBins {
    let mut histogram: BTreeMap<YearMonth, u64> =
        start.months_through(end).map(|ym| (ym, 0)).collect();

    for &date in dates {
        if let Some(count) = histogram.get_mut(&YearMonth::from_date(date)) {
            *count += 1;
        }
    }

    let mut monthly_totals: BTreeMap<u32, u64> = (1..=12).map(|m| (m, 0)).collect();
    let mut monthly_values: BTreeMap<u32, Vec<u64>> = (1..=12).map(|m| (m, Vec::new())).collect();
    for (ym, &count) in &histogram {
        *monthly_totals.entry(ym.month).or_insert(0) += count;
        monthly_values.entry(ym.month).or_default().push(count);
    }

    MonthlyBins {
        histogram,
        monthly_totals,
        monthly_values,
    }
}

/// Percentage of days in each calendar month (index 0 = January) that hold an event.
///
/// The denominator is the month length times the number of years covered, with
/// one extra day for every leap-year February in the range. Months with no
/// coverage report 0.
///
/// The final covered February counts its leap day too. Output therefore differs
/// from the exclusive-end-year count whenever the range ends in a leap year:
/// Jan 1979 to Dec 1980 with all of Feb 1980 selected gives 29/57 (50.88%),
/// not 29/56 (51.79%).
pub fn monthly_percentages(bins: &MonthlyBins, range: &CroppedRange) -> [f64; 12] {
    let mut pct = [0.0; 12];
    for month in 1..=12u32 {
        let years = range
            .month_years
            .get(&month)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let mut ndays = common_year_month_days(month) * years.len() as u32;
        if month == 2 {
            if let (Some(&first), Some(&last)) = (years.first(), years.last()) {
                ndays += leap_days(first, last + 1);
            }
        }
        if ndays > 0 {
            let total = bins.monthly_totals.get(&month).copied().unwrap_or(0);
            pct[(month - 1) as usize] = total as f64 / ndays as f64 * 100.0;
        }
    }
    pct
}
