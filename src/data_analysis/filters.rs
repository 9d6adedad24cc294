// src/data_analysis/filters.rs

use chrono::{Datelike, NaiveDate};

use crate::season::Season;

/// Boolean row selector built from an optional season and inclusive start/end dates.
///
/// Selections combine with a logical AND, so a row must satisfy every bound given.
pub fn datetime_selector(
    dates: &[NaiveDate],
    season: Option<Season>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<bool> {
    dates
        .iter()
        .map(|date| {
            season.map_or(true, |s| s.contains(date.month()))
                && start.map_or(true, |s| *date >= s)
                && end.map_or(true, |e| *date <= e)
        })
        .collect()
}

/// Selects values inside the inclusive `[min, max]` range.
pub fn value_range_selector(values: &[f64], min: f64, max: f64) -> Vec<bool> {
    values.iter().map(|&v| v >= min && v <= max).collect()
}

/// Element-wise AND of two selectors of equal length.
pub fn combine(a: &[bool], b: &[bool]) -> Vec<bool> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(&x, &y)| x && y).collect()
}

/// Copies out the items whose mask entry is true.
pub fn apply_mask<T: Clone>(items: &[T], mask: &[bool]) -> Vec<T> {
    items
        .iter()
        .zip(mask)
        .filter(|(_, &keep)| keep)
        .map(|(item, _)| item.clone())
        .collect()
}
