// src/data_analysis/histogram.rs

use crate::constants::EXTENT_MAX_DEG;

/// Evenly spaced values in `[start, stop)`: `ceil((stop - start) / step)` elements.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !start.is_finite() || !stop.is_finite() || stop <= start {
        return Vec::new();
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Counts `values` into the bins defined by ascending `edges`.
///
/// Bins are half-open except the last, which also includes its right edge.
/// Values outside `[edges[0], edges[last]]` are ignored.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<u64> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let nbins = edges.len() - 1;
    let (lo, hi) = (edges[0], edges[nbins]);
    let mut counts = vec![0u64; nbins];

    for &v in values {
        if !(v >= lo && v <= hi) {
            continue;
        }
        let idx = if v == hi {
            nbins - 1
        } else {
            edges.partition_point(|&e| e <= v).saturating_sub(1).min(nbins - 1)
        };
        counts[idx] += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtentHistogram {
    pub edges: Vec<f64>,
    pub centres: Vec<f64>,
    /// Percentage of all days falling in each bin (running sum if cumulative).
    pub percent: Vec<f64>,
    pub cumulative: bool,
}

/// Extent histogram as a percentage of total days, with bins centred on `0, w, 2w, ..., 360`.
pub fn extent_histogram(extents: &[f64], bin_width: f64, cumulative: bool) -> ExtentHistogram {
    let edges = arange(-(bin_width / 2.0), EXTENT_MAX_DEG + bin_width, bin_width);
    let centres = arange(0.0, EXTENT_MAX_DEG + bin_width, bin_width);
    let mut counts = histogram(extents, &edges);

    if cumulative {
        let mut running = 0;
        for c in counts.iter_mut() {
            running += *c;
            *c = running;
        }
    }

    let total = extents.len();
    let percent = counts
        .iter()
        .map(|&c| {
            if total == 0 {
                0.0
            } else {
                c as f64 / total as f64 * 100.0
            }
        })
        .collect();

    ExtentHistogram {
        edges,
        centres,
        percent,
        cumulative,
    }
}

/// Event count per whole-day duration, for durations `1..=max`.
pub fn duration_histogram(durations: &[u32]) -> Vec<(u32, u64)> {
    let max = durations.iter().copied().max().unwrap_or(0);
    let mut counts = vec![0u64; max as usize];
    for &d in durations {
        if d >= 1 {
            counts[(d - 1) as usize] += 1;
        }
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (i as u32 + 1, c))
        .collect()
}

/// Centred running mean that wraps around both ends of `data`.
///
/// Suited to data on a circle (e.g. longitude phase). For an even window the
/// extra element sits on the left, matching a right-labelled window shifted
/// by `(window - 1) / 2`.
pub fn running_mean(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len() as isize;
    if n == 0 {
        return Vec::new();
    }
    let window = window.max(1) as isize;
    let offset = (window - 1) / 2;

    (0..n)
        .map(|i| {
            let sum: f64 = (offset - window + 1..=offset)
                .map(|k| data[(i + k).rem_euclid(n) as usize])
                .sum();
            sum / window as f64
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseHistogram {
    pub bin_centers: Vec<f64>,
    pub counts: Vec<u64>,
    pub smoothed: Vec<f64>,
}

impl PhaseHistogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Bins phase values at resolution `phase_res` (bins centred on min, min+res, ..., max)
/// and smooths the counts with a circular running mean.
pub fn phase_histogram(phase_data: &[f64], smoothing_window: usize, phase_res: f64) -> PhaseHistogram {
    let finite: Vec<f64> = phase_data.iter().copied().filter(|v| v.is_finite()).collect();
    let (min, max) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if finite.is_empty() || !(phase_res > 0.0) {
        return PhaseHistogram {
            bin_centers: Vec::new(),
            counts: Vec::new(),
            smoothed: Vec::new(),
        };
    }

    let edges = arange(min - phase_res / 2.0, max + phase_res + phase_res / 2.0, phase_res);
    let counts = histogram(&finite, &edges);
    let bin_centers = edges
        .windows(2)
        .map(|w| (w[0] + w[1]) / 2.0)
        .collect();
    let as_f64: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
    let smoothed = running_mean(&as_f64, smoothing_window);

    PhaseHistogram {
        bin_centers,
        counts,
        smoothed,
    }
}
