//! Order statistics over ascending-sorted series.
//!
//! Callers sort first (see [`sort_ascending`]). `max`, `mean` and `median` return `None` for an
//! empty series; `percentile` returns `0.0`.

pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

pub fn max(sorted: &[f64]) -> Option<f64> {
    sorted.last().copied()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle element for odd lengths, mean of the two central elements for even lengths.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let len = sorted.len();
    if len == 0 {
        return None;
    }
    let mid = len / 2;
    if len % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Nearest-rank percentile: the element at `ceil(p / 100 * len) - 1`, clamped into bounds.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as i64 - 1;
    let index = rank.clamp(0, sorted.len() as i64 - 1) as usize;
    sorted[index]
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FeeStats {
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub p95: f64,
}

impl FeeStats {
    /// `None` for an empty series.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        Some(FeeStats {
            max: max(sorted)?,
            mean: mean(sorted)?,
            median: median(sorted)?,
            p95: percentile(sorted, 95.0),
        })
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ComputeUnitStats {
    pub max: u64,
    pub mean: f64,
    pub median: f64,
}

impl ComputeUnitStats {
    /// Zeroed when the series is empty.
    pub fn from_sorted(sorted: &[u64]) -> Self {
        let Some(&max) = sorted.last() else {
            return ComputeUnitStats::default();
        };
        let as_float = sorted.iter().map(|&cu| cu as f64).collect::<Vec<_>>();
        ComputeUnitStats {
            max,
            mean: mean(&as_float).unwrap_or_default(),
            median: median(&as_float).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn median_of_odd_length_is_middle_element() {
        assert_eq!(median(&[1.0, 3.0, 7.0, 8.0, 100.0]), Some(7.0));
        assert_eq!(median(&[42.0]), Some(42.0));
    }

    #[test]
    fn median_of_even_length_averages_central_pair() {
        assert_eq!(median(&[1.0, 2.0, 4.0, 10.0]), Some(3.0));
        assert_eq!(median(&[5.0, 6.0]), Some(5.5));
    }

    #[test]
    fn empty_series() {
        assert_eq!(max(&[]), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(percentile(&[], 95.0), 0.0);
        assert_eq!(FeeStats::from_sorted(&[]), None);
        assert_eq!(ComputeUnitStats::from_sorted(&[]), ComputeUnitStats::default());
    }

    #[test]
    fn percentile_uses_nearest_rank() {
        let sorted = (1..=20).map(f64::from).collect::<Vec<_>>();
        assert_eq!(percentile(&sorted, 50.0), 10.0);
        assert_eq!(percentile(&sorted, 100.0), 20.0);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 1.0), 1.0);
        assert_eq!(percentile(&sorted, 150.0), 20.0);
    }

    #[test]
    fn fee_stats_for_small_series() {
        let fees = [0.001, 0.002, 0.002, 0.01];
        let stats = FeeStats::from_sorted(&fees).unwrap();
        assert_eq!(stats.max, 0.01);
        assert!(approx_eq(stats.mean, 0.00375));
        assert!(approx_eq(stats.median, 0.002));
        // ceil(0.95 * 4) - 1 = 3
        assert_eq!(stats.p95, 0.01);
    }

    #[test]
    fn even_compute_median_can_be_fractional() {
        let stats = ComputeUnitStats::from_sorted(&[150, 300, 451, 1_000]);
        assert_eq!(stats.max, 1_000);
        assert_eq!(stats.median, 375.5);
        assert!(approx_eq(stats.mean, 475.25));
    }

    #[test]
    fn sort_handles_unordered_input() {
        let mut values = vec![0.5, 0.1, 0.3];
        sort_ascending(&mut values);
        assert_eq!(values, vec![0.1, 0.3, 0.5]);
    }
}
