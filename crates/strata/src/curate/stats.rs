//! Column statistics used by the curation stages.

use std::cmp::Ordering;

/// Running mean and population variance (Welford's algorithm).
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate every value of a slice.
    pub fn from_values(values: &[f64]) -> Self {
        let mut stats = Self::new();
        for &v in values {
            stats.add(v);
        }
        stats
    }

    /// Add one value.
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (divides by n).
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Population standard deviation.
    pub fn std(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard score of a value; 0 when the spread is zero.
    pub fn z_score(&self, value: f64) -> f64 {
        let std = self.std();
        if std == 0.0 {
            0.0
        } else {
            (value - self.mean) / std
        }
    }
}

/// Exact median, averaging the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Number of distinct values, NaN excluded.
pub fn distinct_count(values: &[f64]) -> usize {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted.dedup();
    sorted.len()
}
