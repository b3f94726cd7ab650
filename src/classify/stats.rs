//! Running font-size statistics for one document.

use crate::model::DEFAULT_FONT_SIZE;

/// Font statistics for adaptive heading thresholds.
///
/// Owned by exclusively one extraction run. Observations are only ever
/// appended, so the average seen by span *i* covers spans `1..=i`.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// All observed font sizes, in recording order
    sizes: Vec<f64>,
    /// Running sum of `sizes`
    total: f64,
    /// Largest observed size
    max: Option<f64>,
}

impl FontStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font size observation.
    pub fn record(&mut self, size: f64) {
        self.sizes.push(size);
        self.total += size;
        self.max = Some(match self.max {
            Some(max) if max >= size => max,
            _ => size,
        });
    }

    /// Mean of all recorded sizes, or 12 when nothing was recorded.
    pub fn average(&self) -> f64 {
        if self.sizes.is_empty() {
            DEFAULT_FONT_SIZE
        } else {
            self.total / self.sizes.len() as f64
        }
    }

    /// Largest recorded size, or `fallback` when nothing was recorded.
    pub fn maximum(&self, fallback: f64) -> f64 {
        self.max.unwrap_or(fallback)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Check if nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
