//! Horizon tiling and smoothing of per-step profiles.

/// Repeats (or truncates) a one-day template to exactly `horizon` steps.
///
/// An empty template yields an all-zero profile.
pub fn tile(template: &[f64], horizon: usize) -> Vec<f64> {
    if template.is_empty() {
        return vec![0.0; horizon];
    }
    template.iter().copied().cycle().take(horizon).collect()
}

/// Centered moving-average filter used to derive the PV ramp target.
///
/// For a window of `w` samples the average at index `i` covers
/// `[i - (w - 1 - o), i + o]` with `o = (w - 1) / 2`. Near the sequence edges
/// the window is truncated to the samples that exist, never padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothingFilter {
    /// Window length in samples; `<= 1` disables smoothing.
    pub window: usize,
}

impl SmoothingFilter {
    /// Creates a filter with a window of `window` samples.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Returns the smoothed copy of `raw`.
    pub fn apply(&self, raw: &[f64]) -> Vec<f64> {
        if self.window <= 1 || raw.is_empty() {
            return raw.to_vec();
        }

        let ahead = (self.window - 1) / 2;
        let behind = self.window - 1 - ahead;

        (0..raw.len())
            .map(|i| {
                let start = i.saturating_sub(behind);
                let end = (i + ahead + 1).min(raw.len());
                let window = &raw[start..end];
                window.iter().sum::<f64>() / window.len() as f64
            })
            .collect()
    }
}
