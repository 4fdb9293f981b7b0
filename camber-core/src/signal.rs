/// A single-pole infinite impulse response low-pass filter.
///
/// Each update blends the incoming sample into the retained state:
/// `state = smoothing * sample + (1 - smoothing) * state`. Smaller smoothing
/// factors track the input more slowly, leaving only its low-frequency
/// content.
///
/// The state starts at zero and persists until [`reset`](Self::reset) is
/// called, so one filter instance carries its history across an entire
/// simulated run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    smoothing: f64,
    state: f64,
}

impl LowPassFilter {
    /// Creates a filter with the given smoothing factor and zero state.
    #[must_use]
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing,
            state: 0.0,
        }
    }

    /// Feeds one sample into the filter and returns the updated state.
    pub fn update(&mut self, sample: f64) -> f64 {
        self.state = self.smoothing * sample + (1.0 - self.smoothing) * self.state;
        self.state
    }

    /// The current filter state.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.state
    }

    /// Clears the filter state back to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
