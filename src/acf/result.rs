use crate::acf::peak::{apex_height, LagPeak};
use crate::common::F32ArrayExt;

fn validate_window_size(window_size: usize) {
    if window_size < 4 {
        panic!("Window size must be at least 4");
    }
    if !window_size.is_power_of_two() {
        panic!("Window size must be a power of two, got {}", window_size);
    }
}

/// A pitch estimation result.
///
/// Holds the analysed window and the intermediate similarity scores so that
/// a result can be inspected or visualized after [`compute`](AcfResult::compute).
pub struct AcfResult {
    /// The estimated pitch frequency in Hz. Only meaningful if [`is_voiced`](AcfResult::is_voiced)
    /// returns true.
    pub frequency: f32,
    /// The score at the selected lag. Between 0 and 1 for signals within [-1, 1].
    pub clarity: f32,
    /// The estimated pitch period in samples.
    pub period: f32,
    /// The analyzed window.
    pub window: Vec<f32>,
    /// `scores[k] = 1 - mean(|x[i] - x[i + k]|)` for `k` in `0..=window_size / 2`.
    pub scores: Vec<f32>,
    /// The first lag whose score is a local maximum above the clarity threshold.
    pub first_peak_index: Option<usize>,
    /// The selected maximum, refined using parabolic interpolation.
    pub peak: LagPeak,
    voiced: bool,
}

impl AcfResult {
    pub fn new(window_size: usize) -> AcfResult {
        validate_window_size(window_size);
        AcfResult {
            frequency: 0.0,
            clarity: 0.0,
            period: 0.0,
            window: vec![0.0; window_size],
            scores: vec![0.0; window_size / 2 + 1],
            first_peak_index: None,
            peak: LagPeak::default(),
            voiced: false,
        }
    }

    /// Performs pitch estimation on the current contents of `window`.
    pub fn compute(&mut self, sample_rate: f32, clarity_threshold: f32, peak_tolerance: f32) {
        self.reset();
        self.compute_scores();

        let first_peak_index = match self.find_first_peak(clarity_threshold) {
            Some(index) => index,
            None => return,
        };
        self.first_peak_index = Some(first_peak_index);

        let lag_index = self.select_peak(first_peak_index, peak_tolerance);
        self.peak.set(&self.scores, lag_index);
        if self.peak.lag <= 0.0 {
            return;
        }

        self.period = self.peak.lag;
        self.clarity = self.peak.value.min(1.0);
        self.frequency = sample_rate / self.period;
        self.voiced = self.frequency.is_finite();
    }

    /// Indicates if a pitch was found in the analysed window.
    pub fn is_voiced(&self) -> bool {
        self.voiced
    }

    /// The estimated frequency, or `None` if the window is unvoiced.
    pub fn frequency(&self) -> Option<f32> {
        if self.voiced {
            Some(self.frequency)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.frequency = 0.0;
        self.clarity = 0.0;
        self.period = 0.0;
        self.first_peak_index = None;
        self.peak = LagPeak::default();
        self.voiced = false;
    }

    fn compute_scores(&mut self) {
        let half = self.window.len() / 2;
        let window = &self.window[..];
        for (lag, score) in self.scores.iter_mut().enumerate() {
            *score = 1.0 - window.mean_abs_difference(lag, half);
        }
    }

    /// Finds the first lag that is strictly greater than both neighbours and
    /// scores above `threshold`. Lag 0 never qualifies.
    fn find_first_peak(&self, threshold: f32) -> Option<usize> {
        let scores = &self.scores[..];
        let half = scores.len() - 1;
        (1..half).find(|&i| {
            scores[i] > threshold && scores[i] > scores[i - 1] && scores[i] > scores[i + 1]
        })
    }

    /// Selects the lag of the pitch period among the local maxima from
    /// `first` onward.
    ///
    /// Maxima are compared by their [`apex_height`], since the score at an
    /// integer lag can fall well below the score of a period multiple that
    /// happens to land closer to an integer. Maxima within `tolerance` of the
    /// highest are treated as equivalent and the shortest lag wins.
    fn select_peak(&self, first: usize, tolerance: f32) -> usize {
        let scores = &self.scores[..];
        let half = scores.len() - 1;
        let is_local_max = |i: usize| scores[i] >= scores[i - 1] && scores[i] >= scores[i + 1];

        let mut max_height = apex_height(scores, first);
        for i in (first + 1)..half {
            if is_local_max(i) {
                max_height = max_height.max(apex_height(scores, i));
            }
        }

        let threshold = max_height - tolerance.max(0.0);
        (first..half)
            .find(|&i| is_local_max(i) && apex_height(scores, i) >= threshold)
            .unwrap_or(first)
    }
}
