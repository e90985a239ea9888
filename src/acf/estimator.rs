use crate::acf::result::AcfResult;
use crate::config::EstimatorConfig;

/// Estimates the fundamental frequency of fixed size windows using
/// time domain autocorrelation.
///
/// All buffers are allocated on construction and reused for every window.
pub struct AcfPitchEstimator {
    /// The audio sample rate in Hz.
    sample_rate: f32,
    /// The minimum score of the first peak.
    clarity_threshold: f32,
    /// See [`EstimatorConfig::peak_tolerance`].
    peak_tolerance: f32,
    result: AcfResult,
}

impl AcfPitchEstimator {
    pub fn new(sample_rate: f32, window_size: usize) -> Self {
        let defaults = EstimatorConfig::default();
        AcfPitchEstimator::from_options(
            sample_rate,
            window_size,
            defaults.clarity_threshold,
            defaults.peak_tolerance,
        )
    }

    pub fn from_config(sample_rate: f32, config: &EstimatorConfig) -> Self {
        AcfPitchEstimator::from_options(
            sample_rate,
            config.window_size,
            config.clarity_threshold,
            config.peak_tolerance,
        )
    }

    pub fn from_options(
        sample_rate: f32,
        window_size: usize,
        clarity_threshold: f32,
        peak_tolerance: f32,
    ) -> Self {
        if sample_rate <= 0.0 {
            panic!("Sample rate must be greater than 0")
        }
        AcfPitchEstimator {
            sample_rate,
            clarity_threshold,
            peak_tolerance,
            result: AcfResult::new(window_size),
        }
    }

    /// Copies `samples` into the analysis window and estimates its pitch.
    /// Returns `None` if the window is unvoiced.
    pub fn process_window(&mut self, samples: &[f32]) -> Option<f32> {
        if samples.len() != self.window_size() {
            panic!(
                "The input buffer size must equal the window size {}, got {}",
                self.window_size(),
                samples.len()
            )
        }
        self.result.window.copy_from_slice(samples);
        self.estimate()
    }

    /// Estimates the pitch of the current contents of [`window_mut`](AcfPitchEstimator::window_mut).
    pub fn estimate(&mut self) -> Option<f32> {
        self.result
            .compute(self.sample_rate, self.clarity_threshold, self.peak_tolerance);
        self.result.frequency()
    }

    /// The analysis window, for callers filling it in place.
    pub fn window_mut(&mut self) -> &mut [f32] {
        &mut self.result.window[..]
    }

    /// Returns the most recently computed result.
    pub fn result(&self) -> &AcfResult {
        &self.result
    }

    /// Returns the fixed number of samples in a window.
    pub fn window_size(&self) -> usize {
        self.result.window.len()
    }

    /// Returns the current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Sets the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }
}
