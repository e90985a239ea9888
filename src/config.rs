//! Runtime configuration.
//!
//! Every section and every field may be omitted, in which case the
//! documented default applies. Example:
//!
//! ```
//! use microsing::config::Config;
//!
//! let config = Config::from_toml_str(r#"
//! [estimator]
//! window_size = 1024
//!
//! [segmenter]
//! unvoiced = "split"
//! smoothing_kernel = 5
//! "#).unwrap();
//! assert_eq!(config.estimator.window_size, 1024);
//! assert_eq!(config.tracker.capacity, 1000);
//! ```

use serde::Deserialize;

use crate::error::Result;
use crate::segment::UnvoicedPolicy;
use crate::track::LIVE_TRACK_CAPACITY;

/// Top level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub estimator: EstimatorConfig,
    pub tracker: TrackerConfig,
    pub segmenter: SegmenterConfig,
    pub playback: PlaybackConfig,
    pub synth: SynthConfig,
}

impl Config {
    /// Parses a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Config> {
        Ok(toml::from_str(toml_str)?)
    }
}

/// Autocorrelation pitch estimator settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Number of samples per analysed window. Must be a power of two.
    pub window_size: usize,
    /// The minimum similarity score of the first peak.
    pub clarity_threshold: f32,
    /// Peaks scoring within this distance of the highest peak are
    /// considered equally good; the one with the shortest lag wins.
    pub peak_tolerance: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            window_size: 2048,
            clarity_threshold: 0.9,
            peak_tolerance: 0.05,
        }
    }
}

/// Live pitch tracking settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// The maximum number of live samples kept before the oldest are evicted.
    pub capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            capacity: LIVE_TRACK_CAPACITY,
        }
    }
}

/// Note segmentation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Minimum duration in seconds of a block closed by a note change.
    pub interior_floor: f64,
    /// Minimum duration in seconds of the last block.
    pub trailing_floor: f64,
    /// What to do with unvoiced samples.
    pub unvoiced: UnvoicedPolicy,
    /// Median filter kernel size applied before segmentation. 0 disables smoothing.
    pub smoothing_kernel: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        SegmenterConfig {
            interior_floor: 0.05,
            trailing_floor: 0.1,
            unvoiced: UnvoicedPolicy::Skip,
            smoothing_kernel: 0,
        }
    }
}

/// Playback settings applied when a scheduler is created.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial speed multiplier, clamped to [0.5, 2.0].
    pub speed: f64,
    /// Initial volume, clamped to [0, 1].
    pub volume: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            speed: 1.0,
            volume: 0.3,
        }
    }
}

/// Piano voice settings. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub sample_rate: f32,
    pub attack: f32,
    pub decay: f32,
    /// Sustain level relative to the peak level.
    pub sustain: f32,
    pub release: f32,
    /// Duration of the ramp to silence applied by `silence_all`.
    pub fade_out: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            sample_rate: 44100.0,
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
            fade_out: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.estimator.window_size, 2048);
        assert_eq!(config.segmenter.trailing_floor, 0.1);
        assert_eq!(config.playback.volume, 0.3);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml_str(
            r#"
            [segmenter]
            unvoiced = "split"

            [synth]
            sample_rate = 48000.0
            "#,
        )
        .unwrap();
        assert_eq!(config.segmenter.unvoiced, UnvoicedPolicy::Split);
        assert_eq!(config.segmenter.interior_floor, 0.05);
        assert_eq!(config.synth.sample_rate, 48000.0);
        assert_eq!(config.synth.release, 0.3);
    }

    #[test]
    fn test_malformed_document() {
        assert!(Config::from_toml_str("[estimator\nwindow_size = ").is_err());
        assert!(Config::from_toml_str("[segmenter]\nunvoiced = \"sometimes\"").is_err());
    }
}
