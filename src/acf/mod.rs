//! Monophonic pitch estimation using time domain autocorrelation.
//!
//! For a window of `N` samples, the similarity score at lag `k` is one minus
//! the mean absolute difference between the first `N / 2` samples and the
//! same samples shifted by `k`. The pitch period is taken from the first
//! score peak above the clarity threshold (0.9 by default), or a later peak
//! scoring at least as well, refined using parabolic interpolation.
//!
//! Computation is `O(N²)` per window, which is fine for `N` up to a few
//! thousand samples at interactive rates.
//!
//! # Examples
//! ## Single windows
//! ```
//! use microsing::acf::AcfPitchEstimator;
//!
//! let sample_rate = 44100.0;
//! let window_size = 2048;
//! let window: Vec<f32> = (0..window_size)
//!     .map(|i| (2.0 * std::f32::consts::PI * 220.0 * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut estimator = AcfPitchEstimator::new(sample_rate, window_size);
//! let frequency = estimator.process_window(&window[..]).unwrap();
//! assert!((frequency - 220.0).abs() < 2.0);
//!
//! // Silence is unvoiced
//! assert_eq!(estimator.process_window(&vec![0.0; window_size][..]), None);
//! ```
//! ## Live input
//! A [`PitchTracker`] pulls the latest window from an [`AudioSource`] once per tick.
//! ```
//! use microsing::acf::{PitchTracker, RingBufferSource};
//!
//! let (mut producer, source) = RingBufferSource::with_capacity(44100.0, 1024, 4096);
//! let mut tracker = PitchTracker::new(source, 1024);
//!
//! // Typically pushed from the audio capture callback
//! for i in 0..2048 {
//!     let t = i as f32 / 44100.0;
//!     producer.push((2.0 * std::f32::consts::PI * 440.0 * t).sin()).unwrap();
//! }
//!
//! let sample = tracker.tick().unwrap();
//! assert!((sample.frequency.unwrap() - 440.0).abs() < 4.4);
//! ```

mod estimator;
mod peak;
mod result;
mod tracker;

pub use estimator::AcfPitchEstimator;
pub use peak::LagPeak;
pub use result::AcfResult;
pub use tracker::{AudioSource, PitchTracker, RingBufferSource};
