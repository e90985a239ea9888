use crate::acf::AcfPitchEstimator;
use crate::common::{F32ArrayExt, LatestWindow};
use crate::config::EstimatorConfig;
use crate::track::PitchSample;

/// A pull based source of captured audio.
pub trait AudioSource {
    /// The sample rate of the captured audio in Hz.
    fn sample_rate(&self) -> f32;

    /// Fills `window` with the most recent samples, oldest first, and returns
    /// the stream time in seconds of the newest one. Returns `None` if there
    /// is no new audio to analyse.
    fn fill_window(&mut self, window: &mut [f32]) -> Option<f64>;
}

/// An [`AudioSource`] fed by an audio callback through a lock free ring buffer.
///
/// ```
/// use microsing::acf::{AudioSource, RingBufferSource};
///
/// let (mut producer, mut source) = RingBufferSource::with_capacity(8000.0, 4, 64);
/// for sample in [0.1, 0.2, 0.3, 0.4, 0.5].iter() {
///     producer.push(*sample).unwrap();
/// }
/// let mut window = [0.0; 4];
/// assert_eq!(source.fill_window(&mut window), Some(5.0 / 8000.0));
/// assert_eq!(window, [0.2, 0.3, 0.4, 0.5]);
/// ```
pub struct RingBufferSource {
    consumer: rtrb::Consumer<f32>,
    latest: LatestWindow,
    sample_rate: f32,
    last_analysed_count: u64,
}

impl RingBufferSource {
    pub fn new(consumer: rtrb::Consumer<f32>, sample_rate: f32, window_size: usize) -> Self {
        RingBufferSource {
            consumer,
            latest: LatestWindow::new(window_size),
            sample_rate,
            last_analysed_count: 0,
        }
    }

    /// Creates a source together with the producer the capture callback
    /// should push samples into.
    pub fn with_capacity(
        sample_rate: f32,
        window_size: usize,
        capacity: usize,
    ) -> (rtrb::Producer<f32>, RingBufferSource) {
        let (producer, consumer) = rtrb::RingBuffer::<f32>::new(capacity).split();
        (
            producer,
            RingBufferSource::new(consumer, sample_rate, window_size),
        )
    }

    /// The number of samples received so far.
    pub fn sample_count(&self) -> u64 {
        self.latest.sample_count()
    }

    /// Forgets all received audio. Stream time restarts at zero.
    pub fn reset(&mut self) {
        while self.consumer.pop().is_ok() {}
        self.latest.reset();
        self.last_analysed_count = 0;
    }
}

impl AudioSource for RingBufferSource {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn fill_window(&mut self, window: &mut [f32]) -> Option<f64> {
        while let Ok(sample) = self.consumer.pop() {
            self.latest.push(sample);
        }
        let sample_count = self.latest.sample_count();
        if !self.latest.is_filled() || sample_count == self.last_analysed_count {
            return None;
        }
        self.last_analysed_count = sample_count;
        self.latest.copy_to(window);
        Some(sample_count as f64 / self.sample_rate as f64)
    }
}

/// Drives an [`AcfPitchEstimator`] from an [`AudioSource`], one window per tick.
pub struct PitchTracker<A: AudioSource> {
    source: A,
    estimator: AcfPitchEstimator,
    input_level_db: f32,
}

impl<A: AudioSource> PitchTracker<A> {
    pub fn new(source: A, window_size: usize) -> Self {
        let config = EstimatorConfig {
            window_size,
            ..EstimatorConfig::default()
        };
        PitchTracker::from_config(source, &config)
    }

    pub fn from_config(source: A, config: &EstimatorConfig) -> Self {
        let estimator = AcfPitchEstimator::from_config(source.sample_rate(), config);
        PitchTracker {
            source,
            estimator,
            input_level_db: f32::NEG_INFINITY,
        }
    }

    /// Analyses the most recent window of the source. Returns the resulting
    /// sample if it is voiced, `None` if it is unvoiced or there was no new
    /// audio.
    pub fn tick(&mut self) -> Option<PitchSample> {
        let time = self.source.fill_window(self.estimator.window_mut())?;
        self.input_level_db = self.estimator.result().window.rms_level_db();
        let frequency = self.estimator.estimate()?;
        log::trace!(
            target: "microsing::acf",
            "{:.1} Hz at {:.3} s, clarity {:.3}",
            frequency,
            time,
            self.estimator.result().clarity
        );
        Some(PitchSample::voiced(time, frequency))
    }

    /// The RMS level of the last analysed window in dB.
    pub fn input_level_db(&self) -> f32 {
        self.input_level_db
    }

    pub fn estimator(&self) -> &AcfPitchEstimator {
        &self.estimator
    }

    pub fn source(&self) -> &A {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut A {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_sine(sample_rate: f32, frequency: f32, sample_count: usize) -> Vec<f32> {
        (0..sample_count)
            .map(|i| (2.0 * std::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_ring_buffer_source_needs_a_full_window() {
        let (mut producer, mut source) = RingBufferSource::with_capacity(1000.0, 8, 32);
        let mut window = [0.0; 8];
        for i in 0..7 {
            producer.push(i as f32).unwrap();
        }
        assert_eq!(source.fill_window(&mut window), None);
        producer.push(7.0).unwrap();
        assert_eq!(source.fill_window(&mut window), Some(0.008));
        assert_eq!(window, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        // Nothing new arrived
        assert_eq!(source.fill_window(&mut window), None);
    }

    #[test]
    fn test_ring_buffer_source_reset() {
        let (mut producer, mut source) = RingBufferSource::with_capacity(1000.0, 4, 32);
        for i in 0..10 {
            producer.push(i as f32).unwrap();
        }
        let mut window = [0.0; 4];
        assert!(source.fill_window(&mut window).is_some());
        source.reset();
        assert_eq!(source.sample_count(), 0);
        assert_eq!(source.fill_window(&mut window), None);
    }

    #[test]
    fn test_tracker_detects_sine() {
        let sample_rate = 44100.0;
        let window_size = 2048;
        let (mut producer, source) = RingBufferSource::with_capacity(sample_rate, window_size, 8192);
        let mut tracker = PitchTracker::new(source, window_size);

        assert_eq!(tracker.tick(), None);

        for sample in generate_sine(sample_rate, 330.0, 4096) {
            producer.push(sample).unwrap();
        }
        let sample = tracker.tick().unwrap();
        assert!((sample.time - 4096.0 / 44100.0).abs() < 1e-9);
        let frequency = sample.frequency.unwrap();
        assert!((frequency - 330.0).abs() / 330.0 < 0.01);
        // A full scale sine has an RMS level of about -3 dB
        assert!((tracker.input_level_db() + 3.0).abs() < 1.0);
        assert_eq!(tracker.tick(), None);
    }

    #[test]
    fn test_tracker_skips_silence() {
        let (mut producer, source) = RingBufferSource::with_capacity(44100.0, 1024, 4096);
        let mut tracker = PitchTracker::new(source, 1024);
        for _ in 0..2048 {
            producer.push(0.0).unwrap();
        }
        assert_eq!(tracker.tick(), None);
        assert_eq!(tracker.estimator().result().frequency(), None);
    }
}
