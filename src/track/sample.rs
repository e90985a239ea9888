use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A pitch reading at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchSample {
    /// Time in seconds from the start of the source.
    pub time: f64,
    /// Frequency in Hz, or `None` if no pitch was detected.
    #[serde(default)]
    pub frequency: Option<f32>,
}

impl PitchSample {
    pub fn voiced(time: f64, frequency: f32) -> Self {
        PitchSample {
            time,
            frequency: Some(frequency),
        }
    }

    pub fn unvoiced(time: f64) -> Self {
        PitchSample {
            time,
            frequency: None,
        }
    }

    pub fn is_voiced(&self) -> bool {
        self.frequency.is_some()
    }

    /// Maps non-finite and non-positive frequencies to unvoiced.
    pub(crate) fn sanitized(self) -> Self {
        match self.frequency {
            Some(f) if f.is_finite() && f > 0.0 => self,
            _ => PitchSample::unvoiced(self.time),
        }
    }
}

/// A chronological sequence of pitch samples, optionally bounded.
///
/// A bounded track evicts its oldest sample whenever a push makes it exceed
/// its capacity.
#[derive(Debug, Clone, Default)]
pub struct PitchTrack {
    samples: VecDeque<PitchSample>,
    capacity: Option<usize>,
}

impl PitchTrack {
    pub fn bounded(capacity: usize) -> Self {
        if capacity == 0 {
            panic!("Track capacity must be greater than 0")
        }
        PitchTrack {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity: Some(capacity),
        }
    }

    pub fn unbounded() -> Self {
        PitchTrack::default()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Appends a sample. Samples older than the last one are rejected and
    /// `false` is returned.
    pub fn push(&mut self, sample: PitchSample) -> bool {
        if let Some(last) = self.samples.back() {
            if sample.time < last.time {
                log::warn!(
                    target: "microsing::track",
                    "dropping sample at {:.3} s, track is already at {:.3} s",
                    sample.time,
                    last.time
                );
                return false;
            }
        }
        self.samples.push_back(sample.sanitized());
        if let Some(capacity) = self.capacity {
            while self.samples.len() > capacity {
                self.samples.pop_front();
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PitchSample> + '_ {
        self.samples.iter()
    }

    /// Returns a copy of the current samples.
    pub fn to_vec(&self) -> Vec<PitchSample> {
        self.samples.iter().copied().collect()
    }

    pub fn first(&self) -> Option<&PitchSample> {
        self.samples.front()
    }

    pub fn last(&self) -> Option<&PitchSample> {
        self.samples.back()
    }

    /// The time span `(first, last)` covered by the track.
    pub fn span(&self) -> Option<(f64, f64)> {
        match (self.samples.front(), self.samples.back()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }
}

impl Extend<PitchSample> for PitchTrack {
    fn extend<I: IntoIterator<Item = PitchSample>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_eviction() {
        let mut track = PitchTrack::bounded(1000);
        for i in 0..1500 {
            assert!(track.push(PitchSample::voiced(i as f64 * 0.01, 440.0)));
        }
        assert_eq!(track.len(), 1000);
        assert_eq!(track.first().unwrap().time, 5.0);
        assert_eq!(track.span(), Some((5.0, 14.99)));
    }

    #[test]
    fn test_unbounded() {
        let mut track = PitchTrack::unbounded();
        track.extend((0..2000).map(|i| PitchSample::voiced(i as f64, 200.0)));
        assert_eq!(track.len(), 2000);
        assert_eq!(track.capacity(), None);
    }

    #[test]
    fn test_rejects_out_of_order() {
        let mut track = PitchTrack::bounded(10);
        assert!(track.push(PitchSample::voiced(1.0, 440.0)));
        assert!(track.push(PitchSample::voiced(1.0, 441.0)));
        assert!(!track.push(PitchSample::voiced(0.5, 442.0)));
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn test_invalid_frequencies_become_unvoiced() {
        let mut track = PitchTrack::unbounded();
        track.push(PitchSample::voiced(0.0, -1.0));
        track.push(PitchSample::voiced(0.1, f32::NAN));
        track.push(PitchSample::voiced(0.2, 0.0));
        track.push(PitchSample::voiced(0.3, 220.0));
        let voiced: Vec<bool> = track.iter().map(|s| s.is_voiced()).collect();
        assert_eq!(voiced, vec![false, false, false, true]);
    }

    #[test]
    fn test_empty_span() {
        assert_eq!(PitchTrack::unbounded().span(), None);
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity() {
        PitchTrack::bounded(0);
    }
}
