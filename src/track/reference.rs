use serde::Deserialize;

use crate::error::{Error, Result};
use crate::track::{PitchSample, PitchTrack};

/// The reference pitch payload delivered by the pitch extraction service:
///
/// ```json
/// {"status": "success", "samples": [{"time": 0.0, "frequency": 261.6}], "duration": 12.5}
/// ```
///
/// `pitch_data` is accepted as an alias of `samples`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferencePitch {
    pub status: String,
    #[serde(alias = "pitch_data")]
    pub samples: Vec<PitchSample>,
    /// Duration of the analysed audio in seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub sample_rate: Option<u32>,
}

impl ReferencePitch {
    pub fn from_json(json: &str) -> Result<ReferencePitch> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the payload and converts it to an unbounded track.
    pub fn into_track(self) -> Result<PitchTrack> {
        if self.status != "success" {
            return Err(Error::ReferenceStatus(self.status));
        }
        let mut previous_time = f64::NEG_INFINITY;
        for (index, sample) in self.samples.iter().enumerate() {
            if !(sample.time >= previous_time) {
                return Err(Error::UnorderedReference {
                    index,
                    time: sample.time,
                });
            }
            previous_time = sample.time;
        }

        let mut track = PitchTrack::unbounded();
        track.extend(self.samples);
        Ok(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload() {
        let json = r#"{
            "status": "success",
            "samples": [
                {"time": 0.0, "frequency": 261.6},
                {"time": 0.1, "frequency": 0.0},
                {"time": 0.2, "frequency": 293.7}
            ],
            "duration": 0.3
        }"#;
        let reference = ReferencePitch::from_json(json).unwrap();
        assert_eq!(reference.duration, 0.3);
        let track = reference.into_track().unwrap();
        assert_eq!(track.len(), 3);
        assert!(!track.iter().nth(1).unwrap().is_voiced());
        assert_eq!(track.last().unwrap().frequency, Some(293.7));
    }

    #[test]
    fn test_pitch_data_alias() {
        let json = r#"{"status": "success", "pitch_data": [{"time": 1.5, "frequency": 440.0}], "duration": 2.0, "sample_rate": 22050}"#;
        let reference = ReferencePitch::from_json(json).unwrap();
        assert_eq!(reference.sample_rate, Some(22050));
        assert_eq!(reference.samples, vec![PitchSample::voiced(1.5, 440.0)]);
    }

    #[test]
    fn test_failed_status() {
        let json = r#"{"status": "error", "samples": []}"#;
        let reference = ReferencePitch::from_json(json).unwrap();
        match reference.into_track() {
            Err(Error::ReferenceStatus(status)) => assert_eq!(status, "error"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unordered_samples() {
        let json = r#"{"status": "success", "samples": [
            {"time": 1.0, "frequency": 440.0},
            {"time": 0.5, "frequency": 440.0}
        ]}"#;
        match ReferencePitch::from_json(json).unwrap().into_track() {
            Err(Error::UnorderedReference { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ReferencePitch::from_json("{\"status\": \"success\""),
            Err(Error::InvalidReference(_))
        ));
    }
}
