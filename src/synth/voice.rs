use crate::playback::VoiceHandle;
use crate::synth::envelope::{Adsr, Fade};

const FUNDAMENTAL_GAIN: f32 = 0.8;
const OCTAVE_GAIN: f32 = 0.2;

/// A triangle wave with its zero crossing at phase 0, `phase` in cycles.
fn triangle(phase: f64) -> f32 {
    let p = (phase + 0.25).fract();
    (1.0 - 4.0 * (p - 0.5).abs()) as f32
}

fn sine(phase: f64) -> f32 {
    (2.0 * std::f64::consts::PI * phase).sin() as f32
}

/// One scheduled tone: a triangle fundamental with a quieter sine one
/// octave up, shaped by an ADSR envelope.
#[derive(Debug, Clone)]
pub(crate) struct Voice {
    pub handle: VoiceHandle,
    pub frequency: f32,
    /// Start time in seconds of synth time.
    pub start: f64,
    pub duration: f64,
    pub fade: Option<Fade>,
}

impl Voice {
    /// The time at which the voice falls silent for good.
    pub fn end_time(&self) -> f64 {
        let end = self.start + self.duration;
        match self.fade {
            Some(fade) => end.min(fade.end_time()),
            None => end,
        }
    }

    pub fn envelope_level(&self, time: f64, adsr: &Adsr) -> f32 {
        let level = adsr.level(time - self.start, self.duration);
        match self.fade {
            Some(fade) if time > fade.start => fade.level(time).min(level),
            _ => level,
        }
    }

    /// Starts a fade to silence at `time` from the current level.
    pub fn fade_out(&mut self, time: f64, length: f64, adsr: &Adsr) {
        if self.fade.is_some() {
            return;
        }
        self.fade = Some(Fade {
            start: time,
            from: self.envelope_level(time, adsr),
            length,
        });
    }

    pub fn sample(&self, time: f64, adsr: &Adsr) -> f32 {
        let level = self.envelope_level(time, adsr);
        if level == 0.0 {
            return 0.0;
        }
        let phase = self.frequency as f64 * (time - self.start);
        level * (FUNDAMENTAL_GAIN * triangle(phase) + OCTAVE_GAIN * sine(2.0 * phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        assert!(triangle(0.0).abs() < 1e-6);
        assert!((triangle(0.25) - 1.0).abs() < 1e-6);
        assert!(triangle(0.5).abs() < 1e-6);
        assert!((triangle(0.75) + 1.0).abs() < 1e-6);
        assert!((triangle(1.125) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fade_out() {
        let adsr = Adsr::default();
        let mut voice = Voice {
            handle: VoiceHandle(1),
            frequency: 440.0,
            start: 1.0,
            duration: 2.0,
            fade: None,
        };
        assert_eq!(voice.end_time(), 3.0);
        voice.fade_out(1.5, 0.05, &adsr);
        assert!((voice.end_time() - 1.55).abs() < 1e-9);
        assert!((voice.envelope_level(1.5, &adsr) - 0.7).abs() < 1e-5);
        assert!((voice.envelope_level(1.525, &adsr) - 0.35).abs() < 1e-4);
        assert_eq!(voice.sample(1.6, &adsr), 0.0);
        assert_eq!(voice.sample(0.5, &adsr), 0.0);
    }
}
