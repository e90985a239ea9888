//! Amplitude envelopes evaluated at arbitrary times.

/// An attack-decay-sustain-release envelope for a note of known duration.
///
/// The level ramps from 0 to 1 over `attack` seconds, to `sustain` over
/// `decay` seconds, holds, and ramps to 0 over the last `release` seconds
/// of the note, so a note is silent once its duration has passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f32,
    pub release: f64,
}

impl Default for Adsr {
    fn default() -> Self {
        Adsr {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

impl Adsr {
    /// The level `time` seconds after the start of a note lasting `duration` seconds.
    pub fn level(&self, time: f64, duration: f64) -> f32 {
        if time < 0.0 || time >= duration {
            return 0.0;
        }
        let release_start = self.release_start(duration);
        if time < release_start {
            return self.attack_decay_level(time);
        }
        let from = self.attack_decay_level(release_start);
        from * ((duration - time) / (duration - release_start)) as f32
    }

    /// Notes too short for the attack and decay phases are released
    /// half way through.
    fn release_start(&self, duration: f64) -> f64 {
        let attack_decay = self.attack + self.decay;
        if duration > attack_decay {
            (duration - self.release).max(attack_decay)
        } else {
            0.5 * duration
        }
    }

    fn attack_decay_level(&self, time: f64) -> f32 {
        if time < self.attack {
            (time / self.attack) as f32
        } else if time < self.attack + self.decay {
            let t = ((time - self.attack) / self.decay) as f32;
            1.0 + (self.sustain - 1.0) * t
        } else {
            self.sustain
        }
    }
}

/// A linear ramp from `from` to 0, starting at `start` and lasting `length` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub start: f64,
    pub from: f32,
    pub length: f64,
}

impl Fade {
    pub fn level(&self, time: f64) -> f32 {
        if time <= self.start {
            return self.from;
        }
        let remaining = 1.0 - (time - self.start) / self.length;
        self.from * remaining.max(0.0) as f32
    }

    pub fn end_time(&self) -> f64 {
        self.start + self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_long_note() {
        let adsr = Adsr::default();
        let duration = 1.0;
        assert_eq!(adsr.level(-0.1, duration), 0.0);
        assert_eq!(adsr.level(0.0, duration), 0.0);
        assert!((adsr.level(0.005, duration) - 0.5).abs() < EPSILON);
        assert!((adsr.level(0.01, duration) - 1.0).abs() < EPSILON);
        assert!((adsr.level(0.06, duration) - 0.85).abs() < EPSILON);
        assert!((adsr.level(0.5, duration) - 0.7).abs() < EPSILON);
        // Release from 0.7 s to 1.0 s
        assert!((adsr.level(0.7, duration) - 0.7).abs() < EPSILON);
        assert!((adsr.level(0.85, duration) - 0.35).abs() < EPSILON);
        assert_eq!(adsr.level(1.0, duration), 0.0);
    }

    #[test]
    fn test_medium_note_releases_after_decay() {
        let adsr = Adsr::default();
        let duration = 0.21;
        assert!((adsr.level(0.11, duration) - 0.7).abs() < EPSILON);
        assert!((adsr.level(0.16, duration) - 0.35).abs() < 1e-4);
    }

    #[test]
    fn test_short_note() {
        let adsr = Adsr::default();
        let duration = 0.05;
        assert!(adsr.level(0.025, duration) > 0.0);
        assert!(adsr.level(0.049, duration) < 0.05);
        for i in 0..50 {
            let level = adsr.level(i as f64 * 0.001, duration);
            assert!((0.0..=1.0).contains(&level));
        }
    }

    #[test]
    fn test_fade() {
        let fade = Fade {
            start: 2.0,
            from: 0.6,
            length: 0.05,
        };
        assert_eq!(fade.level(1.0), 0.6);
        assert!((fade.level(2.025) - 0.3).abs() < EPSILON);
        assert!(fade.level(2.05) < 1e-6);
        assert_eq!(fade.level(3.0), 0.0);
        assert!((fade.end_time() - 2.05).abs() < 1e-9);
    }
}
