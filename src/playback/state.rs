/// Transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Stopped,
    Playing,
    Paused,
}

/// The slowest allowed playback speed.
pub const MIN_SPEED: f64 = 0.5;
/// The fastest allowed playback speed.
pub const MAX_SPEED: f64 = 2.0;

/// Transport state of a [`PlaybackScheduler`](super::PlaybackScheduler).
///
/// Only the scheduler mutates it; everyone else reads it through the getters.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub(super) status: Status,
    pub(super) elapsed: f64,
    pub(super) speed: f64,
    pub(super) clock_origin: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState {
            status: Status::Stopped,
            elapsed: 0.0,
            speed: 1.0,
            clock_origin: 0.0,
        }
    }
}

impl PlaybackState {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    /// The playback position in seconds of the note timeline, as of the
    /// last tick or transition.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The sink time at which the timeline position would have been zero
    /// had playback run uninterrupted at the current speed.
    pub fn clock_origin(&self) -> f64 {
        self.clock_origin
    }

    /// The timeline position at sink time `now`.
    pub(super) fn position_at(&self, now: f64) -> f64 {
        (now - self.clock_origin) * self.speed
    }

    /// Resets to stopped at position zero and normal speed.
    pub(super) fn reset(&mut self) {
        *self = PlaybackState::default();
    }
}

/// Clamps `speed` to [`MIN_SPEED`, `MAX_SPEED`].
pub fn clamp_speed(speed: f64) -> f64 {
    speed.max(MIN_SPEED).min(MAX_SPEED)
}
