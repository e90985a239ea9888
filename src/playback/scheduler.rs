use crate::config::PlaybackConfig;
use crate::note::{note_to_frequency, NoteLabel};
use crate::playback::observer::{ProgressObserver, ProgressObservers, SubscriptionId};
use crate::playback::sink::{SoundSink, VoiceHandle};
use crate::playback::state::{clamp_speed, PlaybackState, Status};
use crate::segment::{total_duration, NoteBlock};

/// A tone to start `offset` seconds from now, lasting `duration` seconds.
/// Both are in sink time, i.e. already divided by the playback speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledOnset {
    pub note: NoteLabel,
    pub offset: f64,
    pub duration: f64,
}

/// The result of [`PlaybackScheduler::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started from the beginning.
    Started,
    /// Playback resumed from the paused position.
    Resumed,
    AlreadyPlaying,
    /// There are no note blocks loaded.
    NothingToPlay,
}

/// Plans the onsets of all blocks that have not ended at timeline position
/// `elapsed`. Blocks straddling `elapsed` get a negative offset.
pub fn plan_onsets(blocks: &[NoteBlock], elapsed: f64, speed: f64) -> Vec<ScheduledOnset> {
    blocks
        .iter()
        .filter_map(|block| {
            let offset = (block.start_time - elapsed) / speed;
            let duration = block.duration / speed;
            if offset + duration > 0.0 {
                Some(ScheduledOnset {
                    note: block.note,
                    offset,
                    duration,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Plays a sequence of note blocks on a [`SoundSink`].
///
/// All tones are handed to the sink up front, each time playback starts or
/// resumes. [`tick`](PlaybackScheduler::tick) should be called periodically,
/// typically once per display frame, to track the playback position and
/// detect the end of the sequence. Time is always read from the sink's clock.
pub struct PlaybackScheduler<S: SoundSink> {
    sink: S,
    blocks: Vec<NoteBlock>,
    state: PlaybackState,
    volume: f32,
    observers: ProgressObservers,
    voices: Vec<VoiceHandle>,
}

impl<S: SoundSink> PlaybackScheduler<S> {
    pub fn new(sink: S) -> Self {
        PlaybackScheduler::from_config(sink, &PlaybackConfig::default())
    }

    pub fn from_config(sink: S, config: &PlaybackConfig) -> Self {
        let mut scheduler = PlaybackScheduler {
            sink,
            blocks: Vec::new(),
            state: PlaybackState::default(),
            volume: 0.0,
            observers: ProgressObservers::new(),
            voices: Vec::new(),
        };
        scheduler.state.speed = clamp_speed(config.speed);
        scheduler.set_volume(config.volume);
        scheduler
    }

    /// Replaces the note blocks, stopping playback first.
    pub fn load(&mut self, blocks: Vec<NoteBlock>) {
        self.stop();
        log::debug!(target: "microsing::playback", "loaded {} blocks", blocks.len());
        self.blocks = blocks;
    }

    pub fn blocks(&self) -> &[NoteBlock] {
        &self.blocks
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// The end time of the last block.
    pub fn total_duration(&self) -> f64 {
        total_duration(&self.blocks)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The number of scheduled voices the sink has not yet reported finished.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn subscribe(&mut self, observer: Box<dyn ProgressObserver + Send>) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observers_mut(&mut self) -> &mut ProgressObservers {
        &mut self.observers
    }

    /// Starts playback from the beginning, or resumes it if paused.
    pub fn play(&mut self) -> PlayOutcome {
        if self.state.status == Status::Playing {
            return PlayOutcome::AlreadyPlaying;
        }
        if self.blocks.is_empty() {
            log::debug!(target: "microsing::playback", "nothing to play");
            return PlayOutcome::NothingToPlay;
        }

        let outcome = match self.state.status {
            Status::Paused => PlayOutcome::Resumed,
            _ => PlayOutcome::Started,
        };
        let now = self.sink.current_time();
        self.state.clock_origin = now - self.state.elapsed / self.state.speed;
        self.state.status = Status::Playing;
        self.schedule();

        log::debug!(
            target: "microsing::playback",
            "{:?} at {:.3} s, speed {}, {} voices",
            outcome,
            self.state.elapsed,
            self.state.speed,
            self.voices.len()
        );
        outcome
    }

    /// Pauses playback, silencing everything scheduled. Returns false if
    /// not playing.
    pub fn pause(&mut self) -> bool {
        if self.state.status != Status::Playing {
            return false;
        }
        let now = self.sink.current_time();
        self.state.elapsed = self.state.position_at(now);
        self.state.status = Status::Paused;
        self.cancel_voices();
        log::debug!(target: "microsing::playback", "paused at {:.3} s", self.state.elapsed);
        true
    }

    /// Stops playback, rewinds to the beginning and resets the speed to 1.
    /// Observers are notified with a position of 0. Does nothing if already
    /// stopped.
    pub fn stop(&mut self) -> bool {
        if self.state.status == Status::Stopped {
            return false;
        }
        self.cancel_voices();
        self.state.reset();
        self.observers.notify(0.0);
        log::debug!(target: "microsing::playback", "stopped");
        true
    }

    /// Sets the playback speed, clamped to [0.5, 2.0]. While playing, the
    /// remaining tones are rescheduled at the new speed from the current
    /// position.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            log::debug!(target: "microsing::playback", "ignoring speed {}", speed);
            return;
        }
        let speed = clamp_speed(speed);
        if self.state.status == Status::Playing {
            self.pause();
            self.state.speed = speed;
            self.play();
        } else {
            self.state.speed = speed;
        }
    }

    /// Sets the volume, clamped to [0, 1].
    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            self.volume
        } else {
            volume.max(0.0).min(1.0)
        };
        self.volume = volume;
        self.sink.set_volume(volume);
    }

    /// Updates the playback position from the sink clock and notifies
    /// observers. Stops playback once the position passes the end of the
    /// last block. Returns the position observers were notified with, or
    /// `None` if not playing.
    pub fn tick(&mut self) -> Option<f64> {
        let finished = self.sink.reap_finished();
        if !finished.is_empty() {
            self.voices.retain(|voice| !finished.contains(voice));
        }

        if self.state.status != Status::Playing {
            return None;
        }
        let now = self.sink.current_time();
        self.state.elapsed = self.state.position_at(now);
        if self.state.elapsed >= self.total_duration() {
            self.stop();
            return Some(0.0);
        }
        self.observers.notify(self.state.elapsed);
        Some(self.state.elapsed)
    }

    fn schedule(&mut self) {
        self.voices.clear();
        for onset in plan_onsets(&self.blocks, self.state.elapsed, self.state.speed) {
            let frequency = note_to_frequency(onset.note);
            let voice = self.sink.schedule_tone(frequency, onset.duration, onset.offset);
            self.voices.push(voice);
        }
    }

    fn cancel_voices(&mut self) {
        self.sink.silence_all();
        self.voices.clear();
    }
}
