//! The pitch matching session the UI talks to.
//!
//! A [`Session`] owns the live pitch track, the reference track and the
//! playback scheduler, which is created with its sound sink on the first
//! call to [`play`](Session::play).
//!
//! ```
//! use microsing::config::Config;
//! use microsing::playback::{PlayOutcome, Status};
//! use microsing::session::{PlaybackMode, Session};
//! use microsing::synth::PianoSynth;
//!
//! let mut session = Session::new(Config::default(), || Ok(PianoSynth::new(44100.0)));
//! session.load_reference(r#"{"status": "success", "samples": [
//!     {"time": 0.0, "frequency": 261.6},
//!     {"time": 0.5, "frequency": 293.7}
//! ], "duration": 1.0}"#).unwrap();
//!
//! assert_eq!(session.current_note_blocks().len(), 2);
//! assert_eq!(session.play().unwrap(), PlayOutcome::Started);
//! assert_eq!(session.status(), Status::Playing);
//! ```

use serde::{Deserialize, Serialize};

use crate::acf::{AudioSource, PitchTracker};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::playback::{
    clamp_speed, PlayOutcome, PlaybackScheduler, PlaybackState, ProgressObserver,
    ProgressObservers, SoundSink, Status, SubscriptionId,
};
use crate::segment::{NoteBlock, NoteSegmenter};
use crate::track::{PitchSample, PitchTrack, ReferencePitch};

/// Which pitch track is played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackMode {
    /// The reference track.
    Target,
    /// The live track.
    User,
    /// The reference track if loaded, otherwise the live track.
    Both,
}

impl Default for PlaybackMode {
    fn default() -> Self {
        PlaybackMode::Target
    }
}

/// Creates the sound sink on first playback. Retried by the next `play` after a failure.
pub type SinkFactory<S> = Box<dyn FnMut() -> std::result::Result<S, String> + Send>;

pub struct Session<S: SoundSink> {
    config: Config,
    live: PitchTrack,
    reference: PitchTrack,
    reference_duration: f64,
    segmenter: NoteSegmenter,
    mode: PlaybackMode,
    /// Applied to the scheduler when it is created.
    speed: f64,
    volume: f32,
    scheduler: Option<PlaybackScheduler<S>>,
    pending_observers: ProgressObservers,
    sink_factory: SinkFactory<S>,
}

impl<S: SoundSink> Session<S> {
    pub fn new<F>(config: Config, sink_factory: F) -> Self
    where
        F: FnMut() -> std::result::Result<S, String> + Send + 'static,
    {
        Session {
            live: PitchTrack::bounded(config.tracker.capacity),
            reference: PitchTrack::unbounded(),
            reference_duration: 0.0,
            segmenter: NoteSegmenter::from_config(&config.segmenter),
            mode: PlaybackMode::default(),
            speed: clamp_speed(config.playback.speed),
            volume: config.playback.volume.max(0.0).min(1.0),
            scheduler: None,
            pending_observers: ProgressObservers::new(),
            sink_factory: Box::new(sink_factory),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A snapshot of the live track.
    pub fn current_pitch_samples(&self) -> Vec<PitchSample> {
        self.live.to_vec()
    }

    /// A snapshot of the reference track.
    pub fn reference_samples(&self) -> Vec<PitchSample> {
        self.reference.to_vec()
    }

    /// The duration of the reference audio in seconds, 0 if none is loaded.
    pub fn reference_duration(&self) -> f64 {
        self.reference_duration
    }

    /// Segments the track selected by the playback mode.
    pub fn current_note_blocks(&self) -> Vec<NoteBlock> {
        let track = match self.mode {
            PlaybackMode::Target => &self.reference,
            PlaybackMode::User => &self.live,
            PlaybackMode::Both => {
                // Simultaneous playback of both tracks is not supported
                if self.reference.is_empty() {
                    &self.live
                } else {
                    &self.reference
                }
            }
        };
        self.segmenter.segment(&track.to_vec())
    }

    /// Appends a sample to the live track. Returns false if it is older
    /// than the newest sample.
    pub fn push_live_sample(&mut self, sample: PitchSample) -> bool {
        self.live.push(sample)
    }

    /// Runs one acquisition tick of `tracker` and appends its result to the
    /// live track.
    pub fn record<A: AudioSource>(&mut self, tracker: &mut PitchTracker<A>) -> Option<PitchSample> {
        let sample = tracker.tick()?;
        if self.live.push(sample) {
            Some(sample)
        } else {
            None
        }
    }

    pub fn clear_live(&mut self) {
        self.live.clear();
    }

    /// Parses a reference payload and replaces the reference track with it.
    /// On error the current reference is kept.
    pub fn load_reference(&mut self, json: &str) -> Result<()> {
        self.set_reference(ReferencePitch::from_json(json)?)
    }

    pub fn set_reference(&mut self, reference: ReferencePitch) -> Result<()> {
        let duration = reference.duration;
        let track = reference.into_track()?;
        log::info!(
            target: "microsing::session",
            "loaded reference with {} samples, {:.2} s",
            track.len(),
            duration
        );
        self.reference = track;
        self.reference_duration = duration;
        Ok(())
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Changes the played track. Stops playback first.
    pub fn set_mode(&mut self, mode: PlaybackMode) {
        if mode != self.mode {
            self.stop();
            log::debug!(target: "microsing::session", "mode {:?}", mode);
            self.mode = mode;
        }
    }

    /// Starts playback of the current note blocks, or resumes it if paused.
    ///
    /// The sound sink is created on first use. If that fails, the error is
    /// returned and the next call tries again.
    pub fn play(&mut self) -> Result<PlayOutcome> {
        match self.status() {
            Status::Playing => return Ok(PlayOutcome::AlreadyPlaying),
            Status::Paused => {
                if let Some(scheduler) = self.scheduler.as_mut() {
                    return Ok(scheduler.play());
                }
            }
            Status::Stopped => {}
        }

        let blocks = self.current_note_blocks();
        if blocks.is_empty() {
            log::debug!(target: "microsing::session", "no pitch data for {:?}", self.mode);
            return Ok(PlayOutcome::NothingToPlay);
        }

        let scheduler = self.scheduler()?;
        scheduler.load(blocks);
        Ok(scheduler.play())
    }

    pub fn pause(&mut self) -> bool {
        match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.pause(),
            None => false,
        }
    }

    pub fn stop(&mut self) -> bool {
        match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.stop(),
            None => false,
        }
    }

    /// Sets the playback speed, clamped to [0.5, 2.0]. Stopping resets it to 1.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            return;
        }
        self.speed = clamp_speed(speed);
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.set_speed(self.speed);
        }
    }

    /// Sets the playback volume, clamped to [0, 1].
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.volume = volume.max(0.0).min(1.0);
        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.set_volume(self.volume);
        }
    }

    pub fn speed(&self) -> f64 {
        match self.scheduler.as_ref() {
            Some(scheduler) => scheduler.state().speed(),
            None => self.speed,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// The playback tick, see [`PlaybackScheduler::tick`].
    pub fn tick(&mut self) -> Option<f64> {
        self.scheduler.as_mut().and_then(|scheduler| scheduler.tick())
    }

    pub fn status(&self) -> Status {
        self.scheduler
            .as_ref()
            .map(|scheduler| scheduler.status())
            .unwrap_or(Status::Stopped)
    }

    /// The playback state, once playback has been started.
    pub fn playback_state(&self) -> Option<&PlaybackState> {
        self.scheduler.as_ref().map(|scheduler| scheduler.state())
    }

    /// The scheduler, once playback has been started. Gives access to the
    /// sink, e.g. to render a [`PianoSynth`](crate::synth::PianoSynth).
    pub fn scheduler_mut(&mut self) -> Option<&mut PlaybackScheduler<S>> {
        self.scheduler.as_mut()
    }

    /// Subscribes to playback progress.
    pub fn subscribe(&mut self, observer: Box<dyn ProgressObserver + Send>) -> SubscriptionId {
        match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.subscribe(observer),
            None => self.pending_observers.subscribe(observer),
        }
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.scheduler.as_mut() {
            Some(scheduler) => scheduler.unsubscribe(id),
            None => self.pending_observers.unsubscribe(id),
        }
    }

    fn scheduler(&mut self) -> Result<&mut PlaybackScheduler<S>> {
        let scheduler = match self.scheduler.take() {
            Some(scheduler) => scheduler,
            None => {
                let sink = (self.sink_factory)().map_err(|reason| {
                    log::error!(target: "microsing::session", "sound output unavailable: {}", reason);
                    Error::SoundSinkUnavailable(reason)
                })?;
                let mut scheduler = PlaybackScheduler::from_config(sink, &self.config.playback);
                scheduler.set_speed(self.speed);
                scheduler.set_volume(self.volume);
                *scheduler.observers_mut() = std::mem::take(&mut self.pending_observers);
                scheduler
            }
        };
        Ok(self.scheduler.insert(scheduler))
    }
}
