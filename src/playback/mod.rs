//! Speed adjustable playback of note blocks.
//!
//! A [`PlaybackScheduler`] owns the transport state and turns note blocks
//! into timed tones on a [`SoundSink`]. The timeline position advances at
//! `speed` seconds per second of sink time:
//!
//! ```text
//! elapsed = (sink time - clock origin) * speed
//! ```
//!
//! Pausing captures `elapsed`; resuming moves the clock origin so that the
//! position continues from where it was. Tones are planned from the current
//! position every time playback starts or resumes, so a speed change while
//! playing is a pause followed by a resume at the new speed.
//!
//! ```
//! use microsing::note::NoteLabel;
//! use microsing::playback::{PlayOutcome, PlaybackScheduler, SoundSink, Status};
//! use microsing::segment::NoteBlock;
//! use microsing::synth::PianoSynth;
//!
//! let mut scheduler = PlaybackScheduler::new(PianoSynth::new(44100.0));
//! scheduler.load(vec![NoteBlock { note: NoteLabel::A4, start_time: 0.0, duration: 0.5 }]);
//! assert_eq!(scheduler.play(), PlayOutcome::Started);
//!
//! // Render the audio, ticking once per 735 frame block (60 ticks/s)
//! let mut buffer = [0.0; 735];
//! while scheduler.status() == Status::Playing {
//!     scheduler.sink_mut().render(&mut buffer);
//!     scheduler.tick();
//! }
//! assert!(scheduler.sink().current_time() >= 0.5);
//! ```

mod observer;
mod scheduler;
mod sink;
mod state;

pub use observer::{ProgressObserver, ProgressObservers, SubscriptionId};
pub use scheduler::{plan_onsets, PlayOutcome, PlaybackScheduler, ScheduledOnset};
pub use sink::{SoundSink, VoiceHandle};
pub use state::{clamp_speed, PlaybackState, Status, MAX_SPEED, MIN_SPEED};

#[cfg(test)]
pub(crate) use scheduler::tests::RecordingSink;
