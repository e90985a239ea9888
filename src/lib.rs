//! Real time pitch tracking, note segmentation and speed adjustable playback
//! for comparing sung pitch against a target melody.
//!
//! The processing chain is
//!
//! * [`acf`] - estimates the fundamental frequency of audio windows using
//! time domain autocorrelation, producing a stream of [`track::PitchSample`]s.
//! * [`note`] - maps frequencies to equal temperament note labels and back.
//! * [`segment`] - turns a pitch contour into a sequence of note blocks.
//! * [`playback`] - plays note blocks on a [`playback::SoundSink`], with
//! pause, resume and speed changes.
//!
//! [`synth::PianoSynth`] is a sound sink rendering a simple piano-like tone
//! and [`session::Session`] ties everything together for a user interface.
//!
//! # Examples
//!
//! Segmenting a reference track and rendering it offline.
//! ```
//! use microsing::playback::{PlaybackScheduler, Status};
//! use microsing::segment::NoteSegmenter;
//! use microsing::synth::PianoSynth;
//! use microsing::track::ReferencePitch;
//!
//! let reference = ReferencePitch::from_json(r#"{"status": "success", "samples": [
//!     {"time": 0.0, "frequency": 261.6},
//!     {"time": 0.2, "frequency": 329.6},
//!     {"time": 0.4, "frequency": 392.0}
//! ]}"#).unwrap();
//! let track = reference.into_track().unwrap();
//! let blocks = NoteSegmenter::default().segment(&track.to_vec());
//! assert_eq!(blocks.len(), 3);
//!
//! let mut scheduler = PlaybackScheduler::new(PianoSynth::new(22050.0));
//! scheduler.load(blocks);
//! scheduler.play();
//!
//! let mut audio = Vec::new();
//! let mut chunk = [0.0; 512];
//! while scheduler.status() == Status::Playing {
//!     scheduler.sink_mut().render(&mut chunk);
//!     audio.extend_from_slice(&chunk);
//!     scheduler.tick();
//! }
//! assert!(audio.len() >= 11025);
//! ```

pub mod acf;
pub mod common;
pub mod config;
pub mod error;
pub mod note;
pub mod playback;
pub mod segment;
pub mod session;
pub mod synth;
pub mod track;

pub use error::{Error, Result};
