//! A simple piano-like synthesizer used as the default [`SoundSink`](crate::playback::SoundSink).
//!
//! Each tone is a triangle wave with a sine one octave up at a quarter of
//! its level, shaped by an [`Adsr`] envelope that ends with the tone.
//! Silencing ramps all sounding tones to zero over 50 ms to avoid clicks.

pub mod envelope;
mod piano;
mod voice;

pub use envelope::{Adsr, Fade};
pub use piano::PianoSynth;
