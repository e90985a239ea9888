//! Common algorithms and utilities.

mod f32_array_ext;
mod latest_window;
mod midi;

pub use f32_array_ext::F32ArrayExt;
pub use latest_window::LatestWindow;
pub use midi::{freq_to_midi_note, A4_FREQUENCY, A4_MIDI_NOTE};
