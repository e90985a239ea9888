//! Equal temperament mapping between frequencies and note labels, A4 = 440 Hz.
//!
//! ```
//! use microsing::note::{frequency_to_note, note_to_frequency, NoteLabel};
//!
//! let note = frequency_to_note(261.6);
//! assert_eq!(note.to_string(), "C4");
//! assert!((note_to_frequency(note) - 261.63).abs() < 0.01);
//! assert_eq!(NoteLabel::parse_or_default("C#5").to_string(), "C#5");
//! ```

mod label;

pub use label::{Letter, NoteLabel, ParseNoteError};

use crate::common::{freq_to_midi_note, A4_FREQUENCY, A4_MIDI_NOTE};

/// Keeps exact semitone frequencies on the right side of rounding.
const EPSILON: f64 = 1e-4;

/// Returns the nearest note. Non-finite and non-positive frequencies map to A4.
pub fn frequency_to_note(frequency: f32) -> NoteLabel {
    if !frequency.is_finite() || frequency <= 0.0 {
        log::debug!(target: "microsing::note", "invalid frequency {}, using A4", frequency);
        return NoteLabel::A4;
    }
    let n = 12.0 * (frequency as f64 / A4_FREQUENCY as f64).log2() + A4_MIDI_NOTE as f64;
    NoteLabel::from_midi_number((n + EPSILON).round() as i32)
}

/// Returns the equal temperament frequency of `note` in Hz.
pub fn note_to_frequency(note: NoteLabel) -> f32 {
    let semitone = note.midi_number() as f64;
    (A4_FREQUENCY as f64 * 2.0_f64.powf((semitone - A4_MIDI_NOTE as f64) / 12.0)) as f32
}

/// Parses `label` and returns its frequency, or 440 Hz if the label is malformed.
pub fn label_to_frequency(label: &str) -> f32 {
    note_to_frequency(NoteLabel::parse_or_default(label))
}

/// The deviation in cents of `frequency` from its nearest note, between -50 and 50.
/// Returns `None` for invalid frequencies.
pub fn cents_from_note(frequency: f32) -> Option<f32> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }
    let note_number = freq_to_midi_note(frequency);
    Some(100.0 * (note_number - note_number.round()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4() {
        assert_eq!(frequency_to_note(440.0), NoteLabel::A4);
        assert_eq!(note_to_frequency(NoteLabel::A4), 440.0);
    }

    #[test]
    fn test_exact_semitones_round_trip() {
        for number in 0..128 {
            let note = NoteLabel::from_midi_number(number);
            let frequency = note_to_frequency(note);
            assert_eq!(frequency_to_note(frequency), note, "{} Hz", frequency);
        }
    }

    #[test]
    fn test_quantization() {
        assert_eq!(frequency_to_note(261.6).to_string(), "C4");
        assert_eq!(frequency_to_note(293.7).to_string(), "D4");
        // A quarter tone above A4 rounds up
        assert_eq!(frequency_to_note(453.0).to_string(), "A#4");
        assert_eq!(frequency_to_note(452.0).to_string(), "A4");
        // B3 is 246.94 Hz, just below the octave boundary
        assert_eq!(frequency_to_note(250.0).to_string(), "B3");
    }

    #[test]
    fn test_flat_c_keeps_its_octave() {
        assert_eq!(frequency_to_note(261.0).to_string(), "C4");
        assert_eq!(frequency_to_note(262.0).to_string(), "C4");
        assert_eq!(frequency_to_note(130.5).to_string(), "C3");
        assert_eq!(frequency_to_note(16.2).to_string(), "C0");
        // Sharp B rounds up into the next octave
        assert_eq!(frequency_to_note(257.0).to_string(), "C4");
    }

    #[test]
    fn test_low_octaves() {
        assert_eq!(frequency_to_note(8.1758).to_string(), "C-1");
        assert_eq!(frequency_to_note(7.7169).to_string(), "B-2");
        assert!((note_to_frequency("C-1".parse().unwrap()) - 8.1758).abs() < 1e-3);
    }

    #[test]
    fn test_cents() {
        assert!(cents_from_note(440.0).unwrap().abs() < 1e-3);
        // One cent is a frequency ratio of 2^(1/1200)
        let sharp = 440.0 * 2.0_f32.powf(10.0 / 1200.0);
        assert!((cents_from_note(sharp).unwrap() - 10.0).abs() < 0.01);
        let flat = 261.6256 * 2.0_f32.powf(-25.0 / 1200.0);
        assert!((cents_from_note(flat).unwrap() + 25.0).abs() < 0.01);
        assert_eq!(cents_from_note(0.0), None);
    }

    #[test]
    fn test_invalid_input_falls_back_to_a4() {
        assert_eq!(frequency_to_note(0.0), NoteLabel::A4);
        assert_eq!(frequency_to_note(-1.0), NoteLabel::A4);
        assert_eq!(frequency_to_note(f32::NAN), NoteLabel::A4);
        assert_eq!(frequency_to_note(f32::INFINITY), NoteLabel::A4);
        assert_eq!(label_to_frequency("X9"), 440.0);
        assert!((label_to_frequency("C4") - 261.6256).abs() < 1e-3);
    }
}
