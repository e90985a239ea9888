/// The MIDI note number of A4.
pub const A4_MIDI_NOTE: f32 = 69.0;
/// The equal temperament reference frequency, in Hz.
pub const A4_FREQUENCY: f32 = 440.0;

/// Converts a frequency in Hz to a [MIDI](https://en.wikipedia.org/wiki/MIDI) note number (with a fractional part).
pub fn freq_to_midi_note(freq: f32) -> f32 {
    12.0 * (freq / A4_FREQUENCY).log2() + A4_MIDI_NOTE
}
