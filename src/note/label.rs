use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The twelve pitch classes of equal temperament, sharps only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "B")]
    B,
}

impl Letter {
    pub const ALL: [Letter; 12] = [
        Letter::C,
        Letter::CSharp,
        Letter::D,
        Letter::DSharp,
        Letter::E,
        Letter::F,
        Letter::FSharp,
        Letter::G,
        Letter::GSharp,
        Letter::A,
        Letter::ASharp,
        Letter::B,
    ];

    /// Semitones above C.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// The letter `index` semitones above C, wrapping around the octave.
    pub fn from_index(index: i32) -> Letter {
        Letter::ALL[index.rem_euclid(12) as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::CSharp => "C#",
            Letter::D => "D",
            Letter::DSharp => "D#",
            Letter::E => "E",
            Letter::F => "F",
            Letter::FSharp => "F#",
            Letter::G => "G",
            Letter::GSharp => "G#",
            Letter::A => "A",
            Letter::ASharp => "A#",
            Letter::B => "B",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Letter {
    type Error = ParseNoteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Letter::ALL
            .iter()
            .copied()
            .find(|letter| letter.as_str() == value)
            .ok_or_else(|| ParseNoteError::InvalidLetter(value.to_string()))
    }
}

/// Failure to parse a note label such as `C#4`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNoteError {
    #[error("empty note label")]
    Empty,
    #[error("invalid note letter \"{0}\"")]
    InvalidLetter(String),
    #[error("invalid octave \"{0}\"")]
    InvalidOctave(String),
}

/// A note letter and octave, e.g. `A4`. Octave 4 starts at middle C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteLabel {
    pub letter: Letter,
    pub octave: i32,
}

impl NoteLabel {
    /// The label used wherever a frequency or label is invalid.
    pub const A4: NoteLabel = NoteLabel {
        letter: Letter::A,
        octave: 4,
    };

    pub fn new(letter: Letter, octave: i32) -> Self {
        NoteLabel { letter, octave }
    }

    /// Parses `label`, substituting A4 if it is malformed.
    pub fn parse_or_default(label: &str) -> NoteLabel {
        match label.parse() {
            Ok(note) => note,
            Err(err) => {
                log::debug!(target: "microsing::note", "{}, using A4", err);
                NoteLabel::A4
            }
        }
    }

    /// The MIDI note number, i.e. 69 for A4.
    pub fn midi_number(&self) -> i32 {
        self.letter.index() + (self.octave + 1) * 12
    }

    pub fn from_midi_number(number: i32) -> NoteLabel {
        NoteLabel {
            letter: Letter::from_index(number),
            octave: number.div_euclid(12) - 1,
        }
    }
}

impl Default for NoteLabel {
    fn default() -> Self {
        NoteLabel::A4
    }
}

impl fmt::Display for NoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.octave)
    }
}

/// Accepts `[A-G]#?-?[0-9]+`, nothing else.
impl FromStr for NoteLabel {
    type Err = ParseNoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first = s.chars().next().ok_or(ParseNoteError::Empty)?;
        if !('A'..='G').contains(&first) {
            return Err(ParseNoteError::InvalidLetter(s.to_string()));
        }
        let letter_len = if s[1..].starts_with('#') { 2 } else { 1 };
        let (letter, octave) = s.split_at(letter_len);
        let letter = Letter::try_from(letter)?;

        let digits = octave.strip_prefix('-').unwrap_or(octave);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseNoteError::InvalidOctave(octave.to_string()));
        }
        let octave = octave
            .parse::<i32>()
            .map_err(|_| ParseNoteError::InvalidOctave(octave.to_string()))?;

        Ok(NoteLabel { letter, octave })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("A4".parse(), Ok(NoteLabel::A4));
        assert_eq!("C#-1".parse(), Ok(NoteLabel::new(Letter::CSharp, -1)));
        assert_eq!("G10".parse(), Ok(NoteLabel::new(Letter::G, 10)));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!("".parse::<NoteLabel>(), Err(ParseNoteError::Empty));
        for label in ["H4", "c4", "Db4", "E#4", "A", "A#", "A+4", "A4 ", " A4", "A-", "A--1", "A4.0"].iter() {
            assert!(label.parse::<NoteLabel>().is_err(), "{} was accepted", label);
        }
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(NoteLabel::parse_or_default("D#3"), NoteLabel::new(Letter::DSharp, 3));
        assert_eq!(NoteLabel::parse_or_default("nonsense"), NoteLabel::A4);
    }

    #[test]
    fn test_display_round_trip() {
        for number in -24..140 {
            let note = NoteLabel::from_midi_number(number);
            assert_eq!(note.midi_number(), number);
            assert_eq!(note.to_string().parse(), Ok(note));
        }
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(NoteLabel::A4.midi_number(), 69);
        assert_eq!(NoteLabel::new(Letter::C, 4).midi_number(), 60);
        assert_eq!(NoteLabel::from_midi_number(0), NoteLabel::new(Letter::C, -1));
        assert_eq!(NoteLabel::from_midi_number(-1), NoteLabel::new(Letter::B, -2));
    }
}
