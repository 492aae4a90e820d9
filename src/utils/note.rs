//! Note names in scientific pitch notation (`A4`, `C#5`, `Bb3`), tuned to A4 = 440 Hz.

use crate::utils::error::{MorseError, Result};

const A4_MIDI: i32 = 69;
const A4_HZ: f64 = 440.0;

fn semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Converts a note name into a MIDI note number.
pub fn midi_number(name: &str) -> Result<i32> {
    let invalid = || MorseError::InvalidNote {
        name: name.to_string(),
    };

    let mut chars = name.trim().chars().peekable();
    let letter = chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .and_then(semitone)
        .ok_or_else(invalid)?;

    let accidental = match chars.peek() {
        Some('#') | Some('♯') => {
            chars.next();
            1
        }
        Some('b') | Some('♭') => {
            chars.next();
            -1
        }
        _ => 0,
    };

    let octave: String = chars.collect();
    let octave: i32 = match octave.as_str() {
        o if o.len() == 1 => o.parse().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    Ok(12 * (octave + 1) + letter + accidental)
}

/// Converts a note name into its equal-tempered frequency, rounded to whole hertz.
pub fn note_frequency(name: &str) -> Result<u32> {
    let midi = midi_number(name)?;
    let hz = A4_HZ * 2f64.powf(f64::from(midi - A4_MIDI) / 12.0);
    Ok(hz.round() as u32)
}
