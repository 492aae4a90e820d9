use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::error::{MorseError, Result};

/// Token standing in for a space character in an encoded message.
pub const WORD_SEPARATOR: &str = "/";

/// Seconds per dit at one word per minute (the PARIS standard word is 50 dits).
const PARIS_DIT_SECONDS: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    /// Tone length in dits.
    pub fn dits(self) -> u32 {
        match self {
            Symbol::Dot => 1,
            Symbol::Dash => 3,
        }
    }
}

/// Ordered marks for one character, e.g. `.-` for `A`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterCode(Vec<Symbol>);

impl CharacterCode {
    /// Parses a `.`/`-` pattern. Returns `None` if any other character appears.
    pub fn parse(pattern: &str) -> Option<Self> {
        pattern
            .chars()
            .map(Symbol::from_char)
            .collect::<Option<Vec<_>>>()
            .map(CharacterCode)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CharacterCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// Gap policy applied after characters and words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Adds 3 dits after each character and 7 after each word on top of the
    /// 1-dit gap that follows every mark, giving 4- and 11-dit silences.
    #[default]
    Reference,
    /// Canonical ITU silences: 3 dits between characters, 7 between words.
    Itu,
}

impl Spacing {
    /// Extra dits waited after a character's last mark gap.
    pub fn character_gap_dits(self) -> u32 {
        match self {
            Spacing::Reference => 3,
            Spacing::Itu => 2,
        }
    }

    /// Extra dits waited after a word's last character gap.
    pub fn word_gap_dits(self) -> u32 {
        match self {
            Spacing::Reference => 7,
            Spacing::Itu => 4,
        }
    }
}

/// Durations derived from a words-per-minute speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    wpm: u32,
    dit: Duration,
}

impl Timing {
    pub fn from_wpm(wpm: u32) -> Result<Self> {
        if wpm == 0 {
            return Err(MorseError::InvalidConfigValue {
                field: "wpm".to_string(),
                value: wpm.to_string(),
                reason: "Words per minute must be positive".to_string(),
            });
        }

        let dit = Duration::from_secs_f64(PARIS_DIT_SECONDS / f64::from(wpm));
        if dit.is_zero() {
            return Err(MorseError::InvalidConfigValue {
                field: "wpm".to_string(),
                value: wpm.to_string(),
                reason: "Too fast: a dit would last less than a nanosecond".to_string(),
            });
        }

        Ok(Self { wpm, dit })
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn dit(&self) -> Duration {
        self.dit
    }

    pub fn dits(&self, count: u32) -> Duration {
        self.dit * count
    }

    pub fn symbol(&self, symbol: Symbol) -> Duration {
        self.dits(symbol.dits())
    }
}

/// One step of a playback schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MorseEvent {
    Tone {
        #[serde(with = "duration_secs")]
        duration: Duration,
        frequency_hz: u32,
    },
    Silence {
        #[serde(with = "duration_secs")]
        duration: Duration,
    },
}

impl MorseEvent {
    pub fn duration(&self) -> Duration {
        match self {
            MorseEvent::Tone { duration, .. } | MorseEvent::Silence { duration } => *duration,
        }
    }

    pub fn is_tone(&self) -> bool {
        matches!(self, MorseEvent::Tone { .. })
    }
}

/// Outcome of playing a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackReport {
    /// Tones handed to the sink, including the ones that failed.
    pub tones_emitted: usize,
    pub tones_failed: usize,
    /// Sum of every tone and silence in the schedule.
    pub scheduled: Duration,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
