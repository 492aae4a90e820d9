use crate::audio::Backend;
use crate::domain::model::Spacing;
use crate::utils::error::{MorseError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub playback: PlaybackSection,
    pub source: SourceSection,
    pub audio: AudioSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackSection {
    pub wpm: Option<u32>,
    pub frequency_hz: Option<u32>,
    pub note: Option<String>,
    pub spacing: Option<Spacing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSection {
    pub feed_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioSection {
    pub backend: Option<Backend>,
    pub volume: Option<f32>,
    pub player_command: Option<String>,
    pub pwm_chip: Option<u32>,
    pub pwm_channel: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// Loads a config file, expanding `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MorseError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the variable's value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(wpm) = self.playback.wpm {
            validation::validate_range("playback.wpm", wpm, super::MIN_WPM, super::MAX_WPM)?;
        }
        if let Some(freq) = self.playback.frequency_hz {
            validation::validate_positive_number("playback.frequency_hz", u64::from(freq), 1)?;
        }
        if let Some(note) = &self.playback.note {
            crate::utils::note::note_frequency(note)?;
        }
        if let Some(url) = &self.source.feed_url {
            validation::validate_url("source.feed_url", url)?;
        }
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        if let Some(volume) = self.audio.volume {
            validation::validate_volume("audio.volume", volume)?;
        }
        if let Some(command) = &self.audio.player_command {
            validation::validate_non_empty_string("audio.player_command", command)?;
        }
        Ok(())
    }
}
