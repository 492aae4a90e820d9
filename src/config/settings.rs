use crate::audio::sox::{DEFAULT_PLAYER_COMMAND, DEFAULT_VOLUME};
use crate::audio::{Backend, SinkOptions};
use crate::config::toml_config::TomlConfig;
use crate::config::{MAX_WPM, MIN_WPM};
use crate::domain::model::Spacing;
use crate::domain::ports::PlaybackSettings;
use crate::source::rss::{DEFAULT_FEED_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::Result;
use crate::utils::note::note_frequency;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_WPM: u32 = 20;
pub const DEFAULT_FREQUENCY_HZ: u32 = 800;
pub const RECOMMENDED_FREQUENCY_HZ: std::ops::RangeInclusive<u32> = 400..=1200;

/// Effective settings after defaults, the config file and CLI flags are layered.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub wpm: u32,
    pub frequency_hz: u32,
    pub spacing: Spacing,
    pub text: Option<String>,
    pub feed_url: String,
    pub timeout_seconds: u64,
    pub backend: Backend,
    pub volume: f32,
    pub player_command: String,
    pub pwm_chip: u32,
    pub pwm_channel: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            spacing: Spacing::Reference,
            text: None,
            feed_url: DEFAULT_FEED_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            backend: Backend::Sox,
            volume: DEFAULT_VOLUME,
            player_command: DEFAULT_PLAYER_COMMAND.to_string(),
            pwm_chip: 0,
            pwm_channel: 0,
        }
    }
}

impl AppConfig {
    /// Applies every value present in a config file. A note name beats a frequency.
    pub fn apply_toml(&mut self, file: &TomlConfig) -> Result<()> {
        let playback = &file.playback;
        if let Some(wpm) = playback.wpm {
            self.wpm = wpm;
        }
        if let Some(freq) = playback.frequency_hz {
            self.frequency_hz = freq;
        }
        if let Some(note) = &playback.note {
            self.frequency_hz = note_frequency(note)?;
        }
        if let Some(spacing) = playback.spacing {
            self.spacing = spacing;
        }

        let source = &file.source;
        if let Some(url) = &source.feed_url {
            self.feed_url = url.clone();
        }
        if let Some(timeout) = source.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if source.text.is_some() {
            self.text = source.text.clone();
        }

        let audio = &file.audio;
        if let Some(backend) = audio.backend {
            self.backend = backend;
        }
        if let Some(volume) = audio.volume {
            self.volume = volume;
        }
        if let Some(command) = &audio.player_command {
            self.player_command = command.clone();
        }
        if let Some(chip) = audio.pwm_chip {
            self.pwm_chip = chip;
        }
        if let Some(channel) = audio.pwm_channel {
            self.pwm_channel = channel;
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn sink_options(&self) -> SinkOptions<'_> {
        SinkOptions {
            backend: self.backend,
            player_command: &self.player_command,
            volume: self.volume,
            pwm_chip: self.pwm_chip,
            pwm_channel: self.pwm_channel,
        }
    }

    pub fn frequency_is_recommended(&self) -> bool {
        RECOMMENDED_FREQUENCY_HZ.contains(&self.frequency_hz)
    }
}

impl PlaybackSettings for AppConfig {
    fn wpm(&self) -> u32 {
        self.wpm
    }

    fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    fn spacing(&self) -> Spacing {
        self.spacing
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("wpm", self.wpm, MIN_WPM, MAX_WPM)?;
        validation::validate_positive_number("freq", u64::from(self.frequency_hz), 1)?;
        validation::validate_url("feed_url", &self.feed_url)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_volume("volume", self.volume)?;
        validation::validate_non_empty_string("player_command", &self.player_command)?;
        Ok(())
    }
}
