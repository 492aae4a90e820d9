pub mod settings;
pub mod toml_config;

pub use settings::AppConfig;
pub use toml_config::TomlConfig;

pub const MIN_WPM: u32 = 5;
pub const MAX_WPM: u32 = 30;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::{AppConfig, TomlConfig, MAX_WPM, MIN_WPM};
    use crate::audio::Backend;
    use crate::domain::model::Spacing;
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::note::note_frequency;
    use clap::Parser;
    use std::path::PathBuf;

    /// Flags left unset fall back to the config file, then to built-in defaults.
    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "morse-news")]
    #[command(about = "Plays a news headline as Morse code")]
    pub struct CliConfig {
        #[arg(long, value_parser = clap::value_parser!(u32).range(i64::from(MIN_WPM)..=i64::from(MAX_WPM)), help = "Words per minute (5-30) [default: 20]")]
        pub wpm: Option<u32>,

        #[arg(long, help = "Tone frequency in Hz, 400-1200 recommended [default: 800]")]
        pub freq: Option<u32>,

        #[arg(long, conflicts_with = "freq", help = "Note name such as A4 or C#5, instead of --freq")]
        pub note: Option<String>,

        #[arg(long, help = "Play this text instead of fetching a headline")]
        pub text: Option<String>,

        #[arg(long, help = "RSS feed to take the headline from")]
        pub feed_url: Option<String>,

        #[arg(long, help = "Headline fetch timeout in seconds [default: 10]")]
        pub timeout_seconds: Option<u64>,

        #[arg(long, value_enum, help = "Tone backend [default: sox]")]
        pub backend: Option<Backend>,

        #[arg(long, help = "SoX volume factor, above 0 and at most 1 [default: 0.3]")]
        pub volume: Option<f32>,

        #[arg(long, help = "SoX player executable [default: play]")]
        pub player_command: Option<String>,

        #[arg(long)]
        pub pwm_chip: Option<u32>,

        #[arg(long)]
        pub pwm_channel: Option<u32>,

        #[arg(long, help = "Use 3-dit character and 7-dit word gaps")]
        pub itu_spacing: bool,

        #[arg(long, help = "Print the schedule instead of playing it")]
        pub dry_run: bool,

        #[arg(long, requires = "dry_run", help = "Print the dry-run schedule as JSON")]
        pub json: bool,

        #[arg(long, help = "TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, value_enum)]
        pub log_format: Option<LogFormat>,
    }

    impl CliConfig {
        pub fn load_file(&self) -> Result<Option<TomlConfig>> {
            self.config.as_ref().map(TomlConfig::from_file).transpose()
        }

        /// Layers defaults, the config file and these flags, in that order.
        pub fn resolve(&self, file: Option<&TomlConfig>) -> Result<AppConfig> {
            let mut config = AppConfig::default();
            if let Some(file) = file {
                config.apply_toml(file)?;
            }

            if let Some(wpm) = self.wpm {
                config.wpm = wpm;
            }
            if let Some(freq) = self.freq {
                config.frequency_hz = freq;
            }
            if let Some(note) = &self.note {
                config.frequency_hz = note_frequency(note)?;
            }
            if self.itu_spacing {
                config.spacing = Spacing::Itu;
            }
            if self.text.is_some() {
                config.text = self.text.clone();
            }
            if let Some(url) = &self.feed_url {
                config.feed_url = url.clone();
            }
            if let Some(timeout) = self.timeout_seconds {
                config.timeout_seconds = timeout;
            }
            if let Some(backend) = self.backend {
                config.backend = backend;
            }
            if let Some(volume) = self.volume {
                config.volume = volume;
            }
            if let Some(command) = &self.player_command {
                config.player_command = command.clone();
            }
            if let Some(chip) = self.pwm_chip {
                config.pwm_chip = chip;
            }
            if let Some(channel) = self.pwm_channel {
                config.pwm_channel = channel;
            }

            Ok(config)
        }

        pub fn verbose(&self, file: Option<&TomlConfig>) -> bool {
            self.verbose || file.and_then(|f| f.logging.verbose).unwrap_or(false)
        }

        pub fn log_format(&self, file: Option<&TomlConfig>) -> LogFormat {
            self.log_format
                .or_else(|| file.and_then(|f| f.logging.format))
                .unwrap_or_default()
        }
    }

}
