use thiserror::Error;

#[derive(Error, Debug)]
pub enum MorseError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Feed error: {message}")]
    Feed { message: String },

    #[error("Playback error: {message}")]
    Playback { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid note name '{name}'")]
    InvalidNote { name: String },
}

impl MorseError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MorseError::Config { .. }
                | MorseError::InvalidConfigValue { .. }
                | MorseError::TomlParse(_)
                | MorseError::InvalidNote { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MorseError::Http(_) => "Could not reach the headline feed".to_string(),
            MorseError::Io(e) => format!("File or device access failed: {}", e),
            MorseError::Serialization(_) => "Could not render the schedule as JSON".to_string(),
            MorseError::Feed { message } => format!("The feed could not be read: {}", message),
            MorseError::Playback { message } => format!("A tone could not be played: {}", message),
            MorseError::Config { message } => format!("Invalid configuration: {}", message),
            MorseError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            MorseError::TomlParse(_) => "The configuration file is not valid TOML".to_string(),
            MorseError::InvalidNote { name } => format!("'{}' is not a note name", name),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MorseError::Http(_) | MorseError::Feed { .. } => {
                "Check the network connection and the --feed-url value"
            }
            MorseError::Io(_) => "Check file paths and permissions",
            MorseError::Serialization(_) => "Retry without --json",
            MorseError::Playback { .. } => {
                "Install SoX (for the 'play' command) or choose another --backend"
            }
            MorseError::Config { .. } | MorseError::InvalidConfigValue { .. } => {
                "Run with --help to see accepted values"
            }
            MorseError::TomlParse(_) => "Fix the syntax of the file passed to --config",
            MorseError::InvalidNote { .. } => "Use scientific pitch notation such as A4, C#5 or Bb3",
        }
    }
}

pub type Result<T> = std::result::Result<T, MorseError>;
