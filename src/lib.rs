pub mod audio;
pub mod config;
pub mod core;
pub mod domain;
pub mod source;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use audio::{Backend, PwmBuzzer, SilentSink, SoxPlayer};
pub use config::{AppConfig, TomlConfig};
pub use crate::core::engine::{Broadcast, BroadcastEngine, BroadcastPlan};
pub use crate::core::morse::{encode, encode_text, normalize};
pub use crate::core::player::MorsePlayer;
pub use source::{RssHeadlineSource, StaticHeadlineSource};
pub use utils::error::{MorseError, Result};
