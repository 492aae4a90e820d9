use crate::domain::ports::ToneSink;
use crate::utils::error::{MorseError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_PLAYER_COMMAND: &str = "play";
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Plays sine tones through SoX's `play` command, one process per tone.
#[derive(Debug, Clone)]
pub struct SoxPlayer {
    command: String,
    volume: f32,
}

impl SoxPlayer {
    pub fn new(command: impl Into<String>, volume: f32) -> Self {
        Self {
            command: command.into(),
            volume,
        }
    }

    /// Arguments for `play -n synth <secs> sine <hz> vol <volume> remix -`.
    pub fn args(&self, duration: Duration, frequency_hz: u32) -> Vec<String> {
        vec![
            "-n".to_string(),
            "synth".to_string(),
            format!("{:.3}", duration.as_secs_f64()),
            "sine".to_string(),
            frequency_hz.to_string(),
            "vol".to_string(),
            self.volume.to_string(),
            "remix".to_string(),
            "-".to_string(),
        ]
    }
}

impl Default for SoxPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_COMMAND, DEFAULT_VOLUME)
    }
}

#[async_trait]
impl ToneSink for SoxPlayer {
    async fn tone(&self, duration: Duration, frequency_hz: u32) -> Result<()> {
        let status = Command::new(&self.command)
            .args(self.args(duration, frequency_hz))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            return Err(MorseError::Playback {
                message: format!("'{}' exited with {}", self.command, status),
            });
        }
        Ok(())
    }
}
