pub mod pwm;
pub mod sox;

pub use pwm::PwmBuzzer;
pub use sox::SoxPlayer;

use crate::domain::ports::ToneSink;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SoX `play` subprocess
    #[default]
    Sox,
    /// Piezo buzzer on a sysfs PWM channel
    Pwm,
    /// No sound, timing only
    Silent,
}

/// Keeps time without making a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

#[async_trait]
impl ToneSink for SilentSink {
    async fn tone(&self, duration: Duration, frequency_hz: u32) -> Result<()> {
        tracing::trace!("Silent tone {:?} at {} Hz", duration, frequency_hz);
        tokio::time::sleep(duration).await;
        Ok(())
    }
}

#[async_trait]
impl<T: ToneSink + ?Sized> ToneSink for Box<T> {
    async fn tone(&self, duration: Duration, frequency_hz: u32) -> Result<()> {
        (**self).tone(duration, frequency_hz).await
    }

    async fn pause(&self, duration: Duration) {
        (**self).pause(duration).await
    }
}

pub struct SinkOptions<'a> {
    pub backend: Backend,
    pub player_command: &'a str,
    pub volume: f32,
    pub pwm_chip: u32,
    pub pwm_channel: u32,
}

/// Opens the requested backend. The PWM channel stays claimed until the
/// returned sink is dropped. A channel that cannot be claimed falls back to
/// [`SilentSink`] so the broadcast still runs with its timing intact.
pub async fn open_sink(options: &SinkOptions<'_>) -> Box<dyn ToneSink> {
    open_sink_at(options, pwm::SYSFS_PWM_ROOT).await
}

/// [`open_sink`] with the sysfs PWM tree rooted at `pwm_root`.
pub async fn open_sink_at(
    options: &SinkOptions<'_>,
    pwm_root: impl AsRef<Path>,
) -> Box<dyn ToneSink> {
    match options.backend {
        Backend::Sox => Box::new(SoxPlayer::new(options.player_command, options.volume)),
        Backend::Pwm => {
            match PwmBuzzer::acquire_at(pwm_root, options.pwm_chip, options.pwm_channel).await {
                Ok(buzzer) => Box::new(buzzer),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Could not claim PWM channel {} on chip {}, playing silently: {}",
                        options.pwm_channel,
                        options.pwm_chip,
                        e
                    );
                    Box::new(SilentSink)
                }
            }
        }
        Backend::Silent => Box::new(SilentSink),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(backend: Backend) -> SinkOptions<'static> {
        SinkOptions {
            backend,
            player_command: "play",
            volume: 0.3,
            pwm_chip: 0,
            pwm_channel: 0,
        }
    }

    #[tokio::test]
    async fn test_silent_sink_takes_tone_duration() {
        let start = tokio::time::Instant::now();
        SilentSink
            .tone(Duration::from_millis(20), 800)
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_boxed_sink_forwards() {
        let sink = open_sink(&options(Backend::Silent)).await;
        assert!(sink.tone(Duration::from_millis(1), 800).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_pwm_chip_falls_back_to_silent() {
        let root = TempDir::new().unwrap();

        let sink = open_sink_at(&options(Backend::Pwm), root.path()).await;

        assert!(sink.tone(Duration::from_millis(1), 800).await.is_ok());
        assert!(!root.path().join("pwmchip0").exists());
    }

    #[tokio::test]
    async fn test_unwritable_pwm_export_falls_back_to_silent() {
        let root = TempDir::new().unwrap();
        // A directory where the export file should be makes the write fail.
        std::fs::create_dir_all(root.path().join("pwmchip0/export")).unwrap();

        let sink = open_sink_at(&options(Backend::Pwm), root.path()).await;

        assert!(sink.tone(Duration::from_millis(1), 800).await.is_ok());
        assert!(!root.path().join("pwmchip0/pwm0").exists());
    }

    #[test]
    fn test_backend_names() {
        let backend: Backend = serde_json::from_str("\"pwm\"").unwrap();
        assert_eq!(backend, Backend::Pwm);
        assert_eq!(Backend::default(), Backend::Sox);
    }
}
