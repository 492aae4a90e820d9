//! Piezo buzzer on a Linux sysfs PWM channel.
//!
//! The channel is claimed by [`PwmBuzzer::acquire`] and released when the
//! handle drops, whichever way the caller leaves.

use crate::domain::ports::ToneSink;
use crate::utils::error::{MorseError, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

pub const SYSFS_PWM_ROOT: &str = "/sys/class/pwm";

const NANOS_PER_SECOND: u64 = 1_000_000_000;
const EXPORT_TIMEOUT: Duration = Duration::from_millis(500);
const EXPORT_POLL: Duration = Duration::from_millis(10);

#[derive(Debug)]
pub struct PwmBuzzer {
    chip_dir: PathBuf,
    channel_dir: PathBuf,
    channel: u32,
    exported: bool,
}

impl PwmBuzzer {
    pub async fn acquire(chip: u32, channel: u32) -> Result<Self> {
        Self::acquire_at(SYSFS_PWM_ROOT, chip, channel).await
    }

    /// Claims `pwmchip<chip>/pwm<channel>` below `root`.
    pub async fn acquire_at(root: impl AsRef<Path>, chip: u32, channel: u32) -> Result<Self> {
        let chip_dir = root.as_ref().join(format!("pwmchip{}", chip));
        if !chip_dir.is_dir() {
            return Err(MorseError::Config {
                message: format!("PWM chip not found at {}", chip_dir.display()),
            });
        }

        let channel_dir = chip_dir.join(format!("pwm{}", channel));
        let exported = !channel_dir.is_dir();
        if exported {
            fs::write(chip_dir.join("export"), channel.to_string())?;
            wait_for_dir(&channel_dir).await?;
            tracing::debug!("Exported PWM channel {}", channel_dir.display());
        }

        let buzzer = Self {
            chip_dir,
            channel_dir,
            channel,
            exported,
        };
        buzzer.write("enable", "0")?;
        Ok(buzzer)
    }

    fn write(&self, attribute: &str, value: &str) -> Result<()> {
        fs::write(self.channel_dir.join(attribute), value)?;
        Ok(())
    }

    /// Square wave at 50 % duty.
    fn start(&self, frequency_hz: u32) -> Result<()> {
        if frequency_hz == 0 {
            return Err(MorseError::Playback {
                message: "frequency must be positive".to_string(),
            });
        }
        let period = NANOS_PER_SECOND / u64::from(frequency_hz);

        // The kernel rejects a duty cycle longer than the period, so clear it first.
        self.write("duty_cycle", "0")?;
        self.write("period", &period.to_string())?;
        self.write("duty_cycle", &(period / 2).to_string())?;
        self.write("enable", "1")
    }

    fn stop(&self) -> Result<()> {
        self.write("enable", "0")
    }
}

async fn wait_for_dir(dir: &Path) -> Result<()> {
    let started = Instant::now();
    while !dir.is_dir() {
        if started.elapsed() > EXPORT_TIMEOUT {
            return Err(MorseError::Config {
                message: format!("PWM channel did not appear at {}", dir.display()),
            });
        }
        tokio::time::sleep(EXPORT_POLL).await;
    }
    Ok(())
}

#[async_trait]
impl ToneSink for PwmBuzzer {
    async fn tone(&self, duration: Duration, frequency_hz: u32) -> Result<()> {
        self.start(frequency_hz)?;
        tokio::time::sleep(duration).await;
        self.stop()
    }
}

impl Drop for PwmBuzzer {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::debug!("Failed to silence PWM channel: {}", e);
        }
        if self.exported {
            if let Err(e) = fs::write(self.chip_dir.join("unexport"), self.channel.to_string()) {
                tracing::debug!("Failed to unexport PWM channel {}: {}", self.channel, e);
            }
        }
    }
}
