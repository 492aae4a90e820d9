use crate::domain::model::Spacing;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Something that can sound a tone: a speaker, a buzzer, or nothing at all.
#[async_trait]
pub trait ToneSink: Send + Sync {
    /// Sounds a tone and returns once it has finished.
    async fn tone(&self, duration: Duration, frequency_hz: u32) -> Result<()>;

    /// Stays silent for `duration`.
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Never fails: problems are reported as the returned text.
    async fn fetch_headline(&self) -> String;
}

pub trait PlaybackSettings: Send + Sync {
    fn wpm(&self) -> u32;
    fn frequency_hz(&self) -> u32;
    fn spacing(&self) -> Spacing;
}
