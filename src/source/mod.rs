pub mod rss;

pub use rss::RssHeadlineSource;

use crate::domain::ports::HeadlineSource;
use async_trait::async_trait;

/// Plays a fixed text instead of going to the network.
#[derive(Debug, Clone)]
pub struct StaticHeadlineSource {
    text: String,
}

impl StaticHeadlineSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl HeadlineSource for StaticHeadlineSource {
    async fn fetch_headline(&self) -> String {
        self.text.clone()
    }
}
