use crate::domain::ports::HeadlineSource;
use crate::utils::error::{MorseError, Result};
use async_trait::async_trait;
use regex::{Captures, Regex};
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://apnews.com/rss";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const MAX_HEADLINE_CHARS: usize = 40;
const MAX_ERROR_CHARS: usize = 30;

static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<item\b[^>]*>(.*?)</item>").unwrap());
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<title\b[^>]*/>|<title\b[^>]*>(.*?)</title>").unwrap()
});
static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").unwrap());

/// Fetches the first item title of an RSS feed.
pub struct RssHeadlineSource {
    client: Client,
    feed_url: String,
}

impl RssHeadlineSource {
    pub fn new(feed_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("morse-news/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    async fn try_fetch(&self) -> Result<String> {
        tracing::debug!("Requesting feed: {}", self.feed_url);
        let response = self
            .client
            .get(&self.feed_url)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("Feed response status: {}", response.status());
        let body = response.text().await?;

        if !body.trim_start().starts_with('<') {
            return Err(MorseError::Feed {
                message: "response is not XML".to_string(),
            });
        }

        Ok(headline_from_feed(&body))
    }
}

#[async_trait]
impl HeadlineSource for RssHeadlineSource {
    async fn fetch_headline(&self) -> String {
        match self.try_fetch().await {
            Ok(headline) => headline,
            Err(e) => {
                tracing::warn!("Headline fetch failed: {}", e);
                format!("RSS ERROR: {}", error_detail(&e))
            }
        }
    }
}

/// The underlying cause without this crate's variant prefix, cut to fit a headline.
fn error_detail(e: &MorseError) -> String {
    let detail = match e {
        MorseError::Http(inner) => inner.to_string(),
        MorseError::Feed { message } => message.clone(),
        other => other.to_string(),
    };
    detail.chars().take(MAX_ERROR_CHARS).collect()
}

/// Picks the headline out of an RSS document.
///
/// The first `<item>` carrying a `<title>` wins. Its text is cut to 40
/// characters; an empty title gives `NO TITLE` and a feed without titled
/// items gives `NO HEADLINES`.
pub fn headline_from_feed(xml: &str) -> String {
    for item in ITEM_RE.captures_iter(xml) {
        let Some(title) = TITLE_RE.captures(&item[1]) else {
            continue;
        };

        let text = title.get(1).map(|m| xml_text(m.as_str())).unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return "NO TITLE".to_string();
        }
        return text.chars().take(MAX_HEADLINE_CHARS).collect();
    }

    "NO HEADLINES".to_string()
}

fn xml_text(raw: &str) -> String {
    // CDATA content is literal; everything else gets entity decoding.
    let mut out = String::new();
    let mut last = 0;
    for cdata in CDATA_RE.captures_iter(raw) {
        let whole = cdata.get(0).map(|m| m.range()).unwrap_or(0..0);
        out.push_str(&decode_entities(&raw[last..whole.start]));
        out.push_str(&cdata[1]);
        last = whole.end;
    }
    out.push_str(&decode_entities(&raw[last..]));
    out
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .unwrap_or_else(|| entity[1..].parse())
                    .ok()
                    .and_then(char::from_u32),
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
