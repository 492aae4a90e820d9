use crate::core::morse::{encode, normalize};
use crate::core::player::MorsePlayer;
use crate::core::schedule::build_schedule;
use crate::domain::model::{MorseEvent, PlaybackReport, Timing};
use crate::domain::ports::{HeadlineSource, PlaybackSettings, ToneSink};
use crate::utils::error::Result;

/// Everything needed to play a headline, computed before any tone sounds.
#[derive(Debug, Clone)]
pub struct BroadcastPlan {
    pub headline: String,
    pub encoded: String,
    pub timing: Timing,
    pub events: Vec<MorseEvent>,
}

impl BroadcastPlan {
    /// Dry-run output. With `json` set, only the event list is written so
    /// the result parses as a JSON array.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(&self.events)?);
        }

        let mut out = format!("Headline: {}\n\nMorse: {}\n\n", self.headline, self.encoded);
        for event in &self.events {
            out.push_str(&format!("{:?}\n", event));
        }
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct Broadcast {
    pub headline: String,
    pub encoded: String,
    pub report: PlaybackReport,
}

pub struct BroadcastEngine<H: HeadlineSource, S: ToneSink> {
    source: H,
    player: MorsePlayer<S>,
}

impl<H: HeadlineSource, S: ToneSink> BroadcastEngine<H, S> {
    pub fn new(source: H, sink: S) -> Self {
        Self {
            source,
            player: MorsePlayer::new(sink),
        }
    }

    pub fn player(&self) -> &MorsePlayer<S> {
        &self.player
    }

    /// Fetches and encodes the headline and lays out its schedule. Writes nothing to stdout.
    pub async fn plan<C: PlaybackSettings>(&self, settings: &C) -> Result<BroadcastPlan> {
        let timing = Timing::from_wpm(settings.wpm())?;
        let headline = self.source.fetch_headline().await;

        let normalized = normalize(&headline);
        if normalized.len() < headline.chars().count() {
            tracing::debug!(
                "Dropped {} unsupported characters",
                headline.chars().count() - normalized.len()
            );
        }

        let encoded = encode(&normalized);

        let events = build_schedule(&encoded, &timing, settings.frequency_hz(), settings.spacing());
        tracing::debug!("Scheduled {} events", events.len());

        Ok(BroadcastPlan {
            headline,
            encoded,
            timing,
            events,
        })
    }

    pub async fn run<C: PlaybackSettings>(&self, settings: &C) -> Result<Broadcast> {
        println!("Fetching headline...");
        let plan = self.plan(settings).await?;
        println!("Headline: {}\n", plan.headline);
        println!("Morse: {}\n", plan.encoded);

        println!("Playing with proper timing...");
        println!(
            "Playing at {} WPM (dit={:.0}ms)",
            plan.timing.wpm(),
            plan.timing.dit().as_secs_f64() * 1000.0
        );
        tracing::info!(
            "Playing {} characters at {} Hz ({:?} scheduled)",
            plan.encoded.split_whitespace().count(),
            settings.frequency_hz(),
            crate::core::schedule::total_duration(&plan.events)
        );

        let report = self.player.play_schedule(&plan.events).await;
        if report.tones_failed > 0 {
            tracing::warn!(
                "{} of {} tones could not be played",
                report.tones_failed,
                report.tones_emitted
            );
        }
        println!("Finished!");

        Ok(Broadcast {
            headline: plan.headline,
            encoded: plan.encoded,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Spacing;
    use crate::source::StaticHeadlineSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingSink {
        tones: AtomicUsize,
    }

    #[async_trait]
    impl ToneSink for CountingSink {
        async fn tone(&self, _duration: Duration, _frequency_hz: u32) -> Result<()> {
            self.tones.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn pause(&self, _duration: Duration) {}
    }

    struct Settings {
        wpm: u32,
    }

    impl PlaybackSettings for Settings {
        fn wpm(&self) -> u32 {
            self.wpm
        }

        fn frequency_hz(&self) -> u32 {
            700
        }

        fn spacing(&self) -> Spacing {
            Spacing::Reference
        }
    }

    fn engine(text: &str) -> BroadcastEngine<StaticHeadlineSource, CountingSink> {
        BroadcastEngine::new(
            StaticHeadlineSource::new(text),
            CountingSink {
                tones: AtomicUsize::new(0),
            },
        )
    }

    #[tokio::test]
    async fn test_run_plays_normalized_headline() {
        let engine = engine("sos!");

        let broadcast = engine.run(&Settings { wpm: 100 }).await.unwrap();

        assert_eq!(broadcast.headline, "sos!");
        assert_eq!(broadcast.encoded, "... --- ...");
        assert_eq!(broadcast.report.tones_emitted, 9);
        assert_eq!(engine.player().sink().tones.load(Ordering::SeqCst), 9);
    }

    #[tokio::test]
    async fn test_plan_does_not_play() {
        let engine = engine("E T");

        let plan = engine.plan(&Settings { wpm: 20 }).await.unwrap();

        assert_eq!(plan.encoded, ". / -");
        assert_eq!(plan.events.iter().filter(|e| e.is_tone()).count(), 2);
        assert_eq!(engine.player().sink().tones.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_json_dry_run_output_is_pure_json() {
        let engine = engine("SOS");
        let plan = engine.plan(&Settings { wpm: 100 }).await.unwrap();

        let rendered = plan.render(true).unwrap();
        let events: Vec<MorseEvent> = serde_json::from_str(&rendered).unwrap();

        assert_eq!(events.len(), plan.events.len());
        assert_eq!(events.iter().filter(|e| e.is_tone()).count(), 9);
    }

    #[tokio::test]
    async fn test_text_dry_run_output_lists_headline_and_events() {
        let engine = engine("E");
        let plan = engine.plan(&Settings { wpm: 20 }).await.unwrap();

        let rendered = plan.render(false).unwrap();

        assert!(rendered.starts_with("Headline: E\n\nMorse: .\n\n"));
        assert_eq!(rendered.lines().filter(|l| l.starts_with("Tone")).count(), 1);
    }

    #[tokio::test]
    async fn test_zero_wpm_is_rejected() {
        let engine = engine("E");
        assert!(engine.run(&Settings { wpm: 0 }).await.is_err());
    }
}
