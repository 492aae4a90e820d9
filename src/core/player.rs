use crate::core::schedule::{build_schedule, total_duration};
use crate::domain::model::{MorseEvent, PlaybackReport, Spacing, Timing};
use crate::domain::ports::ToneSink;
use tokio::time::Instant;

/// Plays encoded messages through a tone sink, one event at a time.
pub struct MorsePlayer<S: ToneSink> {
    sink: S,
}

impl<S: ToneSink> MorsePlayer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub async fn play(
        &self,
        encoded: &str,
        timing: &Timing,
        frequency_hz: u32,
        spacing: Spacing,
    ) -> PlaybackReport {
        let events = build_schedule(encoded, timing, frequency_hz, spacing);
        self.play_schedule(&events).await
    }

    /// A failed tone is logged and its remaining time is spent silent, so the
    /// following events keep their place in the rhythm.
    pub async fn play_schedule(&self, events: &[MorseEvent]) -> PlaybackReport {
        let mut report = PlaybackReport {
            scheduled: total_duration(events),
            ..PlaybackReport::default()
        };

        for event in events {
            match *event {
                MorseEvent::Tone {
                    duration,
                    frequency_hz,
                } => {
                    let started = Instant::now();
                    report.tones_emitted += 1;

                    if let Err(e) = self.sink.tone(duration, frequency_hz).await {
                        report.tones_failed += 1;
                        tracing::warn!("Tone at {} Hz failed: {}", frequency_hz, e);
                        self.sink
                            .pause(duration.saturating_sub(started.elapsed()))
                            .await;
                    }
                }
                MorseEvent::Silence { duration } => self.sink.pause(duration).await,
            }
        }

        tracing::debug!(
            "Played {} tones ({} failed) over {:?}",
            report.tones_emitted,
            report.tones_failed,
            report.scheduled
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{MorseError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Tone(Duration, u32),
        Pause(Duration),
    }

    struct RecordingSink {
        calls: Mutex<Vec<Call>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new(fail: bool) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ToneSink for RecordingSink {
        async fn tone(&self, duration: Duration, frequency_hz: u32) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Tone(duration, frequency_hz));
            if self.fail {
                return Err(MorseError::Playback {
                    message: "no audio device".to_string(),
                });
            }
            Ok(())
        }

        async fn pause(&self, duration: Duration) {
            self.calls.lock().unwrap().push(Call::Pause(duration));
        }
    }

    #[tokio::test]
    async fn test_sos_issues_nine_tones() {
        let timing = Timing::from_wpm(100).unwrap();
        let player = MorsePlayer::new(RecordingSink::new(false));

        let report = player
            .play("... --- ...", &timing, 800, Spacing::Reference)
            .await;

        assert_eq!(report.tones_emitted, 9);
        assert_eq!(report.tones_failed, 0);

        let dit = timing.dit();
        let calls = player.sink().calls();
        let tones: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                Call::Tone(d, f) => Some((*d, *f)),
                Call::Pause(_) => None,
            })
            .collect();
        let expected: Vec<_> = [1, 1, 1, 3, 3, 3, 1, 1, 1]
            .iter()
            .map(|n| (dit * *n, 800))
            .collect();
        assert_eq!(tones, expected);

        // First character: three marks each followed by one dit, then the 3-dit gap.
        assert_eq!(
            &calls[..7],
            &[
                Call::Tone(dit, 800),
                Call::Pause(dit),
                Call::Tone(dit, 800),
                Call::Pause(dit),
                Call::Tone(dit, 800),
                Call::Pause(dit),
                Call::Pause(dit * 3),
            ]
        );
        assert_eq!(calls.last(), Some(&Call::Pause(dit * 7)));
    }

    #[tokio::test]
    async fn test_failing_sink_keeps_going() {
        let timing = Timing::from_wpm(100).unwrap();
        let player = MorsePlayer::new(RecordingSink::new(true));

        let report = player
            .play("... --- ...", &timing, 800, Spacing::Reference)
            .await;

        assert_eq!(report.tones_emitted, 9);
        assert_eq!(report.tones_failed, 9);

        let calls = player.sink().calls();
        let tone_calls = calls
            .iter()
            .filter(|c| matches!(c, Call::Tone(..)))
            .count();
        assert_eq!(tone_calls, 9);

        // Every failed tone is followed by a make-up pause no longer than the tone.
        for pair in calls.windows(2) {
            if let [Call::Tone(d, _), next] = pair {
                match next {
                    Call::Pause(p) => assert!(p <= d),
                    other => panic!("expected make-up pause, got {:?}", other),
                }
            }
        }
        assert_eq!(calls.last(), Some(&Call::Pause(timing.dit() * 7)));
    }

    #[tokio::test]
    async fn test_empty_message_plays_nothing() {
        let timing = Timing::from_wpm(20).unwrap();
        let player = MorsePlayer::new(RecordingSink::new(false));

        let report = player.play("", &timing, 800, Spacing::Itu).await;

        assert_eq!(report, PlaybackReport::default());
        assert!(player.into_sink().calls().is_empty());
    }
}
