use crate::domain::model::{CharacterCode, MorseEvent, Spacing, Timing, WORD_SEPARATOR};
use std::time::Duration;

/// Splits an encoded message into word groups of character codes.
///
/// Tokens that are not made of `.`/`-` are skipped. Consecutive separators
/// do not produce empty words.
pub fn word_groups(encoded: &str) -> Vec<Vec<CharacterCode>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();

    for token in encoded.split_whitespace() {
        if token == WORD_SEPARATOR {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            continue;
        }

        match CharacterCode::parse(token) {
            Some(code) => current.push(code),
            None => tracing::debug!("Skipping unplayable token {:?}", token),
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}

/// Lays out the tones and silences for an encoded message.
pub fn build_schedule(
    encoded: &str,
    timing: &Timing,
    frequency_hz: u32,
    spacing: Spacing,
) -> Vec<MorseEvent> {
    let mut events = Vec::new();

    for word in word_groups(encoded) {
        for code in &word {
            for symbol in code.symbols() {
                events.push(MorseEvent::Tone {
                    duration: timing.symbol(*symbol),
                    frequency_hz,
                });
                events.push(MorseEvent::Silence {
                    duration: timing.dit(),
                });
            }
            // With Spacing::Reference this stacks 3 dits on the 1-dit mark gap
            // above, so characters end up 4 dits apart rather than ITU's 3.
            events.push(MorseEvent::Silence {
                duration: timing.dits(spacing.character_gap_dits()),
            });
        }
        events.push(MorseEvent::Silence {
            duration: timing.dits(spacing.word_gap_dits()),
        });
    }

    events
}

pub fn total_duration(events: &[MorseEvent]) -> Duration {
    events.iter().map(MorseEvent::duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Symbol;

    fn timing() -> Timing {
        Timing::from_wpm(100).unwrap()
    }

    #[test]
    fn test_word_groups_split_on_separator() {
        let groups = word_groups(".- / -... -.-.");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 1);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[1][1].to_string(), "-.-.");
    }

    #[test]
    fn test_word_groups_ignore_stray_separators_and_tokens() {
        let groups = word_groups("/ .- / / -... x /");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].symbols(), &[Symbol::Dot, Symbol::Dash]);
        assert_eq!(groups[1].len(), 1);
        assert!(word_groups("").is_empty());
    }

    #[test]
    fn test_sos_schedule() {
        let t = timing();
        let events = build_schedule("... --- ...", &t, 800, Spacing::Reference);

        let tones: Vec<_> = events.iter().filter(|e| e.is_tone()).collect();
        assert_eq!(tones.len(), 9);
        for (i, tone) in tones.iter().enumerate() {
            let expected = if (3..6).contains(&i) { t.dits(3) } else { t.dit() };
            assert_eq!(
                **tone,
                MorseEvent::Tone {
                    duration: expected,
                    frequency_hz: 800
                }
            );
        }

        // 9 mark gaps, 3 character gaps, 1 word gap.
        assert_eq!(events.len(), 9 + 9 + 3 + 1);
        assert_eq!(
            events.last(),
            Some(&MorseEvent::Silence {
                duration: t.dits(7)
            })
        );
    }

    #[test]
    fn test_reference_character_gap_is_four_dits() {
        let t = timing();
        let events = build_schedule(". .", &t, 800, Spacing::Reference);
        assert_eq!(
            events,
            vec![
                MorseEvent::Tone {
                    duration: t.dit(),
                    frequency_hz: 800
                },
                MorseEvent::Silence { duration: t.dit() },
                MorseEvent::Silence {
                    duration: t.dits(3)
                },
                MorseEvent::Tone {
                    duration: t.dit(),
                    frequency_hz: 800
                },
                MorseEvent::Silence { duration: t.dit() },
                MorseEvent::Silence {
                    duration: t.dits(3)
                },
                MorseEvent::Silence {
                    duration: t.dits(7)
                },
            ]
        );
    }

    #[test]
    fn test_itu_spacing_totals() {
        let t = timing();
        // "E E": tone, then silences between the two tones, then trailing silences.
        let events = build_schedule(". / .", &t, 600, Spacing::Itu);
        let between: Duration = events[1..]
            .iter()
            .take_while(|e| !e.is_tone())
            .map(MorseEvent::duration)
            .sum();
        assert_eq!(between, t.dits(7));
    }

    #[test]
    fn test_total_duration() {
        let t = timing();
        let events = build_schedule("-", &t, 800, Spacing::Reference);
        // dash 3 + mark gap 1 + character gap 3 + word gap 7
        assert_eq!(total_duration(&events), t.dits(14));
    }
}
