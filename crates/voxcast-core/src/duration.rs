//! Spoken-duration estimation for transcript text.
//!
//! The speech engine reports no native position or duration, so every
//! position and progress computation in the crate is derived from the same
//! words-per-second estimate. Keeping the estimator deterministic and pure
//! guarantees the duration shown up front and the simulated clock agree.

use serde::{Deserialize, Serialize};

/// Pacing constants for duration estimation.
///
/// The defaults are empirical: average narration runs around 160 words per
/// minute (2.67 words per second), and speech engines insert roughly 300ms
/// of silence at sentence-ending punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Average speaking rate in words per second
    pub words_per_second: f32,
    /// Pause allowance per sentence-ending punctuation mark, in milliseconds
    pub sentence_pause_ms: u64,
    /// Minimum estimate for any non-empty text, in milliseconds
    pub min_utterance_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            words_per_second: crate::DEFAULT_WORDS_PER_SECOND,
            sentence_pause_ms: 300,
            min_utterance_ms: 1000,
        }
    }
}

/// Estimates how long a piece of text takes to speak.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationEstimator {
    pacing: PacingConfig,
}

impl DurationEstimator {
    /// Create an estimator with custom pacing
    #[must_use]
    pub const fn new(pacing: PacingConfig) -> Self {
        Self { pacing }
    }

    /// Get the pacing configuration in use
    #[must_use]
    pub const fn pacing(&self) -> &PacingConfig {
        &self.pacing
    }

    /// Estimate the spoken duration of `text` in milliseconds.
    ///
    /// Returns 0 for empty or whitespace-only text, and never less than
    /// [`PacingConfig::min_utterance_ms`] for anything else.
    #[must_use]
    pub fn estimate_ms(&self, text: &str) -> u64 {
        let word_count = text.split_whitespace().count();
        if word_count == 0 {
            return 0;
        }

        let base_ms =
            (f64::from(word_count as u32) / f64::from(self.pacing.words_per_second) * 1000.0)
                .round() as u64;

        let sentence_count = text
            .chars()
            .filter(|c| matches!(c, '.' | '!' | '?'))
            .count()
            .max(1) as u64;
        let pause_ms = sentence_count * self.pacing.sentence_pause_ms;

        (base_ms + pause_ms).max(self.pacing.min_utterance_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pacing_config_default() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.words_per_second, crate::DEFAULT_WORDS_PER_SECOND);
        assert_eq!(pacing.sentence_pause_ms, 300);
        assert_eq!(pacing.min_utterance_ms, 1000);
    }

    #[test]
    fn test_empty_text_is_zero() {
        let estimator = DurationEstimator::default();
        assert_eq!(estimator.estimate_ms(""), 0);
        assert_eq!(estimator.estimate_ms("   \n\t  "), 0);
    }

    #[test]
    fn test_minimum_duration_for_short_text() {
        let estimator = DurationEstimator::default();
        assert_eq!(estimator.estimate_ms("Hi."), 1000);
        assert_eq!(estimator.estimate_ms("word"), 1000);
    }

    #[test]
    fn test_word_rate_and_sentence_pause() {
        let estimator = DurationEstimator::new(PacingConfig {
            words_per_second: 2.0,
            sentence_pause_ms: 300,
            min_utterance_ms: 1000,
        });

        // 10 words at 2 wps = 5000ms, two sentences add 600ms of pauses.
        let text = "one two three four five. six seven eight nine ten.";
        assert_eq!(estimator.estimate_ms(text), 5600);
    }

    #[test]
    fn test_text_without_punctuation_counts_one_sentence() {
        let estimator = DurationEstimator::new(PacingConfig {
            words_per_second: 2.0,
            sentence_pause_ms: 300,
            min_utterance_ms: 1000,
        });

        let text = "one two three four five six seven eight";
        assert_eq!(estimator.estimate_ms(text), 4300);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let estimator = DurationEstimator::default();
        let text = "A podcast transcript. With several sentences! And a question?";
        assert_eq!(estimator.estimate_ms(text), estimator.estimate_ms(text));
    }

    proptest! {
        #[test]
        fn prop_monotonic_in_word_count(words in 1usize..400) {
            let estimator = DurationEstimator::default();
            let shorter = format!("{}.", vec!["word"; words].join(" "));
            let longer = format!("{}.", vec!["word"; words + 1].join(" "));
            prop_assert!(estimator.estimate_ms(&longer) >= estimator.estimate_ms(&shorter));
        }

        #[test]
        fn prop_nonempty_has_floor(words in 1usize..50) {
            let estimator = DurationEstimator::default();
            let text = vec!["w"; words].join(" ");
            prop_assert!(estimator.estimate_ms(&text) >= 1000);
        }
    }
}
