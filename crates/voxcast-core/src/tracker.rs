//! Word and sentence tracking for transcript highlighting.
//!
//! Engine range callbacks are local to the active chunk and can arrive
//! faster than a UI wants to repaint. The tracker maps them to global text
//! offsets, throttles emission, and detects when speech crosses into a new
//! sentence so the display can move its highlight.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::ops::Range;
use std::time::Duration;
use tokio::time::Instant;

/// Short, common words that would churn the sentence highlight if every
/// occurrence triggered a transition check.
static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["the", "and", "a", "an", "of", "is", "to", "in"]));

/// Output of observing one spoken word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordObservation {
    /// The word as sliced from the chunk text
    pub word: String,
    /// Byte offset of the word within the full source text
    pub global_index: usize,
    /// Index of the sentence just entered, when the containing sentence
    /// changed
    pub entered_sentence: Option<usize>,
}

/// Maps chunk-local range callbacks to transcript-global progress events.
#[derive(Debug)]
pub struct WordTracker {
    sentences: Vec<Range<usize>>,
    min_interval: Duration,
    last_emit: Option<Instant>,
    current_sentence: Option<usize>,
}

impl WordTracker {
    /// Build a tracker over the full source text.
    #[must_use]
    pub fn new(text: &str, min_interval: Duration) -> Self {
        Self {
            sentences: sentence_ranges(text),
            min_interval,
            last_emit: None,
            current_sentence: None,
        }
    }

    /// Number of sentences detected in the source text.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Observe one spoken word at its global byte offset.
    ///
    /// Returns `None` while throttled. Stopwords and single-character words
    /// are still reported but never drive a sentence transition.
    pub fn observe(&mut self, word: &str, global_index: usize) -> Option<WordObservation> {
        let now = Instant::now();
        if let Some(last) = self.last_emit {
            if now.duration_since(last) < self.min_interval {
                return None;
            }
        }
        self.last_emit = Some(now);

        let entered_sentence = if is_stopword(word) {
            None
        } else {
            self.sentence_transition(global_index)
        };

        Some(WordObservation {
            word: word.to_string(),
            global_index,
            entered_sentence,
        })
    }

    /// Forget throttle state, e.g. after a seek.
    pub fn reset_throttle(&mut self) {
        self.last_emit = None;
    }

    fn sentence_transition(&mut self, global_index: usize) -> Option<usize> {
        let index = self
            .sentences
            .iter()
            .position(|range| range.contains(&global_index))?;
        if self.current_sentence == Some(index) {
            return None;
        }
        self.current_sentence = Some(index);
        Some(index)
    }
}

fn is_stopword(word: &str) -> bool {
    let trimmed = word.trim().trim_matches(|c: char| !c.is_alphanumeric());
    trimmed.chars().count() <= 1 || STOPWORDS.contains(trimmed.to_ascii_lowercase().as_str())
}

/// Byte ranges of sentences in `text`, split after `.`, `!`, or `?`.
/// Whitespace-only stretches are not sentences.
fn sentence_ranges(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, b) in bytes.iter().enumerate() {
        if matches!(b, b'.' | b'!' | b'?') {
            if text[start..=i].trim().is_empty() {
                start = i + 1;
                continue;
            }
            ranges.push(start..i + 1);
            start = i + 1;
        }
    }
    if !text[start..].trim().is_empty() {
        ranges.push(start..text.len());
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const TEXT: &str = "The quick fox jumps. A lazy dog sleeps! Nothing else happens?";

    #[test]
    fn test_sentence_ranges() {
        let ranges = sentence_ranges(TEXT);
        assert_eq!(ranges.len(), 3);
        assert_eq!(&TEXT[ranges[0].clone()], "The quick fox jumps.");
        assert_eq!(&TEXT[ranges[1].clone()], " A lazy dog sleeps!");
        assert_eq!(&TEXT[ranges[2].clone()], " Nothing else happens?");
    }

    #[test]
    fn test_sentence_ranges_without_terminator() {
        let ranges = sentence_ranges("no punctuation at all");
        assert_eq!(ranges.len(), 1);
    }

    #[test]
    fn test_stopword_detection() {
        assert!(is_stopword("the"));
        assert!(is_stopword("The"));
        assert!(is_stopword("and,"));
        assert!(is_stopword("a"));
        assert!(is_stopword("x"));
        assert!(!is_stopword("quick"));
        assert!(!is_stopword("sleeps!"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_word_emits_with_sentence() {
        let mut tracker = WordTracker::new(TEXT, Duration::from_millis(300));
        let obs = tracker.observe("quick", 4).expect("first word emits");
        assert_eq!(obs.word, "quick");
        assert_eq!(obs.global_index, 4);
        assert_eq!(obs.entered_sentence, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_swallows_rapid_words() {
        let mut tracker = WordTracker::new(TEXT, Duration::from_millis(300));
        assert!(tracker.observe("quick", 4).is_some());
        assert!(tracker.observe("fox", 10).is_none());

        advance(Duration::from_millis(301)).await;
        assert!(tracker.observe("jumps", 14).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentence_transition_fires_once() {
        let mut tracker = WordTracker::new(TEXT, Duration::from_millis(0));

        let first = tracker.observe("quick", 4).unwrap();
        assert_eq!(first.entered_sentence, Some(0));

        let same = tracker.observe("jumps", 14).unwrap();
        assert_eq!(same.entered_sentence, None);

        // "lazy" lives in the second sentence.
        let next = tracker.observe("lazy", 23).unwrap();
        assert_eq!(next.entered_sentence, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopwords_never_drive_transitions() {
        let mut tracker = WordTracker::new(TEXT, Duration::from_millis(0));
        assert!(tracker.observe("quick", 4).is_some());

        // "A" starts sentence two but must not move the highlight.
        let obs = tracker.observe("A", 21).unwrap();
        assert_eq!(obs.entered_sentence, None);

        let obs = tracker.observe("lazy", 23).unwrap();
        assert_eq!(obs.entered_sentence, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_throttle_allows_immediate_emit() {
        let mut tracker = WordTracker::new(TEXT, Duration::from_millis(300));
        assert!(tracker.observe("quick", 4).is_some());
        assert!(tracker.observe("fox", 10).is_none());

        tracker.reset_throttle();
        assert!(tracker.observe("fox", 10).is_some());
    }
}
