//! Display-side content model.
//!
//! Segments are caller-supplied logical units (one article, one generated
//! paragraph) used only to tell the UI which unit a time offset falls into.
//! They are independent of the engine-sized chunks the segmenter produces.

use serde::{Deserialize, Serialize};

/// One logical content unit of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Display title of the segment
    pub title: String,
    /// Segment body text
    pub text: String,
    /// Optional spoken-duration hint in milliseconds (0 when unknown)
    pub duration_hint_ms: u64,
}

impl Segment {
    /// Create a segment with no duration hint.
    #[must_use]
    pub fn new<T: Into<String>, B: Into<String>>(title: T, text: B) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            duration_hint_ms: 0,
        }
    }

    /// Attach a spoken-duration hint.
    #[must_use]
    pub const fn with_duration_hint(mut self, hint_ms: u64) -> Self {
        self.duration_hint_ms = hint_ms;
        self
    }
}

/// The complete text to synthesize plus its display segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    full_text: String,
    segments: Vec<Segment>,
}

impl Transcript {
    /// Build a transcript from bare text with no segment structure.
    #[must_use]
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self {
            full_text: text.into(),
            segments: Vec::new(),
        }
    }

    /// Build a transcript from ordered segments; the full text is the
    /// segment bodies joined by paragraph breaks.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        Self {
            full_text,
            segments,
        }
    }

    /// The complete transcript text.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The ordered display segments (may be empty).
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Estimate which segment the playback position falls into.
    ///
    /// Uses duration hints proportionally when they are present; otherwise
    /// falls back to dividing the timeline evenly across segments. Returns 0
    /// when there are no segments or no duration.
    #[must_use]
    pub fn segment_index_at(&self, position_ms: u64, total_ms: u64) -> usize {
        if self.segments.is_empty() || total_ms == 0 {
            return 0;
        }
        let last = self.segments.len() - 1;
        let fraction = (position_ms as f64 / total_ms as f64).clamp(0.0, 1.0);

        let hint_total: u64 = self.segments.iter().map(|s| s.duration_hint_ms).sum();
        if hint_total == 0 {
            return ((fraction * self.segments.len() as f64) as usize).min(last);
        }

        let target = fraction * hint_total as f64;
        let mut elapsed = 0.0;
        for (i, segment) in self.segments.iter().enumerate() {
            elapsed += segment.duration_hint_ms as f64;
            if target < elapsed {
                return i;
            }
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hinted(hints: &[u64]) -> Transcript {
        Transcript::from_segments(
            hints
                .iter()
                .enumerate()
                .map(|(i, &h)| Segment::new(format!("s{i}"), "body text.").with_duration_hint(h))
                .collect(),
        )
    }

    #[test]
    fn test_from_text_has_no_segments() {
        let t = Transcript::from_text("Just a transcript.");
        assert_eq!(t.full_text(), "Just a transcript.");
        assert!(t.segments().is_empty());
        assert_eq!(t.segment_index_at(500, 1000), 0);
    }

    #[test]
    fn test_from_segments_joins_text() {
        let t = Transcript::from_segments(vec![
            Segment::new("Intro", "Welcome."),
            Segment::new("Story", "The news."),
        ]);
        assert_eq!(t.full_text(), "Welcome.\n\nThe news.");
        assert_eq!(t.segments().len(), 2);
    }

    #[test]
    fn test_segment_index_proportional_count_fallback() {
        // No hints: the timeline divides evenly across four segments.
        let t = hinted(&[0, 0, 0, 0]);
        assert_eq!(t.segment_index_at(0, 1000), 0);
        assert_eq!(t.segment_index_at(260, 1000), 1);
        assert_eq!(t.segment_index_at(990, 1000), 3);
        assert_eq!(t.segment_index_at(1000, 1000), 3);
    }

    #[test]
    fn test_segment_index_uses_duration_hints() {
        // First segment covers 80% of the runtime.
        let t = hinted(&[8000, 1000, 1000]);
        assert_eq!(t.segment_index_at(500, 1000), 0);
        assert_eq!(t.segment_index_at(700, 1000), 0);
        assert_eq!(t.segment_index_at(850, 1000), 1);
        assert_eq!(t.segment_index_at(960, 1000), 2);
    }

    #[test]
    fn test_segment_index_clamps_out_of_range() {
        let t = hinted(&[1000, 1000]);
        assert_eq!(t.segment_index_at(5000, 1000), 1);
        assert_eq!(t.segment_index_at(0, 0), 0);
    }

    #[test]
    fn test_segment_serialization_round_trip() {
        let segment = Segment::new("Intro", "Welcome.").with_duration_hint(1234);
        let json = serde_json::to_string(&segment).unwrap();
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(segment, back);
    }
}
