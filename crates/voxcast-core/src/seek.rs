//! Seek planning.
//!
//! The engine cannot seek, so a seek is simulated: the target time is
//! mapped to an approximate character offset in the full text, snapped to a
//! readable boundary, and speech restarts from the remaining text. Small
//! nudges snap to the nearest word boundary for precision; large jumps snap
//! back to the start of the containing sentence so playback never resumes
//! mid-sentence. The snap moves only where speech resumes; the reported
//! clock resumes from the requested time exactly.

/// Outcome of planning a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekPlan {
    /// The clamped target time the clock re-anchors to
    pub target_ms: u64,
    /// Byte offset in the source text where speech resumes
    pub resume_offset: usize,
}

/// Plan a seek to `target_ms`.
///
/// `current_ms` decides whether this is a short skip (within
/// `short_skip_threshold_ms`, word-boundary precision) or a long jump
/// (sentence-boundary naturalness).
#[must_use]
pub fn plan(
    text: &str,
    target_ms: u64,
    current_ms: u64,
    total_ms: u64,
    short_skip_threshold_ms: u64,
) -> SeekPlan {
    let target_ms = target_ms.min(total_ms);
    if text.is_empty() || total_ms == 0 {
        return SeekPlan {
            target_ms,
            resume_offset: 0,
        };
    }

    let fraction = target_ms as f64 / total_ms as f64;
    let approx = ((fraction * text.len() as f64).round() as usize).min(text.len() - 1);
    let approx = floor_char_boundary(text, approx);

    let skip = target_ms.abs_diff(current_ms);
    let resume_offset = if skip <= short_skip_threshold_ms {
        nearest_word_boundary(text, approx)
    } else {
        preceding_sentence_boundary(text, approx)
    };

    SeekPlan {
        target_ms,
        resume_offset,
    }
}

/// Snap `position` to the nearest word boundary, searching both directions
/// and picking the closer one.
#[must_use]
pub fn nearest_word_boundary(text: &str, position: usize) -> usize {
    if text.is_empty() || position >= text.len() {
        return 0;
    }
    let bytes = text.as_bytes();

    // Backward to the byte after the previous delimiter.
    let mut start = position;
    while start > 0 && !is_word_delimiter(bytes[start - 1]) {
        start -= 1;
    }
    // Forward to the next delimiter.
    let mut end = position;
    while end < bytes.len() && !is_word_delimiter(bytes[end]) {
        end += 1;
    }

    let snapped = if position - start <= end - position {
        start
    } else {
        end.min(text.len() - 1)
    };
    floor_char_boundary(text, snapped)
}

/// Snap `position` back to the start of the sentence containing it: the
/// first byte after the preceding `.`, `!`, or `?`, or 0.
#[must_use]
pub fn preceding_sentence_boundary(text: &str, position: usize) -> usize {
    if text.is_empty() || position >= text.len() {
        return 0;
    }
    let bytes = text.as_bytes();
    let mut start = position;
    while start > 0 && !matches!(bytes[start - 1], b'.' | b'!' | b'?') {
        start -= 1;
    }
    floor_char_boundary(text, start)
}

const fn is_word_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'.' | b',' | b'!' | b'?')
}

/// Largest char boundary not exceeding `index`.
fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
