//! Text segmentation for utterance-size-limited speech engines.
//!
//! Speech engines cap the size of a single utterance (around 4000
//! characters for most), so long transcripts must be split into an ordered
//! chunk list before submission. Splitting prefers paragraph boundaries,
//! falls back to sentence boundaries for oversized paragraphs, and only
//! hard-slices when a single sentence exceeds the limit. Every chunk is a
//! verbatim contiguous slice of the source text, so a chunk-local byte
//! offset plus [`Chunk::offset`] is an exact source position.

use crate::duration::DurationEstimator;

/// One engine-sized slice of the source text.
///
/// Chunks are immutable once produced; a seek regenerates the whole list
/// rather than patching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text submitted to the engine
    pub text: String,
    /// Byte offset of the chunk's first byte within the segmented text
    pub offset: usize,
    /// Estimated spoken duration of this chunk in milliseconds
    pub est_ms: u64,
}

impl Chunk {
    /// Byte length of the chunk text
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the chunk text is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split `text` into ordered chunks no longer than `max_len` bytes.
///
/// Paragraphs (blank-line separated) are greedily packed into chunks. A
/// paragraph that alone exceeds `max_len` is split at sentence boundaries;
/// a sentence that still exceeds `max_len` is hard-sliced at the nearest
/// character boundary. Every chunk satisfies
/// `text[chunk.offset..chunk.offset + chunk.len()] == chunk.text`, so a
/// byte position inside a chunk maps to its source position by adding
/// `chunk.offset`. Blank paragraphs never become chunks of their own,
/// though their bytes survive inside a chunk that spans them. Returns an
/// empty list for blank input.
#[must_use]
pub fn segment(text: &str, max_len: usize, estimator: &DurationEstimator) -> Vec<Chunk> {
    let mut units: Vec<(usize, usize)> = Vec::new();
    for (p_start, p_end) in paragraph_spans(text) {
        if p_end - p_start <= max_len {
            units.push((p_start, p_end));
        } else {
            for (s_start, s_end) in sentence_spans(text, p_start, p_end) {
                if s_end - s_start <= max_len {
                    units.push((s_start, s_end));
                } else {
                    hard_slice_spans(text, s_start, s_end, max_len, &mut units);
                }
            }
        }
    }

    // Greedy packing over spans: extending a chunk to the next unit keeps
    // the source bytes between them (separators, blank paragraphs), so the
    // merged span stays a verbatim slice of the input.
    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for (start, end) in units {
        match current {
            Some((c_start, _)) if end - c_start <= max_len => {
                current = Some((c_start, end));
            }
            Some(span) => {
                chunks.push(make_chunk(text, span, estimator));
                current = Some((start, end));
            }
            None => current = Some((start, end)),
        }
    }
    if let Some(span) = current {
        chunks.push(make_chunk(text, span, estimator));
    }
    chunks
}

fn make_chunk(text: &str, (start, end): (usize, usize), estimator: &DurationEstimator) -> Chunk {
    let slice = &text[start..end];
    Chunk {
        text: slice.to_string(),
        offset: start,
        est_ms: estimator.estimate_ms(slice),
    }
}

/// Spans of non-blank paragraphs (blank-line separated), trimmed of
/// surrounding whitespace.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut pos = 0;
    for paragraph in text.split("\n\n") {
        if let Some(span) = trimmed_span(text, pos, pos + paragraph.len()) {
            spans.push(span);
        }
        pos += paragraph.len() + 2;
    }
    spans
}

/// Spans of sentences within `text[p_start..p_end]`, split after
/// sentence-ending punctuation followed by whitespace. The separator
/// whitespace belongs to no sentence; yielded spans carry their
/// punctuation.
fn sentence_spans(text: &str, p_start: usize, p_end: usize) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut start = p_start;
    let mut i = p_start;

    while i < p_end {
        if matches!(bytes[i], b'.' | b'!' | b'?')
            && bytes.get(i + 1).is_some_and(|b| b.is_ascii_whitespace())
        {
            if let Some(span) = trimmed_span(text, start, i + 1) {
                spans.push(span);
            }
            i += 1;
            while i < p_end && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    if let Some(span) = trimmed_span(text, start, p_end) {
        spans.push(span);
    }
    spans
}

/// Slice a single oversized sentence into `max_len`-byte spans, shrinking
/// each cut to the previous character boundary. Last resort; may break a
/// word.
fn hard_slice_spans(
    text: &str,
    start: usize,
    end: usize,
    max_len: usize,
    spans: &mut Vec<(usize, usize)>,
) {
    let mut s = start;
    while s < end {
        let mut e = (s + max_len).min(end);
        while e > s && !text.is_char_boundary(e) {
            e -= 1;
        }
        if e == s {
            // A single character wider than max_len cannot be split further.
            e = text[s..].char_indices().nth(1).map_or(end, |(i, _)| s + i);
        }
        spans.push((s, e));
        s = e;
    }
}

/// Shrink `[start, end)` past surrounding whitespace; `None` when blank.
fn trimmed_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let led = slice.trim_start();
    let new_start = start + (slice.len() - led.len());
    let trimmed = led.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some((new_start, new_start + trimmed.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segment_default(text: &str, max_len: usize) -> Vec<Chunk> {
        segment(text, max_len, &DurationEstimator::default())
    }

    fn squash_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = segment_default("A short transcript.", 4000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "A short transcript.");
        assert_eq!(chunks[0].offset, 0);
        assert!(chunks[0].est_ms >= 1000);
    }

    #[test]
    fn test_blank_text_yields_no_chunks() {
        assert!(segment_default("", 4000).is_empty());
        assert!(segment_default("  \n\n \n\n ", 4000).is_empty());
    }

    #[test]
    fn test_three_paragraphs_pack_greedily() {
        // Three ~970-char paragraphs at a 2000-char limit: the first two
        // share a chunk, the third starts a new one.
        let paragraph = "word ".repeat(195).trim_end().to_string();
        assert_eq!(paragraph.len(), 974);
        let text = format!("{paragraph}\n\n{paragraph}\n\n{paragraph}");

        let chunks = segment_default(&text, 2000);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() <= 2000));
    }

    #[test]
    fn test_paragraphs_too_large_to_share_get_own_chunks() {
        let paragraph = "word ".repeat(299).trim_end().to_string();
        assert_eq!(paragraph.len(), 1494);
        let text = format!("{paragraph}\n\n{paragraph}\n\n{paragraph}");

        let chunks = segment_default(&text, 2000);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= 2000));
    }

    #[test]
    fn test_oversized_paragraph_splits_at_sentences() {
        let sentence = format!("{}.", "word ".repeat(30).trim_end());
        let paragraph = (0..10).map(|_| sentence.clone()).collect::<Vec<_>>().join(" ");
        assert!(paragraph.len() > 500);

        let chunks = segment_default(&paragraph, 500);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 500));
        // No sentence was torn apart: every chunk ends with punctuation.
        assert!(chunks.iter().all(|c| c.text.trim_end().ends_with('.')));
    }

    #[test]
    fn test_oversized_sentence_is_hard_sliced() {
        let sentence = "a".repeat(950);
        let chunks = segment_default(&sentence, 300);
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.len() <= 300));
        assert_eq!(squash_whitespace(&sentence), chunks.iter().map(|c| squash_whitespace(&c.text)).collect::<String>());
    }

    #[test]
    fn test_hard_slice_respects_char_boundaries() {
        let sentence = "é".repeat(400);
        let chunks = segment_default(&sentence, 101);
        assert!(chunks.iter().all(|c| c.len() <= 101));
        assert_eq!(
            chunks.iter().map(|c| c.text.chars().count()).sum::<usize>(),
            400
        );
    }

    #[test]
    fn test_chunks_are_verbatim_source_slices() {
        let paragraph = "word ".repeat(100).trim_end().to_string();
        let text = format!("{paragraph}\n\n{paragraph}\n\n{paragraph}");
        let chunks = segment_default(&text, 600);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(&text[chunk.offset..chunk.offset + chunk.len()], chunk.text);
        }
    }

    #[test]
    fn test_offsets_survive_paragraph_separators() {
        // The second chunk starts past a "\n\n" separator: its offset must
        // point at the real source position, not the sum of earlier chunk
        // lengths.
        let text = "Alpha beta gamma delta.\n\nEpsilon zeta eta theta.";
        let chunks = segment_default(text, 30);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].offset, 25);
        assert_eq!(&text[chunks[1].offset..], chunks[1].text);
    }

    #[test]
    fn test_blank_paragraphs_skipped() {
        let chunks = segment_default("First.\n\n   \n\nSecond.", 4000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(squash_whitespace(&chunks[0].text), "First.Second.");
    }

    #[test]
    fn test_sentence_spans_handle_all_terminators() {
        let text = "One. Two! Three? Four";
        let spans = sentence_spans(text, 0, text.len());
        let found: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(found, vec!["One.", "Two!", "Three?", "Four"]);
    }

    proptest! {
        #[test]
        fn prop_chunks_within_limit_and_slices_of_source(
            paragraphs in proptest::collection::vec("[a-zA-Z ,.!?]{0,400}", 1..8),
            max_len in 50usize..500,
        ) {
            let text = paragraphs.join("\n\n");
            let chunks = segment(&text, max_len, &DurationEstimator::default());

            for chunk in &chunks {
                prop_assert!(chunk.len() <= max_len);
                prop_assert!(!chunk.text.trim().is_empty());
                prop_assert_eq!(
                    &text[chunk.offset..chunk.offset + chunk.len()],
                    chunk.text.as_str()
                );
            }

            let rebuilt: String = chunks.iter().map(|c| squash_whitespace(&c.text)).collect();
            prop_assert_eq!(rebuilt, squash_whitespace(&text));
        }
    }
}
