//! Playback session state.
//!
//! A session owns one chunk list derived from the source text. Seeks retire
//! the session and create a fresh one rather than patching it in place, so
//! events from a superseded generation can be recognized and dropped by id.

use crate::segmenter::Chunk;
use std::sync::Arc;
use uuid::Uuid;

/// Generation tag distinguishing the current session from superseded ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a fresh session id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The first uuid group is plenty for log correlation.
        let s = self.0.to_string();
        write!(f, "{}", &s[..8])
    }
}

/// Tagged playback state.
///
/// Makes illegal combinations (such as polling while a seek is rebuilding
/// the chunk list) unrepresentable instead of tracking loose booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// No session loaded
    Idle,
    /// Actively sequencing chunks through the engine
    Playing,
    /// A seek is tearing down and rebuilding the session
    Seeking,
    /// All chunks consumed
    Complete,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Playing => write!(f, "Playing"),
            Self::Seeking => write!(f, "Seeking"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// One playback generation: the chunk list currently being sequenced.
#[derive(Debug)]
pub struct PlaybackSession {
    /// Generation id used to tag utterances
    pub id: SessionId,
    /// The complete source text (shared across seeks)
    pub text: Arc<str>,
    /// Byte offset in `text` where this session's chunk list begins
    pub base_offset: usize,
    /// Ordered chunks awaiting submission
    pub chunks: Vec<Chunk>,
    /// Index of the chunk currently at the engine
    pub chunk_index: usize,
    /// Whether any utterance of this session reached the engine's Started
    /// callback
    pub spoke_any: bool,
}

impl PlaybackSession {
    /// Create a session over `chunks` starting at `base_offset` in `text`.
    #[must_use]
    pub fn new(text: Arc<str>, base_offset: usize, chunks: Vec<Chunk>) -> Self {
        Self {
            id: SessionId::new(),
            text,
            base_offset,
            chunks,
            chunk_index: 0,
            spoke_any: false,
        }
    }

    /// The chunk currently being spoken, if any remain.
    #[must_use]
    pub fn current_chunk(&self) -> Option<&Chunk> {
        self.chunks.get(self.chunk_index)
    }

    /// Advance to the next chunk and return it, if any.
    pub fn advance(&mut self) -> Option<&Chunk> {
        self.chunk_index += 1;
        self.chunks.get(self.chunk_index)
    }

    /// Whether every chunk has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.chunk_index >= self.chunks.len()
    }

    /// Global byte offset of chunk `index` within the full source text.
    #[must_use]
    pub fn chunk_global_offset(&self, index: usize) -> usize {
        self.base_offset + self.chunks.get(index).map_or(0, |c| c.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DurationEstimator;
    use crate::segmenter::segment;

    fn test_session(text: &str, max_len: usize) -> PlaybackSession {
        let chunks = segment(text, max_len, &DurationEstimator::default());
        PlaybackSession::new(Arc::from(text), 0, chunks)
    }

    #[test]
    fn test_session_ids_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_session_id_display_is_short() {
        assert_eq!(SessionId::new().to_string().len(), 8);
    }

    #[test]
    fn test_player_state_display() {
        assert_eq!(PlayerState::Idle.to_string(), "Idle");
        assert_eq!(PlayerState::Playing.to_string(), "Playing");
        assert_eq!(PlayerState::Seeking.to_string(), "Seeking");
        assert_eq!(PlayerState::Complete.to_string(), "Complete");
    }

    #[test]
    fn test_advance_to_exhaustion() {
        let mut session = test_session(&"word ".repeat(100), 200);
        let total = session.chunks.len();
        assert!(total > 1);
        assert!(session.current_chunk().is_some());

        let mut seen = 1;
        while session.advance().is_some() {
            seen += 1;
        }
        assert_eq!(seen, total);
        assert!(session.is_exhausted());
        assert!(session.current_chunk().is_none());
    }

    #[test]
    fn test_chunk_global_offset_includes_base() {
        let text = "word ".repeat(100);
        let chunks = segment(&text, 200, &DurationEstimator::default());
        let session = PlaybackSession::new(Arc::from(text.as_str()), 40, chunks);

        assert_eq!(session.chunk_global_offset(0), 40);
        let expected = 40 + session.chunks[1].offset;
        assert_eq!(session.chunk_global_offset(1), expected);
    }
}
