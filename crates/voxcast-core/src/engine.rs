//! Speech engine boundary.
//!
//! The playback core drives an external speech primitive exposing only
//! "speak this utterance", "stop", an activity flag, and a callback event
//! stream. The engine is treated as unreliable (it may fail mid-utterance)
//! and non-instrumented (it reports no position); everything richer is
//! reconstructed on top of this seam.

use crate::duration::{DurationEstimator, PacingConfig};
use crate::session::SessionId;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Identifier for one submitted utterance.
///
/// The session id tags the generation the utterance belongs to; events for
/// a superseded session are discarded by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId {
    /// Playback session (generation) the utterance was submitted under
    pub session: SessionId,
    /// Zero-based chunk index within the session
    pub index: usize,
}

impl std::fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.session, self.index)
    }
}

/// Event kinds delivered by a speech engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEventKind {
    /// The engine began speaking the utterance
    Started,
    /// The engine finished the utterance
    Done,
    /// The engine failed mid-utterance with an engine-specific code
    Error(i32),
    /// The engine is about to speak the byte range `[start, end)` of the
    /// submitted text
    RangeStart {
        /// Start byte offset within the submitted utterance text
        start: usize,
        /// End byte offset within the submitted utterance text
        end: usize,
    },
}

/// One asynchronous engine callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineEvent {
    /// Utterance the event refers to
    pub id: UtteranceId,
    /// What happened
    pub kind: EngineEventKind,
}

/// Boundary trait for the external speech/audio primitive.
///
/// Implementations perform no chunking or position logic; they are a
/// pass-through to the underlying engine. Events are delivered on the mpsc
/// channel handed out at construction time.
pub trait SpeechEngine: Send + Sync + std::fmt::Debug {
    /// Submit one utterance. Returns `false` if the engine rejects it.
    fn submit(&self, text: &str, id: UtteranceId) -> bool;

    /// Stop the current utterance, if any.
    fn stop(&self);

    /// Whether the engine is currently speaking.
    fn is_active(&self) -> bool;

    /// Set the speech rate multiplier for subsequent utterances.
    fn set_rate(&self, rate: f32);
}

/// Mock speech engine for testing and platforms without a native engine.
///
/// Simulates word-by-word speech on the tokio clock using the same pacing
/// model the estimator uses, emitting `Started`, `RangeStart` per word, and
/// `Done` (or `Error` for utterances marked as failing).
#[derive(Debug)]
pub struct MockSpeechEngine {
    events: mpsc::UnboundedSender<EngineEvent>,
    estimator: DurationEstimator,
    rate: Mutex<f32>,
    active: Arc<AtomicBool>,
    current: Mutex<Option<tokio::task::JoinHandle<()>>>,
    reject_indices: Mutex<HashSet<usize>>,
    fail_indices: Mutex<HashSet<usize>>,
}

impl MockSpeechEngine {
    /// Create a mock engine and the receiving end of its event stream.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        Self::with_pacing(PacingConfig::default())
    }

    /// Create a mock engine with custom pacing.
    #[must_use]
    pub fn with_pacing(pacing: PacingConfig) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Self {
            events: tx,
            estimator: DurationEstimator::new(pacing),
            rate: Mutex::new(1.0),
            active: Arc::new(AtomicBool::new(false)),
            current: Mutex::new(None),
            reject_indices: Mutex::new(HashSet::new()),
            fail_indices: Mutex::new(HashSet::new()),
        };
        (engine, rx)
    }

    /// Make `submit` return `false` for the utterance at `index`.
    pub fn reject_utterance(&self, index: usize) {
        self.reject_indices.lock().insert(index);
    }

    /// Make the utterance at `index` start and then fail mid-speech.
    pub fn fail_utterance(&self, index: usize) {
        self.fail_indices.lock().insert(index);
    }

    /// Current speech rate multiplier.
    #[must_use]
    pub fn rate(&self) -> f32 {
        *self.rate.lock()
    }

    fn abort_current(&self) {
        if let Some(handle) = self.current.lock().take() {
            handle.abort();
        }
        self.active.store(false, Ordering::Relaxed);
    }
}

impl SpeechEngine for MockSpeechEngine {
    fn submit(&self, text: &str, id: UtteranceId) -> bool {
        if self.reject_indices.lock().contains(&id.index) {
            debug!("Mock engine rejecting utterance {id}");
            return false;
        }

        self.abort_current();
        self.active.store(true, Ordering::Relaxed);

        let events = self.events.clone();
        let active = Arc::clone(&self.active);
        let fail = self.fail_indices.lock().contains(&id.index);
        let rate = f64::from(*self.rate.lock()).max(0.1);
        let spans = word_spans(text);
        let est_ms = self.estimator.estimate_ms(text);
        // Spread the estimated duration evenly across the words, scaled by
        // the current rate.
        let word_interval = Duration::from_secs_f64(
            est_ms as f64 / 1000.0 / spans.len().max(1) as f64 / rate,
        );

        let handle = tokio::spawn(async move {
            let _ = events.send(EngineEvent {
                id,
                kind: EngineEventKind::Started,
            });

            if fail {
                tokio::time::sleep(word_interval).await;
                let _ = events.send(EngineEvent {
                    id,
                    kind: EngineEventKind::Error(-1),
                });
                active.store(false, Ordering::Relaxed);
                return;
            }

            for (start, end) in spans {
                let _ = events.send(EngineEvent {
                    id,
                    kind: EngineEventKind::RangeStart { start, end },
                });
                tokio::time::sleep(word_interval).await;
            }

            let _ = events.send(EngineEvent {
                id,
                kind: EngineEventKind::Done,
            });
            active.store(false, Ordering::Relaxed);
        });
        *self.current.lock() = Some(handle);
        true
    }

    fn stop(&self) {
        debug!("Mock engine stop");
        self.abort_current();
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    fn set_rate(&self, rate: f32) {
        *self.rate.lock() = rate.max(0.1);
    }
}

impl Drop for MockSpeechEngine {
    fn drop(&mut self) {
        self.abort_current();
    }
}

/// Byte spans of whitespace-separated words in `text`.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}
