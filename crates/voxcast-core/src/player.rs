//! Playback orchestration.
//!
//! [`Player`] is a cheap handle; all state lives in a single control-loop
//! task that owns the session, the virtual clock, and the engine. The
//! handle talks to the loop over a command channel, the engine talks to it
//! over its event channel, and a poll timer drives progress publication.
//! One task, no shared mutable playback state, no lock ordering.

use crate::clock::VirtualClock;
use crate::duration::{DurationEstimator, PacingConfig};
use crate::engine::{EngineEvent, EngineEventKind, SpeechEngine, UtteranceId};
use crate::error::{VoxcastError, VoxcastResult};
use crate::seek;
use crate::segmenter::segment;
use crate::session::{PlaybackSession, PlayerState, SessionId};
use crate::tracker::WordTracker;
use crate::transcript::Transcript;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Tunables for a [`Player`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Maximum utterance size in bytes submitted to the engine at once
    pub max_utterance_len: usize,
    /// How often the loop publishes a progress sample
    pub poll_interval: Duration,
    /// Pause inserted between consecutive chunks
    pub chunk_gap: Duration,
    /// Pause before moving past a failed chunk
    pub error_retry_delay: Duration,
    /// Seeks within this distance snap to word boundaries; larger jumps
    /// snap back to sentence starts
    pub short_skip_threshold_ms: u64,
    /// Lowest accepted speed multiplier
    pub min_speed: f32,
    /// Highest accepted speed multiplier
    pub max_speed: f32,
    /// Minimum interval between word highlight events
    pub word_event_min_interval: Duration,
    /// Capacity of the broadcast event channel
    pub event_capacity: usize,
    /// Pacing model shared by the estimator and the clock
    pub pacing: PacingConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_utterance_len: crate::DEFAULT_MAX_UTTERANCE_LEN,
            poll_interval: Duration::from_millis(crate::DEFAULT_POLL_INTERVAL_MS),
            chunk_gap: Duration::from_millis(crate::DEFAULT_CHUNK_GAP_MS),
            error_retry_delay: Duration::from_millis(crate::DEFAULT_CHUNK_GAP_MS),
            short_skip_threshold_ms: crate::DEFAULT_SHORT_SKIP_THRESHOLD_MS,
            min_speed: 0.5,
            max_speed: 2.0,
            word_event_min_interval: Duration::from_millis(300),
            event_capacity: 256,
            pacing: PacingConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`VoxcastError::ConfigurationError`] when a field is out of
    /// range.
    pub fn validate(&self) -> VoxcastResult<()> {
        if self.max_utterance_len == 0 {
            return Err(VoxcastError::configuration(
                "max_utterance_len must be positive",
            ));
        }
        if self.min_speed <= 0.0 || self.max_speed < self.min_speed {
            return Err(VoxcastError::configuration(format!(
                "invalid speed range {}..{}",
                self.min_speed, self.max_speed
            )));
        }
        if self.event_capacity == 0 {
            return Err(VoxcastError::configuration(
                "event_capacity must be positive",
            ));
        }
        Ok(())
    }
}

/// One progress sample published on the poll interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSample {
    /// Simulated position in milliseconds
    pub position_ms: u64,
    /// Estimated total duration in milliseconds
    pub total_ms: u64,
    /// `position_ms / total_ms`, 0.0 when the total is unknown
    pub fraction: f64,
    /// Index of the transcript segment the position falls into
    pub segment_index: usize,
}

/// Events published to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Periodic position sample
    Progress(ProgressSample),
    /// A word is being spoken
    Word {
        /// The word text
        word: String,
        /// Byte offset of the word within the full transcript
        global_index: usize,
    },
    /// Speech crossed into a new sentence
    SentenceStarted {
        /// Zero-based sentence index within the full transcript
        index: usize,
    },
    /// Every chunk was consumed
    Complete,
    /// Playback failed without any chunk being spoken
    Error {
        /// Human-readable failure description
        message: String,
    },
}

/// Lock-free snapshot of playback state, shared between the handle and the
/// control loop.
#[derive(Debug)]
pub struct PlayerStatus {
    position_ms: AtomicU64,
    total_ms: AtomicU64,
    playing: AtomicBool,
    speed_bits: AtomicU32,
    state: AtomicU8,
}

impl PlayerStatus {
    fn new(speed: f32) -> Self {
        Self {
            position_ms: AtomicU64::new(0),
            total_ms: AtomicU64::new(0),
            playing: AtomicBool::new(false),
            speed_bits: AtomicU32::new(speed.to_bits()),
            state: AtomicU8::new(encode_state(PlayerState::Idle)),
        }
    }

    /// Current simulated position in milliseconds.
    #[must_use]
    pub fn position_ms(&self) -> u64 {
        self.position_ms.load(Ordering::Relaxed)
    }

    /// Estimated total duration in milliseconds.
    #[must_use]
    pub fn total_ms(&self) -> u64 {
        self.total_ms.load(Ordering::Relaxed)
    }

    /// Whether playback is in progress.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    /// Current speed multiplier.
    #[must_use]
    pub fn speed(&self) -> f32 {
        f32::from_bits(self.speed_bits.load(Ordering::Relaxed))
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PlayerState {
        decode_state(self.state.load(Ordering::Relaxed))
    }

    fn set_position(&self, ms: u64) {
        self.position_ms.store(ms, Ordering::Relaxed);
    }

    fn set_total(&self, ms: u64) {
        self.total_ms.store(ms, Ordering::Relaxed);
    }

    fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Relaxed);
    }

    fn set_speed(&self, speed: f32) {
        self.speed_bits.store(speed.to_bits(), Ordering::Relaxed);
    }

    fn set_state(&self, state: PlayerState) {
        self.state.store(encode_state(state), Ordering::Relaxed);
    }
}

const fn encode_state(state: PlayerState) -> u8 {
    match state {
        PlayerState::Idle => 0,
        PlayerState::Playing => 1,
        PlayerState::Seeking => 2,
        PlayerState::Complete => 3,
    }
}

const fn decode_state(raw: u8) -> PlayerState {
    match raw {
        1 => PlayerState::Playing,
        2 => PlayerState::Seeking,
        3 => PlayerState::Complete,
        _ => PlayerState::Idle,
    }
}

enum Command {
    Play { transcript: Transcript },
    Stop,
    SeekTo { target_ms: u64 },
    SetSpeed { speed: f32 },
    Advance { session: SessionId },
    Shutdown,
}

/// Handle to a running playback control loop.
///
/// Clonable-cheap by design: commands are fire-and-forget, status reads are
/// atomic loads, events arrive on a broadcast subscription.
#[derive(Debug)]
pub struct Player {
    commands: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<PlayerEvent>,
    status: Arc<PlayerStatus>,
}

impl Player {
    /// Spawn the control loop over `engine` and return its handle.
    ///
    /// `engine_events` is the receiving end of the engine's callback
    /// stream, handed out when the engine was constructed.
    ///
    /// # Errors
    /// Returns [`VoxcastError::ConfigurationError`] for an invalid config.
    pub fn new(
        engine: Arc<dyn SpeechEngine>,
        engine_events: mpsc::UnboundedReceiver<EngineEvent>,
        config: PlayerConfig,
    ) -> VoxcastResult<Self> {
        config.validate()?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(config.event_capacity);
        let status = Arc::new(PlayerStatus::new(1.0));

        let control = ControlLoop {
            engine,
            engine_events,
            commands: command_rx,
            command_feedback: command_tx.clone(),
            events: event_tx.clone(),
            status: Arc::clone(&status),
            estimator: DurationEstimator::new(config.pacing),
            config,
            state: PlayerState::Idle,
            session: None,
            transcript: None,
            clock: VirtualClock::new(0, 1.0),
            tracker: None,
            speed: 1.0,
        };
        tokio::spawn(control.run());

        Ok(Self {
            commands: command_tx,
            events: event_tx,
            status,
        })
    }

    /// Start speaking `transcript` from the beginning, replacing any
    /// playback in progress.
    ///
    /// # Errors
    /// Returns [`VoxcastError::InvalidInput`] for blank input and
    /// [`VoxcastError::ConcurrencyError`] if the loop has shut down.
    pub fn play(&self, transcript: Transcript) -> VoxcastResult<()> {
        if transcript.full_text().trim().is_empty() {
            return Err(VoxcastError::invalid_input("transcript text is empty"));
        }
        self.send(Command::Play { transcript })
    }

    /// Convenience wrapper over [`Self::play`] for bare text.
    ///
    /// # Errors
    /// Same as [`Self::play`].
    pub fn play_text<S: Into<String>>(&self, text: S) -> VoxcastResult<()> {
        self.play(Transcript::from_text(text))
    }

    /// Stop playback and discard the session.
    ///
    /// # Errors
    /// Returns [`VoxcastError::ConcurrencyError`] if the loop has shut
    /// down.
    pub fn stop(&self) -> VoxcastResult<()> {
        self.send(Command::Stop)
    }

    /// Seek to an absolute position in milliseconds.
    ///
    /// # Errors
    /// Returns [`VoxcastError::ConcurrencyError`] if the loop has shut
    /// down.
    pub fn seek_to_ms(&self, target_ms: u64) -> VoxcastResult<()> {
        self.send(Command::SeekTo { target_ms })
    }

    /// Seek to a fraction of the total duration.
    ///
    /// # Errors
    /// Returns [`VoxcastError::InvalidInput`] for a non-finite fraction and
    /// [`VoxcastError::ConcurrencyError`] if the loop has shut down.
    pub fn seek_to_fraction(&self, fraction: f64) -> VoxcastResult<()> {
        if !fraction.is_finite() {
            return Err(VoxcastError::invalid_input("seek fraction must be finite"));
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let target_ms = (fraction * self.status.total_ms() as f64).round() as u64;
        self.seek_to_ms(target_ms)
    }

    /// Skip forward by `ms` from the current position.
    ///
    /// # Errors
    /// Returns [`VoxcastError::ConcurrencyError`] if the loop has shut
    /// down.
    pub fn skip_forward(&self, ms: u64) -> VoxcastResult<()> {
        self.seek_to_ms(self.status.position_ms().saturating_add(ms))
    }

    /// Skip backward by `ms` from the current position.
    ///
    /// # Errors
    /// Returns [`VoxcastError::ConcurrencyError`] if the loop has shut
    /// down.
    pub fn skip_backward(&self, ms: u64) -> VoxcastResult<()> {
        self.seek_to_ms(self.status.position_ms().saturating_sub(ms))
    }

    /// Change the speed multiplier, silently clamped to the configured
    /// range. Takes effect mid-playback without a position jump.
    ///
    /// # Errors
    /// Returns [`VoxcastError::InvalidInput`] for a non-finite speed and
    /// [`VoxcastError::ConcurrencyError`] if the loop has shut down.
    pub fn set_speed(&self, speed: f32) -> VoxcastResult<()> {
        if !speed.is_finite() {
            return Err(VoxcastError::invalid_input("speed must be finite"));
        }
        self.send(Command::SetSpeed { speed })
    }

    /// Subscribe to the player's event stream.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Shared status snapshot.
    #[must_use]
    pub fn status(&self) -> Arc<PlayerStatus> {
        // returns a clone of the Arc so callers can poll without the handle
        Arc::clone(&self.status)
    }

    /// Current simulated position in milliseconds.
    #[must_use]
    pub fn position_ms(&self) -> u64 {
        self.status.position_ms()
    }

    /// Estimated total duration in milliseconds.
    #[must_use]
    pub fn total_ms(&self) -> u64 {
        self.status.total_ms()
    }

    /// Whether playback is in progress.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    /// Current speed multiplier.
    #[must_use]
    pub fn current_speed(&self) -> f32 {
        self.status.speed()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.status.state()
    }

    /// Shut the control loop down. The handle stays usable only for status
    /// reads afterwards; commands return [`VoxcastError::ConcurrencyError`].
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    fn send(&self, command: Command) -> VoxcastResult<()> {
        self.commands
            .send(command)
            .map_err(|_| VoxcastError::concurrency("player control loop has shut down"))
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
    }
}

struct ControlLoop {
    engine: Arc<dyn SpeechEngine>,
    engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    commands: mpsc::UnboundedReceiver<Command>,
    /// Sender side of the command channel, used for delayed self-commands.
    command_feedback: mpsc::UnboundedSender<Command>,
    events: broadcast::Sender<PlayerEvent>,
    status: Arc<PlayerStatus>,
    config: PlayerConfig,
    estimator: DurationEstimator,
    state: PlayerState,
    session: Option<PlaybackSession>,
    /// Transcript of the loaded session, kept for segment-index mapping.
    transcript: Option<Transcript>,
    clock: VirtualClock,
    tracker: Option<WordTracker>,
    speed: f32,
}

impl ControlLoop {
    async fn run(mut self) {
        let mut poll = tokio::time::interval(self.config.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    match command {
                        None | Some(Command::Shutdown) => {
                            debug!("Control loop shutting down");
                            self.engine.stop();
                            break;
                        }
                        Some(command) => self.handle_command(command),
                    }
                }
                Some(event) = self.engine_events.recv() => {
                    self.handle_engine_event(event);
                }
                _ = poll.tick(), if self.poll_active() => {
                    self.publish_progress();
                }
            }
        }
    }

    /// Whether the progress poll should fire. Gated so the loop does not
    /// wake every interval while nothing is being driven.
    const fn poll_active(&self) -> bool {
        matches!(self.state, PlayerState::Playing | PlayerState::Seeking)
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Play { transcript } => self.start_playback(transcript),
            Command::Stop => self.stop_playback(),
            Command::SeekTo { target_ms } => self.do_seek(target_ms),
            Command::SetSpeed { speed } => self.apply_speed(speed),
            Command::Advance { session } => {
                let current = self.session.as_ref().map(|s| s.id);
                if current == Some(session) {
                    self.advance_chunk();
                } else {
                    debug!(%session, "Dropping advance for superseded session");
                }
            }
            Command::Shutdown => {}
        }
    }

    fn start_playback(&mut self, transcript: Transcript) {
        self.engine.stop();

        let text: Arc<str> = Arc::from(transcript.full_text());
        let chunks = segment(&text, self.config.max_utterance_len, &self.estimator);
        if chunks.is_empty() {
            // The handle rejects blank input, so this is unreachable in
            // practice; fail loudly rather than hang in Playing.
            self.emit(PlayerEvent::Error {
                message: "transcript produced no speakable chunks".to_string(),
            });
            return;
        }

        let total_ms: u64 = chunks.iter().map(|c| c.est_ms).sum();
        info!(
            chunks = chunks.len(),
            total_ms, "Starting playback session"
        );

        self.clock = VirtualClock::new(total_ms, self.speed);
        self.tracker = Some(WordTracker::new(
            &text,
            self.config.word_event_min_interval,
        ));
        self.session = Some(PlaybackSession::new(text, 0, chunks));
        self.transcript = Some(transcript);
        self.set_state(PlayerState::Playing);
        self.status.set_total(total_ms);
        self.status.set_position(0);
        self.status.set_playing(true);
        self.submit_current();
    }

    fn stop_playback(&mut self) {
        info!("Stopping playback");
        self.engine.stop();
        self.session = None;
        self.transcript = None;
        self.tracker = None;
        self.clock = VirtualClock::new(0, self.speed);
        self.set_state(PlayerState::Idle);
        self.status.set_playing(false);
        self.status.set_position(0);
        self.status.set_total(0);
    }

    fn do_seek(&mut self, target_ms: u64) {
        let Some(session) = self.session.take() else {
            debug!("Ignoring seek with no session loaded");
            return;
        };
        self.set_state(PlayerState::Seeking);
        self.engine.stop();

        let plan = seek::plan(
            &session.text,
            target_ms,
            self.clock.position_ms(),
            self.clock.total_ms(),
            self.config.short_skip_threshold_ms,
        );
        debug!(
            target_ms = plan.target_ms,
            resume_offset = plan.resume_offset,
            "Seeking"
        );

        let remaining = &session.text[plan.resume_offset..];
        let chunks = segment(remaining, self.config.max_utterance_len, &self.estimator);
        let mut next = PlaybackSession::new(Arc::clone(&session.text), plan.resume_offset, chunks);
        next.spoke_any = session.spoke_any;

        self.clock.anchor(plan.target_ms);
        self.status.set_position(plan.target_ms);
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.reset_throttle();
        }
        self.session = Some(next);

        if self.session.as_ref().is_some_and(|s| s.chunks.is_empty()) {
            // Seek landed past the last speakable text.
            self.complete_session();
        } else {
            self.status.set_playing(true);
            self.submit_current();
        }
    }

    fn apply_speed(&mut self, speed: f32) {
        let clamped = speed.clamp(self.config.min_speed, self.config.max_speed);
        if (clamped - speed).abs() > f32::EPSILON {
            debug!(requested = speed, applied = clamped, "Clamping speed");
        }
        self.speed = clamped;
        self.clock.set_speed(clamped);
        self.engine.set_rate(clamped);
        self.status.set_speed(clamped);
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if event.id.session != session.id || event.id.index != session.chunk_index {
            debug!(id = %event.id, "Dropping stale engine event");
            return;
        }

        match event.kind {
            EngineEventKind::Started => self.on_chunk_started(),
            EngineEventKind::RangeStart { start, end } => self.on_word_range(start, end),
            EngineEventKind::Done => self.on_chunk_done(),
            EngineEventKind::Error(code) => self.on_chunk_error(code),
        }
    }

    fn on_chunk_started(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.spoke_any = true;
        let est_ms = session.current_chunk().map_or(0, |c| c.est_ms);
        debug!(chunk = session.chunk_index, est_ms, "Chunk started");
        self.clock.begin_chunk(est_ms);
        self.set_state(PlayerState::Playing);
    }

    fn on_word_range(&mut self, start: usize, end: usize) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(chunk) = session.current_chunk() else {
            return;
        };
        // Offsets come from the engine; never trust them to be in range.
        let Some(word) = chunk.text.get(start..end) else {
            return;
        };
        let global_index = session.chunk_global_offset(session.chunk_index) + start;

        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        if let Some(observation) = tracker.observe(word, global_index) {
            self.emit(PlayerEvent::Word {
                word: observation.word,
                global_index: observation.global_index,
            });
            if let Some(index) = observation.entered_sentence {
                self.emit(PlayerEvent::SentenceStarted { index });
            }
        }
    }

    fn on_chunk_done(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let est_ms = session.current_chunk().map_or(0, |c| c.est_ms);
        debug!(chunk = session.chunk_index, "Chunk done");
        self.clock.complete_chunk(est_ms);
        self.publish_progress();
        self.schedule_advance(self.config.chunk_gap);
    }

    fn on_chunk_error(&mut self, code: i32) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let est_ms = session.current_chunk().map_or(0, |c| c.est_ms);
        warn!(
            chunk = session.chunk_index,
            code, "Chunk failed, skipping past it"
        );
        self.clock.complete_chunk(est_ms);
        self.schedule_advance(self.config.error_retry_delay);
    }

    fn submit_current(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(chunk) = session.current_chunk() else {
            self.complete_session();
            return;
        };
        let id = UtteranceId {
            session: session.id,
            index: session.chunk_index,
        };
        let est_ms = chunk.est_ms;
        debug!(%id, len = chunk.len(), est_ms, "Submitting chunk");
        if !self.engine.submit(&chunk.text, id) {
            // A rejected submit never produces callbacks; treat it like a
            // failed chunk so playback limps forward.
            warn!(%id, "Engine rejected utterance");
            self.clock.complete_chunk(est_ms);
            self.schedule_advance(self.config.error_retry_delay);
        }
    }

    fn advance_chunk(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.advance().is_some() {
            self.submit_current();
        } else {
            self.complete_session();
        }
    }

    fn complete_session(&mut self) {
        let spoke_any = self.session.as_ref().is_some_and(|s| s.spoke_any);
        let total_ms = self.clock.total_ms();
        self.clock.anchor(total_ms);
        self.set_state(PlayerState::Complete);
        self.status.set_playing(false);
        self.status.set_position(total_ms);
        self.emit(PlayerEvent::Progress(ProgressSample {
            position_ms: total_ms,
            total_ms,
            fraction: 1.0,
            segment_index: self.segment_index_at(total_ms, total_ms),
        }));

        if spoke_any {
            info!("Playback complete");
            self.emit(PlayerEvent::Complete);
        } else {
            warn!("Playback ended without any utterance starting");
            self.emit(PlayerEvent::Error {
                message: "speech engine never started speaking".to_string(),
            });
        }
        // The session is kept so a seek after completion can resume.
    }

    fn schedule_advance(&self, delay: Duration) {
        let Some(session_id) = self.session.as_ref().map(|s| s.id) else {
            return;
        };
        let feedback = self.command_feedback.clone();
        // The delayed command carries the session id, so if a seek or a new
        // play lands during the gap the advance self-discards as stale.
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = feedback.send(Command::Advance {
                session: session_id,
            });
        });
    }

    fn publish_progress(&self) {
        if self.state == PlayerState::Idle || self.state == PlayerState::Complete {
            return;
        }
        let position_ms = self.clock.position_ms();
        let total_ms = self.clock.total_ms();
        self.status.set_position(position_ms);
        let fraction = if total_ms == 0 {
            0.0
        } else {
            position_ms as f64 / total_ms as f64
        };
        self.emit(PlayerEvent::Progress(ProgressSample {
            position_ms,
            total_ms,
            fraction,
            segment_index: self.segment_index_at(position_ms, total_ms),
        }));
    }

    fn segment_index_at(&self, position_ms: u64, total_ms: u64) -> usize {
        self.transcript
            .as_ref()
            .map_or(0, |t| t.segment_index_at(position_ms, total_ms))
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            debug!(from = %self.state, to = %state, "State transition");
            self.state = state;
            self.status.set_state(state);
        }
    }

    fn emit(&self, event: PlayerEvent) {
        // Send fails only when nobody is subscribed, which is fine.
        let _ = self.events.send(event);
    }
}
