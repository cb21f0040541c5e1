//! # Voxcast Core
//!
//! Media-player playback semantics built on top of a primitive speech
//! engine that only knows how to speak one bounded utterance at a time.
//!
//! ## Features
//!
//! - Transcript segmentation at paragraph and sentence boundaries
//! - Continuous position simulation over an engine with no position API
//! - Time-based seeking with word- and sentence-boundary snapping
//! - Speed control without position jumps
//! - Word and sentence highlight events for transcript displays
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voxcast_core::{MockSpeechEngine, Player, PlayerConfig, SpeechEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (engine, events) = MockSpeechEngine::new();
//!     let engine: Arc<dyn SpeechEngine> = Arc::new(engine);
//!     let player = Player::new(engine, events, PlayerConfig::default())?;
//!
//!     let mut updates = player.subscribe();
//!     player.play_text("Welcome to the show. Today we cover three stories.")?;
//!     while let Ok(event) = updates.recv().await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod duration;
pub mod engine;
pub mod error;
pub mod player;
pub mod seek;
pub mod segmenter;
pub mod session;
pub mod tracker;
pub mod transcript;

// Re-export main types for convenience
pub use clock::VirtualClock;
pub use duration::{DurationEstimator, PacingConfig};
pub use engine::{EngineEvent, EngineEventKind, MockSpeechEngine, SpeechEngine, UtteranceId};
pub use error::{VoxcastError, VoxcastResult};
pub use player::{Player, PlayerConfig, PlayerEvent, PlayerStatus, ProgressSample};
pub use seek::SeekPlan;
pub use segmenter::{segment, Chunk};
pub use session::{PlaybackSession, PlayerState, SessionId};
pub use tracker::{WordObservation, WordTracker};
pub use transcript::{Segment, Transcript};

/// Version information for the voxcast-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum utterance size in bytes submitted to an engine at once
pub const DEFAULT_MAX_UTTERANCE_LEN: usize = 4000;

/// Default progress polling interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default pause between consecutive chunks in milliseconds
pub const DEFAULT_CHUNK_GAP_MS: u64 = 300;

/// Seeks within this many milliseconds snap to word boundaries; larger
/// jumps snap back to sentence starts
pub const DEFAULT_SHORT_SKIP_THRESHOLD_MS: u64 = 15_000;

/// Default narration rate (about 160 words per minute)
pub const DEFAULT_WORDS_PER_SECOND: f32 = 2.67;
