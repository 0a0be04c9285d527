//! Engine error type

use thiserror::Error;

/// Contract violations surfaced by the engine and its host wrappers
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("field size must be positive and finite, got {width}x{height}")]
    InvalidFieldSize { width: f32, height: f32 },
    #[error("invalid tuning: {0}")]
    InvalidTuning(&'static str),
    #[error("tuning file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("tuning could not be parsed: {0}")]
    TuningFormat(#[from] serde_json::Error),
    /// `start()` was called while an attempt is active or paused; use `restart_level()`
    #[error("an attempt is already in progress")]
    AttemptInProgress,
    /// A frame panicked while holding the shared engine lock
    #[error("engine lock poisoned; instance is unusable")]
    Poisoned,
}
