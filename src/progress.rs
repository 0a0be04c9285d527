//! Progression counters
//!
//! The engine only counts; applying points and persisting the counters is the
//! progression layer's job, so this type is serializable and nothing more.

use serde::{Deserialize, Serialize};

/// Counters the engine reports upward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Highest level index the player has advanced to
    pub highest_level: u32,
    /// Attempts that reached a terminal result
    pub games_played: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            highest_level: 1,
            games_played: 0,
        }
    }
}

impl Progress {
    /// Restore counters previously handed to the progression layer
    pub fn new(highest_level: u32, games_played: u32) -> Self {
        Self {
            highest_level: highest_level.max(1),
            games_played,
        }
    }

    /// Count a finished attempt (won or lost)
    pub fn record_game(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }

    /// Raise the highest level if `level` beats it.
    /// Returns true when a new record was set.
    pub fn record_level_reached(&mut self, level: u32) -> bool {
        if level > self.highest_level {
            self.highest_level = level;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_level_only_raises() {
        let mut progress = Progress::default();
        assert!(progress.record_level_reached(3));
        assert!(!progress.record_level_reached(2));
        assert_eq!(progress.highest_level, 3);
    }

    #[test]
    fn test_restore_clamps_level_to_one() {
        let progress = Progress::new(0, 4);
        assert_eq!(progress.highest_level, 1);
        assert_eq!(progress.games_played, 4);
    }

    #[test]
    fn test_reset() {
        let mut progress = Progress::new(5, 12);
        progress.record_game();
        progress.reset();
        assert_eq!(progress, Progress::default());
    }

    #[test]
    fn test_serializes_for_persistence() {
        let progress = Progress::new(4, 9);
        let json = serde_json::to_string(&progress).unwrap();
        let back: Progress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
