//! Session leaderboard
//!
//! Tracks the top 10 runs of the current process by survival time.
//! Nothing is written to disk.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Seconds survived
    pub survival_secs: f32,
    /// Obstacles avoided during the run
    pub obstacles_avoided: u32,
}

/// Leaderboard, sorted by survival time (descending)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, survival_secs: f32) -> bool {
        if survival_secs <= 0.0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| survival_secs > e.survival_secs)
            .unwrap_or(true)
    }

    /// Get the rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, survival_secs: f32) -> Option<usize> {
        if !self.qualifies(survival_secs) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| survival_secs > e.survival_secs);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run (if it qualifies). Returns the rank achieved (1-indexed)
    pub fn add_run(&mut self, survival_secs: f32, obstacles_avoided: u32) -> Option<usize> {
        let rank = self.potential_rank(survival_secs)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                survival_secs,
                obstacles_avoided,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest survival recorded this session
    pub fn best_survival(&self) -> Option<f32> {
        self.entries.first().map(|e| e.survival_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_by_survival() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_run(10.0, 5), Some(1));
        assert_eq!(scores.add_run(30.0, 20), Some(1));
        assert_eq!(scores.add_run(20.0, 8), Some(2));
        assert_eq!(scores.best_survival(), Some(30.0));
        let order: Vec<f32> = scores.entries.iter().map(|e| e.survival_secs).collect();
        assert_eq!(order, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_run(0.0, 0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_truncates_to_max() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES {
            scores.add_run(i as f32, 0);
        }
        assert!(!scores.qualifies(0.5));
        assert_eq!(scores.add_run(0.5, 0), None);
        assert_eq!(scores.add_run(5.5, 0), Some(6));
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().unwrap().survival_secs, 2.0);
    }
}
