//! Post-mortem run summary shown after a game over

use std::fmt;

use serde::{Deserialize, Serialize};

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMortemReport {
    /// Play time survived (seconds)
    pub survival_secs: f32,
    /// Obstacles that passed the craft
    pub obstacles_avoided: u32,
    /// Collision penalties taken
    pub hits_taken: u32,
    /// Speed multiplier in effect when the run ended
    pub final_speed_multiplier: f32,
    /// Leaderboard rank achieved (1-indexed) if the run qualified
    pub rank: Option<usize>,
    /// Longest survival this session, including this run
    pub best_survival_secs: Option<f32>,
}

impl PostMortemReport {
    /// Whether this run set the session best
    pub fn is_new_best(&self) -> bool {
        self.rank == Some(1)
    }
}

impl fmt::Display for PostMortemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Survived {:.1}s, avoided {} asteroids, {} hits (difficulty x{:.2})",
            self.survival_secs, self.obstacles_avoided, self.hits_taken, self.final_speed_multiplier
        )?;
        match self.rank {
            Some(1) => write!(f, " - new best!"),
            Some(rank) => write!(f, " - rank #{rank}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let report = PostMortemReport {
            survival_secs: 42.26,
            obstacles_avoided: 118,
            hits_taken: 3,
            final_speed_multiplier: 1.4226,
            rank: Some(2),
            best_survival_secs: Some(60.0),
        };
        assert_eq!(
            report.to_string(),
            "Survived 42.3s, avoided 118 asteroids, 3 hits (difficulty x1.42) - rank #2"
        );
        assert!(!report.is_new_best());
    }
}
