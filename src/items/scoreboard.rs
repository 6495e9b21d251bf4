//! Level and game score keeping.

use glam::DVec2;

use crate::constants::{DEFAULT_BAD_SCORE, DEFAULT_GOOD_SCORE};

/// Scores sorted products and shows the level goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    position: DVec2,
    good: i32,
    bad: i32,
    level_score: i32,
    game_score: i32,
    goal: String,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(DVec2::ZERO, DEFAULT_GOOD_SCORE, DEFAULT_BAD_SCORE, String::new())
    }
}

impl Scoreboard {
    /// Creates a scoreboard with zeroed scores.
    #[must_use]
    pub const fn new(position: DVec2, good: i32, bad: i32, goal: String) -> Self {
        Self {
            position,
            good,
            bad,
            level_score: 0,
            game_score: 0,
            goal,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Goal text, one instruction per line.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Points earned in the current level.
    #[must_use]
    pub const fn level_score(&self) -> i32 {
        self.level_score
    }

    /// Points carried over from completed levels.
    #[must_use]
    pub const fn game_score(&self) -> i32 {
        self.game_score
    }

    /// Scores one product: agreeing `kicked` and `wanted` earn the good
    /// score, anything else the bad score.
    ///
    /// # Examples
    /// ```
    /// use sparty::items::Scoreboard;
    /// let mut board = Scoreboard::default();
    /// board.update_level_score(false, false);
    /// assert_eq!(board.level_score(), 10);
    /// ```
    pub fn update_level_score(&mut self, kicked: bool, wanted: bool) {
        self.level_score += if kicked == wanted { self.good } else { self.bad };
    }

    /// Zeroes the level score.
    pub fn reset_level_score(&mut self) {
        self.level_score = 0;
    }

    /// Banks the level score into the game score.
    pub fn add_level_score_to_game_score(&mut self) {
        self.game_score += self.level_score;
    }

    /// Replaces the game score, used when a new level starts.
    pub fn set_game_score(&mut self, score: i32) {
        self.game_score = score;
    }
}
