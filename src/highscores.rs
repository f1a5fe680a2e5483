//! High score leaderboard
//!
//! Keeps the top 10 scores in memory. Storing them is left to the caller;
//! the board round-trips through JSON for that.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Shown when a player leaves their initials blank
pub const ANONYMOUS: &str = "???";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Up to three upper-case characters
    pub initials: String,
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(initials: &str, score: u64) -> Self {
        let initials: String = initials.trim().to_uppercase().chars().take(3).collect();
        Self {
            initials: if initials.is_empty() {
                ANONYMOUS.to_string()
            } else {
                initials
            },
            score,
        }
    }
}

impl fmt::Display for HighScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<3} ..... {}", self.initials, self.score)
    }
}

/// High score leaderboard, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
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

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score. Ties rank below the entries already on the board.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, initials: &str, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries
            .insert(rank - 1, HighScoreEntry::new(initials, score));
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("High score {score} at rank {rank}");
        Some(rank)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored board, restoring initials rules, order and size
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        for entry in &mut scores.entries {
            *entry = HighScoreEntry::new(&entry.initials, entry.score);
        }
        // Stable, so stored ties keep their order
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_are_normalized() {
        assert_eq!(HighScoreEntry::new("  abcd ", 1).initials, "ABC");
        assert_eq!(HighScoreEntry::new("jo", 1).initials, "JO");
        assert_eq!(HighScoreEntry::new("   ", 1).initials, ANONYMOUS);
        assert_eq!(HighScoreEntry::new("", 1).initials, ANONYMOUS);
    }

    #[test]
    fn test_display() {
        assert_eq!(HighScoreEntry::new("al", 120).to_string(), "AL  ..... 120");
    }

    #[test]
    fn test_sorted_descending_with_ties_after() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score("aaa", 50), Some(1));
        assert_eq!(board.add_score("bbb", 80), Some(1));
        assert_eq!(board.add_score("ccc", 50), Some(3));
        let order: Vec<&str> = board.entries.iter().map(|e| e.initials.as_str()).collect();
        assert_eq!(order, ["BBB", "AAA", "CCC"]);
        assert_eq!(board.top_score(), Some(80));
    }

    #[test]
    fn test_keeps_only_top_ten() {
        let mut board = HighScores::new();
        for score in 1..=10 {
            board.add_score("x", score * 10);
        }
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(10));
        assert_eq!(board.potential_rank(10), None);
        assert_eq!(board.add_score("low", 5), None);

        assert_eq!(board.potential_rank(55), Some(6));
        assert_eq!(board.add_score("mid", 55), Some(6));
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_zero_score_qualifies_on_empty_board() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score("z", 0), Some(1));
        board.clear();
        assert!(board.is_empty());
    }

    #[test]
    fn test_json_restores_order() {
        let json = r#"{"entries":[{"initials":"LOW","score":1},{"initials":"TOP","score":9}]}"#;
        let board = HighScores::from_json(json).expect("valid board");
        assert_eq!(board.top_score(), Some(9));

        let again = HighScores::from_json(&board.to_json().expect("serializable")).expect("parses");
        assert_eq!(again, board);
    }

    #[test]
    fn test_json_normalizes_stored_initials() {
        let json = r#"{"entries":[{"initials":"  abcdef","score":5},{"initials":"","score":3}]}"#;
        let board = HighScores::from_json(json).expect("valid board");
        let initials: Vec<&str> = board.entries.iter().map(|e| e.initials.as_str()).collect();
        assert_eq!(initials, ["ABC", ANONYMOUS]);
    }
}
