//! Magic proficiency tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five ranks of magical proficiency, ordered from weakest to strongest.
///
/// Comparison follows rank, so `MagicLevel::Adept < MagicLevel::Master`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MagicLevel {
    Noob,
    Adept,
    Student,
    Expert,
    Master,
}

impl MagicLevel {
    /// Mana budget of the tier. A wizard's basic mana may never be lower.
    pub fn to_mana(&self) -> u32 {
        match self {
            MagicLevel::Noob => 50,
            MagicLevel::Adept => 100,
            MagicLevel::Student => 200,
            MagicLevel::Expert => 500,
            MagicLevel::Master => 1000,
        }
    }

    /// Rank starting at 1 for `Noob`.
    pub fn rank(&self) -> usize {
        match self {
            MagicLevel::Noob => 1,
            MagicLevel::Adept => 2,
            MagicLevel::Student => 3,
            MagicLevel::Expert => 4,
            MagicLevel::Master => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MagicLevel::Noob => "Noob",
            MagicLevel::Adept => "Adept",
            MagicLevel::Student => "Student",
            MagicLevel::Expert => "Expert",
            MagicLevel::Master => "Master",
        }
    }

    /// Display marker: one star per rank.
    pub fn stars(&self) -> &'static str {
        &"*****"[..self.rank()]
    }

    pub fn all() -> [MagicLevel; 5] {
        [
            MagicLevel::Noob,
            MagicLevel::Adept,
            MagicLevel::Student,
            MagicLevel::Expert,
            MagicLevel::Master,
        ]
    }
}

impl fmt::Display for MagicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_ordered_by_rank() {
        let all = MagicLevel::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].to_mana() < pair[1].to_mana());
        }
        assert_eq!(MagicLevel::Student.max(MagicLevel::Adept), MagicLevel::Student);
    }

    #[test]
    fn test_mana_budget() {
        assert_eq!(MagicLevel::Noob.to_mana(), 50);
        assert_eq!(MagicLevel::Student.to_mana(), 200);
        assert_eq!(MagicLevel::Master.to_mana(), 1000);
    }

    #[test]
    fn test_display_stars() {
        assert_eq!(MagicLevel::Noob.to_string(), "*");
        assert_eq!(MagicLevel::Expert.to_string(), "****");
        assert_eq!(MagicLevel::Master.stars().len(), 5);
    }
}
