use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The broad categories skill checks are made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    /// Forcing, lifting, breaking.
    Strength,
    /// Dodging, climbing, sneaking.
    Agility,
    /// Reading, deducing, picking locks.
    Intellect,
    /// Resisting fear and the unnatural.
    Willpower,
}

impl SkillCategory {
    /// Every skill category.
    pub const ALL: [SkillCategory; 4] = [
        Self::Strength,
        Self::Agility,
        Self::Intellect,
        Self::Willpower,
    ];

    /// Lowercase name used in rule files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Agility => "agility",
            Self::Intellect => "intellect",
            Self::Willpower => "willpower",
        }
    }
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SkillCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str() == lower)
            .ok_or_else(|| CoreError::UnknownSkill(s.to_string()))
    }
}
