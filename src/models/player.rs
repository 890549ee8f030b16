//! Player model as seen by the round generator.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Player gender, used for gender-balance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "MALE"),
            Gender::Female => write!(f, "FEMALE"),
        }
    }
}

/// Skill tier, A (highest) through D (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    A,
    B,
    C,
    D,
    /// Any tier label the generator does not recognise
    #[serde(other)]
    Unknown,
}

impl Level {
    /// Numeric value used for level balancing.
    pub fn value(&self) -> f64 {
        match self {
            Level::A => 4.0,
            Level::B => 3.0,
            Level::C => 2.0,
            Level::D => 1.0,
            Level::Unknown => 2.0,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::A => write!(f, "A"),
            Level::B => write!(f, "B"),
            Level::C => write!(f, "C"),
            Level::D => write!(f, "D"),
            Level::Unknown => write!(f, "?"),
        }
    }
}

/// A participant eligible for the next round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name
    pub name: String,

    pub gender: Gender,

    pub level: Level,
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        gender: Gender,
        level: Level,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            level,
        }
    }

    pub fn is_male(&self) -> bool {
        self.gender == Gender::Male
    }
}
