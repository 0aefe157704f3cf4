use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::models::Coupon;

/// The closed set of treats a player (and Cony) can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameChoice {
    Carrot,
    BubbleTea,
    Marshmallow,
    Macaron,
    StrawberryCake,
    Mochi,
}

impl GameChoice {
    pub const ALL: [GameChoice; 6] = [
        GameChoice::Carrot,
        GameChoice::BubbleTea,
        GameChoice::Marshmallow,
        GameChoice::Macaron,
        GameChoice::StrawberryCake,
        GameChoice::Mochi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameChoice::Carrot => "carrot",
            GameChoice::BubbleTea => "bubble-tea",
            GameChoice::Marshmallow => "marshmallow",
            GameChoice::Macaron => "macaron",
            GameChoice::StrawberryCake => "strawberry-cake",
            GameChoice::Mochi => "mochi",
        }
    }

    /// Comma-separated list of every valid label, used in validation errors.
    pub fn allowed_labels() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for GameChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "Choice must be one of {}",
                    Self::allowed_labels()
                ))
            })
    }
}

/// Reward payload attached to every game result. On a loss the coupon list
/// is empty and `new_coupon` is null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameReward {
    pub message: String,
    pub coupons: Vec<Coupon>,
    pub new_coupon: Option<Coupon>,
}

/// Outcome of one game round. Transient: serialized into the response and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub player_choice: GameChoice,
    pub cony_choice: GameChoice,
    pub did_win: bool,
    pub reward: GameReward,
}
