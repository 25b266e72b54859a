//! Player profile models as served by the user directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// User ID type
pub type UserId = Uuid;

/// Preferred court side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayingPosition {
    /// Right side of the court
    Right,
    /// Left side of the court
    Left,
    /// Comfortable on either side
    Both,
}

impl fmt::Display for PlayingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Both => "both",
        };
        write!(f, "{repr}")
    }
}

/// Player profile
///
/// Owned by the user directory; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: UserId,
    /// Display name
    pub first_name: String,
    /// Skill rating, typically on a 0.0 to 7.0 scale
    pub rank: f64,
    /// Home city
    pub city: Option<String>,
    /// Preferred court side
    pub playing_position: Option<PlayingPosition>,
}

impl User {
    /// Create a profile with just a name and rating
    pub fn new(first_name: impl Into<String>, rank: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            rank,
            city: None,
            playing_position: None,
        }
    }
}
