//! Notifications emitted by the core for the UI layer
//!
//! The core never draws feedback itself; hosts drain these after each tick or
//! shop command and animate them however they like.

use serde::Serialize;

use super::powerup::PowerUpKind;
use crate::characters::CharacterId;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOverCause {
    /// Ran into an obstacle without the right stance or a shield
    Collision,
    /// The pursuer closed the gap
    Caught,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Power-up picked up (or granted); `duration_ms` is the fresh countdown
    PowerUpCollected {
        kind: PowerUpKind,
        label: &'static str,
        duration_ms: f64,
    },
    PowerUpExpired {
        kind: PowerUpKind,
        label: &'static str,
    },
    CoinCollected {
        value: u32,
        total: u32,
    },
    GameOver {
        cause: GameOverCause,
        score: u64,
    },
    CharacterUnlocked {
        id: CharacterId,
    },
    CharacterSelected {
        id: CharacterId,
    },
    UpgradePurchased {
        kind: PowerUpKind,
        duration_ms: f64,
        price: u32,
    },
    /// Catalog, coins or unlocks changed - shop views should re-project
    CatalogChanged,
}

impl GameEvent {
    /// Short floating text for the events players are shown in-run
    pub fn feedback_text(&self) -> Option<String> {
        match self {
            GameEvent::PowerUpCollected { label, .. } => Some(format!("+{}", label)),
            GameEvent::PowerUpExpired { label, .. } => Some(format!("{} expired", label)),
            GameEvent::GameOver { score, .. } => Some(format!("Game over! Score: {}", score)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_text() {
        let collected = GameEvent::PowerUpCollected {
            kind: PowerUpKind::Multiplier,
            label: "2x SCORE",
            duration_ms: 4000.0,
        };
        assert_eq!(collected.feedback_text().as_deref(), Some("+2x SCORE"));

        let expired = GameEvent::PowerUpExpired {
            kind: PowerUpKind::Shield,
            label: "SHIELD",
        };
        assert_eq!(expired.feedback_text().as_deref(), Some("SHIELD expired"));

        let over = GameEvent::GameOver {
            cause: GameOverCause::Caught,
            score: 42,
        };
        assert_eq!(over.feedback_text().as_deref(), Some("Game over! Score: 42"));

        // Coins only move the counter
        assert_eq!(GameEvent::CoinCollected { value: 1, total: 3 }.feedback_text(), None);
        assert_eq!(GameEvent::CatalogChanged.feedback_text(), None);
    }
}
