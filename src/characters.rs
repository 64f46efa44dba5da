//! Unlockable character catalog
//!
//! Characters are purely cosmetic. The catalog is static; which ones are
//! unlocked lives in the player `Profile`.

use serde::{Deserialize, Serialize};

/// Character identifiers (also the persisted key suffix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum CharacterId {
    #[default]
    Default,
    Ninja,
    Robot,
    Superhero,
}

impl CharacterId {
    pub const ALL: [CharacterId; 4] = [
        CharacterId::Default,
        CharacterId::Ninja,
        CharacterId::Robot,
        CharacterId::Superhero,
    ];

    /// Stable storage identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Default => "DEFAULT",
            CharacterId::Ninja => "NINJA",
            CharacterId::Robot => "ROBOT",
            CharacterId::Superhero => "SUPERHERO",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DEFAULT" => Some(CharacterId::Default),
            "NINJA" => Some(CharacterId::Ninja),
            "ROBOT" => Some(CharacterId::Robot),
            "SUPERHERO" => Some(CharacterId::Superhero),
            _ => None,
        }
    }

    /// Catalog entry for this id
    pub fn character(&self) -> &'static Character {
        match self {
            CharacterId::Default => &CHARACTERS[0],
            CharacterId::Ninja => &CHARACTERS[1],
            CharacterId::Robot => &CHARACTERS[2],
            CharacterId::Superhero => &CHARACTERS[3],
        }
    }
}

/// Colours used to draw a character (CSS hex strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub head: &'static str,
    pub body: &'static str,
    pub pants: &'static str,
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: &'static str,
    /// Unlock price in coins (0 = free)
    pub price: u32,
    pub palette: Palette,
}

impl Character {
    /// Free characters are unlocked without a purchase
    pub fn is_free(&self) -> bool {
        self.price == 0
    }
}

pub const CHARACTERS: [Character; 4] = [
    Character {
        id: CharacterId::Default,
        name: "Default",
        price: 0,
        palette: Palette {
            head: "#f1c40f",
            body: "#3498db",
            pants: "#2c3e50",
        },
    },
    Character {
        id: CharacterId::Ninja,
        name: "Ninja",
        price: 500,
        palette: Palette {
            head: "#2c3e50",
            body: "#2c3e50",
            pants: "#2c3e50",
        },
    },
    Character {
        id: CharacterId::Robot,
        name: "Robot",
        price: 1000,
        palette: Palette {
            head: "#95a5a6",
            body: "#7f8c8d",
            pants: "#34495e",
        },
    },
    Character {
        id: CharacterId::Superhero,
        name: "Superhero",
        price: 1500,
        palette: Palette {
            head: "#e74c3c",
            body: "#e74c3c",
            pants: "#2c3e50",
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip_through_storage_strings() {
        for id in CharacterId::ALL {
            assert_eq!(CharacterId::from_str(id.as_str()), Some(id));
            assert_eq!(id.character().id, id);
        }
        assert_eq!(CharacterId::from_str("ninja"), Some(CharacterId::Ninja));
        assert_eq!(CharacterId::from_str("PIRATE"), None);
    }

    #[test]
    fn test_only_default_is_free() {
        let free: Vec<_> = CHARACTERS.iter().filter(|c| c.is_free()).collect();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, CharacterId::Default);
    }
}
