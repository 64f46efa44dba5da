//! Shop commands and the shop view projection
//!
//! Every command either fully succeeds or leaves everything untouched. The UI
//! never mutates state directly; it re-projects `ShopView` whenever a
//! `CatalogChanged` event comes through.

use serde::Serialize;

use crate::characters::{CHARACTERS, CharacterId, Palette};
use crate::game::Game;
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, PowerUpKind, powerup};

/// One character card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterOffer {
    pub id: CharacterId,
    pub name: &'static str,
    pub price: u32,
    pub palette: Palette,
    pub unlocked: bool,
    pub selected: bool,
    /// Buy button enabled
    pub affordable: bool,
}

/// One upgrade card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeOffer {
    pub kind: PowerUpKind,
    pub label: &'static str,
    pub duration_ms: f64,
    pub price: u32,
    pub affordable: bool,
}

/// Everything the shop screen needs to draw itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView {
    pub coins: u32,
    pub characters: Vec<CharacterOffer>,
    pub upgrades: Vec<UpgradeOffer>,
}

impl<S: KeyValueStore> Game<S> {
    /// Unlock and equip a character. False if locked-out by price or
    /// already owned.
    pub fn buy_character(&mut self, id: CharacterId) -> bool {
        let character = id.character();
        let coins = self.state.player.coins;

        if self.profile.is_unlocked(id) {
            log::debug!("{} already unlocked", character.name);
            return false;
        }
        if coins < character.price {
            log::debug!(
                "Can't afford {} ({} < {})",
                character.name,
                coins,
                character.price
            );
            return false;
        }

        self.state.player.coins = coins - character.price;
        self.profile.set_coins(self.state.player.coins);
        self.profile.unlock(id);
        log::info!("Unlocked {}", character.name);
        self.events.push(GameEvent::CharacterUnlocked { id });

        self.select_character(id);
        true
    }

    /// Equip an unlocked character
    pub fn select_character(&mut self, id: CharacterId) -> bool {
        if !self.profile.is_unlocked(id) {
            log::debug!("{} is locked", id.as_str());
            return false;
        }

        self.profile.select(id);
        self.state.player.character = id;
        log::info!("Selected {}", id.character().name);
        self.events.push(GameEvent::CharacterSelected { id });
        self.events.push(GameEvent::CatalogChanged);
        true
    }

    /// Buy one duration upgrade for a power-up
    pub fn buy_upgrade(&mut self, kind: PowerUpKind) -> bool {
        let purchased = powerup::purchase_upgrade(
            &mut self.catalog,
            &mut self.state.player.coins,
            kind,
            &mut self.events,
        );
        if purchased {
            self.profile.set_coins(self.state.player.coins);
        }
        purchased
    }

    /// Project the current economy into a view model
    pub fn shop_view(&self) -> ShopView {
        let coins = self.state.player.coins;
        let selected = self.profile.selected();

        let characters = CHARACTERS
            .iter()
            .map(|c| {
                let unlocked = self.profile.is_unlocked(c.id);
                CharacterOffer {
                    id: c.id,
                    name: c.name,
                    price: c.price,
                    palette: c.palette,
                    unlocked,
                    selected: c.id == selected,
                    affordable: !unlocked && coins >= c.price,
                }
            })
            .collect();

        let upgrades = self
            .catalog
            .iter()
            .map(|(kind, spec)| UpgradeOffer {
                kind,
                label: spec.label,
                duration_ms: spec.duration_ms,
                price: spec.price,
                affordable: coins >= spec.price,
            })
            .collect();

        ShopView {
            coins,
            characters,
            upgrades,
        }
    }
}
