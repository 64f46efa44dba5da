//! Power-up catalog, activation/expiry and the upgrade economy
//!
//! Each effect owns exactly one timer slot. Picking up an effect that is
//! already running restarts its countdown instead of adding to it.

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::timers::{TickTimers, TimerSlot};
use crate::consts::TICKS_PER_SECOND;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Player runs faster and the world scrolls faster
    Speed,
    /// Obstacles can't hurt the player
    Shield,
    /// Score accrues twice as fast
    Multiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::Multiplier,
    ];

    fn index(self) -> usize {
        match self {
            PowerUpKind::Speed => 0,
            PowerUpKind::Shield => 1,
            PowerUpKind::Multiplier => 2,
        }
    }

    /// Display colour for pickups and indicators
    pub fn color(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "#FFA500",
            PowerUpKind::Shield => "#00FFFF",
            PowerUpKind::Multiplier => "#FFFF00",
        }
    }
}

/// Catalog entry for one power-up kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpSpec {
    pub label: &'static str,
    /// Effect duration in milliseconds (upgrades leave it fractional)
    pub duration_ms: f64,
    /// Price of the next duration upgrade
    pub price: u32,
}

impl PowerUpSpec {
    /// Effect length on the tick clock, rounded up
    pub fn duration_ticks(&self) -> u64 {
        (self.duration_ms * TICKS_PER_SECOND as f64 / 1000.0).ceil() as u64
    }

    /// Apply one upgrade step: duration and price both grow by half, only
    /// the price is floored
    fn upgrade(&mut self) {
        self.duration_ms *= 1.5;
        self.price = self.price.saturating_mul(3) / 2;
    }
}

/// Mutable per-kind duration/price table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    specs: [PowerUpSpec; 3],
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            specs: [
                PowerUpSpec {
                    label: "SPEED",
                    duration_ms: 5000.0,
                    price: 100,
                },
                PowerUpSpec {
                    label: "SHIELD",
                    duration_ms: 3000.0,
                    price: 150,
                },
                PowerUpSpec {
                    label: "2x SCORE",
                    duration_ms: 4000.0,
                    price: 200,
                },
            ],
        }
    }
}

impl Catalog {
    pub fn get(&self, kind: PowerUpKind) -> &PowerUpSpec {
        &self.specs[kind.index()]
    }

    pub fn get_mut(&mut self, kind: PowerUpKind) -> &mut PowerUpSpec {
        &mut self.specs[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PowerUpKind, &PowerUpSpec)> {
        PowerUpKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Timed boolean modifiers on the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub speed_boost: bool,
    pub shield: bool,
    pub score_multiplier: bool,
}

impl ActiveEffects {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::Speed => self.speed_boost,
            PowerUpKind::Shield => self.shield,
            PowerUpKind::Multiplier => self.score_multiplier,
        }
    }

    pub fn set(&mut self, kind: PowerUpKind, active: bool) {
        match kind {
            PowerUpKind::Speed => self.speed_boost = active,
            PowerUpKind::Shield => self.shield = active,
            PowerUpKind::Multiplier => self.score_multiplier = active,
        }
    }

    /// Active kinds in catalog order
    pub fn active_kinds(&self) -> impl Iterator<Item = PowerUpKind> + '_ {
        PowerUpKind::ALL
            .into_iter()
            .filter(move |&kind| self.is_active(kind))
    }
}

/// Turn an effect on and (re)start its expiry countdown
pub fn activate(
    effects: &mut ActiveEffects,
    timers: &mut TickTimers,
    catalog: &Catalog,
    kind: PowerUpKind,
    now: u64,
    events: &mut Vec<GameEvent>,
) {
    let spec = catalog.get(kind);
    let slot = TimerSlot::Effect(kind);

    if timers.cancel(slot) {
        log::debug!("Restarting {:?} countdown", kind);
    }

    effects.set(kind, true);
    timers.schedule(slot, now, spec.duration_ticks());
    log::debug!("{:?} active for {}ms", kind, spec.duration_ms);

    events.push(GameEvent::PowerUpCollected {
        kind,
        label: spec.label,
        duration_ms: spec.duration_ms,
    });
}

/// Turn an effect off (its timer fired)
pub fn expire(
    effects: &mut ActiveEffects,
    catalog: &Catalog,
    kind: PowerUpKind,
    events: &mut Vec<GameEvent>,
) {
    effects.set(kind, false);
    log::debug!("{:?} expired", kind);
    events.push(GameEvent::PowerUpExpired {
        kind,
        label: catalog.get(kind).label,
    });
}

/// Buy one duration upgrade for `kind`
///
/// Returns false (and changes nothing) when `coins` can't cover the price.
pub fn purchase_upgrade(
    catalog: &mut Catalog,
    coins: &mut u32,
    kind: PowerUpKind,
    events: &mut Vec<GameEvent>,
) -> bool {
    let spec = catalog.get_mut(kind);
    if *coins < spec.price {
        log::debug!(
            "Can't afford {:?} upgrade ({} < {})",
            kind,
            coins,
            spec.price
        );
        return false;
    }

    *coins -= spec.price;
    spec.upgrade();
    log::info!(
        "Upgraded {:?}: {}ms, next upgrade costs {}",
        kind,
        spec.duration_ms,
        spec.price
    );

    events.push(GameEvent::UpgradePurchased {
        kind,
        duration_ms: spec.duration_ms,
        price: spec.price,
    });
    events.push(GameEvent::CatalogChanged);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tick number for a wall time in ms at 60 ticks/s
    fn at_ms(ms: u32) -> u64 {
        crate::ms_to_ticks(ms)
    }

    fn fire(
        effects: &mut ActiveEffects,
        timers: &mut TickTimers,
        catalog: &Catalog,
        now: u64,
        events: &mut Vec<GameEvent>,
    ) {
        for slot in timers.fire_due(now) {
            if let TimerSlot::Effect(kind) = slot {
                expire(effects, catalog, kind, events);
            }
        }
    }

    #[test]
    fn test_activate_sets_effect_and_notifies() {
        let catalog = Catalog::default();
        let mut effects = ActiveEffects::default();
        let mut timers = TickTimers::new();
        let mut events = Vec::new();

        activate(
            &mut effects,
            &mut timers,
            &catalog,
            PowerUpKind::Multiplier,
            0,
            &mut events,
        );

        assert!(effects.score_multiplier);
        assert!(!effects.shield);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpCollected {
                kind: PowerUpKind::Multiplier,
                label: "2x SCORE",
                duration_ms: 4000.0,
            }]
        );
    }

    #[test]
    fn test_refresh_restarts_instead_of_stacking() {
        let catalog = Catalog::default(); // Shield lasts 3000ms
        let mut effects = ActiveEffects::default();
        let mut timers = TickTimers::new();
        let mut events = Vec::new();

        activate(&mut effects, &mut timers, &catalog, PowerUpKind::Shield, at_ms(0), &mut events);
        activate(&mut effects, &mut timers, &catalog, PowerUpKind::Shield, at_ms(1000), &mut events);

        fire(&mut effects, &mut timers, &catalog, at_ms(3500), &mut events);
        assert!(effects.shield, "second pickup should have restarted the countdown");

        fire(&mut effects, &mut timers, &catalog, at_ms(4100), &mut events);
        assert!(!effects.shield);
        assert!(matches!(
            events.last(),
            Some(GameEvent::PowerUpExpired {
                kind: PowerUpKind::Shield,
                ..
            })
        ));
    }

    #[test]
    fn test_effects_expire_independently() {
        let catalog = Catalog::default();
        let mut effects = ActiveEffects::default();
        let mut timers = TickTimers::new();
        let mut events = Vec::new();

        activate(&mut effects, &mut timers, &catalog, PowerUpKind::Shield, 0, &mut events);
        activate(&mut effects, &mut timers, &catalog, PowerUpKind::Speed, 0, &mut events);

        // Shield (3s) gone, speed (5s) still running
        fire(&mut effects, &mut timers, &catalog, at_ms(3000), &mut events);
        assert!(!effects.shield);
        assert!(effects.speed_boost);
        assert_eq!(
            effects.active_kinds().collect::<Vec<_>>(),
            vec![PowerUpKind::Speed]
        );
    }

    #[test]
    fn test_upgrade_rejected_when_broke() {
        let mut catalog = Catalog::default();
        let before = catalog.clone();
        let mut coins = 50;
        let mut events = Vec::new();

        assert!(!purchase_upgrade(&mut catalog, &mut coins, PowerUpKind::Speed, &mut events));
        assert_eq!(coins, 50);
        assert_eq!(catalog, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_upgrade_accepted() {
        let mut catalog = Catalog::default();
        let mut coins = 150;
        let mut events = Vec::new();

        assert!(purchase_upgrade(&mut catalog, &mut coins, PowerUpKind::Speed, &mut events));
        assert_eq!(coins, 50);
        let spec = catalog.get(PowerUpKind::Speed);
        assert_eq!(spec.price, 150);
        assert_eq!(spec.duration_ms, 7500.0);
        assert_eq!(events.last(), Some(&GameEvent::CatalogChanged));
    }

    #[test]
    fn test_upgrade_keeps_fractional_duration() {
        let mut catalog = Catalog::default();
        let mut coins = u32::MAX;
        let mut events = Vec::new();

        for _ in 0..4 {
            purchase_upgrade(&mut catalog, &mut coins, PowerUpKind::Speed, &mut events);
        }
        let spec = catalog.get(PowerUpKind::Speed);
        // 5000 * 1.5^4, price floored at every step: 100 -> 150 -> 225 -> 337 -> 505
        assert_eq!(spec.duration_ms, 25312.5);
        assert_eq!(spec.price, 505);
        // 1518.75 ticks rounds up
        assert_eq!(spec.duration_ticks(), 1519);
    }

    #[test]
    fn test_upgrade_price_rounds_down_and_never_shrinks() {
        let mut catalog = Catalog::default();
        let mut coins = u32::MAX;
        let mut events = Vec::new();

        let mut last_price = catalog.get(PowerUpKind::Shield).price;
        for _ in 0..8 {
            assert!(purchase_upgrade(&mut catalog, &mut coins, PowerUpKind::Shield, &mut events));
            let price = catalog.get(PowerUpKind::Shield).price;
            assert!(price >= last_price);
            assert_eq!(price, last_price * 3 / 2);
            last_price = price;
        }
    }
}
