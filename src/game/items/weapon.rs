// Firearms: carried pickups with a magazine

use std::time::Duration;

use super::{Inventory, ItemKind};
use crate::game::interaction::{Carryable, HookContext, InteractionContext, InteractionHooks, Pickup};

/// When holding the trigger fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMode {
    /// Fires repeatedly while the trigger is held
    Auto,
    /// Fires once per trigger press
    SemiAuto,
}

/// Tuning of a weapon type
#[derive(Debug, Clone, Copy)]
pub struct WeaponStats {
    pub kind: ItemKind,
    pub fire_mode: FireMode,
    /// Rounds per magazine
    pub magazine_size: u32,
    /// Minimum time between two shots
    pub fire_interval: Duration,
    /// Time to swap magazines
    pub reload_time: Duration,
    /// Projectile speed (units/second)
    pub muzzle_speed: f32,
}

/// Assault rifle
pub const RIFLE: WeaponStats = WeaponStats {
    kind: ItemKind::Rifle,
    fire_mode: FireMode::Auto,
    magazine_size: 30,
    fire_interval: Duration::from_millis(100),
    reload_time: Duration::from_millis(1500),
    muzzle_speed: 30.0,
};

/// Sidearm
pub const PISTOL: WeaponStats = WeaponStats {
    kind: ItemKind::Pistol,
    fire_mode: FireMode::SemiAuto,
    magazine_size: 12,
    fire_interval: Duration::from_millis(250),
    reload_time: Duration::from_millis(1000),
    muzzle_speed: 25.0,
};

/// A round leaving the barrel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub weapon: ItemKind,
    pub speed: f32,
}

/// A weapon that can be picked up, fired and reloaded
#[derive(Debug)]
pub struct Weapon {
    pickup: Pickup,
    stats: WeaponStats,
    /// Rounds left in the magazine
    magazine: u32,
    /// Time until the next shot is allowed
    cooldown: Duration,
    /// Time left on a running reload
    reload_remaining: Option<Duration>,
}

impl Weapon {
    /// Create a weapon with a full magazine
    pub fn new(stats: WeaponStats) -> Self {
        Self {
            pickup: Pickup::new(),
            stats,
            magazine: stats.magazine_size,
            cooldown: Duration::ZERO,
            reload_remaining: None,
        }
    }

    pub fn rifle() -> Self {
        Self::new(RIFLE)
    }

    pub fn pistol() -> Self {
        Self::new(PISTOL)
    }

    /// Pull the trigger
    ///
    /// `pressed` is true on the step the trigger went down, `held` while it
    /// stays down. Returns the shot fired, if any. Only a carried weapon fires.
    pub fn trigger(&mut self, pressed: bool, held: bool) -> Option<Shot> {
        let wants_to_fire = match self.stats.fire_mode {
            FireMode::Auto => held || pressed,
            FireMode::SemiAuto => pressed,
        };
        if !wants_to_fire || !self.pickup.is_carried() {
            return None;
        }
        if self.reload_remaining.is_some() || self.cooldown > Duration::ZERO {
            return None;
        }
        if self.magazine == 0 {
            log::debug!("{:?}: magazine empty", self.stats.kind);
            return None;
        }

        self.magazine -= 1;
        self.cooldown = self.stats.fire_interval;
        Some(Shot {
            weapon: self.stats.kind,
            speed: self.stats.muzzle_speed,
        })
    }

    /// Start swapping magazines. Returns false if nothing to do.
    pub fn start_reload(&mut self) -> bool {
        if !self.pickup.is_carried()
            || self.reload_remaining.is_some()
            || self.magazine >= self.stats.magazine_size
        {
            return false;
        }

        log::debug!("{:?}: reloading", self.stats.kind);
        self.reload_remaining = Some(self.stats.reload_time);
        true
    }

    /// Advance cooldown and reload timers
    ///
    /// A finished reload refills the magazine from `ammo`, as far as it goes.
    pub fn tick(&mut self, dt: Duration, ammo: Option<&mut Inventory>) {
        self.cooldown = self.cooldown.saturating_sub(dt);

        let Some(remaining) = self.reload_remaining else {
            return;
        };
        let remaining = remaining.saturating_sub(dt);
        if remaining > Duration::ZERO {
            self.reload_remaining = Some(remaining);
            return;
        }

        self.reload_remaining = None;
        let missing = self.stats.magazine_size - self.magazine;
        let loaded = match (ammo, self.stats.kind.ammo()) {
            (Some(inventory), Some(kind)) => inventory.take_up_to(kind, missing),
            _ => 0,
        };
        self.magazine += loaded;
        log::debug!(
            "{:?}: reloaded {} rounds ({}/{})",
            self.stats.kind,
            loaded,
            self.magazine,
            self.stats.magazine_size
        );
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    /// Rounds left in the magazine
    pub fn magazine(&self) -> u32 {
        self.magazine
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining.is_some()
    }

    pub fn is_carried(&self) -> bool {
        self.pickup.is_carried()
    }
}

impl InteractionHooks for Weapon {
    fn on_start_interact(&mut self, ctx: &mut HookContext<'_>, interaction: &InteractionContext) {
        self.pickup.toggle(ctx, interaction);
        if !self.pickup.is_carried() {
            // Dropping interrupts a reload
            self.reload_remaining = None;
        }
    }

    fn as_carryable(&self) -> Option<&dyn Carryable> {
        Some(&self.pickup)
    }

    fn as_weapon(&self) -> Option<&Weapon> {
        Some(self)
    }

    fn as_weapon_mut(&mut self) -> Option<&mut Weapon> {
        Some(self)
    }
}
