// Items: kinds, inventories, the sprite catalog and weapons

pub mod catalog;
pub mod inventory;
pub mod weapon;

pub use catalog::ItemCatalog;
pub use inventory::{Inventory, InventoryError, Item};
pub use weapon::{FireMode, Shot, Weapon, WeaponStats};

/// Every kind of item in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    MedPack,
    Money,
    RifleAmmo,
    PistolAmmo,
    SniperAmmo,
    ShotgunAmmo,
    Rifle,
    Pistol,
    Sniper,
    Shotgun,
}

impl ItemKind {
    /// All kinds, in catalog order
    pub const ALL: [ItemKind; 10] = [
        ItemKind::MedPack,
        ItemKind::Money,
        ItemKind::RifleAmmo,
        ItemKind::PistolAmmo,
        ItemKind::SniperAmmo,
        ItemKind::ShotgunAmmo,
        ItemKind::Rifle,
        ItemKind::Pistol,
        ItemKind::Sniper,
        ItemKind::Shotgun,
    ];

    /// Stackable items accumulate by kind; others are tracked one by one
    pub fn is_stackable(self) -> bool {
        !self.is_weapon()
    }

    pub fn is_weapon(self) -> bool {
        matches!(
            self,
            ItemKind::Rifle | ItemKind::Pistol | ItemKind::Sniper | ItemKind::Shotgun
        )
    }

    /// Ammunition used by a weapon kind
    pub fn ammo(self) -> Option<ItemKind> {
        match self {
            ItemKind::Rifle => Some(ItemKind::RifleAmmo),
            ItemKind::Pistol => Some(ItemKind::PistolAmmo),
            ItemKind::Sniper => Some(ItemKind::SniperAmmo),
            ItemKind::Shotgun => Some(ItemKind::ShotgunAmmo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapons_are_not_stackable() {
        for kind in ItemKind::ALL {
            assert_eq!(kind.is_stackable(), !kind.is_weapon(), "{:?}", kind);
        }
        assert!(ItemKind::MedPack.is_stackable());
        assert!(ItemKind::Money.is_stackable());
        assert!(!ItemKind::Rifle.is_stackable());
    }

    #[test]
    fn test_ammo_mapping() {
        assert_eq!(ItemKind::Rifle.ammo(), Some(ItemKind::RifleAmmo));
        assert_eq!(ItemKind::Shotgun.ammo(), Some(ItemKind::ShotgunAmmo));
        assert_eq!(ItemKind::Money.ammo(), None);
    }
}
