use rapier2d::prelude::*;

/// Physics layers used to filter collisions and spatial queries
///
/// Each object belongs to exactly one layer; queries and colliders then pick
/// which layers they care about through a [`LayerMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Default layer - interacts with everything
    Default = 0b0000_0001,

    /// Player and AI characters
    Character = 0b0000_0010,

    /// Projectiles (bullets)
    Projectile = 0b0000_0100,

    /// Static walls and obstacles
    Wall = 0b0000_1000,

    /// Objects an actor can hover and interact with
    Interactable = 0b0001_0000,
}

impl Layer {
    /// Mask containing only this layer
    pub fn mask(self) -> LayerMask {
        LayerMask(self as u32)
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        // Define what each layer can touch
        let filter = match self {
            // Characters bump into walls; interactables are sensed, not collided with
            Layer::Character => Group::from_bits_truncate(
                Layer::Wall as u32 | Layer::Projectile as u32 | Layer::Character as u32,
            ),

            // Projectiles hit characters and walls
            Layer::Projectile => {
                Group::from_bits_truncate(Layer::Character as u32 | Layer::Wall as u32)
            }

            // Walls block characters and projectiles
            Layer::Wall => {
                Group::from_bits_truncate(Layer::Character as u32 | Layer::Projectile as u32)
            }

            // Interactables are sensors: they overlap characters but never block them
            Layer::Interactable => Group::from_bits_truncate(Layer::Character as u32),

            Layer::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Set of layers, used as the filter of spatial queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(u32);

impl LayerMask {
    /// Matches every layer
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Matches nothing
    pub const NONE: LayerMask = LayerMask(0);

    /// Add a layer to the mask
    pub fn with(self, layer: Layer) -> Self {
        Self(self.0 | layer as u32)
    }

    /// Check if a layer is part of the mask
    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & layer as u32 != 0
    }

    /// Raw bits
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Query groups matching any collider on one of the mask's layers
    pub fn to_query_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Group::from_bits_truncate(self.0))
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        layer.mask()
    }
}
