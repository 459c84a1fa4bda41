// Item sprites

use std::collections::HashMap;

use super::ItemKind;
use crate::engine::assets::SheetHandle;
use crate::engine::renderer::FrameRef;

/// Read-only lookup from item kinds to their sprites
///
/// Built once at startup and handed to whoever displays items.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    sprites: HashMap<ItemKind, FrameRef>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog for an item sheet laid out in `ItemKind::ALL` order
    pub fn from_sheet(sheet: SheetHandle) -> Self {
        let sprites = ItemKind::ALL
            .iter()
            .zip(0u32..)
            .map(|(kind, cell)| (*kind, FrameRef::new(sheet, cell)))
            .collect();
        Self { sprites }
    }

    /// Set or replace the sprite of a kind
    pub fn insert(&mut self, kind: ItemKind, frame: FrameRef) {
        self.sprites.insert(kind, frame);
    }

    /// Sprite of a kind
    pub fn sprite(&self, kind: ItemKind) -> Option<FrameRef> {
        self.sprites.get(&kind).copied()
    }
}
