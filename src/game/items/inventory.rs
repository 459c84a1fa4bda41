// Carried items

use thiserror::Error;

use super::ItemKind;

/// Errors raised when taking items out of an inventory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("not enough {kind:?}: requested {requested}, have {available}")]
    NotEnough {
        kind: ItemKind,
        requested: u32,
        available: u32,
    },

    #[error("no {0:?} in inventory")]
    Missing(ItemKind),
}

/// An amount of one kind of item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub amount: u32,
}

impl Item {
    pub fn new(kind: ItemKind, amount: u32) -> Self {
        Self { kind, amount }
    }

    /// A single non-stackable item
    pub fn single(kind: ItemKind) -> Self {
        Self::new(kind, 1)
    }
}

/// Items owned by a character
///
/// Stackable kinds share one entry whose amount accumulates; every
/// non-stackable item gets its own entry.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item
    pub fn add(&mut self, item: Item) {
        if item.amount == 0 {
            return;
        }

        if item.kind.is_stackable() {
            if let Some(stack) = self.items.iter_mut().find(|i| i.kind == item.kind) {
                stack.amount += item.amount;
                log::debug!("{:?} x{} (+{})", item.kind, stack.amount, item.amount);
                return;
            }
        }

        log::debug!("{:?} x{} added", item.kind, item.amount);
        self.items.push(item);
    }

    /// Remove an item
    ///
    /// Stacks shrink by the amount and disappear when empty; a non-stackable
    /// item removes one matching entry.
    pub fn remove(&mut self, item: Item) -> Result<(), InventoryError> {
        let Some(index) = self.items.iter().position(|i| i.kind == item.kind) else {
            return Err(InventoryError::Missing(item.kind));
        };

        if !item.kind.is_stackable() {
            self.items.remove(index);
            return Ok(());
        }

        let stack = &mut self.items[index];
        if stack.amount < item.amount {
            return Err(InventoryError::NotEnough {
                kind: item.kind,
                requested: item.amount,
                available: stack.amount,
            });
        }

        stack.amount -= item.amount;
        if stack.amount == 0 {
            self.items.remove(index);
        }
        Ok(())
    }

    /// Take as many as possible, up to `max`, of a stackable kind
    pub fn take_up_to(&mut self, kind: ItemKind, max: u32) -> u32 {
        let taken = self.count(kind).min(max);
        if taken > 0 && self.remove(Item::new(kind, taken)).is_err() {
            return 0;
        }
        taken
    }

    /// Total amount of a kind
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.items
            .iter()
            .filter(|i| i.kind == kind)
            .map(|i| i.amount)
            .sum()
    }

    /// All entries, in the order they were added
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
