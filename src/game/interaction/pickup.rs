// Objects that can be picked up and carried

use crate::engine::transform::{ObjectId, TransformTree};

use super::{Attachment, HookContext, InteractionContext, InteractionHooks};

/// Capability of objects an actor can carry
pub trait Carryable {
    /// Check if the object is currently carried
    fn is_carried(&self) -> bool;

    /// Object carrying it, if any
    fn carrier(&self) -> Option<ObjectId>;
}

/// Pickup/drop behaviour
///
/// A start interaction toggles the carried state: a carried object is
/// dropped where it is, a free object is moved to the attachment point and
/// parented to the carrier.
#[derive(Debug, Default)]
pub struct Pickup {
    carrier: Option<ObjectId>,
}

impl Pickup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `object` to the requested parent. Does nothing if already carried.
    pub fn pick_up(&mut self, object: ObjectId, attachment: Attachment, transforms: &mut TransformTree) {
        if self.carrier.is_some() {
            return;
        }

        if !transforms.set_parent(object, Some(attachment.parent)) {
            log::warn!(
                "{}: cannot attach to {}",
                transforms.name(object),
                transforms.name(attachment.parent)
            );
            return;
        }
        transforms.set_world_position(object, attachment.position);
        transforms.set_world_rotation(object, attachment.rotation);

        log::info!("{} picked up by {}", transforms.name(object), transforms.name(attachment.parent));
        self.carrier = Some(attachment.parent);
    }

    /// Detach `object`, leaving it at its current world pose. Does nothing if not carried.
    pub fn drop_item(&mut self, object: ObjectId, transforms: &mut TransformTree) {
        if self.carrier.take().is_none() {
            return;
        }

        transforms.set_parent(object, None);
        log::info!("{} dropped", transforms.name(object));
    }

    /// Toggle between carried and free
    pub fn toggle(&mut self, ctx: &mut HookContext<'_>, interaction: &InteractionContext) {
        if self.carrier.is_some() {
            self.drop_item(ctx.object, ctx.transforms);
            return;
        }

        match interaction.attachment {
            Some(attachment) => self.pick_up(ctx.object, attachment, ctx.transforms),
            None => log::warn!(
                "{}: pickup requested without an attachment point",
                ctx.transforms.name(ctx.object)
            ),
        }
    }
}

impl Carryable for Pickup {
    fn is_carried(&self) -> bool {
        self.carrier.is_some()
    }

    fn carrier(&self) -> Option<ObjectId> {
        self.carrier
    }
}

impl InteractionHooks for Pickup {
    fn on_start_interact(&mut self, ctx: &mut HookContext<'_>, interaction: &InteractionContext) {
        self.toggle(ctx, interaction);
    }

    fn as_carryable(&self) -> Option<&dyn Carryable> {
        Some(self)
    }
}
