// Interaction system
//
// Actors (`Interactor`) periodically scan their surroundings, keep a hover set
// of nearby `Interactable`s and pick one to interact with. An interaction is
// either a one-shot (`Start`, used for pickup/drop) or sustained: the object
// keeps interacting for as long as the actor re-issues the interaction every
// scan cycle, and stops by itself after two silent cycles.
//
// Object-specific behaviour plugs in through `InteractionHooks`.

pub mod interactable;
pub mod interactor;
pub mod pickup;

pub use interactable::{Interactable, LivenessTick};
pub use interactor::{Interactor, RadiusSearch, ScanTick, SearchStrategy};
pub use pickup::{Carryable, Pickup};

use glam::Vec2;
use std::time::Duration;

use crate::engine::transform::{ObjectId, TransformTree};
use crate::game::items::Weapon;

/// How an interaction is started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// One-shot: fires the start hook and leaves the object idle
    Start,
    /// Held interaction kept alive by repeated calls (heartbeats)
    Sustained,
}

/// The actor performing an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorRef {
    /// Actor object
    pub id: ObjectId,
    /// Cadence at which the actor scans and re-issues interactions
    pub search_cooldown: Duration,
}

/// Where a picked up object goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    /// World position of the object once attached
    pub position: Vec2,
    /// World rotation of the object once attached (radians)
    pub rotation: f32,
    /// New parent of the object
    pub parent: ObjectId,
}

/// Extra data passed along with an interaction
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionContext {
    pub attachment: Option<Attachment>,
}

impl InteractionContext {
    /// Context without any payload
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context requesting an attachment
    pub fn attach(position: Vec2, rotation: f32, parent: ObjectId) -> Self {
        Self {
            attachment: Some(Attachment {
                position,
                rotation,
                parent,
            }),
        }
    }
}

/// World access handed to hooks
pub struct HookContext<'a> {
    /// Object the hook runs for
    pub object: ObjectId,
    /// Actor that triggered the hook, if any
    pub actor: Option<ObjectId>,
    pub transforms: &'a mut TransformTree,
}

/// Object-specific reactions to the interaction protocol
///
/// The protocol state is updated before any hook runs, so hooks cannot
/// break it.
pub trait InteractionHooks: std::fmt::Debug {
    /// An actor started hovering the object
    fn on_hover(&mut self, ctx: &mut HookContext<'_>) {
        log::trace!("{} hovered", ctx.object);
    }

    /// The last hover on the object ended
    fn on_stop_hover(&mut self, ctx: &mut HookContext<'_>) {
        log::trace!("{} no longer hovered", ctx.object);
    }

    /// An interaction started
    fn on_start_interact(&mut self, ctx: &mut HookContext<'_>, _interaction: &InteractionContext) {
        log::debug!("{} start interacting", ctx.object);
    }

    /// A sustained interaction is still running (once per cycle)
    fn on_interact(&mut self, ctx: &mut HookContext<'_>) {
        log::trace!("{} still interacting", ctx.object);
    }

    /// A sustained interaction ended
    fn on_stop_interact(&mut self, ctx: &mut HookContext<'_>) {
        log::debug!("{} stop interacting", ctx.object);
    }

    /// Capability: the object can be carried
    fn as_carryable(&self) -> Option<&dyn Carryable> {
        None
    }

    /// Capability: the object is a weapon
    fn as_weapon(&self) -> Option<&Weapon> {
        None
    }

    /// Capability: the object is a weapon (mutable)
    fn as_weapon_mut(&mut self) -> Option<&mut Weapon> {
        None
    }
}

/// Interactable with no behaviour of its own (terminals, switches, ...)
///
/// Counts sustained interaction cycles so gameplay code can react to them.
#[derive(Debug, Default)]
pub struct Console {
    /// Completed sustained interactions
    pub sessions: u32,
    /// Cycles spent interacting in total
    pub cycles: u32,
}

impl InteractionHooks for Console {
    fn on_interact(&mut self, ctx: &mut HookContext<'_>) {
        self.cycles += 1;
        log::trace!("{} in use ({} cycles)", ctx.object, self.cycles);
    }

    fn on_stop_interact(&mut self, ctx: &mut HookContext<'_>) {
        self.sessions += 1;
        log::info!("{} released after {} cycles", ctx.object, self.cycles);
    }
}
