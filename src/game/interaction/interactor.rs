// Actors that discover and select interactables

use glam::Vec2;
use std::collections::HashMap;
use std::time::Duration;

use crate::engine::physics::{LayerMask, SpatialQuery};
use crate::engine::scheduler::{Scheduler, TaskHandle};
use crate::engine::transform::{ObjectId, TransformTree};
use crate::game::config::InteractorSettings;

use super::{ActorRef, Interactable};

/// Scheduled presence scan of an interactor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTick {
    /// Actor running the scan
    pub actor: ObjectId,
}

/// How an actor finds and chooses interactables
///
/// Every actor kind must provide both halves; there is no fallback.
pub trait SearchStrategy: std::fmt::Debug {
    /// Objects near `origin`, in discovery order
    fn scan(&self, origin: Vec2, space: &dyn SpatialQuery) -> Vec<ObjectId>;

    /// Preferred candidate for an actor at `origin`
    fn select(&self, origin: Vec2, candidates: &[ObjectId], transforms: &TransformTree) -> Option<ObjectId>;
}

/// Search everything within a radius, prefer the closest object
#[derive(Debug, Clone, Copy)]
pub struct RadiusSearch {
    pub radius: f32,
    pub mask: LayerMask,
}

impl SearchStrategy for RadiusSearch {
    fn scan(&self, origin: Vec2, space: &dyn SpatialQuery) -> Vec<ObjectId> {
        space.query_nearby(origin, self.radius, self.mask)
    }

    fn select(&self, origin: Vec2, candidates: &[ObjectId], transforms: &TransformTree) -> Option<ObjectId> {
        let mut best: Option<(ObjectId, f32)> = None;
        for &candidate in candidates {
            let Some(position) = transforms.world_position(candidate) else {
                continue;
            };
            let distance = origin.distance(position);
            // Strict comparison: ties go to the earlier discovery
            if best.map_or(true, |(_, closest)| distance < closest) {
                best = Some((candidate, distance));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Presence tracker and selector of one actor
#[derive(Debug)]
pub struct Interactor {
    id: ObjectId,
    search_cooldown: Duration,
    strategy: Box<dyn SearchStrategy>,
    /// Interactables found by the latest scan, in discovery order
    hover_set: Vec<ObjectId>,
    scan_task: Option<TaskHandle>,
}

impl Interactor {
    pub fn new(id: ObjectId, search_cooldown: Duration, strategy: Box<dyn SearchStrategy>) -> Self {
        Self {
            id,
            search_cooldown,
            strategy,
            hover_set: Vec::new(),
            scan_task: None,
        }
    }

    /// Interactor searching a radius, configured from settings
    pub fn from_settings(id: ObjectId, settings: &InteractorSettings) -> Self {
        Self::new(
            id,
            settings.search_cooldown,
            Box::new(RadiusSearch {
                radius: settings.radius,
                mask: settings.mask,
            }),
        )
    }

    /// Start the periodic scan; the first scan runs at the current time
    pub fn start(&mut self, scheduler: &mut Scheduler<ScanTick>) {
        if let Some(task) = self.scan_task.take() {
            scheduler.cancel(task);
        }
        self.scan_task = Some(scheduler.repeat_every(
            Duration::ZERO,
            self.search_cooldown,
            ScanTick { actor: self.id },
        ));
    }

    /// Stop scanning and un-hover everything
    pub fn stop(
        &mut self,
        scheduler: &mut Scheduler<ScanTick>,
        interactables: &mut HashMap<ObjectId, Interactable>,
        transforms: &mut TransformTree,
    ) {
        if let Some(task) = self.scan_task.take() {
            scheduler.cancel(task);
        }
        self.clear(interactables, transforms);
    }

    /// Refresh the hover set from the surroundings
    ///
    /// Objects that appeared are hovered, objects that disappeared stop being
    /// hovered; every transition notifies the object exactly once.
    pub fn scan(
        &mut self,
        space: &dyn SpatialQuery,
        interactables: &mut HashMap<ObjectId, Interactable>,
        transforms: &mut TransformTree,
    ) {
        let Some(origin) = transforms.world_position(self.id) else {
            self.clear(interactables, transforms);
            return;
        };

        let mut found: Vec<ObjectId> = Vec::new();
        for id in self.strategy.scan(origin, space) {
            let registered = interactables.get(&id).is_some_and(|object| object.is_enabled());
            if registered && id != self.id && !found.contains(&id) {
                found.push(id);
            }
        }

        if found.is_empty() {
            self.clear(interactables, transforms);
            return;
        }

        let previous = std::mem::take(&mut self.hover_set);
        for id in previous {
            if found.contains(&id) {
                self.hover_set.push(id);
            } else if let Some(object) = interactables.get_mut(&id) {
                object.stop_hover(self.id, transforms);
            }
        }

        for id in found {
            if self.hover_set.contains(&id) {
                continue;
            }
            if let Some(object) = interactables.get_mut(&id) {
                object.hover(self.id, transforms);
                self.hover_set.push(id);
            }
        }
    }

    /// Un-hover every object and empty the hover set
    pub fn clear(
        &mut self,
        interactables: &mut HashMap<ObjectId, Interactable>,
        transforms: &mut TransformTree,
    ) {
        for id in self.hover_set.drain(..) {
            if let Some(object) = interactables.get_mut(&id) {
                object.stop_hover(self.id, transforms);
            }
        }
    }

    /// Forget an object that left the world, without notifying it
    pub fn forget(&mut self, id: ObjectId) {
        self.hover_set.retain(|hovered| *hovered != id);
    }

    /// Preferred hovered object, ignoring the ones in `skip`
    pub fn selected(&self, transforms: &TransformTree, skip: &[ObjectId]) -> Option<ObjectId> {
        let origin = transforms.world_position(self.id)?;
        let candidates: Vec<ObjectId> = self
            .hover_set
            .iter()
            .copied()
            .filter(|id| !skip.contains(id))
            .collect();
        self.strategy.select(origin, &candidates, transforms)
    }

    /// This actor, as seen by interactables
    pub fn actor_ref(&self) -> ActorRef {
        ActorRef {
            id: self.id,
            search_cooldown: self.search_cooldown,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn search_cooldown(&self) -> Duration {
        self.search_cooldown
    }

    pub fn hover_set(&self) -> &[ObjectId] {
        &self.hover_set
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_task.is_some()
    }
}
