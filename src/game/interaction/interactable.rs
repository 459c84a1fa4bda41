// Interactable objects: hover and interaction state

use crate::engine::scheduler::{Scheduler, TaskHandle};
use crate::engine::transform::{ObjectId, TransformTree};

use super::{ActorRef, HookContext, InteractionContext, InteractionHooks, InteractionKind};

/// Missed cycles after which a sustained interaction is considered over
pub const MAX_MISSED_CYCLES: u32 = 2;

/// Scheduled liveness check of a sustained interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessTick {
    /// Interactable running the check
    pub object: ObjectId,
}

/// Protocol state of an object actors can hover and interact with
#[derive(Debug)]
pub struct Interactable {
    id: ObjectId,
    enabled: bool,
    /// At least one actor hovers the object
    hovered: bool,
    /// A sustained interaction is running
    interacting: bool,
    /// An interaction call arrived since the last liveness check
    heartbeat: bool,
    /// Consecutive liveness checks without a heartbeat
    misses: u32,
    /// Running liveness process
    liveness: Option<TaskHandle>,
    /// Actor of the running interaction
    actor: Option<ObjectId>,
    behaviour: Box<dyn InteractionHooks>,
}

impl Interactable {
    /// Create an idle, enabled interactable
    pub fn new(id: ObjectId, behaviour: Box<dyn InteractionHooks>) -> Self {
        Self {
            id,
            enabled: true,
            hovered: false,
            interacting: false,
            heartbeat: false,
            misses: 0,
            liveness: None,
            actor: None,
            behaviour,
        }
    }

    fn hook_context<'a>(
        &self,
        actor: Option<ObjectId>,
        transforms: &'a mut TransformTree,
    ) -> HookContext<'a> {
        HookContext {
            object: self.id,
            actor,
            transforms,
        }
    }

    /// Start hovering. Returns whether the object is hovered.
    pub fn hover(&mut self, actor: ObjectId, transforms: &mut TransformTree) -> bool {
        if self.enabled && !self.hovered {
            self.hovered = true;
            let mut ctx = self.hook_context(Some(actor), transforms);
            self.behaviour.on_hover(&mut ctx);
        }
        self.hovered
    }

    /// Stop hovering. Returns whether the object is no longer hovered.
    pub fn stop_hover(&mut self, actor: ObjectId, transforms: &mut TransformTree) -> bool {
        if self.hovered {
            self.hovered = false;
            let mut ctx = self.hook_context(Some(actor), transforms);
            self.behaviour.on_stop_hover(&mut ctx);
        }
        !self.hovered
    }

    /// Interact with the object
    ///
    /// Every call counts as a heartbeat. While idle, a `Sustained` call starts
    /// the interaction and its liveness process at the actor's search cadence;
    /// a `Start` call only fires the start hook.
    pub fn interact(
        &mut self,
        actor: ActorRef,
        kind: InteractionKind,
        context: InteractionContext,
        transforms: &mut TransformTree,
        scheduler: &mut Scheduler<LivenessTick>,
    ) {
        if !self.enabled {
            log::debug!("{} is disabled, ignoring interaction", self.id);
            return;
        }

        self.heartbeat = true;
        if self.interacting {
            return;
        }

        match kind {
            InteractionKind::Start => {
                let mut ctx = self.hook_context(Some(actor.id), transforms);
                self.behaviour.on_start_interact(&mut ctx, &context);
                self.heartbeat = false;
            }
            InteractionKind::Sustained => {
                self.interacting = true;
                self.actor = Some(actor.id);
                // The starting call is this cycle's heartbeat
                self.heartbeat = false;
                self.misses = 0;
                self.liveness = Some(scheduler.repeat_every(
                    actor.search_cooldown,
                    actor.search_cooldown,
                    LivenessTick { object: self.id },
                ));

                let mut ctx = self.hook_context(Some(actor.id), transforms);
                self.behaviour.on_start_interact(&mut ctx, &context);
            }
        }
    }

    /// One cycle of the liveness process
    pub fn liveness_tick(
        &mut self,
        handle: TaskHandle,
        transforms: &mut TransformTree,
        scheduler: &mut Scheduler<LivenessTick>,
    ) {
        if !self.interacting || self.liveness != Some(handle) {
            // Left over from an interaction that already ended
            scheduler.cancel(handle);
            return;
        }

        if self.heartbeat {
            self.heartbeat = false;
            self.misses = 0;
        } else {
            self.misses += 1;
        }

        let actor = self.actor;
        if self.misses >= MAX_MISSED_CYCLES {
            self.end_interaction(scheduler);
            let mut ctx = self.hook_context(actor, transforms);
            self.behaviour.on_stop_interact(&mut ctx);
        } else {
            let mut ctx = self.hook_context(actor, transforms);
            self.behaviour.on_interact(&mut ctx);
        }
    }

    fn end_interaction(&mut self, scheduler: &mut Scheduler<LivenessTick>) {
        self.interacting = false;
        self.heartbeat = false;
        self.misses = 0;
        self.actor = None;
        if let Some(handle) = self.liveness.take() {
            scheduler.cancel(handle);
        }
    }

    /// Disable the object: hover and interaction are reset, no hooks fire
    pub fn disable(&mut self, scheduler: &mut Scheduler<LivenessTick>) {
        self.enabled = false;
        self.hovered = false;
        self.end_interaction(scheduler);
    }

    /// Re-enable a disabled object
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Consecutive missed liveness checks
    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn behaviour(&self) -> &dyn InteractionHooks {
        self.behaviour.as_ref()
    }

    pub fn behaviour_mut(&mut self) -> &mut dyn InteractionHooks {
        self.behaviour.as_mut()
    }

    /// Check if the object can be carried
    pub fn is_carryable(&self) -> bool {
        self.behaviour.as_carryable().is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    /// Hook events recorded by [`Recorder`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Hook {
        Hover,
        StopHover,
        StartInteract,
        Interact,
        StopInteract,
    }

    /// Hooks that log every call into a shared list
    #[derive(Debug, Default, Clone)]
    pub(crate) struct Recorder {
        pub log: Rc<RefCell<Vec<Hook>>>,
    }

    impl Recorder {
        pub fn count(&self, hook: Hook) -> usize {
            self.log.borrow().iter().filter(|h| **h == hook).count()
        }
    }

    impl InteractionHooks for Recorder {
        fn on_hover(&mut self, _ctx: &mut HookContext<'_>) {
            self.log.borrow_mut().push(Hook::Hover);
        }
        fn on_stop_hover(&mut self, _ctx: &mut HookContext<'_>) {
            self.log.borrow_mut().push(Hook::StopHover);
        }
        fn on_start_interact(&mut self, _ctx: &mut HookContext<'_>, _i: &InteractionContext) {
            self.log.borrow_mut().push(Hook::StartInteract);
        }
        fn on_interact(&mut self, _ctx: &mut HookContext<'_>) {
            self.log.borrow_mut().push(Hook::Interact);
        }
        fn on_stop_interact(&mut self, _ctx: &mut HookContext<'_>) {
            self.log.borrow_mut().push(Hook::StopInteract);
        }
    }

    const CYCLE: Duration = Duration::from_millis(20);

    struct Rig {
        object: Interactable,
        recorder: Recorder,
        actor: ActorRef,
        transforms: TransformTree,
        scheduler: Scheduler<LivenessTick>,
    }

    impl Rig {
        fn new() -> Self {
            let mut transforms = TransformTree::new();
            let actor = transforms.spawn("player", Vec2::ZERO, 0.0);
            let id = transforms.spawn("terminal", Vec2::X, 0.0);
            let recorder = Recorder::default();
            Self {
                object: Interactable::new(id, Box::new(recorder.clone())),
                recorder,
                actor: ActorRef {
                    id: actor,
                    search_cooldown: CYCLE,
                },
                transforms,
                scheduler: Scheduler::new(),
            }
        }

        fn interact(&mut self, kind: InteractionKind) {
            self.object.interact(
                self.actor,
                kind,
                InteractionContext::empty(),
                &mut self.transforms,
                &mut self.scheduler,
            );
        }

        /// Advance one scan cycle
        fn cycle(&mut self) {
            let object = &mut self.object;
            let transforms = &mut self.transforms;
            self.scheduler.advance(CYCLE, |sched, handle, _| {
                object.liveness_tick(handle, transforms, sched)
            });
        }
    }

    #[test]
    fn test_hover_is_idempotent() {
        let mut rig = Rig::new();
        let actor = rig.actor.id;

        assert!(rig.object.hover(actor, &mut rig.transforms));
        assert!(rig.object.hover(actor, &mut rig.transforms));
        assert_eq!(rig.recorder.count(Hook::Hover), 1);

        assert!(rig.object.stop_hover(actor, &mut rig.transforms));
        assert!(rig.object.stop_hover(actor, &mut rig.transforms));
        assert_eq!(rig.recorder.count(Hook::StopHover), 1);
        assert!(!rig.object.is_hovered());
    }

    #[test]
    fn test_sustained_interaction_survives_with_heartbeats() {
        let mut rig = Rig::new();
        rig.interact(InteractionKind::Sustained);
        assert!(rig.object.is_interacting());
        assert_eq!(rig.recorder.count(Hook::StartInteract), 1);

        for _ in 0..10 {
            rig.interact(InteractionKind::Sustained);
            rig.cycle();
            assert!(rig.object.is_interacting());
        }

        assert_eq!(rig.recorder.count(Hook::StartInteract), 1);
        assert_eq!(rig.recorder.count(Hook::Interact), 10);
        assert_eq!(rig.recorder.count(Hook::StopInteract), 0);
        assert_eq!(rig.scheduler.pending(), 1);
    }

    #[test]
    fn test_interaction_ends_after_exactly_two_missed_cycles() {
        let mut rig = Rig::new();
        rig.interact(InteractionKind::Sustained);
        rig.interact(InteractionKind::Sustained);
        rig.cycle();
        assert_eq!(rig.object.misses(), 0);

        // Actor goes silent
        rig.cycle();
        assert!(rig.object.is_interacting());
        assert_eq!(rig.object.misses(), 1);

        rig.cycle();
        assert!(!rig.object.is_interacting());
        assert_eq!(rig.recorder.count(Hook::StopInteract), 1);
        assert_eq!(rig.scheduler.pending(), 0);

        // Nothing else happens afterwards
        rig.cycle();
        rig.cycle();
        assert_eq!(rig.recorder.count(Hook::StopInteract), 1);
        // The cycle that ends the interaction does not count as one
        assert_eq!(rig.recorder.count(Hook::Interact), 2);
    }

    #[test]
    fn test_silent_interaction_fires_one_interact_then_stops() {
        let mut rig = Rig::new();
        rig.interact(InteractionKind::Sustained);
        rig.cycle();
        rig.cycle();

        assert_eq!(
            *rig.recorder.log.borrow(),
            vec![Hook::StartInteract, Hook::Interact, Hook::StopInteract]
        );
        assert!(!rig.object.is_interacting());
    }

    #[test]
    fn test_single_heartbeat_resets_misses() {
        let mut rig = Rig::new();
        rig.interact(InteractionKind::Sustained);
        rig.cycle();
        assert_eq!(rig.object.misses(), 1);

        rig.interact(InteractionKind::Sustained);
        rig.cycle();
        assert_eq!(rig.object.misses(), 0);
        assert!(rig.object.is_interacting());
    }

    #[test]
    fn test_one_liveness_process_per_span() {
        let mut rig = Rig::new();
        for _ in 0..5 {
            rig.interact(InteractionKind::Sustained);
        }
        assert_eq!(rig.scheduler.pending(), 1);

        rig.cycle();
        rig.cycle();
        rig.cycle();
        assert!(!rig.object.is_interacting());

        // A new span starts a new process
        rig.interact(InteractionKind::Sustained);
        assert!(rig.object.is_interacting());
        assert_eq!(rig.scheduler.pending(), 1);
        assert_eq!(rig.recorder.count(Hook::StartInteract), 2);
    }

    #[test]
    fn test_start_interaction_is_one_shot() {
        let mut rig = Rig::new();
        rig.interact(InteractionKind::Start);
        rig.interact(InteractionKind::Start);

        assert!(!rig.object.is_interacting());
        assert_eq!(rig.recorder.count(Hook::StartInteract), 2);
        assert_eq!(rig.scheduler.pending(), 0);
    }

    #[test]
    fn test_disable_resets_state() {
        let mut rig = Rig::new();
        let actor = rig.actor.id;
        rig.object.hover(actor, &mut rig.transforms);
        rig.interact(InteractionKind::Sustained);

        rig.object.disable(&mut rig.scheduler);
        assert!(!rig.object.is_hovered());
        assert!(!rig.object.is_interacting());
        assert_eq!(rig.scheduler.pending(), 0);

        assert!(!rig.object.hover(actor, &mut rig.transforms));
        rig.interact(InteractionKind::Sustained);
        assert!(!rig.object.is_interacting());

        rig.object.enable();
        assert!(rig.object.hover(actor, &mut rig.transforms));
    }
}
