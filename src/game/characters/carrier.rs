// Player-side use of interactables: pick up, drop, hold to use

use std::collections::HashMap;

use crate::engine::input::{Action, ButtonState};
use crate::engine::scheduler::Scheduler;
use crate::engine::transform::{ObjectId, TransformTree};
use crate::game::interaction::{
    ActorRef, InteractionContext, InteractionKind, Interactable, Interactor, LivenessTick,
};

/// What a character holds and whether it keeps using something
#[derive(Debug, Clone, Default)]
pub struct Carrier {
    /// Object currently carried
    held: Option<ObjectId>,
    /// The interact button is held down
    sustaining: bool,
}

impl Carrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Object currently carried
    pub fn held(&self) -> Option<ObjectId> {
        self.held
    }

    /// Forget the carried object (it left the world)
    pub fn release(&mut self, object: ObjectId) {
        if self.held == Some(object) {
            self.held = None;
        }
    }

    /// Drop the carried object where it is. Returns the dropped object.
    pub fn drop_held(
        &mut self,
        actor: ActorRef,
        interactables: &mut HashMap<ObjectId, Interactable>,
        transforms: &mut TransformTree,
        liveness: &mut Scheduler<LivenessTick>,
    ) -> Option<ObjectId> {
        let dropped = self.held.take()?;
        if let Some(object) = interactables.get_mut(&dropped) {
            object.interact(
                actor,
                InteractionKind::Start,
                InteractionContext::empty(),
                transforms,
                liveness,
            );
        }
        Some(dropped)
    }

    /// React to the interact button
    ///
    /// A press drops whatever is carried, then picks up the selected object
    /// if it can be carried, or starts using it otherwise. The dropped object
    /// is never picked straight back up.
    pub fn handle_input(
        &mut self,
        input: &dyn ButtonState,
        interactor: &Interactor,
        interactables: &mut HashMap<ObjectId, Interactable>,
        transforms: &mut TransformTree,
        liveness: &mut Scheduler<LivenessTick>,
    ) {
        self.sustaining = input.is_button_held(Action::Interact);
        if !input.is_button_down(Action::Interact) {
            return;
        }

        let actor = interactor.actor_ref();
        let dropped = self.drop_held(actor, interactables, transforms, liveness);

        let skip: Vec<ObjectId> = dropped.into_iter().collect();
        let Some(selected) = interactor.selected(transforms, &skip) else {
            return;
        };
        let Some(object) = interactables.get_mut(&selected) else {
            return;
        };

        if !object.is_carryable() {
            object.interact(
                actor,
                InteractionKind::Sustained,
                InteractionContext::empty(),
                transforms,
                liveness,
            );
            return;
        }

        let (Some(position), Some(rotation), Some(right)) = (
            transforms.world_position(actor.id),
            transforms.world_rotation(actor.id),
            transforms.right(actor.id),
        ) else {
            return;
        };

        object.interact(
            actor,
            InteractionKind::Start,
            InteractionContext::attach(position + right, rotation, actor.id),
            transforms,
            liveness,
        );

        let carrier = object
            .behaviour()
            .as_carryable()
            .and_then(|carryable| carryable.carrier());
        if carrier == Some(actor.id) {
            self.held = Some(selected);
        }
    }

    /// Keep a held interaction alive; called once per scan cycle
    pub fn on_scan(
        &mut self,
        interactor: &Interactor,
        interactables: &mut HashMap<ObjectId, Interactable>,
        transforms: &mut TransformTree,
        liveness: &mut Scheduler<LivenessTick>,
    ) {
        if !self.sustaining {
            return;
        }

        let skip: Vec<ObjectId> = self.held.into_iter().collect();
        let Some(selected) = interactor.selected(transforms, &skip) else {
            return;
        };
        if let Some(object) = interactables.get_mut(&selected) {
            if !object.is_carryable() {
                object.interact(
                    interactor.actor_ref(),
                    InteractionKind::Sustained,
                    InteractionContext::empty(),
                    transforms,
                    liveness,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::{LayerMask, SpatialQuery};
    use crate::game::config::InteractorSettings;
    use crate::game::interaction::{Console, Pickup};
    use glam::Vec2;
    use std::collections::HashSet;
    use std::time::Duration;

    /// Buttons pressed this step, buttons held
    #[derive(Default)]
    struct Buttons {
        down: HashSet<Action>,
        held: HashSet<Action>,
    }

    impl Buttons {
        fn press(action: Action) -> Self {
            Self {
                down: [action].into(),
                held: [action].into(),
            }
        }

        fn hold(action: Action) -> Self {
            Self {
                down: HashSet::new(),
                held: [action].into(),
            }
        }
    }

    impl ButtonState for Buttons {
        fn is_button_down(&self, action: Action) -> bool {
            self.down.contains(&action)
        }

        fn is_button_held(&self, action: Action) -> bool {
            self.held.contains(&action)
        }
    }

    /// Every object is always in range
    struct Everything(Vec<ObjectId>);

    impl SpatialQuery for Everything {
        fn query_nearby(&self, _origin: Vec2, _radius: f32, _mask: LayerMask) -> Vec<ObjectId> {
            self.0.clone()
        }
    }

    struct Rig {
        player: ObjectId,
        carrier: Carrier,
        interactor: Interactor,
        interactables: HashMap<ObjectId, Interactable>,
        transforms: TransformTree,
        liveness: Scheduler<LivenessTick>,
        space: Everything,
    }

    impl Rig {
        fn new() -> Self {
            let mut transforms = TransformTree::new();
            let player = transforms.spawn("player", Vec2::ZERO, 0.0);
            Self {
                player,
                carrier: Carrier::new(),
                interactor: Interactor::from_settings(player, &InteractorSettings::default()),
                interactables: HashMap::new(),
                transforms,
                liveness: Scheduler::new(),
                space: Everything(Vec::new()),
            }
        }

        fn add(&mut self, name: &str, x: f32, carryable: bool) -> ObjectId {
            let id = self.transforms.spawn(name, Vec2::new(x, 0.0), 0.0);
            let behaviour: Box<dyn crate::game::interaction::InteractionHooks> = if carryable {
                Box::new(Pickup::new())
            } else {
                Box::new(Console::default())
            };
            self.interactables.insert(id, Interactable::new(id, behaviour));
            self.space.0.push(id);
            id
        }

        fn scan(&mut self) {
            self.interactor
                .scan(&self.space, &mut self.interactables, &mut self.transforms);
        }

        fn input(&mut self, buttons: &Buttons) {
            self.carrier.handle_input(
                buttons,
                &self.interactor,
                &mut self.interactables,
                &mut self.transforms,
                &mut self.liveness,
            );
        }
    }

    #[test]
    fn test_press_picks_up_closest_carryable() {
        let mut rig = Rig::new();
        let far = rig.add("crate", 2.0, true);
        let near = rig.add("rifle", 1.0, true);
        rig.scan();

        rig.input(&Buttons::press(Action::Interact));
        assert_eq!(rig.carrier.held(), Some(near));
        assert_eq!(rig.transforms.parent(near), Some(rig.player));
        assert_eq!(rig.transforms.parent(far), None);
        // Attached one unit to the right of the player
        assert_eq!(rig.transforms.world_position(near), Some(Vec2::X));
    }

    #[test]
    fn test_second_press_swaps_held_object() {
        let mut rig = Rig::new();
        let rifle = rig.add("rifle", 1.0, true);
        let crate_id = rig.add("crate", 1.5, true);
        rig.scan();

        rig.input(&Buttons::press(Action::Interact));
        assert_eq!(rig.carrier.held(), Some(rifle));

        rig.input(&Buttons::press(Action::Interact));
        assert_eq!(rig.carrier.held(), Some(crate_id));
        assert_eq!(rig.transforms.parent(rifle), None);
        assert_eq!(rig.transforms.parent(crate_id), Some(rig.player));
    }

    #[test]
    fn test_press_with_single_item_drops_it() {
        let mut rig = Rig::new();
        let rifle = rig.add("rifle", 1.0, true);
        rig.scan();

        rig.input(&Buttons::press(Action::Interact));
        rig.input(&Buttons::press(Action::Interact));

        assert_eq!(rig.carrier.held(), None);
        assert_eq!(rig.transforms.parent(rifle), None);
    }

    #[test]
    fn test_holding_keeps_console_in_use() {
        let mut rig = Rig::new();
        let console = rig.add("terminal", 1.0, false);
        rig.scan();

        rig.input(&Buttons::press(Action::Interact));
        assert!(rig.interactables[&console].is_interacting());

        let cycle = rig.interactor.search_cooldown();
        for _ in 0..5 {
            rig.input(&Buttons::hold(Action::Interact));
            rig.carrier.on_scan(
                &rig.interactor,
                &mut rig.interactables,
                &mut rig.transforms,
                &mut rig.liveness,
            );
            advance(&mut rig, cycle);
            assert!(rig.interactables[&console].is_interacting());
        }

        // Let go: the interaction ends two cycles later
        rig.input(&Buttons::default());
        advance(&mut rig, cycle);
        assert!(rig.interactables[&console].is_interacting());
        advance(&mut rig, cycle);
        assert!(!rig.interactables[&console].is_interacting());
    }

    fn advance(rig: &mut Rig, dt: Duration) {
        let interactables = &mut rig.interactables;
        let transforms = &mut rig.transforms;
        rig.liveness.advance(dt, |sched, handle, tick| {
            if let Some(object) = interactables.get_mut(&tick.object) {
                object.liveness_tick(handle, transforms, sched);
            }
        });
    }
}
