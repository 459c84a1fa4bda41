// Game world: owns every object's components and ticks them in order
//
// Components live in per-kind maps keyed by `ObjectId`. Each time-based
// process kind has its own scheduler; `update` advances them once per fixed
// step after movement has been applied.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use thiserror::Error;

use super::animation::{AnimationError, AnimationPlayer, ClipRef, ClipRegistry, FrameAdvance};
use super::camera::CameraFollow;
use super::characters::{Character, MovementStats};
use super::config::{GameConfig, InteractorSettings};
use super::interaction::{
    ActorRef, InteractionHooks, Interactable, Interactor, LivenessTick, ScanTick,
};
use super::items::{ItemCatalog, ItemKind};
use crate::engine::input::{Action, ButtonState};
use crate::engine::physics::{presets, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::SpriteSlot;
use crate::engine::scheduler::Scheduler;
use crate::engine::transform::{ObjectId, TransformTree};

/// How long a projectile flies before it is removed
pub const PROJECTILE_LIFETIME: Duration = Duration::from_secs(2);

/// Errors raised while assembling the world
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("{object}: missing required {dependency}")]
    MissingDependency {
        object: String,
        dependency: &'static str,
    },

    #[error("unknown object {0}")]
    UnknownObject(ObjectId),

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// A round in flight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub weapon: ItemKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Time left before it is removed
    pub remaining: Duration,
}

/// Everything that lives in a scene
pub struct World {
    config: GameConfig,
    transforms: TransformTree,
    physics: PhysicsWorld,
    animators: HashMap<ObjectId, AnimationPlayer>,
    interactables: HashMap<ObjectId, Interactable>,
    interactors: HashMap<ObjectId, Interactor>,
    characters: Vec<Character>,
    /// Bodies of interactable props, moved to follow their transform
    props: HashMap<ObjectId, RigidBodyHandle>,
    projectiles: Vec<Projectile>,
    frame_steps: Scheduler<FrameAdvance>,
    liveness: Scheduler<LivenessTick>,
    scans: Scheduler<ScanTick>,
    camera: CameraFollow,
    catalog: ItemCatalog,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let mut physics = PhysicsWorld::new();
        physics.set_timestep(config.fixed_timestep.as_secs_f32());

        let (width, height) = config.window_size;
        let camera = CameraFollow::new(
            config.camera,
            Vec2::new(width as f32, height as f32),
            config.pixels_per_unit,
        );

        Self {
            config,
            transforms: TransformTree::new(),
            physics,
            animators: HashMap::new(),
            interactables: HashMap::new(),
            interactors: HashMap::new(),
            characters: Vec::new(),
            props: HashMap::new(),
            projectiles: Vec::new(),
            frame_steps: Scheduler::new(),
            liveness: Scheduler::new(),
            scans: Scheduler::new(),
            camera,
            catalog: ItemCatalog::new(),
        }
    }

    /// Create a root object
    pub fn spawn(&mut self, name: &str, position: Vec2, rotation: f32) -> ObjectId {
        self.transforms.spawn(name, position, rotation)
    }

    /// Create an object attached to `parent`
    pub fn spawn_child(&mut self, name: &str, parent: ObjectId, local_position: Vec2) -> ObjectId {
        self.transforms.spawn_child(name, parent, local_position)
    }

    fn require_transform(&self, object: ObjectId) -> Result<(), WorldError> {
        if self.transforms.contains(object) {
            Ok(())
        } else {
            Err(WorldError::MissingDependency {
                object: self.transforms.name(object),
                dependency: "transform",
            })
        }
    }

    /// Give an object an animation player
    pub fn add_animation(
        &mut self,
        object: ObjectId,
        clips: Arc<ClipRegistry>,
    ) -> Result<(), WorldError> {
        self.require_transform(object)?;
        let player = AnimationPlayer::new(object, clips, SpriteSlot::new());
        if let Some(mut previous) = self.animators.insert(object, player) {
            previous.stop(&mut self.frame_steps);
        }
        Ok(())
    }

    /// Make an object interactable
    ///
    /// The object gets a kinematic body with a sensor of `radius` so
    /// interactors can find it.
    pub fn add_interactable(
        &mut self,
        object: ObjectId,
        behaviour: Box<dyn InteractionHooks>,
        radius: f32,
    ) -> Result<(), WorldError> {
        self.require_transform(object)?;
        let position = self.transforms.world_position(object).unwrap_or(Vec2::ZERO);

        if let Some(body) = self.props.remove(&object) {
            self.physics.remove_rigid_body(body);
        }
        let (body, _) = self.physics.attach(
            object,
            presets::prop_body(position.x, position.y),
            presets::interactable_sensor(radius),
        );
        self.props.insert(object, body);

        if let Some(mut previous) = self
            .interactables
            .insert(object, Interactable::new(object, behaviour))
        {
            previous.disable(&mut self.liveness);
        }
        log::debug!("{} is interactable", self.transforms.name(object));
        Ok(())
    }

    /// Let an object look for interactables; its scan starts right away
    pub fn add_interactor(
        &mut self,
        object: ObjectId,
        settings: &InteractorSettings,
    ) -> Result<(), WorldError> {
        self.require_transform(object)?;
        let mut interactor = Interactor::from_settings(object, settings);
        interactor.start(&mut self.scans);

        if let Some(mut previous) = self.interactors.insert(object, interactor) {
            previous.stop(&mut self.scans, &mut self.interactables, &mut self.transforms);
        }
        Ok(())
    }

    /// Turn an object into a character
    ///
    /// The object needs an interactor, and every animated part an animation
    /// player.
    pub fn add_character(
        &mut self,
        object: ObjectId,
        stats: MovementStats,
        parts: Vec<ObjectId>,
        player_controlled: bool,
    ) -> Result<(), WorldError> {
        self.require_transform(object)?;
        let name = self.transforms.name(object);
        if !self.interactors.contains_key(&object) {
            return Err(WorldError::MissingDependency {
                object: name,
                dependency: "interactor",
            });
        }
        if let Some(part) = parts.iter().find(|part| !self.animators.contains_key(*part)) {
            return Err(WorldError::MissingDependency {
                object: self.transforms.name(*part),
                dependency: "animation player",
            });
        }

        let position = self.transforms.world_position(object).unwrap_or(Vec2::ZERO);
        let handles = self.physics.attach(
            object,
            presets::character_body(position.x, position.y),
            presets::character_collider(stats.radius),
        );

        let mut character = Character::new(object, &name, handles, stats, parts);
        if player_controlled {
            character = character.player_controlled();
            self.camera.follow(Some(object));
            self.camera.snap(&self.transforms);
        }
        log::info!("Spawned character {}", name);
        self.characters.push(character);
        Ok(())
    }

    /// Remove an object and all its components
    pub fn despawn(&mut self, object: ObjectId) {
        if let Some(character) = self.characters.iter_mut().find(|c| c.id == object) {
            let actor = self
                .interactors
                .get(&object)
                .map(Interactor::actor_ref)
                .unwrap_or(ActorRef {
                    id: object,
                    search_cooldown: self.config.interactor.search_cooldown,
                });
            character.carrier.drop_held(
                actor,
                &mut self.interactables,
                &mut self.transforms,
                &mut self.liveness,
            );
        }
        if let Some(mut interactable) = self.interactables.remove(&object) {
            interactable.disable(&mut self.liveness);
            for interactor in self.interactors.values_mut() {
                interactor.forget(object);
            }
            for character in &mut self.characters {
                character.carrier.release(object);
            }
        }
        if let Some(mut interactor) = self.interactors.remove(&object) {
            interactor.stop(&mut self.scans, &mut self.interactables, &mut self.transforms);
        }
        if let Some(mut player) = self.animators.remove(&object) {
            player.stop(&mut self.frame_steps);
        }
        if let Some(body) = self.props.remove(&object) {
            self.physics.remove_rigid_body(body);
        }
        if let Some(index) = self.characters.iter().position(|c| c.id == object) {
            let character = self.characters.remove(index);
            self.physics.remove_rigid_body(character.body_handle);
            if self.camera.target() == Some(object) {
                self.camera.follow(None);
            }
        }
        self.transforms.despawn(object);
    }

    /// Play a clip on an object's animation player
    pub fn play_clip<'a>(
        &mut self,
        object: ObjectId,
        clip: impl Into<ClipRef<'a>>,
        force: bool,
    ) -> Result<(), WorldError> {
        let player = self
            .animators
            .get_mut(&object)
            .ok_or(WorldError::UnknownObject(object))?;
        player.play_clip(clip, force, &mut self.frame_steps)?;
        Ok(())
    }

    /// Freeze an object's animation on one frame
    pub fn play_frame<'a>(
        &mut self,
        object: ObjectId,
        clip: impl Into<ClipRef<'a>>,
        frame: usize,
    ) -> Result<(), WorldError> {
        let player = self
            .animators
            .get_mut(&object)
            .ok_or(WorldError::UnknownObject(object))?;
        player.play_frame(clip, frame, &mut self.frame_steps)?;
        Ok(())
    }

    /// Stop an object's animation
    pub fn stop_animation(&mut self, object: ObjectId) -> Result<(), WorldError> {
        let player = self
            .animators
            .get_mut(&object)
            .ok_or(WorldError::UnknownObject(object))?;
        player.stop(&mut self.frame_steps);
        Ok(())
    }

    /// Run one fixed step
    ///
    /// `input` drives the player-controlled characters; `aim` is the world
    /// point they face when aiming.
    pub fn update(&mut self, dt: Duration, input: &dyn ButtonState, aim: Option<Vec2>) {
        let Self {
            transforms,
            physics,
            animators,
            interactables,
            interactors,
            characters,
            props,
            projectiles,
            frame_steps,
            liveness,
            scans,
            camera,
            ..
        } = self;

        // Input
        for character in characters.iter_mut().filter(|c| c.player_controlled) {
            character.apply_input(input, aim);
            if let Some(interactor) = interactors.get(&character.id) {
                character
                    .carrier
                    .handle_input(input, interactor, interactables, transforms, liveness);
            }
        }

        // Movement
        for character in characters.iter() {
            character.steer(physics);
        }
        for (object, body) in props.iter() {
            if let Some(position) = transforms.world_position(*object) {
                physics.set_body_position(*body, position);
            }
        }
        physics.set_timestep(dt.as_secs_f32());
        physics.step();
        for character in characters.iter() {
            character.sync(physics, transforms);
            character
                .animator
                .update(&character.controller, animators, frame_steps);
        }

        // Presence scans, and heartbeats of held interactions
        let space: &PhysicsWorld = physics;
        scans.advance(dt, |sched, handle, tick| {
            let Some(interactor) = interactors.get_mut(&tick.actor) else {
                sched.cancel(handle);
                return;
            };
            interactor.scan(space, interactables, transforms);
            if let Some(character) = characters.iter_mut().find(|c| c.id == tick.actor) {
                character
                    .carrier
                    .on_scan(interactor, interactables, transforms, liveness);
            }
        });

        liveness.advance(dt, |sched, handle, tick| match interactables.get_mut(&tick.object) {
            Some(object) => object.liveness_tick(handle, transforms, sched),
            None => {
                sched.cancel(handle);
            }
        });

        frame_steps.advance(dt, |sched, _, step| {
            if let Some(player) = animators.get_mut(&step.owner) {
                player.resume(step, sched);
            }
        });

        // Weapons
        let secs = dt.as_secs_f32();
        for projectile in projectiles.iter_mut() {
            projectile.position += projectile.velocity * secs;
            projectile.remaining = projectile.remaining.saturating_sub(dt);
        }
        projectiles.retain(|projectile| projectile.remaining > Duration::ZERO);

        for character in characters.iter_mut() {
            let Some(held) = character.carrier.held() else {
                continue;
            };
            let Some(weapon) = interactables
                .get_mut(&held)
                .and_then(|object| object.behaviour_mut().as_weapon_mut())
            else {
                continue;
            };

            if character.player_controlled {
                if input.is_button_down(Action::Reload) {
                    weapon.start_reload();
                }
                let shot = weapon.trigger(
                    input.is_button_down(Action::Fire),
                    input.is_button_held(Action::Fire),
                );
                let muzzle = transforms.world_position(held).zip(transforms.right(held));
                if let (Some(shot), Some((position, direction))) = (shot, muzzle) {
                    log::trace!("{:?} fired", shot.weapon);
                    projectiles.push(Projectile {
                        weapon: shot.weapon,
                        position,
                        velocity: direction * shot.speed,
                        remaining: PROJECTILE_LIFETIME,
                    });
                }
            }
            weapon.tick(dt, Some(&mut character.inventory));
        }

        camera.update(secs, transforms);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn transforms(&self) -> &TransformTree {
        &self.transforms
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn animator(&self, object: ObjectId) -> Option<&AnimationPlayer> {
        self.animators.get(&object)
    }

    pub fn interactable(&self, object: ObjectId) -> Option<&Interactable> {
        self.interactables.get(&object)
    }

    pub fn interactor(&self, object: ObjectId) -> Option<&Interactor> {
        self.interactors.get(&object)
    }

    pub fn character(&self, object: ObjectId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == object)
    }

    pub fn character_mut(&mut self, object: ObjectId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == object)
    }

    /// The character driven by the local player
    pub fn player(&self) -> Option<&Character> {
        self.characters.iter().find(|c| c.player_controlled)
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn camera(&self) -> &CameraFollow {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraFollow {
        &mut self.camera
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: ItemCatalog) {
        self.catalog = catalog;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SheetHandle;
    use crate::engine::input::PlayerInput;
    use crate::engine::renderer::FrameRef;
    use crate::game::animation::{AnimationError, Clip};
    use crate::game::characters::{BASE_STATS, IDLE_CLIP, WALK_CLIP};
    use crate::game::interaction::{Console, Pickup};
    use crate::game::items::{Item, Weapon};

    const STEP: Duration = Duration::from_micros(16_667);

    fn clips() -> Arc<ClipRegistry> {
        let sheet = SheetHandle::from_path("sheets/player.png");
        let hold = Duration::from_millis(100);
        let registry = ClipRegistry::new()
            .with_clip(Clip::new(IDLE_CLIP, FrameRef::strip(sheet, 0, 2), hold))
            .and_then(|r| r.with_clip(Clip::new(WALK_CLIP, FrameRef::strip(sheet, 2, 4), hold)))
            .unwrap();
        Arc::new(registry)
    }

    /// A world with a player character at the origin
    fn world_with_player() -> (World, ObjectId, ObjectId) {
        let mut world = World::new(GameConfig::default());
        let player = world.spawn("player", Vec2::ZERO, 0.0);
        let body = world.spawn_child("body", player, Vec2::ZERO);
        world.add_animation(body, clips()).unwrap();
        let settings = world.config().interactor;
        world.add_interactor(player, &settings).unwrap();
        world.add_character(player, BASE_STATS, vec![body], true).unwrap();
        (world, player, body)
    }

    /// Run `steps` fixed steps, clearing input edges after each
    fn run(world: &mut World, input: &mut PlayerInput, steps: usize) {
        for _ in 0..steps {
            world.update(STEP, &*input, None);
            input.update();
        }
    }

    #[test]
    fn test_character_requires_interactor() {
        let mut world = World::new(GameConfig::default());
        let player = world.spawn("player", Vec2::ZERO, 0.0);

        match world.add_character(player, BASE_STATS, Vec::new(), true) {
            Err(WorldError::MissingDependency { object, dependency }) => {
                assert_eq!(object, "player");
                assert_eq!(dependency, "interactor");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(world.characters().is_empty());
    }

    #[test]
    fn test_character_requires_animated_parts() {
        let mut world = World::new(GameConfig::default());
        let player = world.spawn("player", Vec2::ZERO, 0.0);
        let hands = world.spawn_child("hands", player, Vec2::ZERO);
        let settings = world.config().interactor;
        world.add_interactor(player, &settings).unwrap();

        let err = world
            .add_character(player, BASE_STATS, vec![hands], true)
            .unwrap_err();
        assert_eq!(err.to_string(), "hands: missing required animation player");
    }

    #[test]
    fn test_components_require_transform() {
        let mut world = World::new(GameConfig::default());
        let ghost = ObjectId::from_u32(99);

        assert!(matches!(
            world.add_animation(ghost, clips()),
            Err(WorldError::MissingDependency { dependency: "transform", .. })
        ));
        assert!(world.add_interactable(ghost, Box::new(Pickup::new()), 0.5).is_err());
    }

    #[test]
    fn test_play_clip_errors() {
        let (mut world, player, body) = world_with_player();

        assert!(matches!(
            world.play_clip(player, WALK_CLIP, false),
            Err(WorldError::UnknownObject(id)) if id == player
        ));
        assert!(matches!(
            world.play_clip(body, "Dance", false),
            Err(WorldError::Animation(AnimationError::UnknownClip(_)))
        ));
        assert!(matches!(
            world.play_frame(body, WALK_CLIP, 9),
            Err(WorldError::Animation(AnimationError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_walking_moves_and_animates() {
        let (mut world, player, body) = world_with_player();
        let mut input = PlayerInput::new();

        run(&mut world, &mut input, 1);
        assert_eq!(world.animator(body).unwrap().current_clip_name(), Some(IDLE_CLIP));

        input.press(Action::MoveRight);
        run(&mut world, &mut input, 30);

        let position = world.transforms().world_position(player).unwrap();
        assert!(position.x > 0.1, "player did not move: {:?}", position);
        assert_eq!(world.animator(body).unwrap().current_clip_name(), Some(WALK_CLIP));
        // The camera follows
        assert!(world.camera().position.x > 0.0);
    }

    #[test]
    fn test_pickup_fire_and_drop() {
        let (mut world, player, _) = world_with_player();
        let rifle = world.spawn("rifle", Vec2::new(1.5, 0.0), 0.0);
        world
            .add_interactable(rifle, Box::new(Weapon::rifle()), 0.5)
            .unwrap();
        world
            .character_mut(player)
            .unwrap()
            .inventory
            .add(Item::new(ItemKind::RifleAmmo, 60));

        let mut input = PlayerInput::new();
        run(&mut world, &mut input, 3);
        assert!(world.interactable(rifle).unwrap().is_hovered());
        assert_eq!(world.interactor(player).unwrap().hover_set(), &[rifle]);

        input.press(Action::Interact);
        run(&mut world, &mut input, 1);
        input.release(Action::Interact);
        assert_eq!(world.player().unwrap().carrier.held(), Some(rifle));
        assert_eq!(world.transforms().parent(rifle), Some(player));

        input.press(Action::Fire);
        run(&mut world, &mut input, 1);
        input.release(Action::Fire);
        assert_eq!(world.projectiles().len(), 1);
        assert_eq!(world.projectiles()[0].velocity, Vec2::new(30.0, 0.0));

        input.press(Action::Interact);
        run(&mut world, &mut input, 1);
        assert_eq!(world.player().unwrap().carrier.held(), None);
        assert_eq!(world.transforms().parent(rifle), None);
    }

    #[test]
    fn test_projectiles_expire() {
        let (mut world, player, _) = world_with_player();
        let rifle = world.spawn("rifle", Vec2::new(1.0, 0.0), 0.0);
        world
            .add_interactable(rifle, Box::new(Weapon::rifle()), 0.5)
            .unwrap();

        let mut input = PlayerInput::new();
        run(&mut world, &mut input, 2);
        input.press(Action::Interact);
        run(&mut world, &mut input, 1);
        input.release(Action::Interact);
        assert_eq!(world.player().unwrap().carrier.held(), Some(rifle));

        input.press(Action::Fire);
        run(&mut world, &mut input, 1);
        input.release(Action::Fire);
        assert_eq!(world.projectiles().len(), 1);

        run(&mut world, &mut input, 130);
        assert!(world.projectiles().is_empty());
        assert!(world.character(player).is_some());
    }

    #[test]
    fn test_holding_interact_keeps_console_running() {
        let (mut world, _, _) = world_with_player();
        let terminal = world.spawn("terminal", Vec2::new(1.0, 0.0), 0.0);
        world
            .add_interactable(terminal, Box::new(Console::default()), 0.5)
            .unwrap();

        let mut input = PlayerInput::new();
        run(&mut world, &mut input, 2);

        input.press(Action::Interact);
        run(&mut world, &mut input, 60);
        assert!(world.interactable(terminal).unwrap().is_interacting());

        input.release(Action::Interact);
        run(&mut world, &mut input, 6);
        assert!(!world.interactable(terminal).unwrap().is_interacting());
    }

    #[test]
    fn test_despawned_carrier_drops_its_object() {
        let (mut world, player, _) = world_with_player();
        let crate_id = world.spawn("crate", Vec2::new(1.0, 0.0), 0.0);
        world
            .add_interactable(crate_id, Box::new(Pickup::new()), 0.5)
            .unwrap();

        let mut input = PlayerInput::new();
        run(&mut world, &mut input, 2);
        input.press(Action::Interact);
        run(&mut world, &mut input, 1);
        input.release(Action::Interact);
        assert_eq!(world.player().unwrap().carrier.held(), Some(crate_id));
        let carried_at = world.transforms().world_position(crate_id).unwrap();

        world.despawn(player);
        let carrier = world
            .interactable(crate_id)
            .unwrap()
            .behaviour()
            .as_carryable()
            .and_then(|c| c.carrier());
        assert_eq!(carrier, None);
        assert_eq!(world.transforms().parent(crate_id), None);
        assert_eq!(world.transforms().world_position(crate_id), Some(carried_at));

        // A new actor picks it up with a single press
        let other = world.spawn("other", Vec2::new(2.0, 0.0), 0.0);
        let body = world.spawn_child("other body", other, Vec2::ZERO);
        world.add_animation(body, clips()).unwrap();
        let settings = world.config().interactor;
        world.add_interactor(other, &settings).unwrap();
        world.add_character(other, BASE_STATS, vec![body], true).unwrap();

        run(&mut world, &mut input, 2);
        input.press(Action::Interact);
        run(&mut world, &mut input, 1);
        assert_eq!(world.player().unwrap().carrier.held(), Some(crate_id));
        assert_eq!(world.transforms().parent(crate_id), Some(other));
    }

    #[test]
    fn test_despawn_clears_references() {
        let (mut world, player, _) = world_with_player();
        let crate_id = world.spawn("crate", Vec2::new(1.0, 0.0), 0.0);
        world
            .add_interactable(crate_id, Box::new(Pickup::new()), 0.5)
            .unwrap();

        let mut input = PlayerInput::new();
        run(&mut world, &mut input, 2);
        input.press(Action::Interact);
        run(&mut world, &mut input, 1);
        input.release(Action::Interact);
        assert_eq!(world.player().unwrap().carrier.held(), Some(crate_id));

        world.despawn(crate_id);
        assert_eq!(world.player().unwrap().carrier.held(), None);
        assert!(world.interactor(player).unwrap().hover_set().is_empty());
        assert!(world.interactable(crate_id).is_none());

        run(&mut world, &mut input, 5);
        assert!(world.interactor(player).unwrap().hover_set().is_empty());
    }
}
