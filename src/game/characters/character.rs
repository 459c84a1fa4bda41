// Character entity: body, movement, animation and hands

use glam::Vec2;

use crate::engine::input::ButtonState;
use crate::engine::physics::{ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::transform::{ObjectId, TransformTree};
use crate::game::items::Inventory;

use super::animator::CharacterAnimator;
use super::carrier::Carrier;
use super::controller::CharacterController;
use super::stats::MovementStats;

/// A player-controlled or AI-controlled character
#[derive(Debug)]
pub struct Character {
    /// Game object of the character root
    pub id: ObjectId,
    /// Character name (for display)
    pub name: String,
    /// Whether the local player drives this character
    pub player_controlled: bool,

    // Physics
    /// Handle to the character's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the character's collider
    pub collider_handle: ColliderHandle,

    /// Movement and facing
    pub controller: CharacterController,
    /// Drives the animated parts from the controller
    pub animator: CharacterAnimator,
    /// What the character holds
    pub carrier: Carrier,
    /// Ammo and loose items
    pub inventory: Inventory,
}

impl Character {
    pub fn new(
        id: ObjectId,
        name: &str,
        (body_handle, collider_handle): (RigidBodyHandle, ColliderHandle),
        stats: MovementStats,
        parts: Vec<ObjectId>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            player_controlled: false,
            body_handle,
            collider_handle,
            controller: CharacterController::new(stats),
            animator: CharacterAnimator::new(parts),
            carrier: Carrier::new(),
            inventory: Inventory::new(),
        }
    }

    /// Mark as driven by the local player
    pub fn player_controlled(mut self) -> Self {
        self.player_controlled = true;
        self
    }

    /// Feed this step's input into the controller
    ///
    /// `aim` is the world point to face in `ToTarget` mode.
    pub fn apply_input(&mut self, input: &dyn ButtonState, aim: Option<Vec2>) {
        self.controller.set_move_direction(input.movement());
        self.controller.set_rotation_target(aim);
    }

    /// Push the body towards the controller's target velocity
    pub fn steer(&self, physics: &mut PhysicsWorld) {
        let Some(current) = physics.body_velocity(self.body_handle) else {
            return;
        };
        let velocity = self.controller.next_velocity(current);
        physics.set_body_velocity(self.body_handle, velocity);
    }

    /// Copy the simulated position to the transform and turn the character
    pub fn sync(&self, physics: &PhysicsWorld, transforms: &mut TransformTree) {
        let Some(position) = physics.body_position(self.body_handle) else {
            return;
        };
        let current = transforms.world_rotation(self.id).unwrap_or(0.0);
        transforms.set_world_position(self.id, position);
        transforms.set_world_rotation(self.id, self.controller.next_rotation(position, current));
    }

    /// Get character's current position
    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.body_position(self.body_handle)
    }

    /// Get character's current velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.body_velocity(self.body_handle)
    }

    /// Teleport, stopping any movement
    pub fn set_position(&self, physics: &mut PhysicsWorld, position: Vec2) {
        physics.set_body_position(self.body_handle, position);
        physics.set_body_velocity(self.body_handle, Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::{Action, PlayerInput};
    use crate::engine::physics::presets;
    use crate::game::characters::stats::BASE_STATS;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn spawn(transforms: &mut TransformTree, physics: &mut PhysicsWorld) -> Character {
        let id = transforms.spawn("player", Vec2::new(1.0, 2.0), 0.0);
        let handles = physics.attach(
            id,
            presets::character_body(1.0, 2.0),
            presets::character_collider(BASE_STATS.radius),
        );
        Character::new(id, "player", handles, BASE_STATS, Vec::new())
    }

    #[test]
    fn test_steer_accelerates_body() {
        let mut transforms = TransformTree::new();
        let mut physics = PhysicsWorld::new();
        let mut character = spawn(&mut transforms, &mut physics);

        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        character.apply_input(&input, None);
        character.steer(&mut physics);

        let velocity = character.velocity(&physics).unwrap();
        assert_relative_eq!(velocity.x, 0.0);
        assert_relative_eq!(velocity.y, BASE_STATS.acceleration, epsilon = 1e-5);
    }

    #[test]
    fn test_release_decelerates_body() {
        let mut transforms = TransformTree::new();
        let mut physics = PhysicsWorld::new();
        let mut character = spawn(&mut transforms, &mut physics);
        physics.set_body_velocity(character.body_handle, Vec2::new(1.0, 0.0));

        character.apply_input(&PlayerInput::new(), None);
        character.steer(&mut physics);

        let velocity = character.velocity(&physics).unwrap();
        assert_relative_eq!(velocity.x, 1.0 - BASE_STATS.deceleration, epsilon = 1e-5);
    }

    #[test]
    fn test_sync_moves_and_turns_transform() {
        let mut transforms = TransformTree::new();
        let mut physics = PhysicsWorld::new();
        let mut character = spawn(&mut transforms, &mut physics);
        character.set_position(&mut physics, Vec2::new(4.0, -1.0));

        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        character.apply_input(&input, None);
        character.sync(&physics, &mut transforms);

        assert_eq!(transforms.world_position(character.id), Some(Vec2::new(4.0, -1.0)));
        assert_relative_eq!(
            transforms.world_rotation(character.id).unwrap(),
            FRAC_PI_2,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_idle_character_keeps_facing() {
        let mut transforms = TransformTree::new();
        let mut physics = PhysicsWorld::new();
        let character = spawn(&mut transforms, &mut physics);
        transforms.set_world_rotation(character.id, 1.0);

        character.sync(&physics, &mut transforms);
        assert_relative_eq!(transforms.world_rotation(character.id).unwrap(), 1.0, epsilon = 1e-5);
    }
}
