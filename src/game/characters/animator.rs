// Drives a character's animations from its movement

use std::collections::HashMap;

use super::controller::CharacterController;
use crate::engine::scheduler::Scheduler;
use crate::engine::transform::ObjectId;
use crate::game::animation::{AnimationPlayer, FrameAdvance};

/// Clip played while moving
pub const WALK_CLIP: &str = "Walk";

/// Clip played while standing still
pub const IDLE_CLIP: &str = "Idle";

/// Keeps every animated part of a character in sync with its movement
#[derive(Debug, Clone, Default)]
pub struct CharacterAnimator {
    /// Objects whose players this animator drives (body, hands, ...)
    parts: Vec<ObjectId>,
}

impl CharacterAnimator {
    pub fn new(parts: Vec<ObjectId>) -> Self {
        Self { parts }
    }

    pub fn parts(&self) -> &[ObjectId] {
        &self.parts
    }

    /// Clip matching the controller state
    pub fn clip_for(controller: &CharacterController) -> &'static str {
        if controller.is_moving() {
            WALK_CLIP
        } else {
            IDLE_CLIP
        }
    }

    /// Play the matching clip on every part
    ///
    /// Called every step; replaying the running clip is a no-op, so a
    /// sequence only restarts when the movement state changes or after it
    /// ran to its end.
    pub fn update(
        &self,
        controller: &CharacterController,
        players: &mut HashMap<ObjectId, AnimationPlayer>,
        scheduler: &mut Scheduler<FrameAdvance>,
    ) {
        let clip = Self::clip_for(controller);
        for part in &self.parts {
            let Some(player) = players.get_mut(part) else {
                continue;
            };
            if let Err(err) = player.play_clip(clip, false, scheduler) {
                log::trace!("{}: {}", part, err);
            }
        }
    }
}
