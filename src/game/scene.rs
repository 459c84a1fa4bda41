// Scene setup

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;

use super::animation::{AnimationError, Clip, ClipRegistry};
use super::characters::{BASE_STATS, IDLE_CLIP, WALK_CLIP};
use super::interaction::{Console, Pickup};
use super::items::{Item, ItemCatalog, ItemKind, Weapon};
use super::world::{World, WorldError};
use crate::engine::assets::SheetHandle;
use crate::engine::renderer::FrameRef;
use crate::engine::transform::ObjectId;

/// Sensor radius of props
const PROP_RADIUS: f32 = 0.5;

/// Objects created by `spawn_demo`
#[derive(Debug, Clone, Copy)]
pub struct DemoScene {
    pub player: PlayerParts,
    pub rifle: ObjectId,
    pub pistol: ObjectId,
    pub crate_box: ObjectId,
    pub terminal: ObjectId,
}

/// The player root and its animated parts
#[derive(Debug, Clone, Copy)]
pub struct PlayerParts {
    pub root: ObjectId,
    pub body: ObjectId,
    pub hands: ObjectId,
}

/// Idle and walk cycles laid out on one row of `sheet`
fn character_clips(sheet: &str) -> Result<Arc<ClipRegistry>, AnimationError> {
    let sheet = SheetHandle::from_path(sheet);
    let hold = Duration::from_millis(100);
    let registry = ClipRegistry::new()
        .with_clip(Clip::new(IDLE_CLIP, FrameRef::strip(sheet, 0, 2), hold))?
        .with_clip(Clip::new(WALK_CLIP, FrameRef::strip(sheet, 2, 4), hold))?;
    Ok(Arc::new(registry))
}

/// Build a small playable scene
///
/// A player at the origin with starting ammo, two weapons and a crate to
/// pick up, and a terminal to hold the interact button on.
pub fn spawn_demo(world: &mut World) -> Result<DemoScene, WorldError> {
    world.set_catalog(ItemCatalog::from_sheet(SheetHandle::from_path(
        "sheets/items.png",
    )));

    let root = world.spawn("player", Vec2::ZERO, 0.0);
    let body = world.spawn_child("player body", root, Vec2::ZERO);
    let hands = world.spawn_child("player hands", root, Vec2::new(0.3, 0.0));
    world.add_animation(body, character_clips("sheets/player_body.png")?)?;
    world.add_animation(hands, character_clips("sheets/player_hands.png")?)?;

    let settings = world.config().interactor;
    world.add_interactor(root, &settings)?;
    world.add_character(root, BASE_STATS, vec![body, hands], true)?;

    if let Some(player) = world.character_mut(root) {
        player.inventory.add(Item::new(ItemKind::RifleAmmo, 90));
        player.inventory.add(Item::new(ItemKind::PistolAmmo, 24));
        player.inventory.add(Item::new(ItemKind::MedPack, 2));
    }

    let rifle = world.spawn("rifle", Vec2::new(3.0, 1.0), 0.0);
    world.add_interactable(rifle, Box::new(Weapon::rifle()), PROP_RADIUS)?;

    let pistol = world.spawn("pistol", Vec2::new(-3.0, 1.0), 0.0);
    world.add_interactable(pistol, Box::new(Weapon::pistol()), PROP_RADIUS)?;

    let crate_box = world.spawn("crate", Vec2::new(0.0, -4.0), 0.0);
    world.add_interactable(crate_box, Box::new(Pickup::new()), PROP_RADIUS)?;

    let terminal = world.spawn("terminal", Vec2::new(5.0, -2.0), 0.0);
    world.add_interactable(terminal, Box::new(Console::default()), PROP_RADIUS)?;

    log::info!("Demo scene ready");
    Ok(DemoScene {
        player: PlayerParts { root, body, hands },
        rifle,
        pistol,
        crate_box,
        terminal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;

    #[test]
    fn test_demo_scene_is_complete() {
        let mut world = World::new(GameConfig::default());
        let scene = spawn_demo(&mut world).unwrap();

        let player = world.player().unwrap();
        assert_eq!(player.id, scene.player.root);
        assert_eq!(player.animator.parts(), &[scene.player.body, scene.player.hands]);
        assert_eq!(player.inventory.count(ItemKind::RifleAmmo), 90);

        for prop in [scene.rifle, scene.pistol, scene.crate_box, scene.terminal] {
            let interactable = world.interactable(prop).unwrap();
            assert!(interactable.is_enabled());
        }
        assert!(world.interactable(scene.rifle).unwrap().behaviour().as_weapon().is_some());
        assert!(!world.interactable(scene.terminal).unwrap().is_carryable());
        assert!(world.catalog().sprite(ItemKind::Rifle).is_some());
        assert!(world.interactor(scene.player.root).unwrap().is_scanning());
    }

    #[test]
    fn test_props_start_out_of_reach() {
        let mut world = World::new(GameConfig::default());
        let scene = spawn_demo(&mut world).unwrap();
        let mut input = crate::engine::input::PlayerInput::new();

        let step = world.config().fixed_timestep;
        for _ in 0..5 {
            world.update(step, &input, None);
            input.update();
        }
        assert!(world.interactor(scene.player.root).unwrap().hover_set().is_empty());
    }
}
