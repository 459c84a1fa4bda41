// Camera that smoothly follows a game object

use glam::Vec2;

use super::config::CameraSettings;
use crate::core::math::smooth_damp;
use crate::engine::transform::{ObjectId, TransformTree};

/// 2D follow camera
#[derive(Debug, Clone)]
pub struct CameraFollow {
    /// Camera position in world space
    pub position: Vec2,
    /// Current smoothing velocity
    velocity: Vec2,
    settings: CameraSettings,
    /// Object followed
    target: Option<ObjectId>,
    /// Viewport size in pixels
    viewport: Vec2,
    /// Pixels covered by one world unit
    pixels_per_unit: f32,
}

impl CameraFollow {
    pub fn new(settings: CameraSettings, viewport: Vec2, pixels_per_unit: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            settings,
            target: None,
            viewport,
            pixels_per_unit: pixels_per_unit.max(0.1),
        }
    }

    /// Follow `target`, or stop following
    pub fn follow(&mut self, target: Option<ObjectId>) {
        self.target = target;
        self.velocity = Vec2::ZERO;
    }

    /// Jump straight to the followed point
    pub fn snap(&mut self, transforms: &TransformTree) {
        if let Some(point) = self.goal(transforms) {
            self.position = point;
            self.velocity = Vec2::ZERO;
        }
    }

    /// Move towards the followed point; `dt` in seconds
    pub fn update(&mut self, dt: f32, transforms: &TransformTree) {
        let Some(goal) = self.goal(transforms) else {
            return;
        };
        self.position = smooth_damp(
            self.position,
            goal,
            &mut self.velocity,
            self.settings.smooth_time,
            dt,
        );
    }

    fn goal(&self, transforms: &TransformTree) -> Option<Vec2> {
        transforms.transform_point(self.target?, self.settings.target_offset)
    }

    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Convert screen coordinates to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let offset = screen_pos - self.viewport / 2.0;
        // Screen y grows downwards
        self.position + Vec2::new(offset.x, -offset.y) / self.pixels_per_unit
    }

    /// Convert world coordinates to screen coordinates
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        let offset = (world_pos - self.position) * self.pixels_per_unit;
        self.viewport / 2.0 + Vec2::new(offset.x, -offset.y)
    }
}
