// Spatial queries over game objects

use glam::Vec2;

use super::layers::LayerMask;
use crate::engine::transform::ObjectId;

/// Overlap queries used by gameplay code to find nearby objects
///
/// Implemented by [`super::PhysicsWorld`]; tests provide their own fixed
/// implementations to control discovery order.
pub trait SpatialQuery {
    /// Objects whose colliders overlap a circle of `radius` around `origin`,
    /// restricted to the layers in `mask`
    ///
    /// Results are unique and returned in a stable discovery order.
    fn query_nearby(&self, origin: Vec2, radius: f32, mask: LayerMask) -> Vec<ObjectId>;
}
