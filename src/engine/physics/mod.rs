// Physics system using rapier2d

pub mod body;
mod layers;
mod query;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D, ColliderHandle, RigidBodyHandle};
pub use layers::{Layer, LayerMask};
pub use query::SpatialQuery;
pub use world::PhysicsWorld;
