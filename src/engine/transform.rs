// Object transforms and parent/child attachment
//
// Every game object owns a node in the transform tree: a name (used in
// diagnostics), a local position/rotation and an optional parent. World-space
// values are resolved through the parent chain.

use glam::Vec2;
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a game object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Create an object ID from a raw u32
    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Local transform of a single object
#[derive(Debug, Clone)]
pub struct Transform {
    /// Display name of the object
    pub name: String,
    /// Position relative to the parent (or world if root)
    pub position: Vec2,
    /// Rotation in radians relative to the parent
    pub rotation: f32,
    /// Parent object, if attached
    pub parent: Option<ObjectId>,
}

/// Rotate a vector by `angle` radians
fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Transform hierarchy for all objects in the world
#[derive(Debug, Default)]
pub struct TransformTree {
    nodes: HashMap<ObjectId, Transform>,
    next_id: u32,
}

impl TransformTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new root object at the given world position
    pub fn spawn(&mut self, name: &str, position: Vec2, rotation: f32) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        self.nodes.insert(
            id,
            Transform {
                name: name.to_string(),
                position,
                rotation,
                parent: None,
            },
        );

        id
    }

    /// Create a new object attached to `parent` at a local offset
    ///
    /// Falls back to a root object if the parent does not exist.
    pub fn spawn_child(&mut self, name: &str, parent: ObjectId, local_position: Vec2) -> ObjectId {
        let id = self.spawn(name, local_position, 0.0);
        if self.contains(parent) {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.parent = Some(parent);
            }
        }
        id
    }

    /// Remove an object. Its children are detached and keep their world pose.
    pub fn despawn(&mut self, id: ObjectId) -> Option<Transform> {
        for child in self.children(id) {
            self.set_parent(child, None);
        }
        self.nodes.remove(&id)
    }

    /// Check if an object exists
    pub fn contains(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get the local transform of an object
    pub fn get(&self, id: ObjectId) -> Option<&Transform> {
        self.nodes.get(&id)
    }

    /// Name of an object, or a placeholder for unknown ids
    pub fn name(&self, id: ObjectId) -> String {
        self.nodes
            .get(&id)
            .map(|node| node.name.clone())
            .unwrap_or_else(|| format!("<unknown {}>", id))
    }

    /// Get the parent of an object
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Get all direct children of an object
    pub fn children(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut children: Vec<ObjectId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.parent == Some(id))
            .map(|(child, _)| *child)
            .collect();
        children.sort();
        children
    }

    /// World-space position of an object
    pub fn world_position(&self, id: ObjectId) -> Option<Vec2> {
        let node = self.nodes.get(&id)?;
        match node.parent {
            Some(parent) => {
                let parent_position = self.world_position(parent)?;
                let parent_rotation = self.world_rotation(parent)?;
                Some(parent_position + rotate(node.position, parent_rotation))
            }
            None => Some(node.position),
        }
    }

    /// World-space rotation of an object (radians)
    pub fn world_rotation(&self, id: ObjectId) -> Option<f32> {
        let node = self.nodes.get(&id)?;
        match node.parent {
            Some(parent) => Some(self.world_rotation(parent)? + node.rotation),
            None => Some(node.rotation),
        }
    }

    /// Unit vector pointing along the object's local +X axis in world space
    pub fn right(&self, id: ObjectId) -> Option<Vec2> {
        self.world_rotation(id).map(Vec2::from_angle)
    }

    /// Transform a point from the object's local space into world space
    pub fn transform_point(&self, id: ObjectId, local: Vec2) -> Option<Vec2> {
        let position = self.world_position(id)?;
        let rotation = self.world_rotation(id)?;
        Some(position + rotate(local, rotation))
    }

    /// Place an object at a world-space position
    pub fn set_world_position(&mut self, id: ObjectId, position: Vec2) {
        let local = match self.parent(id) {
            Some(parent) => {
                let parent_position = self.world_position(parent).unwrap_or(Vec2::ZERO);
                let parent_rotation = self.world_rotation(parent).unwrap_or(0.0);
                rotate(position - parent_position, -parent_rotation)
            }
            None => position,
        };

        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = local;
        }
    }

    /// Set an object's world-space rotation
    pub fn set_world_rotation(&mut self, id: ObjectId, rotation: f32) {
        let local = match self.parent(id) {
            Some(parent) => rotation - self.world_rotation(parent).unwrap_or(0.0),
            None => rotation,
        };

        if let Some(node) = self.nodes.get_mut(&id) {
            node.rotation = local;
        }
    }

    /// Attach an object to a new parent (or detach with `None`)
    ///
    /// The object keeps its world pose. Returns false if either object is
    /// unknown or the attachment would create a cycle.
    pub fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) -> bool {
        if !self.contains(id) {
            return false;
        }

        if let Some(parent) = parent {
            if !self.contains(parent) || self.is_ancestor_or_self(id, parent) {
                return false;
            }
        }

        let world_position = self.world_position(id).unwrap_or(Vec2::ZERO);
        let world_rotation = self.world_rotation(id).unwrap_or(0.0);

        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }

        self.set_world_position(id, world_position);
        self.set_world_rotation(id, world_rotation);
        true
    }

    /// Is `ancestor` equal to `id` or somewhere above `id`'s parent chain?
    fn is_ancestor_or_self(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
