// Animation clips and the per-character clip table

use std::collections::HashMap;
use std::time::Duration;

use super::{AnimationError, ClipRef};
use crate::engine::renderer::FrameRef;

/// Stable identifier of a clip inside its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(usize);

impl ClipId {
    /// Position of the clip in its registry
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named sequence of sprite frames, each shown for the same duration
#[derive(Debug, Clone)]
pub struct Clip {
    /// Name of the clip (e.g. "Idle", "Walk")
    pub name: String,
    /// Frames in playback order
    pub frames: Vec<FrameRef>,
    /// How long each frame stays on screen
    pub frame_hold: Duration,
}

impl Clip {
    /// Create a new clip
    pub fn new(name: &str, frames: Vec<FrameRef>, frame_hold: Duration) -> Self {
        Self {
            name: name.to_string(),
            frames,
            frame_hold,
        }
    }

    /// Create a clip played at `fps` frames per second
    pub fn with_fps(name: &str, frames: Vec<FrameRef>, fps: f32) -> Self {
        let frame_hold = if fps > 0.0 {
            Duration::from_secs_f32(1.0 / fps)
        } else {
            Duration::ZERO
        };
        Self::new(name, frames, frame_hold)
    }

    /// Number of frames in the clip
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Time from the first frame being shown until playback ends
    pub fn total_duration(&self) -> Duration {
        self.frame_hold * self.frames.len() as u32
    }
}

/// Immutable table of clips available to an animated object
///
/// Built once when the object is authored and then shared read-only
/// between every part that animates with it.
#[derive(Debug, Default)]
pub struct ClipRegistry {
    clips: Vec<Clip>,
    by_name: HashMap<String, ClipId>,
}

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip and return its id
    pub fn register(&mut self, clip: Clip) -> Result<ClipId, AnimationError> {
        if clip.frames.is_empty() {
            return Err(AnimationError::EmptyClip(clip.name));
        }
        if self.by_name.contains_key(&clip.name) {
            return Err(AnimationError::DuplicateClip(clip.name));
        }

        let id = ClipId(self.clips.len());
        self.by_name.insert(clip.name.clone(), id);
        self.clips.push(clip);
        Ok(id)
    }

    /// Builder-style registration
    pub fn with_clip(mut self, clip: Clip) -> Result<Self, AnimationError> {
        self.register(clip)?;
        Ok(self)
    }

    /// Resolve a name or id to an id of this registry
    pub fn resolve(&self, clip: ClipRef<'_>) -> Option<ClipId> {
        match clip {
            ClipRef::Id(id) => (id.0 < self.clips.len()).then_some(id),
            ClipRef::Name(name) => self.by_name.get(name).copied(),
        }
    }

    /// Look up a clip by id
    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.get(id.0)
    }

    /// Look up a clip by name
    pub fn by_name(&self, name: &str) -> Option<&Clip> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the registry has no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
