// Sprite animation
//
// Clips are authored once into a `ClipRegistry`; every animated object owns
// an `AnimationPlayer` that shows one clip at a time. Frame advancement is a
// scheduled process (`FrameAdvance` tasks) rather than a per-frame timer, so
// restarting or stopping playback retires the running process at once.

pub mod clip;
pub mod player;

pub use clip::{Clip, ClipId, ClipRegistry};
pub use player::{AnimationPlayer, FrameAdvance};

use thiserror::Error;

/// Errors raised by clip authoring and playback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("unknown animation clip '{0}'")]
    UnknownClip(String),

    #[error("frame {index} out of range for clip '{clip}' ({len} frames)")]
    IndexOutOfRange {
        clip: String,
        index: usize,
        len: usize,
    },

    #[error("animation clip '{0}' has no frames")]
    EmptyClip(String),

    #[error("animation clip '{0}' is already registered")]
    DuplicateClip(String),
}

/// Reference to a clip, by registry id or by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipRef<'a> {
    Id(ClipId),
    Name(&'a str),
}

impl<'a> From<ClipId> for ClipRef<'a> {
    fn from(id: ClipId) -> Self {
        ClipRef::Id(id)
    }
}

impl<'a> From<&'a str> for ClipRef<'a> {
    fn from(name: &'a str) -> Self {
        ClipRef::Name(name)
    }
}

impl std::fmt::Display for ClipRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipRef::Id(id) => write!(f, "clip #{}", id.index()),
            ClipRef::Name(name) => write!(f, "{}", name),
        }
    }
}
