// Visual output of game objects
//
// Drawing is done elsewhere; gameplay code only decides *which* sprite frame
// an object shows. Each animated object owns one visual slot and nobody else
// writes to it.

use crate::engine::assets::SheetHandle;

/// Reference to one cell of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRef {
    /// Sprite sheet containing the frame
    pub sheet: SheetHandle,
    /// Cell index in the sheet (row-major)
    pub cell: u32,
}

impl FrameRef {
    pub fn new(sheet: SheetHandle, cell: u32) -> Self {
        Self { sheet, cell }
    }

    /// Consecutive cells `first..first + count` of a sheet
    pub fn strip(sheet: SheetHandle, first: u32, count: u32) -> Vec<Self> {
        (first..first + count).map(|cell| Self::new(sheet, cell)).collect()
    }
}

/// Receiver of the currently visible frame
pub trait VisualSink {
    /// Show `frame` from now on
    fn set_visual(&mut self, frame: FrameRef);
}

/// Visual slot of a single sprite object
#[derive(Debug, Clone, Default)]
pub struct SpriteSlot {
    current: Option<FrameRef>,
    /// Number of times the visible frame was set
    changes: u64,
}

impl SpriteSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame currently shown, if any
    pub fn current(&self) -> Option<FrameRef> {
        self.current
    }

    /// Number of times the visible frame was set
    pub fn changes(&self) -> u64 {
        self.changes
    }
}

impl VisualSink for SpriteSlot {
    fn set_visual(&mut self, frame: FrameRef) {
        log::trace!("sprite frame -> cell {}", frame.cell);
        self.current = Some(frame);
        self.changes += 1;
    }
}
