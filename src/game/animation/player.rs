// Animation playback for a single object

use std::sync::Arc;

use super::{AnimationError, ClipId, ClipRef, ClipRegistry};
use crate::engine::renderer::{SpriteSlot, VisualSink};
use crate::engine::scheduler::{Scheduler, TaskHandle};
use crate::engine::transform::ObjectId;

/// Scheduled step of a frame-advance process
///
/// Carries the playback generation it belongs to; once the player restarts or
/// stops, the generation moves on and the step does nothing when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAdvance {
    /// Object whose player owns the process
    pub owner: ObjectId,
    /// Playback generation that started the process
    pub generation: u64,
    /// Frame to show when the step fires
    pub next_frame: usize,
}

/// Drives which frame of which clip an object shows
///
/// At most one frame-advance process writes to the visual slot at a time:
/// every (re)start and every stop bumps `generation`, which silences any step
/// still in flight.
#[derive(Debug)]
pub struct AnimationPlayer<S: VisualSink = SpriteSlot> {
    /// Object this player animates
    owner: ObjectId,
    /// Clips available to this object
    clips: Arc<ClipRegistry>,
    /// Where frames are shown
    sink: S,
    /// Clip being shown (None = idle)
    current_clip: Option<ClipId>,
    /// Frozen frame set by `play_frame`
    frame_override: Option<usize>,
    /// Index of the frame currently shown
    shown_frame: Option<usize>,
    /// Playback generation
    generation: u64,
    /// Pending frame-advance step
    task: Option<TaskHandle>,
}

impl<S: VisualSink> AnimationPlayer<S> {
    /// Create an idle player
    pub fn new(owner: ObjectId, clips: Arc<ClipRegistry>, sink: S) -> Self {
        Self {
            owner,
            clips,
            sink,
            current_clip: None,
            frame_override: None,
            shown_frame: None,
            generation: 0,
            task: None,
        }
    }

    /// Play a clip from its first frame
    ///
    /// Replaying the clip that is already playing is a no-op unless `force`
    /// is set, in which case it restarts from frame 0. A clip frozen by
    /// `play_frame` is not playing and restarts either way.
    pub fn play_clip<'a>(
        &mut self,
        clip: impl Into<ClipRef<'a>>,
        force: bool,
        scheduler: &mut Scheduler<FrameAdvance>,
    ) -> Result<(), AnimationError> {
        let clip = clip.into();
        let Some(id) = self.clips.resolve(clip) else {
            log::warn!("{}: cannot play unknown animation '{}'", self.owner, clip);
            return Err(AnimationError::UnknownClip(clip.to_string()));
        };

        if self.current_clip == Some(id) && self.frame_override.is_none() && !force {
            return Ok(());
        }

        self.retire(scheduler);
        self.frame_override = None;
        self.current_clip = Some(id);

        let Some(data) = self.clips.get(id) else {
            return Err(AnimationError::UnknownClip(clip.to_string()));
        };
        log::debug!("{}: playing '{}'", self.owner, data.name);

        let hold = data.frame_hold;
        self.show(id, 0);
        self.schedule_step(1, hold, scheduler);
        Ok(())
    }

    /// Freeze the object on a single frame of a clip
    ///
    /// Starts no process; any running playback is superseded.
    pub fn play_frame<'a>(
        &mut self,
        clip: impl Into<ClipRef<'a>>,
        frame: usize,
        scheduler: &mut Scheduler<FrameAdvance>,
    ) -> Result<(), AnimationError> {
        let clip = clip.into();
        let Some((id, data)) = self
            .clips
            .resolve(clip)
            .and_then(|id| self.clips.get(id).map(|data| (id, data)))
        else {
            log::warn!("{}: cannot show frame of unknown animation '{}'", self.owner, clip);
            return Err(AnimationError::UnknownClip(clip.to_string()));
        };

        if frame >= data.frame_count() {
            let err = AnimationError::IndexOutOfRange {
                clip: data.name.clone(),
                index: frame,
                len: data.frame_count(),
            };
            log::error!("{}: {}", self.owner, err);
            return Err(err);
        }

        self.retire(scheduler);
        self.current_clip = Some(id);
        self.frame_override = Some(frame);
        self.show(id, frame);
        Ok(())
    }

    /// Stop playback; the last shown frame stays visible
    pub fn stop(&mut self, scheduler: &mut Scheduler<FrameAdvance>) {
        self.retire(scheduler);
        self.current_clip = None;
        self.frame_override = None;
    }

    /// Continue a frame-advance process whose delay elapsed
    pub fn resume(&mut self, step: FrameAdvance, scheduler: &mut Scheduler<FrameAdvance>) {
        if step.generation != self.generation || self.frame_override.is_some() {
            log::trace!("{}: dropping stale frame step", self.owner);
            return;
        }
        self.task = None;

        let Some(id) = self.current_clip else {
            return;
        };
        let Some(data) = self.clips.get(id) else {
            return;
        };

        if step.next_frame >= data.frame_count() {
            log::trace!("{}: '{}' finished", self.owner, data.name);
            self.current_clip = None;
            return;
        }

        let hold = data.frame_hold;
        self.show(id, step.next_frame);
        self.schedule_step(step.next_frame + 1, hold, scheduler);
    }

    /// Retire the running process, if any
    fn retire(&mut self, scheduler: &mut Scheduler<FrameAdvance>) {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            scheduler.cancel(task);
        }
    }

    fn schedule_step(
        &mut self,
        next_frame: usize,
        hold: std::time::Duration,
        scheduler: &mut Scheduler<FrameAdvance>,
    ) {
        let step = FrameAdvance {
            owner: self.owner,
            generation: self.generation,
            next_frame,
        };
        self.task = Some(scheduler.run_after(hold, step));
    }

    fn show(&mut self, id: ClipId, frame: usize) {
        if let Some(frame_ref) = self.clips.get(id).and_then(|clip| clip.frames.get(frame)) {
            self.sink.set_visual(*frame_ref);
            self.shown_frame = Some(frame);
        }
    }

    /// Object this player animates
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    /// Clip being played or frozen (None = idle)
    pub fn current_clip(&self) -> Option<ClipId> {
        self.current_clip
    }

    /// Name of the current clip
    pub fn current_clip_name(&self) -> Option<&str> {
        self.current_clip
            .and_then(|id| self.clips.get(id))
            .map(|clip| clip.name.as_str())
    }

    /// Frame frozen by `play_frame`
    pub fn frame_override(&self) -> Option<usize> {
        self.frame_override
    }

    /// Index of the frame currently shown
    pub fn shown_frame(&self) -> Option<usize> {
        self.shown_frame
    }

    /// Current playback generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Check if a frame-advance process is running
    pub fn is_playing(&self) -> bool {
        self.current_clip.is_some() && self.frame_override.is_none()
    }

    /// The visual slot
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Clips available to this player
    pub fn clips(&self) -> &Arc<ClipRegistry> {
        &self.clips
    }
}
