use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::stroke::{MutableStroke, PathProperties, StrokeRef};

/// An immutable copy of a frame's committed stroke list, stored for undo/redo.
pub type Snapshot = Vec<StrokeRef>;

/// One canvas's worth of committed strokes, the stroke under construction (if
/// any), and a linear undo/redo history.
///
/// The history is a single list of snapshots with a cursor, not two stacks.
/// Invariants:
/// - `history_index` is always in bounds and `history[history_index]` equals
///   the live `strokes` after every commit, undo or redo.
/// - Committing after an undo prunes every snapshot past the cursor before
///   appending the new one (linear undo, no branching).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    strokes: Vec<StrokeRef>,
    in_progress: Option<MutableStroke>,
    last_offset: Option<Pos2>,
    history: Vec<Snapshot>,
    history_index: usize,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// A new frame starts with a single empty snapshot at cursor 0, so undo
    /// at the bound is a natural no-op.
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            in_progress: None,
            last_offset: None,
            history: vec![Vec::new()],
            history_index: 0,
        }
    }

    /// A new frame holding a copy of this frame's committed strokes, with a
    /// fresh single-snapshot history. Strokes are immutable behind `Arc`, so
    /// the copy shares structure without aliasing hazards.
    pub fn duplicate(&self) -> Self {
        Self {
            strokes: self.strokes.clone(),
            in_progress: None,
            last_offset: None,
            history: vec![self.strokes.clone()],
            history_index: 0,
        }
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn in_progress(&self) -> Option<&MutableStroke> {
        self.in_progress.as_ref()
    }

    pub fn in_progress_mut(&mut self) -> Option<&mut MutableStroke> {
        self.in_progress.as_mut()
    }

    /// Last absolute pointer position of the active drag, used to turn
    /// relative deltas into absolute points. `None` outside a drag.
    pub fn last_offset(&self) -> Option<Pos2> {
        self.last_offset
    }

    /// Begin a stroke at `point` with the given properties.
    pub fn start_stroke(&mut self, point: Pos2, properties: PathProperties) {
        self.in_progress = Some(MutableStroke::begin(point, properties));
        self.last_offset = Some(point);
    }

    /// Extend the in-progress stroke to an absolute position. No-op when no
    /// stroke is in progress: spurious drag events can arrive after a cancel.
    pub fn extend_stroke(&mut self, point: Pos2) {
        if let Some(stroke) = self.in_progress.as_mut() {
            stroke.add_point(point);
            self.last_offset = Some(point);
        }
    }

    /// Freeze the in-progress stroke onto the stroke list and push a history
    /// snapshot. No-op when nothing is in progress.
    pub fn commit_stroke(&mut self) {
        if let Some(stroke) = self.in_progress.take() {
            self.strokes.push(stroke.to_stroke_ref());
            self.last_offset = None;
            self.push_snapshot();
        }
    }

    /// Discard the in-progress stroke. History is untouched.
    pub fn cancel_stroke(&mut self) {
        self.in_progress = None;
        self.last_offset = None;
    }

    /// Append a precomputed closed path as a committed stroke, bypassing the
    /// begin/extend/commit flow. Still pushes a history snapshot.
    pub fn append_shape(&mut self, points: Vec<Pos2>, properties: PathProperties) {
        self.strokes
            .push(crate::stroke::Stroke::new_ref(points, properties));
        self.push_snapshot();
    }

    pub fn can_undo(&self) -> bool {
        self.history_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history_index + 1 < self.history.len()
    }

    /// Step the cursor back and restore that snapshot. Returns false (and
    /// leaves the frame untouched) at the lower bound.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.history_index -= 1;
        self.strokes = self.history[self.history_index].clone();
        true
    }

    /// Step the cursor forward and restore that snapshot. Returns false at
    /// the upper bound.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.history_index += 1;
        self.strokes = self.history[self.history_index].clone();
        true
    }

    // Discard the redo branch, append the current strokes, advance the cursor.
    fn push_snapshot(&mut self) {
        self.history.truncate(self.history_index + 1);
        self.history.push(self.strokes.clone());
        self.history_index = self.history.len() - 1;
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.history_index
    }
}
