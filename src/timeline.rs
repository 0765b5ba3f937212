use serde::{Deserialize, Serialize};

use crate::frame::Frame;

/// Frame-targeted operations accept either the current frame or an absolute
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameTarget {
    Current,
    Index(usize),
}

/// The ordered sequence of frames and the index of the active one.
///
/// Never empty: deleting the last remaining frame clears it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    frames: Vec<Frame>,
    current_index: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
            current_index: 0,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_frame(&self) -> &Frame {
        &self.frames[self.current_index]
    }

    pub fn current_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.current_index]
    }

    /// The frame before the current one, for onion-skin previews.
    pub fn previous_frame(&self) -> Option<&Frame> {
        self.current_index
            .checked_sub(1)
            .map(|i| &self.frames[i])
    }

    /// Append a new empty frame at the end and make it current.
    pub fn add_frame(&mut self) {
        self.frames.push(Frame::new());
        self.current_index = self.frames.len() - 1;
    }

    /// Duplicate the current frame's committed strokes into a new frame
    /// inserted right after it. The copy gets a fresh history and becomes
    /// current.
    pub fn copy_current_frame(&mut self) {
        let copy = self.current_frame().duplicate();
        self.frames.insert(self.current_index + 1, copy);
        self.current_index += 1;
    }

    /// Delete the targeted frame. On a singleton timeline the frame is
    /// replaced with an empty one instead of removed. Out-of-bounds targets
    /// are a no-op. The current index clamps to the nearest neighbor.
    pub fn delete_frame(&mut self, target: FrameTarget) {
        let index = match target {
            FrameTarget::Current => self.current_index,
            FrameTarget::Index(i) => i,
        };
        if index >= self.frames.len() {
            return;
        }

        if self.frames.len() == 1 {
            self.frames[0] = Frame::new();
            self.current_index = 0;
            return;
        }

        self.frames.remove(index);
        if index < self.current_index {
            self.current_index -= 1;
        } else if self.current_index >= self.frames.len() {
            self.current_index = self.frames.len() - 1;
        }
    }

    /// Reset to a single empty frame.
    pub fn delete_all(&mut self) {
        self.frames = vec![Frame::new()];
        self.current_index = 0;
    }

    /// Make the frame at `index` current. Out-of-bounds is a no-op.
    pub fn select_frame(&mut self, index: usize) {
        if index < self.frames.len() {
            self.current_index = index;
        }
    }

    /// Append `count` empty frames. Count validation happens at the boundary.
    pub fn generate_dummy_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frames.push(Frame::new());
        }
    }
}
