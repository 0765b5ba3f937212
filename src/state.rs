use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::frame::Frame;
use crate::timeline::Timeline;
use crate::transform::ViewTransform;

/// The single state value owned by the engine and published to observers.
/// Rendering and control surfaces read it; only the reducer writes it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasState {
    pub timeline: Timeline,
    pub config: EditorConfig,
    pub view: ViewTransform,
    pub frames_sheet_visible: bool,
    pub export_in_progress: bool,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_frame(&self) -> &Frame {
        self.timeline.current_frame()
    }

    /// The frame before the current one, for onion-skin previews.
    pub fn previous_frame(&self) -> Option<&Frame> {
        self.timeline.previous_frame()
    }
}
