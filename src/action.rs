use egui::{Color32, Pos2, Vec2};
use std::path::PathBuf;

use crate::shapes::Shape;
use crate::timeline::FrameTarget;
use crate::transform::ViewTransform;

/// The closed set of actions the engine accepts. Every variant has a defined
/// transition in the reducer; some exist only to trigger follow-up actions in
/// the effect phase and reduce to identity.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    // Drawing session
    DrawStart { offset: Pos2 },
    /// Relative pointer delta. The effect phase converts it to an absolute
    /// offset via the frame's last pointer position and emits `UpdateOffset`;
    /// deltas with no prior position are discarded.
    DrawDrag { delta: Vec2 },
    /// Absolute offset, emitted by the effect phase for `DrawDrag`.
    UpdateOffset { offset: Pos2 },
    DrawFinish,
    DrawCancel,

    // Tools
    PencilClick,
    EraseClick,
    TransformClick,

    // Color and pickers
    OnColorClick,
    OnColorChanged(Color32),
    OnColorItemClicked(Color32),
    CustomColorClick,
    ShowColorPicker,
    HideColorPicker,
    ShowBrushSizePicker,
    HideBrushSizePicker,
    ChangeBrushSize(f32),
    OpenShapes,
    SelectShape(Shape),
    /// A precomputed closed path committed directly as a stroke.
    DrawPath { points: Vec<Pos2> },

    // History
    UndoChange,
    RedoChange,

    // Frames
    AddNewFrame,
    CopyFrame,
    DeleteFrame(FrameTarget),
    DeleteAllFrames,
    ShowFrames,
    HideFrames,
    SelectFrame(usize),
    /// Frame switch during playback; never touches frame content or history.
    ChangeCurrentFrame(usize),
    GenerateDummyFrames { count: i64 },

    // Playback
    StartAnimation,
    StopAnimation,
    AnimationDelayChange(f32),

    // Transforms
    /// Pinch/rotate gesture increment applied to the in-progress stroke.
    TransformGesture {
        centroid: Pos2,
        pan: Vec2,
        zoom: f32,
        rotation_deg: f32,
    },
    /// Viewport gesture increment (whole-canvas view, clamped zoom).
    CanvasTransform {
        pan: Vec2,
        zoom: f32,
        rotation_deg: f32,
    },
    ResetViewTransform,
    /// Tween step emitted while resetting the view.
    SetViewTransform(ViewTransform),

    // Export
    ExportToGif,
    ExportFinished,
}

/// One-shot events, delivered on a channel separate from state so they fire
/// exactly once and are never replayed to late subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasEvent {
    GifExported(PathBuf),
    GifExportFailed,
    DummyFramesRejected,
}
