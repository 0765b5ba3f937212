use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

/// Playback delay bounds in milliseconds.
pub const MIN_PLAYBACK_DELAY_MS: u64 = 20;
pub const MAX_PLAYBACK_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    Pencil,
    Erase,
    Transform,
}

/// Editor configuration: active tool, stroke defaults, picker visibility and
/// playback settings. Pure data, mutated only by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub mode: DrawMode,
    pub color: Color32,
    pub brush_size: f32,
    pub color_picker_visible: bool,
    pub color_picker_expanded: bool,
    pub brush_picker_visible: bool,
    pub shapes_picker_visible: bool,
    pub is_playing: bool,
    pub playback_delay_ms: u64,
    pub canvas_size: Vec2,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mode: DrawMode::Pencil,
            color: Color32::BLUE,
            brush_size: 4.0,
            color_picker_visible: false,
            color_picker_expanded: false,
            brush_picker_visible: false,
            shapes_picker_visible: false,
            is_playing: false,
            playback_delay_ms: 200,
            canvas_size: Vec2::new(1080.0, 1920.0),
        }
    }
}

impl EditorConfig {
    pub fn hide_pickers(&mut self) {
        self.color_picker_visible = false;
        self.color_picker_expanded = false;
        self.brush_picker_visible = false;
        self.shapes_picker_visible = false;
    }

    // At most one picker is visible at a time: opening one closes the rest.
    pub fn open_color_picker(&mut self) {
        self.hide_pickers();
        self.color_picker_visible = true;
    }

    pub fn open_brush_picker(&mut self) {
        self.hide_pickers();
        self.brush_picker_visible = true;
    }

    pub fn open_shapes_picker(&mut self) {
        self.hide_pickers();
        self.shapes_picker_visible = true;
    }

    pub fn set_playback_delay(&mut self, delay_ms: u64) {
        self.playback_delay_ms = delay_ms.clamp(MIN_PLAYBACK_DELAY_MS, MAX_PLAYBACK_DELAY_MS);
    }
}
