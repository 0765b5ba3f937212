//! The pure reduce phase: `(state, action) -> state`.
//!
//! Total over every action variant. Precondition failures (undo at the
//! bound, drag without an active stroke, delete of the last frame) normalize
//! to safe transitions rather than errors; actions that only exist to drive
//! the effect phase reduce to identity.

use egui::Color32;

use crate::action::CanvasAction;
use crate::config::DrawMode;
use crate::state::CanvasState;
use crate::stroke::PathProperties;
use crate::transform::gesture_matrix;

pub fn reduce(mut state: CanvasState, action: &CanvasAction) -> CanvasState {
    match action {
        CanvasAction::DrawStart { offset } => {
            if state.config.is_playing || state.config.mode == DrawMode::Transform {
                return state;
            }
            let erase = state.config.mode == DrawMode::Erase;
            let properties = PathProperties {
                color: if erase {
                    Color32::TRANSPARENT
                } else {
                    state.config.color
                },
                brush_size: state.config.brush_size,
                erase_mode: erase,
            };
            state
                .timeline
                .current_frame_mut()
                .start_stroke(*offset, properties);
            state
        }

        // Effect-only: the drag delta becomes an UpdateOffset follow-up.
        CanvasAction::DrawDrag { .. } => state,

        CanvasAction::UpdateOffset { offset } => {
            if state.config.is_playing {
                return state;
            }
            state.timeline.current_frame_mut().extend_stroke(*offset);
            state
        }

        CanvasAction::DrawFinish => {
            if state.config.is_playing {
                return state;
            }
            state.timeline.current_frame_mut().commit_stroke();
            state
        }

        CanvasAction::DrawCancel => {
            state.timeline.current_frame_mut().cancel_stroke();
            state
        }

        CanvasAction::PencilClick => {
            if !state.config.is_playing {
                state.config.mode = DrawMode::Pencil;
            }
            state
        }

        CanvasAction::EraseClick => {
            if !state.config.is_playing {
                state.config.mode = DrawMode::Erase;
            }
            state
        }

        CanvasAction::TransformClick => {
            if !state.config.is_playing {
                state.config.mode = DrawMode::Transform;
            }
            state
        }

        CanvasAction::OnColorClick => {
            if state.config.color_picker_visible {
                state.config.hide_pickers();
            } else {
                state.config.open_color_picker();
            }
            state
        }

        CanvasAction::OnColorChanged(color) => {
            state.config.color = *color;
            state
        }

        CanvasAction::OnColorItemClicked(color) => {
            state.config.color = *color;
            state
        }

        CanvasAction::CustomColorClick => {
            state.config.color_picker_expanded = !state.config.color_picker_expanded;
            state
        }

        CanvasAction::ShowColorPicker => {
            state.config.open_color_picker();
            state
        }

        CanvasAction::HideColorPicker | CanvasAction::HideBrushSizePicker => {
            state.config.hide_pickers();
            state
        }

        CanvasAction::ShowBrushSizePicker => {
            if state.config.brush_picker_visible {
                state.config.hide_pickers();
            } else {
                state.config.open_brush_picker();
            }
            state
        }

        CanvasAction::ChangeBrushSize(size) => {
            state.config.brush_size = *size;
            state
        }

        CanvasAction::OpenShapes => {
            if state.config.shapes_picker_visible {
                state.config.hide_pickers();
            } else {
                state.config.open_shapes_picker();
            }
            state
        }

        // Effect-only: expands into DrawPath.
        CanvasAction::SelectShape(_) => state,

        CanvasAction::DrawPath { points } => {
            if state.config.is_playing {
                return state;
            }
            let properties = PathProperties {
                color: state.config.color,
                brush_size: state.config.brush_size,
                erase_mode: false,
            };
            state
                .timeline
                .current_frame_mut()
                .append_shape(points.clone(), properties);
            state
        }

        CanvasAction::UndoChange => {
            state.timeline.current_frame_mut().undo();
            state
        }

        CanvasAction::RedoChange => {
            state.timeline.current_frame_mut().redo();
            state
        }

        CanvasAction::AddNewFrame => {
            state.timeline.add_frame();
            state
        }

        CanvasAction::CopyFrame => {
            state.timeline.copy_current_frame();
            state
        }

        CanvasAction::DeleteFrame(target) => {
            state.timeline.delete_frame(*target);
            state
        }

        CanvasAction::DeleteAllFrames => {
            state.timeline.delete_all();
            state
        }

        CanvasAction::ShowFrames => {
            state.frames_sheet_visible = true;
            state
        }

        CanvasAction::HideFrames => {
            state.frames_sheet_visible = false;
            state
        }

        CanvasAction::SelectFrame(index) => {
            state.timeline.select_frame(*index);
            state.frames_sheet_visible = false;
            state
        }

        CanvasAction::ChangeCurrentFrame(index) => {
            // Playback-only: a tick that was already in flight when playback
            // stopped must not move the index off the last frame.
            if state.config.is_playing {
                state.timeline.select_frame(*index);
            }
            state
        }

        CanvasAction::GenerateDummyFrames { count } => {
            // Rejection (count <= 0) is reported by the effect phase.
            if *count > 0 {
                state.timeline.generate_dummy_frames(*count as usize);
            }
            state
        }

        CanvasAction::StartAnimation => {
            if !state.config.is_playing {
                state.config.is_playing = true;
                state.config.hide_pickers();
            }
            state
        }

        CanvasAction::StopAnimation => {
            state.config.is_playing = false;
            // Resume editing on the last frame, not wherever the loop was.
            state.timeline.select_frame(state.timeline.len() - 1);
            state
        }

        CanvasAction::AnimationDelayChange(delay_ms) => {
            state.config.set_playback_delay(delay_ms.round() as u64);
            state
        }

        CanvasAction::TransformGesture {
            centroid,
            pan,
            zoom,
            rotation_deg,
        } => {
            if state.config.is_playing {
                return state;
            }
            let matrix = gesture_matrix(*centroid, *pan, *zoom, *rotation_deg);
            if let Some(stroke) = state.timeline.current_frame_mut().in_progress_mut() {
                stroke.apply_transform(&matrix);
            }
            state
        }

        CanvasAction::CanvasTransform {
            pan,
            zoom,
            rotation_deg,
        } => {
            if state.config.is_playing {
                return state;
            }
            state.view.apply_gesture(*pan, *zoom, *rotation_deg);
            state
        }

        // Effect-only: the reset tween emits SetViewTransform steps.
        CanvasAction::ResetViewTransform => state,

        CanvasAction::SetViewTransform(view) => {
            state.view = *view;
            state
        }

        CanvasAction::ExportToGif => {
            state.export_in_progress = true;
            state
        }

        CanvasAction::ExportFinished => {
            state.export_in_progress = false;
            state
        }
    }
}
