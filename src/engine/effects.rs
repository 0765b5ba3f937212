//! The effect phase: runs before reduction, against a consistent snapshot of
//! the current state. Effects validate input, enrich actions with derived
//! follow-ups, and hand long-running work (export, the view-reset tween) to
//! background threads that feed results back through the action channel.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::action::{CanvasAction, CanvasEvent};
use crate::config::DrawMode;
use crate::export::GifExporter;
use crate::state::CanvasState;
use crate::transform::ViewTransform;

/// Duration and step count of the view-reset tween.
const RESET_TWEEN_MS: u64 = 150;
const RESET_TWEEN_STEPS: u32 = 10;

pub(crate) struct EffectContext {
    /// Actions to process (through the full pipeline) before the triggering
    /// action is reduced.
    pub follow_ups: Vec<CanvasAction>,
    pub actions: Sender<CanvasAction>,
    pub events: Sender<CanvasEvent>,
    pub exporter: Option<Arc<dyn GifExporter>>,
}

pub(crate) fn process(state: &CanvasState, action: &CanvasAction, ctx: &mut EffectContext) {
    match action {
        CanvasAction::DrawDrag { delta } => {
            if state.config.is_playing || state.config.mode == DrawMode::Transform {
                return;
            }
            // Relative-to-absolute conversion. A delta with no prior
            // position is discarded.
            if let Some(last) = state.current_frame().last_offset() {
                ctx.follow_ups.push(CanvasAction::UpdateOffset {
                    offset: last + *delta,
                });
            }
        }

        // Picking up a drawing tool or a palette color dismisses the picker
        // before the action's own transition runs.
        CanvasAction::DrawStart { .. }
        | CanvasAction::PencilClick
        | CanvasAction::EraseClick
        | CanvasAction::OnColorItemClicked(_) => {
            ctx.follow_ups.push(CanvasAction::HideColorPicker);
        }

        CanvasAction::SelectShape(shape) => {
            ctx.follow_ups.push(CanvasAction::DrawPath {
                points: shape.path(),
            });
        }

        CanvasAction::GenerateDummyFrames { count } => {
            if *count <= 0 {
                log::warn!("rejected dummy frame generation: count = {count}");
                let _ = ctx.events.send(CanvasEvent::DummyFramesRejected);
            }
        }

        CanvasAction::ResetViewTransform => {
            spawn_reset_tween(state.view, ctx.actions.clone());
        }

        CanvasAction::ExportToGif => {
            if state.export_in_progress {
                log::debug!("export already in progress, ignoring");
                return;
            }
            spawn_export(state, ctx);
        }

        _ => {}
    }
}

/// Tween the viewport back to identity by emitting interpolated
/// `SetViewTransform` steps; the final step lands exactly on identity.
fn spawn_reset_tween(from: ViewTransform, actions: Sender<CanvasAction>) {
    if from.is_identity() {
        return;
    }
    thread::spawn(move || {
        let step = Duration::from_millis(RESET_TWEEN_MS / u64::from(RESET_TWEEN_STEPS));
        for i in 1..=RESET_TWEEN_STEPS {
            thread::sleep(step);
            let view = if i == RESET_TWEEN_STEPS {
                ViewTransform::IDENTITY
            } else {
                let t = i as f32 / RESET_TWEEN_STEPS as f32;
                from.lerp(ViewTransform::IDENTITY, t)
            };
            if actions.send(CanvasAction::SetViewTransform(view)).is_err() {
                return;
            }
        }
    });
}

/// Run the export collaborator on a background thread. Success and failure
/// both surface as one-shot events; the engine's own transition (clearing the
/// in-progress flag) always succeeds via `ExportFinished`.
fn spawn_export(state: &CanvasState, ctx: &EffectContext) {
    let frames = state.timeline.frames().to_vec();
    let delay_ms = state.config.playback_delay_ms;
    let exporter = ctx.exporter.clone();
    let actions = ctx.actions.clone();
    let events = ctx.events.clone();

    thread::spawn(move || {
        let result = match exporter {
            Some(exporter) => exporter.export(&frames, delay_ms),
            None => Err(crate::export::ExportError::NoExporter),
        };
        match result {
            Ok(path) => {
                log::info!("exported {} frames to {}", frames.len(), path.display());
                let _ = events.send(CanvasEvent::GifExported(path));
            }
            Err(err) => {
                log::warn!("gif export failed: {err}");
                let _ = events.send(CanvasEvent::GifExportFailed);
            }
        }
        let _ = actions.send(CanvasAction::ExportFinished);
    });
}
