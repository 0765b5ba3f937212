//! End-to-end tests over the engine worker: dispatch is fire-and-forget, so
//! these poll the published state with a generous timeout.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use egui::{pos2, Vec2};
use flipbook::{
    CanvasAction, CanvasEngine, CanvasEvent, CanvasState, ExportError, Frame, GifExporter, Shape,
};

const TIMEOUT: Duration = Duration::from_secs(2);

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn wait_until(engine: &CanvasEngine, pred: impl Fn(&CanvasState) -> bool) -> CanvasState {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        let state = engine.snapshot();
        if pred(&state) {
            return state;
        }
        if Instant::now() > deadline {
            panic!("timed out waiting for state condition");
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn wait_for_event(engine: &CanvasEngine) -> CanvasEvent {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        if let Some(event) = engine.poll_event() {
            return event;
        }
        if Instant::now() > deadline {
            panic!("timed out waiting for event");
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn draw_session_over_the_dispatch_channel() {
    init_logs();
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::DrawStart {
        offset: pos2(10.0, 10.0),
    });
    engine.dispatch(CanvasAction::DrawDrag {
        delta: Vec2::new(5.0, 0.0),
    });
    engine.dispatch(CanvasAction::DrawFinish);

    let state = wait_until(&engine, |s| s.current_frame().strokes().len() == 1);
    let stroke = &state.current_frame().strokes()[0];
    assert_eq!(stroke.points()[0], pos2(10.0, 10.0));
    // The drag delta was made absolute against the start position. Bursts of
    // deltas may coalesce, but the end point is exact either way.
    assert_eq!(*stroke.points().last().unwrap(), pos2(15.0, 10.0));
    assert!(state.current_frame().in_progress().is_none());
}

#[test]
fn drag_before_any_start_is_discarded() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::DrawDrag {
        delta: Vec2::new(5.0, 5.0),
    });
    // Use an unrelated action as a fence so the drag has been processed.
    engine.dispatch(CanvasAction::ShowFrames);
    let state = wait_until(&engine, |s| s.frames_sheet_visible);
    assert!(state.current_frame().strokes().is_empty());
    assert!(state.current_frame().in_progress().is_none());
}

#[test]
fn draw_start_hides_the_color_picker_first() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::ShowColorPicker);
    engine.dispatch(CanvasAction::DrawStart {
        offset: pos2(0.0, 0.0),
    });
    let state = wait_until(&engine, |s| s.current_frame().in_progress().is_some());
    assert!(!state.config.color_picker_visible);
}

#[test]
fn select_shape_commits_the_canonical_square() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::SelectShape(Shape::Square));
    let state = wait_until(&engine, |s| s.current_frame().strokes().len() == 1);
    assert_eq!(
        state.current_frame().strokes()[0].points(),
        &Shape::Square.path()[..]
    );
    assert_eq!(state.current_frame().history_len(), 2);
}

#[test]
fn playback_cycles_frames_and_stop_lands_on_the_last() {
    init_logs();
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::DrawPath {
        points: vec![pos2(1.0, 1.0), pos2(2.0, 2.0)],
    });
    engine.dispatch(CanvasAction::AddNewFrame);
    engine.dispatch(CanvasAction::AddNewFrame);
    engine.dispatch(CanvasAction::AnimationDelayChange(20.0));
    let before = wait_until(&engine, |s| s.timeline.len() == 3);
    let frame_zero = before.timeline.frames()[0].clone();

    engine.dispatch(CanvasAction::StartAnimation);
    // The loop enters at frame 0 and advances from there.
    wait_until(&engine, |s| {
        s.config.is_playing && s.timeline.current_index() == 0
    });
    wait_until(&engine, |s| s.timeline.current_index() == 1);

    engine.dispatch(CanvasAction::StopAnimation);
    let stopped = wait_until(&engine, |s| !s.config.is_playing);
    assert_eq!(stopped.timeline.current_index(), 2);

    // Halted within one interval; no further advancement.
    std::thread::sleep(Duration::from_millis(100));
    let settled = engine.snapshot();
    assert_eq!(settled.timeline.current_index(), 2);

    // Playback only moved the current-frame pointer.
    assert_eq!(settled.timeline.frames()[0], frame_zero);
}

#[test]
fn restarting_playback_keeps_a_single_ticker() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::AddNewFrame);
    engine.dispatch(CanvasAction::AnimationDelayChange(20.0));
    engine.dispatch(CanvasAction::StartAnimation);
    engine.dispatch(CanvasAction::StopAnimation);
    engine.dispatch(CanvasAction::StartAnimation);
    wait_until(&engine, |s| s.config.is_playing);

    engine.dispatch(CanvasAction::StopAnimation);
    let state = wait_until(&engine, |s| !s.config.is_playing);
    assert_eq!(state.timeline.current_index(), 1);

    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(engine.snapshot().timeline.current_index(), 1);
}

#[test]
fn invalid_dummy_count_is_rejected_with_an_event() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::GenerateDummyFrames { count: 0 });
    assert_eq!(wait_for_event(&engine), CanvasEvent::DummyFramesRejected);
    assert_eq!(engine.snapshot().timeline.len(), 1);
}

#[test]
fn valid_dummy_count_appends_frames() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::GenerateDummyFrames { count: 4 });
    let state = wait_until(&engine, |s| s.timeline.len() == 5);
    assert!(engine.poll_event().is_none());
    assert_eq!(state.timeline.current_index(), 0);
}

struct StubExporter {
    result: Result<PathBuf, ()>,
}

impl GifExporter for StubExporter {
    fn export(&self, frames: &[Frame], delay_ms: u64) -> Result<PathBuf, ExportError> {
        assert!(!frames.is_empty());
        assert!(delay_ms >= 20);
        self.result
            .clone()
            .map_err(|()| ExportError::Encode("stub failure".into()))
    }
}

#[test]
fn export_success_emits_event_and_clears_the_flag() {
    let exporter = Arc::new(StubExporter {
        result: Ok(PathBuf::from("/tmp/out.gif")),
    });
    let engine = CanvasEngine::with_exporter(Some(exporter));
    engine.dispatch(CanvasAction::ExportToGif);

    assert_eq!(
        wait_for_event(&engine),
        CanvasEvent::GifExported(PathBuf::from("/tmp/out.gif"))
    );
    let state = wait_until(&engine, |s| !s.export_in_progress);
    assert!(!state.export_in_progress);
}

#[test]
fn export_failure_is_reported_once_and_state_recovers() {
    let engine = CanvasEngine::with_exporter(Some(Arc::new(StubExporter { result: Err(()) })));
    engine.dispatch(CanvasAction::ExportToGif);

    assert_eq!(wait_for_event(&engine), CanvasEvent::GifExportFailed);
    wait_until(&engine, |s| !s.export_in_progress);
    assert!(engine.poll_event().is_none());
}

#[test]
fn export_without_a_collaborator_fails_gracefully() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::ExportToGif);
    assert_eq!(wait_for_event(&engine), CanvasEvent::GifExportFailed);
    wait_until(&engine, |s| !s.export_in_progress);
}

#[test]
fn view_reset_tweens_back_to_identity() {
    let engine = CanvasEngine::new();
    engine.dispatch(CanvasAction::CanvasTransform {
        pan: Vec2::new(40.0, 0.0),
        zoom: 2.0,
        rotation_deg: 10.0,
    });
    wait_until(&engine, |s| s.view.zoom > 1.9);

    engine.dispatch(CanvasAction::ResetViewTransform);
    let state = wait_until(&engine, |s| s.view.is_identity());
    assert_eq!(state.view.zoom, 1.0);
    assert_eq!(state.view.pan, Vec2::ZERO);
}
