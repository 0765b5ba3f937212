//! The canvas engine: a single worker thread owns the state and processes
//! actions one at a time in submission order. Each action goes through the
//! effect phase (validation, follow-up emission, background work) and then
//! the pure reducer. Observers read the latest published state; one-shot
//! events travel on their own channel.

mod effects;
pub mod reducer;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::action::{CanvasAction, CanvasEvent};
use crate::export::GifExporter;
use crate::state::CanvasState;

use effects::EffectContext;

/// How often the worker wakes to check for shutdown while idle.
const IDLE_POLL: Duration = Duration::from_millis(25);

pub struct CanvasEngine {
    actions: Sender<CanvasAction>,
    state: Arc<Mutex<CanvasState>>,
    events: Receiver<CanvasEvent>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasEngine {
    pub fn new() -> Self {
        Self::with_exporter(None)
    }

    /// Build an engine wired to an export collaborator. Export requests run
    /// on a background thread and report back via the event channel.
    pub fn with_exporter(exporter: Option<Arc<dyn GifExporter>>) -> Self {
        let (actions_tx, actions_rx) = mpsc::channel();
        let (events_tx, events_rx) = mpsc::channel();
        let state = Arc::new(Mutex::new(CanvasState::new()));
        let running = Arc::new(AtomicBool::new(true));

        let worker = Worker {
            state: Arc::clone(&state),
            rx: actions_rx,
            actions: actions_tx.clone(),
            events: events_tx,
            exporter,
            running: Arc::clone(&running),
            playback_epoch: Arc::new(AtomicU64::new(0)),
        };
        let handle = thread::Builder::new()
            .name("flipbook-engine".into())
            .spawn(move || worker.run())
            .expect("failed to spawn engine worker");

        Self {
            actions: actions_tx,
            state,
            events: events_rx,
            running,
            worker: Some(handle),
        }
    }

    /// Submit an action. Fire-and-forget; ordering is preserved.
    pub fn dispatch(&self, action: CanvasAction) {
        if self.actions.send(action).is_err() {
            log::warn!("dispatch after engine shutdown");
        }
    }

    /// The latest published state.
    pub fn snapshot(&self) -> CanvasState {
        self.state.lock().clone()
    }

    /// Take the next pending one-shot event, if any. Events are delivered
    /// exactly once and never replayed.
    pub fn poll_event(&self) -> Option<CanvasEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for CanvasEngine {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

struct Worker {
    state: Arc<Mutex<CanvasState>>,
    rx: Receiver<CanvasAction>,
    actions: Sender<CanvasAction>,
    events: Sender<CanvasEvent>,
    exporter: Option<Arc<dyn GifExporter>>,
    running: Arc<AtomicBool>,
    /// Bumped on every playback start; a ticker exits when the epoch moves
    /// on, so a stop/start pair can never leave two tickers alive.
    playback_epoch: Arc<AtomicU64>,
}

impl Worker {
    fn run(mut self) {
        let mut stash: Option<CanvasAction> = None;
        while self.running.load(Ordering::SeqCst) {
            let action = match stash.take() {
                Some(action) => action,
                None => match self.rx.recv_timeout(IDLE_POLL) {
                    Ok(action) => action,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                },
            };

            // Pointer deltas arrive faster than they are worth reducing
            // individually: merge consecutive drags, never reorder across
            // other actions.
            let action = match action {
                CanvasAction::DrawDrag { mut delta } => {
                    while let Ok(next) = self.rx.try_recv() {
                        match next {
                            CanvasAction::DrawDrag { delta: d } => delta += d,
                            other => {
                                stash = Some(other);
                                break;
                            }
                        }
                    }
                    CanvasAction::DrawDrag { delta }
                }
                other => other,
            };

            self.process(action);
        }
    }

    fn process(&mut self, action: CanvasAction) {
        let snapshot = self.state.lock().clone();

        let mut ctx = EffectContext {
            follow_ups: Vec::new(),
            actions: self.actions.clone(),
            events: self.events.clone(),
            exporter: self.exporter.clone(),
        };
        effects::process(&snapshot, &action, &mut ctx);

        // Follow-ups run through the full pipeline before the triggering
        // action is reduced ("hide the picker, then let the mode change
        // proceed").
        for follow_up in ctx.follow_ups {
            self.process(follow_up);
        }

        let was_playing = self.state.lock().config.is_playing;
        let new_state = reducer::reduce(self.state.lock().clone(), &action);
        *self.state.lock() = new_state;

        // The ticker launches only after the is_playing transition is
        // published, so it always observes the flag it runs under.
        if matches!(action, CanvasAction::StartAnimation) {
            let now_playing = self.state.lock().config.is_playing;
            if !was_playing && now_playing {
                self.spawn_ticker();
            }
        }
    }

    /// The playback loop: cycle the current frame index from 0, waiting the
    /// configured delay between steps. Cancellation is cooperative: the flag
    /// and epoch are checked at the top of each iteration, so stopping takes
    /// effect within one interval. The loop never touches strokes or history.
    fn spawn_ticker(&self) {
        let epoch = self.playback_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let epochs = Arc::clone(&self.playback_epoch);
        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);
        let actions = self.actions.clone();

        thread::spawn(move || {
            let mut index = 0usize;
            loop {
                if !running.load(Ordering::SeqCst) || epochs.load(Ordering::SeqCst) != epoch {
                    break;
                }
                let (playing, delay_ms, frame_count) = {
                    let state = state.lock();
                    (
                        state.config.is_playing,
                        state.config.playback_delay_ms,
                        state.timeline.len(),
                    )
                };
                if !playing {
                    break;
                }
                if actions
                    .send(CanvasAction::ChangeCurrentFrame(index))
                    .is_err()
                {
                    break;
                }
                thread::sleep(Duration::from_millis(delay_ms));
                index = (index + 1) % frame_count.max(1);
            }
            log::debug!("playback ticker stopped");
        });
    }
}
