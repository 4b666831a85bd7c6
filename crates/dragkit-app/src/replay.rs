//! Replays a recorded gesture script against a draggable.
//!
//! A script is a list of timed steps (pointer events, layout reports and
//! waits). Between steps the draggable is ticked at a fixed frame rate, like
//! a host animation scheduler would.

use dragkit_core::{
    DragCallbacks, Draggable, DraggableConfig, PointerEvent, TouchEvent, TrackerState,
};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

/// Default frame interval in milliseconds (~60fps).
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Latest step time a script may use (one hour).
pub const MAX_SCRIPT_MS: u64 = 60 * 60 * 1000;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Config error: {0}")]
    Config(#[from] dragkit_core::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Step {index} at {at_ms}ms is earlier than the previous step at {previous_ms}ms")]
    OutOfOrder {
        index: usize,
        at_ms: u64,
        previous_ms: u64,
    },
    #[error("Step {index} at {at_ms}ms is past the {max_ms}ms script limit")]
    TooLate { index: usize, at_ms: u64, max_ms: u64 },
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Down { x: f64, y: f64, at_ms: u64 },
    Move { x: f64, y: f64, at_ms: u64 },
    Up { x: f64, y: f64, at_ms: u64 },
    Cancel { x: f64, y: f64, at_ms: u64 },
    /// Host layout reported a measured size.
    Layout { width: f64, height: f64, at_ms: u64 },
    /// Keep ticking frames until the given time.
    Wait { at_ms: u64 },
}

impl Step {
    /// When the step happens.
    pub fn at_ms(&self) -> u64 {
        match *self {
            Self::Down { at_ms, .. }
            | Self::Move { at_ms, .. }
            | Self::Up { at_ms, .. }
            | Self::Cancel { at_ms, .. }
            | Self::Layout { at_ms, .. }
            | Self::Wait { at_ms } => at_ms,
        }
    }

    fn pointer_event(&self) -> Option<PointerEvent> {
        let touch = |x: f64, y: f64, at_ms: u64| {
            TouchEvent::new(Point::new(x, y), Duration::from_millis(at_ms))
        };
        match *self {
            Self::Down { x, y, at_ms } => Some(PointerEvent::Down(touch(x, y, at_ms))),
            Self::Move { x, y, at_ms } => Some(PointerEvent::Move(touch(x, y, at_ms))),
            Self::Up { x, y, at_ms } => Some(PointerEvent::Up(touch(x, y, at_ms))),
            Self::Cancel { x, y, at_ms } => Some(PointerEvent::Cancel(touch(x, y, at_ms))),
            Self::Layout { .. } | Self::Wait { .. } => None,
        }
    }
}

/// A gesture script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    pub steps: Vec<Step>,
}

fn default_frame_ms() -> u64 {
    DEFAULT_FRAME_MS
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script file.
    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Position sample after a step or frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub at_ms: u64,
    pub position: Vec2,
    pub state: String,
}

/// A fired callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallbackRecord {
    pub at_ms: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Vec2>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    pub samples: Vec<Sample>,
    pub callbacks: Vec<CallbackRecord>,
    pub final_position: Vec2,
}

type Records = Rc<RefCell<Vec<CallbackRecord>>>;

fn record(records: &Records, event: &TouchEvent, name: &str, delta: Option<Vec2>) {
    records.borrow_mut().push(CallbackRecord {
        at_ms: event.timestamp.as_millis() as u64,
        name: name.to_string(),
        delta,
    });
}

fn recording_callbacks(records: &Records) -> DragCallbacks {
    let r = |records: &Records| records.clone();
    let (start, drag, drag_release, release) = (r(records), r(records), r(records), r(records));
    let (short, long, press_in, press_out) = (r(records), r(records), r(records), r(records));

    DragCallbacks::new()
        .on_drag_start(move |e, _| record(&start, e, "drag_start", None))
        .on_drag(move |e, g| record(&drag, e, "drag", Some(g.delta)))
        .on_drag_release(move |e, g| record(&drag_release, e, "drag_release", Some(g.delta)))
        .on_release(move |e, dragged| {
            let name = if dragged { "release_after_drag" } else { "release" };
            record(&release, e, name, None)
        })
        .on_short_press_release(move |e| record(&short, e, "short_press_release", None))
        .on_long_press(move |e| record(&long, e, "long_press", None))
        .on_press_in(move |e| record(&press_in, e, "press_in", None))
        .on_press_out(move |e| record(&press_out, e, "press_out", None))
}

fn state_name(state: TrackerState) -> String {
    match state {
        TrackerState::Idle => "idle",
        TrackerState::Dragging => "dragging",
        TrackerState::Reversing => "reversing",
    }
    .to_string()
}

/// Run `script` against a fresh draggable built from `config`.
pub fn run(config: DraggableConfig, script: &Script) -> ReplayResult<Trace> {
    let records: Records = Default::default();
    let mut draggable = Draggable::new(config).with_callbacks(recording_callbacks(&records));
    let frame = script.frame_ms.max(1);

    let mut trace = Trace::default();
    let mut now = 0u64;

    let sample = |draggable: &Draggable, at_ms: u64| Sample {
        at_ms,
        position: draggable.position(),
        state: state_name(draggable.state()),
    };

    for (index, step) in script.steps.iter().enumerate() {
        let at_ms = step.at_ms();
        if at_ms > MAX_SCRIPT_MS {
            return Err(ReplayError::TooLate {
                index,
                at_ms,
                max_ms: MAX_SCRIPT_MS,
            });
        }
        if at_ms < now {
            return Err(ReplayError::OutOfOrder {
                index,
                at_ms,
                previous_ms: now,
            });
        }

        // Frames between the previous step and this one
        while let Some(next) = now.checked_add(frame).filter(|&next| next <= at_ms) {
            now = next;
            let animating = draggable.tick(Duration::from_millis(now));
            if animating {
                trace.samples.push(sample(&draggable, now));
            }
        }
        now = at_ms;

        if let Some(event) = step.pointer_event() {
            if !draggable.handle_pointer_event(&event) {
                log::debug!("Step {} not consumed: {:?}", index, step);
            }
        } else if let Step::Layout { width, height, .. } = *step {
            draggable.on_layout(Size::new(width, height));
        }
        draggable.tick(Duration::from_millis(now));
        trace.samples.push(sample(&draggable, now));
    }

    trace.final_position = draggable.position();
    trace.callbacks = records.take();
    log::info!(
        "Replayed {} steps, final position {:?}",
        script.steps.len(),
        trace.final_position
    );
    Ok(trace)
}
