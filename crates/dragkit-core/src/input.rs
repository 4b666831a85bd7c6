//! Pointer/touch input and single-touch gesture recognition.
//!
//! The host feeds raw [`PointerEvent`]s into a [`GestureRecognizer`], which
//! accumulates a [`GestureState`] for the touch and asks a
//! [`GestureResponder`] whether it wants to take over the touch as a drag.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single touch sample as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Identifies the finger/pointer across a touch sequence.
    pub pointer_id: u64,
    /// Position in absolute screen coordinates.
    pub position: Point,
    /// Host timestamp of the sample.
    pub timestamp: Duration,
}

impl TouchEvent {
    /// Create a touch sample for the primary pointer.
    pub fn new(position: Point, timestamp: Duration) -> Self {
        Self {
            pointer_id: 0,
            position,
            timestamp,
        }
    }

    /// Set the pointer id.
    pub fn with_pointer_id(mut self, pointer_id: u64) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(TouchEvent),
    Move(TouchEvent),
    Up(TouchEvent),
    /// The host took the touch away (e.g. a parent scroll view claimed it).
    Cancel(TouchEvent),
}

impl PointerEvent {
    /// The touch sample carried by this event.
    pub fn touch(&self) -> &TouchEvent {
        match self {
            Self::Down(t) | Self::Move(t) | Self::Up(t) | Self::Cancel(t) => t,
        }
    }
}

/// Accumulated state of the current touch, measured from touch-down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    /// Where the touch went down.
    pub start: Point,
    /// Latest pointer position.
    pub current: Point,
    /// Cumulative movement since touch-down.
    pub delta: Vec2,
    /// Latest velocity in units per second.
    pub velocity: Vec2,
    /// Number of touches the recognizer is tracking (0 or 1).
    pub active_touches: usize,
}

impl GestureState {
    /// Horizontal movement since touch-down.
    pub fn dx(&self) -> f64 {
        self.delta.x
    }

    /// Vertical movement since touch-down.
    pub fn dy(&self) -> f64 {
        self.delta.y
    }
}

/// Something that can claim a touch sequence from a [`GestureRecognizer`].
///
/// `should_capture` is polled on every move until it returns true; from then
/// on the responder owns the touch and receives `on_grant`, `on_move`* and
/// finally `on_release`. Touches that are never captured end in
/// `on_tap_release` (lifted) or `on_terminate` (cancelled by the host).
pub trait GestureResponder {
    fn should_capture(&mut self, event: &TouchEvent, gesture: &GestureState) -> bool;
    fn on_grant(&mut self, event: &TouchEvent, gesture: &GestureState);
    fn on_move(&mut self, event: &TouchEvent, gesture: &GestureState);
    fn on_release(&mut self, event: &TouchEvent, gesture: &GestureState);

    fn on_touch_down(&mut self, _event: &TouchEvent) {}
    fn on_tap_release(&mut self, _event: &TouchEvent) {}
    fn on_terminate(&mut self, _event: &TouchEvent) {}
}

#[derive(Debug, Clone)]
struct ActiveTouch {
    pointer_id: u64,
    gesture: GestureState,
    last_timestamp: Duration,
    captured: bool,
}

/// Tracks a single touch and routes it to a [`GestureResponder`].
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    active: Option<ActiveTouch>,
}

impl GestureRecognizer {
    /// Create an idle recognizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a touch is in progress.
    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Check if the current touch has been claimed by the responder.
    pub fn is_captured(&self) -> bool {
        self.active.as_ref().is_some_and(|t| t.captured)
    }

    /// State of the current touch, if any.
    pub fn gesture(&self) -> Option<GestureState> {
        self.active.as_ref().map(|t| t.gesture)
    }

    /// Process a pointer event and drive the responder.
    pub fn handle_pointer_event<R>(&mut self, event: &PointerEvent, responder: &mut R)
    where
        R: GestureResponder + ?Sized,
    {
        match *event {
            PointerEvent::Down(touch) => {
                if let Some(active) = &self.active {
                    log::debug!(
                        "Ignoring pointer {} down while pointer {} is active",
                        touch.pointer_id,
                        active.pointer_id
                    );
                    return;
                }
                self.active = Some(ActiveTouch {
                    pointer_id: touch.pointer_id,
                    gesture: GestureState {
                        start: touch.position,
                        current: touch.position,
                        delta: Vec2::ZERO,
                        velocity: Vec2::ZERO,
                        active_touches: 1,
                    },
                    last_timestamp: touch.timestamp,
                    captured: false,
                });
                responder.on_touch_down(&touch);
            }
            PointerEvent::Move(touch) => {
                let Some(active) = self.active_for(&touch) else {
                    return;
                };
                active.update(&touch);
                let gesture = active.gesture;

                if active.captured {
                    responder.on_move(&touch, &gesture);
                } else if responder.should_capture(&touch, &gesture) {
                    active.captured = true;
                    responder.on_grant(&touch, &gesture);
                    responder.on_move(&touch, &gesture);
                }
            }
            PointerEvent::Up(touch) => {
                let Some(active) = self.active_for(&touch) else {
                    return;
                };
                active.update(&touch);
                let (gesture, captured) = (active.gesture, active.captured);
                self.active = None;

                if captured {
                    responder.on_release(&touch, &gesture);
                } else {
                    responder.on_tap_release(&touch);
                }
            }
            PointerEvent::Cancel(touch) => {
                let Some(active) = self.active_for(&touch) else {
                    return;
                };
                let (gesture, captured) = (active.gesture, active.captured);
                self.active = None;

                // A claimed touch must still end its drag session
                if captured {
                    responder.on_release(&touch, &gesture);
                } else {
                    responder.on_terminate(&touch);
                }
            }
        }
    }

    fn active_for(&mut self, touch: &TouchEvent) -> Option<&mut ActiveTouch> {
        match self.active.as_mut() {
            Some(active) if active.pointer_id == touch.pointer_id => Some(active),
            Some(_) => {
                log::debug!("Ignoring event for secondary pointer {}", touch.pointer_id);
                None
            }
            None => {
                log::debug!("Ignoring pointer {} event without touch-down", touch.pointer_id);
                None
            }
        }
    }
}

impl ActiveTouch {
    fn update(&mut self, touch: &TouchEvent) {
        let previous = self.gesture.current;
        let elapsed = touch.timestamp.saturating_sub(self.last_timestamp).as_secs_f64();
        if elapsed > 0.0 {
            self.gesture.velocity = (touch.position - previous) / elapsed;
        }
        self.gesture.current = touch.position;
        self.gesture.delta = touch.position - self.gesture.start;
        self.last_timestamp = touch.timestamp;
    }
}
