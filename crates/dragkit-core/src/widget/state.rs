//! Gesture responder state shared by the draggable controller.

use crate::callbacks::DragCallbacks;
use crate::input::{GestureResponder, GestureState, TouchEvent};
use crate::pressable::{PressEnd, Pressable};
use crate::tracker::PositionTracker;

/// Everything the gesture recognizer drives.
#[derive(Debug)]
pub(crate) struct DraggableState {
    pub tracker: PositionTracker,
    pub pressable: Pressable,
    pub callbacks: DragCallbacks,
    /// Touch-down event of the current press, replayed to `on_long_press`.
    pub press_event: Option<TouchEvent>,
}

impl DraggableState {
    /// Fire `on_long_press` if the current press has been held long enough.
    pub fn poll_long_press(&mut self, now: std::time::Duration) {
        if self.pressable.poll_long_press(now) {
            if let Some(event) = self.press_event {
                log::debug!("Long press at {:?}", event.position);
                self.callbacks.emit_long_press(&event);
            }
        }
    }

    fn end_press(&mut self) -> Option<PressEnd> {
        self.press_event = None;
        self.pressable.release()
    }
}

impl GestureResponder for DraggableState {
    fn should_capture(&mut self, _event: &TouchEvent, gesture: &GestureState) -> bool {
        self.tracker.should_capture(gesture.delta)
    }

    fn on_grant(&mut self, event: &TouchEvent, gesture: &GestureState) {
        self.press_event = None;
        if self.pressable.cancel() {
            self.callbacks.emit_press_out(event);
        }
        self.tracker.grant();
        self.callbacks.emit_drag_start(event, gesture);
    }

    fn on_move(&mut self, event: &TouchEvent, gesture: &GestureState) {
        if self.tracker.drag_to(gesture.delta).is_some() {
            self.callbacks.emit_drag(event, gesture);
        }
    }

    fn on_release(&mut self, event: &TouchEvent, gesture: &GestureState) {
        self.callbacks.emit_drag_release(event, gesture);
        self.callbacks.emit_release(event, true);
        self.tracker.release();
    }

    fn on_touch_down(&mut self, event: &TouchEvent) {
        if self.tracker.is_disabled() {
            return;
        }
        self.pressable.press_in(event.timestamp);
        self.press_event = Some(*event);
        self.callbacks.emit_press_in(event);
    }

    fn on_tap_release(&mut self, event: &TouchEvent) {
        match self.end_press() {
            Some(PressEnd::ShortPress) => {
                self.callbacks.emit_press_out(event);
                self.callbacks.emit_short_press_release(event);
            }
            Some(PressEnd::AfterLongPress) => self.callbacks.emit_press_out(event),
            None => {}
        }
    }

    fn on_terminate(&mut self, event: &TouchEvent) {
        self.press_event = None;
        if self.pressable.cancel() {
            self.callbacks.emit_press_out(event);
        }
    }
}
