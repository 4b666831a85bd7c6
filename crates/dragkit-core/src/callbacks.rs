//! Host-facing callbacks fired by a draggable.

use crate::input::{GestureState, TouchEvent};
use std::fmt;

/// Callback receiving the raw touch event.
pub type TouchCallback = Box<dyn FnMut(&TouchEvent)>;
/// Callback receiving the raw touch event and the gesture so far.
pub type GestureCallback = Box<dyn FnMut(&TouchEvent, &GestureState)>;
/// Callback receiving the raw touch event and whether a drag happened.
pub type ReleaseCallback = Box<dyn FnMut(&TouchEvent, bool)>;

/// Optional callbacks. Unset callbacks are simply not invoked.
#[derive(Default)]
pub struct DragCallbacks {
    pub on_drag_start: Option<GestureCallback>,
    pub on_drag: Option<GestureCallback>,
    pub on_drag_release: Option<GestureCallback>,
    pub on_release: Option<ReleaseCallback>,
    pub on_short_press_release: Option<TouchCallback>,
    pub on_long_press: Option<TouchCallback>,
    pub on_press_in: Option<TouchCallback>,
    pub on_press_out: Option<TouchCallback>,
}

impl DragCallbacks {
    /// Create an empty callback set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when a drag is granted.
    pub fn on_drag_start(mut self, f: impl FnMut(&TouchEvent, &GestureState) + 'static) -> Self {
        self.on_drag_start = Some(Box::new(f));
        self
    }

    /// Called on every move while dragging.
    pub fn on_drag(mut self, f: impl FnMut(&TouchEvent, &GestureState) + 'static) -> Self {
        self.on_drag = Some(Box::new(f));
        self
    }

    /// Called when a drag ends.
    pub fn on_drag_release(mut self, f: impl FnMut(&TouchEvent, &GestureState) + 'static) -> Self {
        self.on_drag_release = Some(Box::new(f));
        self
    }

    /// Called after `on_drag_release` with `was_dragging = true`.
    pub fn on_release(mut self, f: impl FnMut(&TouchEvent, bool) + 'static) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    /// Called when a tap is lifted before the long-press delay.
    pub fn on_short_press_release(mut self, f: impl FnMut(&TouchEvent) + 'static) -> Self {
        self.on_short_press_release = Some(Box::new(f));
        self
    }

    /// Called once a press has been held for the long-press delay.
    pub fn on_long_press(mut self, f: impl FnMut(&TouchEvent) + 'static) -> Self {
        self.on_long_press = Some(Box::new(f));
        self
    }

    /// Called on touch-down.
    pub fn on_press_in(mut self, f: impl FnMut(&TouchEvent) + 'static) -> Self {
        self.on_press_in = Some(Box::new(f));
        self
    }

    /// Called when a press ends, whether lifted or taken over by a drag.
    pub fn on_press_out(mut self, f: impl FnMut(&TouchEvent) + 'static) -> Self {
        self.on_press_out = Some(Box::new(f));
        self
    }

    pub(crate) fn emit_drag_start(&mut self, event: &TouchEvent, gesture: &GestureState) {
        if let Some(f) = self.on_drag_start.as_mut() {
            f(event, gesture);
        }
    }

    pub(crate) fn emit_drag(&mut self, event: &TouchEvent, gesture: &GestureState) {
        if let Some(f) = self.on_drag.as_mut() {
            f(event, gesture);
        }
    }

    pub(crate) fn emit_drag_release(&mut self, event: &TouchEvent, gesture: &GestureState) {
        if let Some(f) = self.on_drag_release.as_mut() {
            f(event, gesture);
        }
    }

    pub(crate) fn emit_release(&mut self, event: &TouchEvent, was_dragging: bool) {
        if let Some(f) = self.on_release.as_mut() {
            f(event, was_dragging);
        }
    }

    pub(crate) fn emit_short_press_release(&mut self, event: &TouchEvent) {
        if let Some(f) = self.on_short_press_release.as_mut() {
            f(event);
        }
    }

    pub(crate) fn emit_long_press(&mut self, event: &TouchEvent) {
        if let Some(f) = self.on_long_press.as_mut() {
            f(event);
        }
    }

    pub(crate) fn emit_press_in(&mut self, event: &TouchEvent) {
        if let Some(f) = self.on_press_in.as_mut() {
            f(event);
        }
    }

    pub(crate) fn emit_press_out(&mut self, event: &TouchEvent) {
        if let Some(f) = self.on_press_out.as_mut() {
            f(event);
        }
    }
}

impl fmt::Debug for DragCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCallbacks")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag", &self.on_drag.is_some())
            .field("on_drag_release", &self.on_drag_release.is_some())
            .field("on_release", &self.on_release.is_some())
            .field("on_short_press_release", &self.on_short_press_release.is_some())
            .field("on_long_press", &self.on_long_press.is_some())
            .field("on_press_in", &self.on_press_in.is_some())
            .field("on_press_out", &self.on_press_out.is_some())
            .finish()
    }
}
