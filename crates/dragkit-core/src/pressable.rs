//! Press / long-press tracking for touches that never become drags.

use std::time::Duration;

/// Default hold time before a press counts as a long press.
pub const DEFAULT_LONG_PRESS_DELAY: Duration = Duration::from_millis(500);

/// How a press ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressEnd {
    /// Lifted before the long-press delay elapsed.
    ShortPress,
    /// Lifted after a long press already fired.
    AfterLongPress,
}

/// Tracks a single press from touch-down until it is lifted or taken over.
#[derive(Debug, Clone)]
pub struct Pressable {
    long_press_delay: Duration,
    pressed_at: Option<Duration>,
    long_press_fired: bool,
}

impl Default for Pressable {
    fn default() -> Self {
        Self::new(DEFAULT_LONG_PRESS_DELAY)
    }
}

impl Pressable {
    /// Create a pressable with the given long-press delay.
    pub fn new(long_press_delay: Duration) -> Self {
        Self {
            long_press_delay,
            pressed_at: None,
            long_press_fired: false,
        }
    }

    /// Set the long-press delay.
    pub fn set_long_press_delay(&mut self, delay: Duration) {
        self.long_press_delay = delay;
    }

    /// Check if a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Begin a press at `now`.
    pub fn press_in(&mut self, now: Duration) {
        self.pressed_at = Some(now);
        self.long_press_fired = false;
    }

    /// Returns true exactly once, on the first poll at or after the delay.
    pub fn poll_long_press(&mut self, now: Duration) -> bool {
        match self.pressed_at {
            Some(start) if !self.long_press_fired => {
                if now.saturating_sub(start) >= self.long_press_delay {
                    self.long_press_fired = true;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// End the press by lifting. `None` if nothing was pressed.
    pub fn release(&mut self) -> Option<PressEnd> {
        self.pressed_at.take()?;
        if std::mem::take(&mut self.long_press_fired) {
            Some(PressEnd::AfterLongPress)
        } else {
            Some(PressEnd::ShortPress)
        }
    }

    /// Abandon the press without a tap. Returns true if one was in progress.
    pub fn cancel(&mut self) -> bool {
        self.long_press_fired = false;
        self.pressed_at.take().is_some()
    }
}
