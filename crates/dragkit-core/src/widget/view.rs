//! Render description of a draggable.

use crate::config::Content;
use crate::tracker::TrackerState;
use kurbo::{Rect, Vec2};

/// What the host should draw for a draggable this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableView {
    /// Absolute rectangle after translation.
    pub rect: Rect,
    /// Translation from the rest position.
    pub translation: Vec2,
    /// Stacking order.
    pub z_index: i32,
    pub content: Content,
    /// Fill colour for shape/text content.
    pub fill: Option<String>,
    pub corner_radius: f64,
    /// Bounds outline, present in debug mode.
    pub debug_bounds: Option<Rect>,
    pub state: TrackerState,
    pub disabled: bool,
}

impl DraggableView {
    /// Whether the host should keep scheduling frames.
    pub fn is_animating(&self) -> bool {
        self.state == TrackerState::Reversing
    }
}
