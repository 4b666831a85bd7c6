//! The draggable widget controller.
//!
//! Ties a [`PositionTracker`](crate::tracker::PositionTracker) to host input:
//! - raw pointer events go through a gesture recognizer
//! - touches inside the dead zone stay with the pressable (tap / long press)
//! - captured touches drive the tracker and the drag callbacks
//!
//! The host renders whatever [`DraggableView`] describes.

mod draggable;
mod state;
mod view;

pub use draggable::Draggable;
pub use view::DraggableView;
