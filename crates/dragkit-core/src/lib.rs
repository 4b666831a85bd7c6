//! DragKit Core Library
//!
//! Platform-agnostic logic for a draggable widget: gesture recognition,
//! clamped position tracking and spring-back on release.

pub mod callbacks;
pub mod config;
pub mod input;
pub mod limits;
pub mod pressable;
pub mod spring;
pub mod tracker;
pub mod widget;

pub use callbacks::DragCallbacks;
pub use config::{ConfigError, ConfigResult, Content, DraggableConfig};
pub use input::{GestureRecognizer, GestureResponder, GestureState, PointerEvent, TouchEvent};
pub use limits::MovementLimits;
pub use pressable::{PressEnd, Pressable};
pub use spring::{SpringBack, SpringSpec};
pub use tracker::{DragSession, PositionTracker, TrackerState, DEAD_ZONE, DEFAULT_RENDER_SIZE};
pub use widget::{Draggable, DraggableView};
