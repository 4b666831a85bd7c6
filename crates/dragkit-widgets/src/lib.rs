//! egui view layer for DragKit draggables.
//!
//! - **Draggable**: feeds egui pointer input into a [`dragkit_core::Draggable`]
//!   and paints its [`dragkit_core::DraggableView`]
//! - **Colors**: parsing of config colour strings

pub mod colors;
pub mod draggable;

pub use colors::{parse_css_color, resolve_fill};
pub use draggable::{show_stack, to_egui_rect, DraggableStyle, DraggableWidget, PointerFrame};

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Fill of a draggable without `render_color` (amber)
    pub const DEFAULT_FILL: Color32 = Color32::from_rgb(245, 158, 11);
    /// Label color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Debug bounds outline (red)
    pub const DEBUG_OUTLINE: Color32 = Color32::from_rgb(239, 68, 68);
}
