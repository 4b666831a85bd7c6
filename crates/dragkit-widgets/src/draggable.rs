//! egui rendering and input plumbing for [`Draggable`].

use dragkit_core::{Content, Draggable, DraggableView, PointerEvent, TouchEvent, TrackerState};
use egui::{
    Align2, Color32, CornerRadius, CursorIcon, FontId, Id, Image, Pos2, Rect, Sense, Stroke,
    StrokeKind, Ui, UiBuilder, Vec2,
};
use kurbo::Point;
use std::hash::Hash;
use std::time::Duration;

use crate::colors::resolve_fill;
use crate::theme;

/// Pointer input for one egui frame, reduced to what a draggable needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    /// Frame time.
    pub now: Duration,
    /// Latest pointer position. `None` once a touch has lifted.
    pub position: Option<Pos2>,
    /// Where the last interaction happened. Survives a touch lift within
    /// the same frame.
    pub interact_position: Option<Pos2>,
    /// Where the current press started, while a button is down.
    pub press_origin: Option<Pos2>,
    /// Movement since the previous frame.
    pub delta: Vec2,
    pub pressed: bool,
    pub released: bool,
}

impl PointerFrame {
    /// Read this frame's primary-pointer input.
    pub fn from_ui(ui: &Ui) -> Self {
        ui.input(|i| Self {
            now: Duration::from_secs_f64(i.time.max(0.0)),
            position: i.pointer.latest_pos(),
            interact_position: i.pointer.interact_pos(),
            press_origin: i.pointer.press_origin(),
            delta: i.pointer.delta(),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
        })
    }

    /// Translate into pointer events, in the order they happened.
    pub fn events(&self) -> Vec<PointerEvent> {
        let touch =
            |pos: Pos2| TouchEvent::new(Point::new(pos.x as f64, pos.y as f64), self.now);
        let mut events = Vec::with_capacity(3);

        if self.pressed {
            if let Some(origin) = self.press_origin.or(self.interact_position) {
                events.push(PointerEvent::Down(touch(origin)));
                // Moved on after the press within the same frame
                if let Some(pos) = self.position.filter(|&pos| pos != origin) {
                    events.push(PointerEvent::Move(touch(pos)));
                }
            }
        } else if self.delta != Vec2::ZERO {
            if let Some(pos) = self.position {
                events.push(PointerEvent::Move(touch(pos)));
            }
        }

        if self.released {
            // A lifted finger has no position left, only where it let go
            if let Some(pos) = self.interact_position.or(self.position) {
                events.push(PointerEvent::Up(touch(pos)));
            }
        }
        events
    }
}

/// Visual style for draggables without an explicit colour.
#[derive(Debug, Clone)]
pub struct DraggableStyle {
    pub fill: Color32,
    pub text_color: Color32,
    pub font_size: f32,
    pub debug_stroke: Stroke,
    /// Opacity multiplier while disabled.
    pub disabled_opacity: f32,
}

impl Default for DraggableStyle {
    fn default() -> Self {
        Self {
            fill: theme::DEFAULT_FILL,
            text_color: theme::TEXT,
            font_size: 14.0,
            debug_stroke: Stroke::new(1.0, theme::DEBUG_OUTLINE),
            disabled_opacity: 0.5,
        }
    }
}

/// Shows a single draggable inside a [`Ui`].
pub struct DraggableWidget<'a> {
    draggable: &'a mut Draggable,
    id_salt: Id,
    style: DraggableStyle,
}

impl<'a> DraggableWidget<'a> {
    /// Wrap a draggable for display.
    pub fn new(draggable: &'a mut Draggable) -> Self {
        Self {
            draggable,
            id_salt: Id::new("dragkit_draggable"),
            style: DraggableStyle::default(),
        }
    }

    /// Distinguish this draggable from others in the same `Ui`.
    pub fn id_salt(mut self, salt: impl Hash) -> Self {
        self.id_salt = Id::new(salt);
        self
    }

    /// Set the style.
    pub fn style(mut self, style: DraggableStyle) -> Self {
        self.style = style;
        self
    }

    /// Feed input, advance animations and paint. Returns true if the
    /// pointer was consumed.
    pub fn show(self, ui: &mut Ui) -> bool {
        self.show_with_children(ui, |_| {})
    }

    /// Like [`show`](Self::show), laying out `add_contents` inside the
    /// surface when the content is [`Content::Children`].
    pub fn show_with_children(self, ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) -> bool {
        let frame = PointerFrame::from_ui(ui);
        let consumed = feed(self.draggable, &frame);
        if self.draggable.tick(frame.now) {
            ui.ctx().request_repaint();
        }
        let id = ui.id().with(self.id_salt);
        paint(ui, id, self.draggable, &self.style, add_contents);
        consumed
    }
}

/// Shows several draggables, honouring their `z` stacking order.
///
/// A touch-down goes to the topmost draggable under the pointer.
pub fn show_stack(ui: &mut Ui, draggables: &mut [Draggable], style: &DraggableStyle) {
    let frame = PointerFrame::from_ui(ui);

    let mut order: Vec<usize> = (0..draggables.len()).collect();
    order.sort_by_key(|&i| draggables[i].config().z);

    for event in frame.events() {
        for &i in order.iter().rev() {
            if draggables[i].handle_pointer_event(&event) && matches!(event, PointerEvent::Down(_))
            {
                break;
            }
        }
    }

    let mut animating = false;
    for draggable in draggables.iter_mut() {
        animating |= draggable.tick(frame.now);
    }
    if animating {
        ui.ctx().request_repaint();
    }

    for &i in &order {
        let id = ui.id().with(("dragkit_stack", i));
        paint(ui, id, &mut draggables[i], style, |_| {});
    }
}

fn feed(draggable: &mut Draggable, frame: &PointerFrame) -> bool {
    let mut consumed = false;
    for event in frame.events() {
        consumed |= draggable.handle_pointer_event(&event);
    }
    consumed
}

fn paint(
    ui: &mut Ui,
    id: Id,
    draggable: &mut Draggable,
    style: &DraggableStyle,
    add_contents: impl FnOnce(&mut Ui),
) {
    let view = draggable.view();
    let rect = to_egui_rect(view.rect);

    // Claim the area so widgets underneath don't react to the same pointer
    let response = ui.interact(rect, id, Sense::click_and_drag());
    let cursor = match view.state {
        TrackerState::Dragging => CursorIcon::Grabbing,
        _ if view.disabled => CursorIcon::Default,
        _ => CursorIcon::Grab,
    };
    response.on_hover_cursor(cursor);

    if !ui.is_rect_visible(rect) {
        return;
    }

    let opacity = if view.disabled {
        style.disabled_opacity
    } else {
        1.0
    };
    let corner_radius = CornerRadius::same(view.corner_radius.round().clamp(0.0, 255.0) as u8);
    let fill = resolve_fill(view.fill.as_deref(), style.fill).gamma_multiply(opacity);

    match &view.content {
        Content::Shape => {
            ui.painter().rect_filled(rect, corner_radius, fill);
        }
        Content::Text { text } => {
            ui.painter().rect_filled(rect, corner_radius, fill);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(style.font_size),
                style.text_color.gamma_multiply(opacity),
            );
        }
        Content::Image { source } => {
            Image::new(source.clone())
                .corner_radius(corner_radius)
                .tint(Color32::WHITE.gamma_multiply(opacity))
                .paint_at(ui, rect);
        }
        Content::Children => {
            let mut child = ui.new_child(UiBuilder::new().max_rect(rect).layout(*ui.layout()));
            add_contents(&mut child);
            let size = child.min_rect().size();
            draggable.on_layout(kurbo::Size::new(size.x as f64, size.y as f64));
        }
    }

    paint_debug_bounds(ui, &view, style);
}

fn paint_debug_bounds(ui: &Ui, view: &DraggableView, style: &DraggableStyle) {
    if let Some(bounds) = view.debug_bounds {
        ui.painter().rect_stroke(
            to_egui_rect(bounds),
            CornerRadius::ZERO,
            style.debug_stroke,
            StrokeKind::Outside,
        );
    }
}

/// Convert a kurbo rectangle to egui points.
pub fn to_egui_rect(rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.x0 as f32, rect.y0 as f32),
        Pos2::new(rect.x1 as f32, rect.y1 as f32),
    )
}
