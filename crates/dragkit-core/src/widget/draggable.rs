//! Draggable controller: host input in, view description and callbacks out.

use super::state::DraggableState;
use super::view::DraggableView;
use crate::callbacks::DragCallbacks;
use crate::config::{Content, DraggableConfig};
use crate::input::{GestureRecognizer, PointerEvent};
use crate::limits::MovementLimits;
use crate::pressable::Pressable;
use crate::tracker::{PositionTracker, TrackerState};
use kurbo::{Point, Rect, Size, Vec2};
use std::time::Duration;

/// A draggable widget.
///
/// The host calls [`handle_pointer_event`](Self::handle_pointer_event) for
/// input, [`on_layout`](Self::on_layout) when content is measured and
/// [`tick`](Self::tick) once per frame, then draws [`view`](Self::view).
#[derive(Debug)]
pub struct Draggable {
    config: DraggableConfig,
    recognizer: GestureRecognizer,
    state: DraggableState,
    last_tick: Option<Duration>,
}

impl Draggable {
    /// Create a draggable from its configuration.
    pub fn new(config: DraggableConfig) -> Self {
        let tracker = PositionTracker::new(config.origin())
            .with_size(config.initial_size())
            .with_limits(config.limits)
            .with_reverse(config.should_reverse)
            .with_spring(config.spring)
            .with_disabled(config.disabled);

        Self {
            state: DraggableState {
                tracker,
                pressable: Pressable::new(config.long_press_delay()),
                callbacks: DragCallbacks::default(),
                press_event: None,
            },
            recognizer: GestureRecognizer::new(),
            last_tick: None,
            config,
        }
    }

    /// Attach callbacks.
    pub fn with_callbacks(mut self, callbacks: DragCallbacks) -> Self {
        self.state.callbacks = callbacks;
        self
    }

    /// Replace the callbacks.
    pub fn set_callbacks(&mut self, callbacks: DragCallbacks) {
        self.state.callbacks = callbacks;
    }

    /// The configuration this draggable was built from, kept in sync with
    /// the setters below.
    pub fn config(&self) -> &DraggableConfig {
        &self.config
    }

    /// The underlying tracker.
    pub fn tracker(&self) -> &PositionTracker {
        &self.state.tracker
    }

    /// Translation from the rest position.
    pub fn position(&self) -> Vec2 {
        self.state.tracker.position()
    }

    /// Current tracker state.
    pub fn state(&self) -> TrackerState {
        self.state.tracker.state()
    }

    /// Check if a touch is currently being tracked.
    pub fn is_touched(&self) -> bool {
        self.recognizer.is_tracking()
    }

    /// Current on-screen rectangle.
    pub fn rect(&self) -> Rect {
        let tracker = &self.state.tracker;
        Rect::from_origin_size(tracker.origin() + tracker.position(), tracker.size())
    }

    /// Check if `point` falls on the widget.
    pub fn hit_test(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    /// Feed a pointer event. Touch-downs outside the widget are ignored.
    ///
    /// Returns true if the event was consumed.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        if let PointerEvent::Down(touch) = event {
            if !self.hit_test(touch.position) {
                return false;
            }
        } else if !self.recognizer.is_tracking() {
            return false;
        }

        let before = self.state.tracker.state();

        // A lift away from the last sample moves there first
        if let PointerEvent::Up(touch) = event {
            if self
                .recognizer
                .gesture()
                .is_some_and(|gesture| gesture.current != touch.position)
            {
                let step = PointerEvent::Move(*touch);
                self.recognizer.handle_pointer_event(&step, &mut self.state);
            }
        }
        self.recognizer.handle_pointer_event(event, &mut self.state);
        let after = self.state.tracker.state();

        // Spring time starts at the release, not at the last frame
        if after == TrackerState::Reversing && before != TrackerState::Reversing {
            self.last_tick = Some(event.touch().timestamp);
        }
        if before != after {
            log::debug!("Draggable {:?} -> {:?}", before, after);
        }
        true
    }

    /// Advance time: fires a pending long press and steps the spring-back.
    ///
    /// Returns true while another frame is needed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let dt = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_tick = Some(now);

        self.state.poll_long_press(now);
        self.state.tracker.tick(dt);

        self.state.tracker.state() == TrackerState::Reversing
            || self.state.pressable.is_pressed()
    }

    /// Record the measured size of the content.
    ///
    /// Bounds pick this up on the next grant; until the first report they
    /// use `render_size`.
    pub fn on_layout(&mut self, size: Size) {
        self.state.tracker.set_size(size);
    }

    /// Switch between commit-on-release and spring-back-on-release.
    pub fn set_should_reverse(&mut self, should_reverse: bool) {
        self.config.should_reverse = should_reverse;
        self.last_tick = None;
        self.state.tracker.set_should_reverse(should_reverse);
    }

    /// Enable or disable gesture capture and press callbacks.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        self.state.tracker.set_disabled(disabled);
    }

    /// Replace the movement limits.
    pub fn set_limits(&mut self, limits: MovementLimits) {
        self.config.limits = limits;
        self.state.tracker.set_limits(limits);
    }

    /// Move the rest position.
    pub fn set_origin(&mut self, origin: Point) {
        self.config.x = origin.x;
        self.config.y = origin.y;
        self.state.tracker.set_origin(origin);
    }

    /// Describe what to draw this frame.
    pub fn view(&self) -> DraggableView {
        let tracker = &self.state.tracker;
        let rect = self.rect();
        let corner_radius = if self.config.is_circle {
            rect.width().min(rect.height()) / 2.0
        } else {
            0.0
        };
        let fill = match self.config.content {
            Content::Shape | Content::Text { .. } => self.config.render_color.clone(),
            Content::Children | Content::Image { .. } => None,
        };
        let debug_bounds = self.config.debug.then(|| {
            tracker
                .session()
                .map_or_else(|| tracker.bounds(), |session| session.start_bounds)
        });

        DraggableView {
            rect,
            translation: tracker.position(),
            z_index: self.config.z,
            content: self.config.content.clone(),
            fill,
            corner_radius,
            debug_bounds,
            state: tracker.state(),
            disabled: tracker.is_disabled(),
        }
    }
}
