//! Normalised gesture input.
//!
//! Hosts translate their own pointer/keyboard events into [`InputEvent`]s.
//! The controller only forwards them to the viewport and brush engine; it
//! never touches pixels itself.

use crate::brush::BrushEngine;
use crate::viewport::Viewport;

pub const DEFAULT_ZOOM_STEP: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints.
    Primary,
    /// Pans.
    Secondary,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomKey {
    In,
    Out,
}

/// Where keyboard focus sat when a key arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyFocus {
    /// The drawing surface or nothing in particular.
    #[default]
    Canvas,
    /// A text field or other widget that owns the keystroke.
    OtherWidget,
}

/// Screen coordinates are relative to the drawing surface's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f64, y: f64 },
    PointerPressed { button: PointerButton, x: f64, y: f64 },
    /// Release of any button, anywhere.
    PointerReleased,
    /// Pointer left the host window.
    PointerLeft,
    Key { key: ZoomKey, focus: KeyFocus },
}

/// What the host should do with the original event after the controller ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Set for pan presses so the host suppresses its context menu.
    pub suppress_default: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputController {
    pointer_x: f64,
    pointer_y: f64,
    zoom_step: f64,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_STEP)
    }
}

impl InputController {
    pub fn new(zoom_step: f64) -> Self {
        Self {
            pointer_x: 0.0,
            pointer_y: 0.0,
            zoom_step,
        }
    }

    /// Last known pointer position in screen space.
    pub fn pointer(&self) -> (f64, f64) {
        (self.pointer_x, self.pointer_y)
    }

    pub fn reset_pointer_if_invalid(&mut self) {
        if !self.pointer_x.is_finite() || !self.pointer_y.is_finite() {
            self.pointer_x = 0.0;
            self.pointer_y = 0.0;
        }
    }

    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    pub fn handle(
        &mut self,
        event: InputEvent,
        viewport: &mut Viewport,
        brush: &mut BrushEngine,
    ) -> EventOutcome {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer_x = x;
                self.pointer_y = y;
                if viewport.is_panning() {
                    viewport.pan_to(x, y);
                }
                EventOutcome::default()
            }
            InputEvent::PointerPressed { button, x, y } => {
                self.pointer_x = x;
                self.pointer_y = y;
                match button {
                    PointerButton::Primary => {
                        brush.begin_stroke();
                        EventOutcome::default()
                    }
                    PointerButton::Secondary => {
                        viewport.begin_pan(x, y);
                        EventOutcome {
                            suppress_default: true,
                        }
                    }
                    PointerButton::Other => EventOutcome::default(),
                }
            }
            InputEvent::PointerReleased => {
                viewport.end_pan();
                brush.end_stroke();
                EventOutcome::default()
            }
            InputEvent::PointerLeft => {
                viewport.end_pan();
                EventOutcome::default()
            }
            InputEvent::Key { key, focus } => {
                if focus == KeyFocus::OtherWidget {
                    return EventOutcome::default();
                }
                let delta = match key {
                    ZoomKey::In => self.zoom_step,
                    ZoomKey::Out => -self.zoom_step,
                };
                viewport.zoom_step(self.pointer_x, self.pointer_y, delta);
                EventOutcome {
                    suppress_default: true,
                }
            }
        }
    }
}
