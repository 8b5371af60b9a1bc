use egui::{Pos2, Rect, Vec2};

use crate::brush::BrushConfig;
use crate::components::{BrushPanel, FaultChoice, NewCanvasDialog, show_fault_notice};
use crate::input::{InputEvent, KeyFocus, PointerButton, ZoomKey};
use crate::render::{DrawCommand, RenderFrame, ScreenRect};
use crate::session::{FrameLoop, Session};
use crate::settings::Settings;

// ============================================================================
// HOST INPUT: egui pointer/key state → normalised InputEvents
// ============================================================================

/// Pointer/keyboard facts read from egui for one frame.
#[derive(Clone, Debug, Default)]
struct FrameInput {
    /// Pointer position in window space, `None` when outside the window.
    hover: Option<Pos2>,
    primary_pressed: bool,
    secondary_pressed: bool,
    released: bool,
    zoom_in: usize,
    zoom_out: usize,
    widget_focused: bool,
}

impl FrameInput {
    /// `canvas` is the drawing surface's id; focus on it still counts as canvas focus.
    fn read(ctx: &egui::Context, canvas: egui::Id) -> Self {
        let widget_focused = ctx.memory(|m| m.focus().is_some_and(|id| id != canvas));
        ctx.input(|i| {
            let count = |key: egui::Key| {
                i.events
                    .iter()
                    .filter(|e| matches!(e, egui::Event::Key { key: k, pressed: true, .. } if *k == key))
                    .count()
            };
            Self {
                hover: i.pointer.hover_pos(),
                primary_pressed: i.pointer.button_pressed(egui::PointerButton::Primary),
                secondary_pressed: i.pointer.button_pressed(egui::PointerButton::Secondary),
                released: i.pointer.any_released(),
                zoom_in: count(egui::Key::ArrowUp),
                zoom_out: count(egui::Key::ArrowDown),
                widget_focused,
            }
        })
    }
}

/// Tracks pointer presence between frames so a leave is reported once.
#[derive(Default)]
struct PointerTracker {
    last: Option<Pos2>,
}

impl PointerTracker {
    /// Translate one frame of egui input into events, in the order a browser
    /// would deliver them: move, press, release, leave, keys.
    fn events(&mut self, input: &FrameInput, canvas: Rect) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let to_local = |p: Pos2| ((p.x - canvas.min.x) as f64, (p.y - canvas.min.y) as f64);

        if let Some(pos) = input.hover
            && self.last != Some(pos)
        {
            let (x, y) = to_local(pos);
            events.push(InputEvent::PointerMoved { x, y });
        }

        // Presses only count on the canvas; releases count anywhere.
        if let Some(pos) = input.hover
            && canvas.contains(pos)
        {
            let (x, y) = to_local(pos);
            if input.primary_pressed {
                events.push(InputEvent::PointerPressed { button: PointerButton::Primary, x, y });
            }
            if input.secondary_pressed {
                events.push(InputEvent::PointerPressed { button: PointerButton::Secondary, x, y });
            }
        }
        if input.released {
            events.push(InputEvent::PointerReleased);
        }

        if input.hover.is_none() && self.last.is_some() {
            events.push(InputEvent::PointerLeft);
        }
        self.last = input.hover;

        let focus = if input.widget_focused { KeyFocus::OtherWidget } else { KeyFocus::Canvas };
        for _ in 0..input.zoom_in {
            events.push(InputEvent::Key { key: ZoomKey::In, focus });
        }
        for _ in 0..input.zoom_out {
            events.push(InputEvent::Key { key: ZoomKey::Out, focus });
        }
        events
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct TjPaintApp {
    session: Session,
    frame_loop: FrameLoop,
    settings: Settings,
    brush_panel: BrushPanel,
    new_canvas: NewCanvasDialog,
    pointer: PointerTracker,
    /// Last good frame, kept on screen while the loop is halted.
    last_frame: Option<RenderFrame>,
}

impl TjPaintApp {
    pub fn new(settings: Settings) -> Self {
        let session = Session::from_settings(&settings);
        Self {
            frame_loop: FrameLoop::new(settings.fault_policy),
            brush_panel: BrushPanel::new(&settings.brush),
            new_canvas: NewCanvasDialog::default(),
            pointer: PointerTracker::default(),
            last_frame: None,
            session,
            settings,
        }
    }

    fn commit_brush(&mut self, config: BrushConfig) {
        self.session.commit_brush(config);
        self.settings.brush = config;
        self.persist_settings();
    }

    fn resize_canvas(&mut self, width: u32, height: u32) {
        self.session.resize_canvas(width, height);
        self.settings.canvas_width = self.session.grid().width();
        self.settings.canvas_height = self.session.grid().height();
        self.persist_settings();
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings.save() {
            crate::log_warn!("Settings not saved: {}", e);
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, enabled: bool) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("New").clicked() {
                        let grid = self.session.grid();
                        self.new_canvas.open_with(grid.width(), grid.height());
                    }
                    ui.separator();
                    let committed = *self.session.brush().config();
                    if let Some(config) = self.brush_panel.show(ui, &committed) {
                        self.commit_brush(config);
                    }
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let grid = self.session.grid();
                let vp = self.session.viewport();
                let (px, py) = self.session.pointer();
                let (cx, cy) = vp.screen_to_cell(px, py);
                ui.label(format!("{}×{}", grid.width(), grid.height()));
                ui.separator();
                ui.label(format!("Zoom {:.0}%", vp.zoom() * 100.0));
                ui.separator();
                if grid.contains(cx, cy) {
                    ui.label(format!("Pixel {}, {}", cx, cy));
                } else {
                    ui.label("Pixel -");
                }
            });
        });
    }

    fn show_canvas(&mut self, ctx: &egui::Context, running: bool) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas = response.rect;

            if running {
                let input = FrameInput::read(ctx, response.id);
                for event in self.pointer.events(&input, canvas) {
                    self.session.handle(event);
                }

                let surface = ScreenRect::new(
                    0.0,
                    0.0,
                    canvas.width() as f64,
                    canvas.height() as f64,
                );
                if let Some(frame) = self.frame_loop.run_frame(&mut self.session, Some(surface)) {
                    self.last_frame = Some(frame);
                }
            }

            if let Some(frame) = &self.last_frame {
                paint_frame(&painter, canvas.min, frame);
            }
        });
    }
}

/// Replay a frame's draw list.  egui starts every frame blank, so `Clear`
/// needs no work.
fn paint_frame(painter: &egui::Painter, origin: Pos2, frame: &RenderFrame) {
    for command in &frame.commands {
        match command {
            DrawCommand::Clear => {}
            DrawCommand::FillRect { rect, color } => {
                let r = Rect::from_min_size(
                    origin + Vec2::new(rect.x as f32, rect.y as f32),
                    Vec2::new(rect.w as f32, rect.h as f32),
                );
                painter.rect_filled(r, 0.0, color.to_color32());
            }
        }
    }
}

impl eframe::App for TjPaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let running = !self.frame_loop.is_halted();

        self.show_top_bar(ctx, running);
        self.show_status_bar(ctx);

        if let Some((w, h)) = self.new_canvas.show(ctx) {
            self.resize_canvas(w, h);
        }

        self.show_canvas(ctx, running && !self.new_canvas.open);

        if let Some(fault) = self.frame_loop.last_fault().cloned() {
            let halted = self.frame_loop.is_halted();
            if show_fault_notice(ctx, &fault, halted) == FaultChoice::Dismiss {
                self.frame_loop.restart(&mut self.session);
                self.frame_loop.acknowledge();
            }
        }

        // Drive the animation loop.  A halted loop stops asking for frames.
        if !self.frame_loop.is_halted() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(400.0, 300.0))
    }

    #[test]
    fn positions_are_relative_to_the_canvas() {
        let mut tracker = PointerTracker::default();
        let input = FrameInput {
            hover: Some(Pos2::new(110.0, 70.0)),
            primary_pressed: true,
            ..FrameInput::default()
        };
        let events = tracker.events(&input, canvas());
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMoved { x: 10.0, y: 20.0 },
                InputEvent::PointerPressed { button: PointerButton::Primary, x: 10.0, y: 20.0 },
            ]
        );
    }

    #[test]
    fn presses_off_canvas_are_dropped_but_releases_are_not() {
        let mut tracker = PointerTracker::default();
        let input = FrameInput {
            hover: Some(Pos2::new(10.0, 10.0)),
            secondary_pressed: true,
            released: true,
            ..FrameInput::default()
        };
        let events = tracker.events(&input, canvas());
        assert!(!events.iter().any(|e| matches!(e, InputEvent::PointerPressed { .. })));
        assert!(events.contains(&InputEvent::PointerReleased));
    }

    #[test]
    fn leave_is_reported_once() {
        let mut tracker = PointerTracker::default();
        tracker.events(
            &FrameInput { hover: Some(Pos2::new(200.0, 200.0)), ..FrameInput::default() },
            canvas(),
        );
        let gone = FrameInput::default();
        assert_eq!(tracker.events(&gone, canvas()), vec![InputEvent::PointerLeft]);
        assert!(tracker.events(&gone, canvas()).is_empty());
    }

    #[test]
    fn keys_carry_focus() {
        let mut tracker = PointerTracker::default();
        let input = FrameInput { zoom_in: 2, widget_focused: true, ..FrameInput::default() };
        let events = tracker.events(&input, canvas());
        assert_eq!(
            events,
            vec![
                InputEvent::Key { key: ZoomKey::In, focus: KeyFocus::OtherWidget },
                InputEvent::Key { key: ZoomKey::In, focus: KeyFocus::OtherWidget },
            ]
        );
    }
}
