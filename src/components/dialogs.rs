use crate::session::FrameError;

/// Largest canvas the dialog offers.  The grid clamps anything bigger anyway.
const MAX_EDGE: u32 = crate::grid::MAX_DIMENSION;

// ============================================================================
// NEW CANVAS DIALOG
// ============================================================================

pub struct NewCanvasDialog {
    pub open: bool,
    width: u32,
    height: u32,
}

impl Default for NewCanvasDialog {
    fn default() -> Self {
        Self {
            open: false,
            width: crate::settings::DEFAULT_CANVAS_SIZE,
            height: crate::settings::DEFAULT_CANVAS_SIZE,
        }
    }
}

impl NewCanvasDialog {
    /// Open pre-filled with the current canvas size.
    pub fn open_with(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.open = true;
    }

    /// Show the dialog and return `Some((width, height))` when the user confirms.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<(u32, u32)> {
        if !self.open {
            return None;
        }

        let mut result = None;
        let mut should_close = false;

        // Keyboard: Enter = Create, Esc = Cancel
        let enter = ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));
        let esc = ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape));
        if enter {
            result = Some((self.width, self.height));
            should_close = true;
        }
        if esc {
            should_close = true;
        }

        egui::Window::new("New canvas")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("new_canvas_dims_grid")
                    .num_columns(2)
                    .min_col_width(80.0)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Width");
                        ui.add(
                            egui::DragValue::new(&mut self.width)
                                .speed(1.0)
                                .clamp_range(1..=MAX_EDGE)
                                .suffix(" px"),
                        );
                        ui.end_row();

                        ui.label("Height");
                        ui.add(
                            egui::DragValue::new(&mut self.height)
                                .speed(1.0)
                                .clamp_range(1..=MAX_EDGE)
                                .suffix(" px"),
                        );
                        ui.end_row();
                    });

                ui.add_space(4.0);
                ui.label("Creating a new canvas discards the current drawing.");
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Create").clicked() {
                        result = Some((self.width, self.height));
                        should_close = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.open = false;
        }
        result
    }
}

// ============================================================================
// FAULT NOTICE: blocking window shown when the frame loop stops
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultChoice {
    /// User closed the notice.  Restart the loop if it was halted.
    Dismiss,
    /// Leave it halted; the window stays up.
    Wait,
}

/// Centered notice about a frame fault.  The host disables everything else
/// while the loop is halted, so this is the only thing the user can act on.
pub fn show_fault_notice(ctx: &egui::Context, fault: &FrameError, halted: bool) -> FaultChoice {
    let mut choice = FaultChoice::Wait;
    egui::Window::new("Drawing stopped")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(fault.to_string());
            if let Some(path) = crate::logger::log_path() {
                ui.label(format!("Details were written to {}", path.display()));
            }
            ui.add_space(6.0);
            let label = if halted { "Restart drawing" } else { "OK" };
            if ui.button(label).clicked() {
                choice = FaultChoice::Dismiss;
            }
        });
    choice
}
