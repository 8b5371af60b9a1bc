use egui::Color32;

use crate::brush::{BrushConfig, BrushMode};

// ============================================================================
// BrushPanel: form fields for the next brush, applied only on "Update brush"
// ============================================================================

/// Raw form values.  Kept as wide integers so the panel never has to decide
/// what counts as valid; [`BrushConfig::from_raw`] does that on commit.
pub struct BrushPanel {
    r: i64,
    g: i64,
    b: i64,
    a: f64,
    size: i64,
    mode: BrushMode,
}

impl BrushPanel {
    pub fn new(config: &BrushConfig) -> Self {
        let mut panel = Self {
            r: 0,
            g: 0,
            b: 0,
            a: 1.0,
            size: 1,
            mode: BrushMode::Paint,
        };
        panel.load(config);
        panel
    }

    /// Refill the fields from a committed config.
    pub fn load(&mut self, config: &BrushConfig) {
        self.r = config.color.r as i64;
        self.g = config.color.g as i64;
        self.b = config.color.b as i64;
        self.a = config.color.a as f64;
        self.size = config.size as i64;
        self.mode = config.mode;
    }

    pub fn pending_config(&self) -> BrushConfig {
        BrushConfig::from_raw(self.r, self.g, self.b, self.a, self.size).with_mode(self.mode)
    }

    /// Draw the panel.  Returns the new config when "Update brush" is clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, committed: &BrushConfig) -> Option<BrushConfig> {
        let mut commit = None;
        ui.horizontal(|ui| {
            ui.label("R");
            ui.add(egui::DragValue::new(&mut self.r).clamp_range(0..=255));
            ui.label("G");
            ui.add(egui::DragValue::new(&mut self.g).clamp_range(0..=255));
            ui.label("B");
            ui.add(egui::DragValue::new(&mut self.b).clamp_range(0..=255));
            ui.label("A");
            ui.add(
                egui::DragValue::new(&mut self.a)
                    .speed(0.01)
                    .clamp_range(0.0..=1.0),
            );
            ui.label("Size");
            ui.add(egui::DragValue::new(&mut self.size).clamp_range(1..=64));

            egui::ComboBox::from_id_source("brush_mode_combo")
                .selected_text(self.mode.label())
                .show_ui(ui, |ui| {
                    for mode in BrushMode::all() {
                        ui.selectable_value(&mut self.mode, *mode, mode.label());
                    }
                });

            let pending = self.pending_config();
            swatch(ui, pending.color.to_color32());

            if ui.button("Update brush").clicked() {
                commit = Some(pending);
            }

            ui.separator();
            ui.label("Current:");
            swatch(ui, committed.color.to_color32());
            ui.label(format!("{} px", committed.size));
        });
        commit
    }
}

fn swatch(ui: &mut egui::Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.painter()
        .rect_stroke(rect, 2.0, egui::Stroke::new(1.0, Color32::GRAY));
}
