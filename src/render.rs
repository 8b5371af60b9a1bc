//! Host-independent frame description.
//!
//! [`build_frame`] reads the grid and viewport and emits a flat list of draw
//! commands.  The GUI host replays them with its own painter.

use crate::color::Rgba;
use crate::grid::PixelGrid;
use crate::viewport::Viewport;

/// Checkerboard is a fixed decoration: 10×10 cells of 10 screen units at the
/// surface origin, unaffected by pan or zoom.
pub const CHECKER_CELLS: u32 = 10;
pub const CHECKER_CELL_SIZE: f64 = 10.0;
pub const CURSOR_MARKER_SIZE: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ScreenRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn intersects(&self, other: &ScreenRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { rect: ScreenRect, color: Rgba },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderFrame {
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    fn fill(&mut self, rect: ScreenRect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }
}

/// Half-up rounding (`-2.5 → -2`), so screen positions snap the same way on
/// both sides of the origin.
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// On-screen square for one grid cell.
pub fn pixel_rect(viewport: &Viewport, x: u32, y: u32) -> ScreenRect {
    let size = round_half_up(viewport.zoom()).max(1.0);
    let (sx, sy) = viewport.grid_to_screen(x as f64, y as f64);
    ScreenRect::new(round_half_up(sx), round_half_up(sy), size, size)
}

/// Build the draw list for one frame.
///
/// `surface` is the drawable area, when known; pixels that fall entirely
/// outside it are left out.
pub fn build_frame(
    grid: &PixelGrid,
    viewport: &Viewport,
    pointer: (f64, f64),
    surface: Option<ScreenRect>,
) -> RenderFrame {
    let mut frame = RenderFrame::default();
    frame.commands.push(DrawCommand::Clear);

    draw_checkerboard(&mut frame);

    for pixel in grid.iter() {
        let rect = pixel_rect(viewport, pixel.x(), pixel.y());
        if let Some(surface) = &surface
            && !rect.intersects(surface)
        {
            continue;
        }
        frame.fill(rect, pixel.color);
    }

    frame.fill(
        ScreenRect::new(pointer.0, pointer.1, CURSOR_MARKER_SIZE, CURSOR_MARKER_SIZE),
        Rgba::GREEN,
    );
    frame
}

fn draw_checkerboard(frame: &mut RenderFrame) {
    for y in 0..CHECKER_CELLS {
        for x in 0..CHECKER_CELLS {
            let color = if x % 2 == y % 2 { Rgba::GRAY } else { Rgba::DARK_GRAY };
            frame.fill(
                ScreenRect::new(
                    x as f64 * CHECKER_CELL_SIZE,
                    y as f64 * CHECKER_CELL_SIZE,
                    CHECKER_CELL_SIZE,
                    CHECKER_CELL_SIZE,
                ),
                color,
            );
        }
    }
}
