use crate::color::Rgba;
use crate::grid::PixelGrid;

/// What a stamp does to the pixels it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BrushMode {
    /// Overwrite covered pixels with the brush color.
    #[default]
    Paint,
    /// Reserved for a selection tool.  Stamping in this mode leaves the grid untouched.
    Select,
}

impl BrushMode {
    pub fn label(&self) -> &'static str {
        match self {
            BrushMode::Paint => "Paint",
            BrushMode::Select => "Select",
        }
    }

    pub fn all() -> &'static [BrushMode] {
        &[BrushMode::Paint, BrushMode::Select]
    }

    /// Settings-file spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrushMode::Paint => "paint",
            BrushMode::Select => "select",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushConfig {
    pub color: Rgba,
    /// Edge length of the stamp, always >= 1.
    pub size: u32,
    pub mode: BrushMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: Rgba::RED,
            size: 3,
            mode: BrushMode::Paint,
        }
    }
}

impl BrushConfig {
    /// Normalise raw form values: channels clamp to 0-255, alpha to 0-1,
    /// size to at least 1.
    pub fn from_raw(r: i64, g: i64, b: i64, a: f64, size: i64) -> Self {
        Self {
            color: Rgba::from_raw(r, g, b, a),
            size: size.clamp(1, u32::MAX as i64) as u32,
            mode: BrushMode::Paint,
        }
    }

    pub fn with_mode(mut self, mode: BrushMode) -> Self {
        self.mode = mode;
        self
    }

    /// Distance from the center cell to the stamp edge.
    pub fn half_extent(&self) -> i64 {
        (self.size / 2) as i64
    }
}

/// Stamp `config` onto `grid` centered on `(center_x, center_y)`.
///
/// Covers the inclusive square `center ± size/2` (floor division), so even
/// sizes produce a `size + 1` wide square.  Cells outside the grid are skipped.
/// Returns the number of grid pixels the stamp covered.
pub fn apply(grid: &mut PixelGrid, center_x: i64, center_y: i64, config: &BrushConfig) -> usize {
    match config.mode {
        BrushMode::Paint => paint_square(grid, center_x, center_y, config),
        BrushMode::Select => 0,
    }
}

fn paint_square(grid: &mut PixelGrid, center_x: i64, center_y: i64, config: &BrushConfig) -> usize {
    let half = config.half_extent();

    // Intersect the stamp with the grid up front instead of probing every cell.
    let min_x = center_x.saturating_sub(half).max(0);
    let min_y = center_y.saturating_sub(half).max(0);
    let max_x = center_x.saturating_add(half).min(grid.width() as i64 - 1);
    let max_y = center_y.saturating_add(half).min(grid.height() as i64 - 1);

    let mut touched = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if let Some(pixel) = grid.get_mut(x, y) {
                pixel.color = config.color;
                touched += 1;
            }
        }
    }
    touched
}

// ============================================================================
// BRUSH ENGINE
// ============================================================================

/// Holds the committed brush plus the snapshot used by the stroke in progress.
///
/// `commit` never affects a running stroke; the new config is picked up by
/// the next `begin_stroke`.
#[derive(Clone, Debug, Default)]
pub struct BrushEngine {
    committed: BrushConfig,
    stroke: Option<BrushConfig>,
}

impl BrushEngine {
    pub fn new(config: BrushConfig) -> Self {
        Self {
            committed: config,
            stroke: None,
        }
    }

    pub fn config(&self) -> &BrushConfig {
        &self.committed
    }

    pub fn commit(&mut self, config: BrushConfig) {
        crate::log_info!(
            "Brush committed: {} size {} ({})",
            config.color,
            config.size,
            config.mode.label()
        );
        self.committed = config;
    }

    pub fn begin_stroke(&mut self) {
        self.stroke = Some(self.committed);
    }

    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Stamp with the active stroke's config.  Does nothing between strokes.
    pub fn stamp(&self, grid: &mut PixelGrid, center_x: i64, center_y: i64) -> usize {
        match &self.stroke {
            Some(config) => apply(grid, center_x, center_y, config),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_PIXEL_COLOR;

    fn red(size: u32) -> BrushConfig {
        BrushConfig {
            color: Rgba::RED,
            size,
            mode: BrushMode::Paint,
        }
    }

    fn painted(grid: &PixelGrid, color: Rgba) -> Vec<(u32, u32)> {
        grid.iter()
            .filter(|p| p.color == color)
            .map(|p| (p.x(), p.y()))
            .collect()
    }

    #[test]
    fn size_three_stamp_covers_three_by_three() {
        let mut grid = PixelGrid::new(100, 100);
        let touched = apply(&mut grid, 5, 5, &red(3));
        assert_eq!(touched, 9);
        for y in 4..=6 {
            for x in 4..=6 {
                assert_eq!(grid.get(x, y).unwrap().color, Rgba::RED);
            }
        }
        assert_eq!(grid.get(3, 5).unwrap().color, DEFAULT_PIXEL_COLOR);
        assert_eq!(painted(&grid, Rgba::RED).len(), 9);
    }

    #[test]
    fn stamp_stays_inside_its_square() {
        for size in 1..=6u32 {
            let mut grid = PixelGrid::new(20, 20);
            apply(&mut grid, 10, 7, &red(size));
            let half = (size / 2) as i64;
            for p in grid.iter() {
                let (x, y) = (p.x() as i64, p.y() as i64);
                let inside = (10 - half..=10 + half).contains(&x) && (7 - half..=7 + half).contains(&y);
                assert_eq!(p.color == Rgba::RED, inside, "size {} at ({}, {})", size, x, y);
            }
        }
    }

    #[test]
    fn even_size_is_floor_biased() {
        let mut grid = PixelGrid::new(10, 10);
        assert_eq!(apply(&mut grid, 4, 4, &red(2)), 9);
        assert_eq!(grid.get(3, 3).unwrap().color, Rgba::RED);
        assert_eq!(grid.get(5, 5).unwrap().color, Rgba::RED);
        assert_eq!(grid.get(6, 4).unwrap().color, DEFAULT_PIXEL_COLOR);
    }

    #[test]
    fn stamps_past_the_edge_are_clipped() {
        let mut grid = PixelGrid::new(4, 4);
        assert_eq!(apply(&mut grid, 0, 0, &red(3)), 4);
        assert_eq!(apply(&mut grid, 3, 3, &red(5)), 9);
        assert_eq!(grid.len(), 16);
        assert_eq!(apply(&mut grid, -10, -10, &red(3)), 0);
        assert_eq!(apply(&mut grid, 100, 2, &red(3)), 0);
        assert_eq!(apply(&mut grid, 1, 1, &red(u32::MAX)), 16);
        assert_eq!(apply(&mut grid, i64::MAX, i64::MIN, &red(u32::MAX)), 0);
    }

    #[test]
    fn reapplying_is_idempotent() {
        let mut once = PixelGrid::new(12, 12);
        apply(&mut once, 6, 6, &red(4));
        let mut twice = once.clone();
        apply(&mut twice, 6, 6, &red(4));
        let a: Vec<_> = once.iter().map(|p| p.color).collect();
        let b: Vec<_> = twice.iter().map(|p| p.color).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn select_mode_does_not_paint() {
        let mut grid = PixelGrid::new(8, 8);
        let config = red(3).with_mode(BrushMode::Select);
        assert_eq!(apply(&mut grid, 4, 4, &config), 0);
        assert!(painted(&grid, Rgba::RED).is_empty());
    }

    #[test]
    fn commit_waits_for_next_stroke() {
        let mut grid = PixelGrid::new(10, 10);
        let mut engine = BrushEngine::new(red(1));
        assert_eq!(engine.stamp(&mut grid, 1, 1), 0);

        engine.begin_stroke();
        let blue = BrushConfig {
            color: Rgba::opaque(0, 0, 255),
            size: 1,
            mode: BrushMode::Paint,
        };
        engine.commit(blue);
        engine.stamp(&mut grid, 2, 2);
        assert_eq!(grid.get(2, 2).unwrap().color, Rgba::RED);

        engine.end_stroke();
        engine.begin_stroke();
        engine.stamp(&mut grid, 3, 3);
        assert_eq!(grid.get(3, 3).unwrap().color, blue.color);
    }

    #[test]
    fn from_raw_normalises_form_values() {
        let config = BrushConfig::from_raw(300, -4, 17, 2.0, 0);
        assert_eq!(config.color, Rgba::new(255, 0, 17, 1.0));
        assert_eq!(config.size, 1);
        assert_eq!(BrushConfig::from_raw(0, 0, 0, 0.5, 9).size, 9);
    }

    #[test]
    fn mode_names_parse_back() {
        for mode in BrushMode::all() {
            assert_eq!(BrushMode::parse(mode.as_str()), Some(*mode));
        }
        assert_eq!(BrushMode::parse(" Select "), Some(BrushMode::Select));
        assert_eq!(BrushMode::parse("lasso"), None);
    }
}
