use crate::color::Rgba;

/// Largest accepted edge length.  Larger requests are clamped (with a warning).
pub const MAX_DIMENSION: u32 = 4096;

/// Color every pixel gets when the grid is (re)initialised.
pub const DEFAULT_PIXEL_COLOR: Rgba = Rgba::WHITE;

// ============================================================================
// PIXEL
// ============================================================================

/// One cell of the grid.  The coordinate is fixed at creation; only the color
/// changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Pixel {
    x: u32,
    y: u32,
    pub color: Rgba,
}

impl Pixel {
    fn new(x: u32, y: u32, color: Rgba) -> Self {
        Self { x, y, color }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

// ============================================================================
// PIXEL GRID
// ============================================================================

/// Authoritative pixel storage.
///
/// Pixels live in one row-major `Vec`, which doubles as the insertion order
/// used for rendering.  The coordinate → pixel mapping is `y * width + x`, so
/// every lookup is O(1) with no hashing.
#[derive(Clone, Debug, Default)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let mut grid = Self::default();
        grid.initialize(width, height);
        grid
    }

    /// Throw away every pixel and regenerate a `width × height` grid of
    /// opaque white.  Any outstanding references into the old grid are
    /// invalidated by the borrow checker.
    pub fn initialize(&mut self, width: u32, height: u32) {
        let (width, height) = clamp_dimensions(width, height);

        self.pixels.clear();
        self.pixels.reserve_exact(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                self.pixels.push(Pixel::new(x, y, DEFAULT_PIXEL_COLOR));
            }
        }
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at an integer coordinate, `None` outside the grid.
    pub fn get(&self, x: i64, y: i64) -> Option<&Pixel> {
        self.index_of(x, y).map(|i| &self.pixels[i])
    }

    pub fn get_mut(&mut self, x: i64, y: i64) -> Option<&mut Pixel> {
        let i = self.index_of(x, y)?;
        self.pixels.get_mut(i)
    }

    /// Lookup with real-valued coordinates.  Only exact integers resolve;
    /// anything fractional (or NaN) is absent.
    pub fn get_at(&self, x: f64, y: f64) -> Option<&Pixel> {
        if x.fract() != 0.0 || y.fract() != 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        self.get(x as i64, y as i64)
    }

    /// Pixels in insertion (row-major) order.  Each call starts from the top.
    pub fn iter(&self) -> impl Iterator<Item = &Pixel> + '_ {
        self.pixels.iter()
    }

    pub fn for_each(&self, mut visitor: impl FnMut(&Pixel)) {
        for pixel in &self.pixels {
            visitor(pixel);
        }
    }
}

fn clamp_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        crate::log_warn!(
            "PixelGrid: requested {}×{} exceeds {} per edge, clamping",
            width,
            height,
            MAX_DIMENSION
        );
    }
    (width.min(MAX_DIMENSION), height.min(MAX_DIMENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_fills_every_cell_with_white() {
        let grid = PixelGrid::new(7, 4);
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|p| p.color == DEFAULT_PIXEL_COLOR));
        for y in 0..4 {
            for x in 0..7 {
                let p = grid.get(x, y).expect("in range");
                assert_eq!((p.x() as i64, p.y() as i64), (x, y));
            }
        }
    }

    #[test]
    fn lookups_outside_bounds_are_absent() {
        let grid = PixelGrid::new(3, 2);
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(0, -1).is_none());
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
        assert!(grid.get(2, 1).is_some());
    }

    #[test]
    fn fractional_lookup_is_absent() {
        let grid = PixelGrid::new(3, 3);
        assert!(grid.get_at(1.0, 2.0).is_some());
        assert!(grid.get_at(1.5, 2.0).is_none());
        assert!(grid.get_at(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn iteration_is_row_major_and_restartable() {
        let grid = PixelGrid::new(2, 2);
        let order: Vec<(u32, u32)> = grid.iter().map(|p| (p.x(), p.y())).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);

        let mut visited = 0;
        grid.for_each(|_| visited += 1);
        grid.for_each(|_| visited += 1);
        assert_eq!(visited, 8);
    }

    #[test]
    fn reinitialize_discards_edits() {
        let mut grid = PixelGrid::new(4, 4);
        grid.get_mut(1, 1).unwrap().color = Rgba::RED;
        grid.initialize(2, 5);
        assert_eq!((grid.width(), grid.height(), grid.len()), (2, 5, 10));
        assert!(grid.iter().all(|p| p.color == DEFAULT_PIXEL_COLOR));
        assert!(grid.get(3, 0).is_none());
    }

    #[test]
    fn oversized_request_is_clamped() {
        let grid = PixelGrid::new(MAX_DIMENSION + 10, 1);
        assert_eq!(grid.width(), MAX_DIMENSION);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn zero_dimension_gives_empty_grid() {
        let grid = PixelGrid::new(0, 10);
        assert!(grid.is_empty());
        assert!(grid.get(0, 0).is_none());
    }
}
