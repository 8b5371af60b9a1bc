/// Zoom limits.  Every code path that changes zoom goes through `clamp_zoom`.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return MIN_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

// ============================================================================
// DRAG STATE
// ============================================================================

/// Captured when a pan gesture starts, dropped when it ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub start_screen_x: f64,
    pub start_screen_y: f64,
    pub start_offset_x: f64,
    pub start_offset_y: f64,
    /// Grid point that stays glued to the pointer for the whole pan.
    pub anchor_grid_x: f64,
    pub anchor_grid_y: f64,
}

// ============================================================================
// VIEWPORT
// ============================================================================

/// Pan/zoom transform: `screen = grid * zoom + offset` on both axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    offset_x: f64,
    offset_y: f64,
    zoom: f64,
    drag: Option<DragState>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            drag: None,
        }
    }
}

impl Viewport {
    pub fn new(offset_x: f64, offset_y: f64, zoom: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            zoom: clamp_zoom(zoom),
            drag: None,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    /// True when every term of the transform is a usable number.
    pub fn is_finite(&self) -> bool {
        self.offset_x.is_finite() && self.offset_y.is_finite() && self.zoom.is_finite()
    }

    /// Real-valued grid coordinate under a screen point.  Floor it before
    /// indexing the grid.
    pub fn screen_to_grid(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.offset_x) / self.zoom,
            (screen_y - self.offset_y) / self.zoom,
        )
    }

    /// Integer grid cell under a screen point.
    pub fn screen_to_cell(&self, screen_x: f64, screen_y: f64) -> (i64, i64) {
        let (gx, gy) = self.screen_to_grid(screen_x, screen_y);
        (gx.floor() as i64, gy.floor() as i64)
    }

    pub fn grid_to_screen(&self, grid_x: f64, grid_y: f64) -> (f64, f64) {
        (
            grid_x * self.zoom + self.offset_x,
            grid_y * self.zoom + self.offset_y,
        )
    }

    /// Change zoom while keeping the grid point under `(screen_x, screen_y)`
    /// fixed on screen.
    pub fn zoom_around(&mut self, screen_x: f64, screen_y: f64, new_zoom: f64) {
        let new_zoom = clamp_zoom(new_zoom);
        let old_zoom = self.zoom;
        if new_zoom == old_zoom {
            return;
        }
        let factor = new_zoom / old_zoom;
        self.offset_x = screen_x - (screen_x - self.offset_x) * factor;
        self.offset_y = screen_y - (screen_y - self.offset_y) * factor;
        self.zoom = new_zoom;
    }

    /// Relative zoom used by the arrow keys (`delta` is added, then clamped).
    pub fn zoom_step(&mut self, screen_x: f64, screen_y: f64, delta: f64) {
        self.zoom_around(screen_x, screen_y, self.zoom + delta);
    }

    pub fn begin_pan(&mut self, screen_x: f64, screen_y: f64) {
        let (anchor_grid_x, anchor_grid_y) = self.screen_to_grid(screen_x, screen_y);
        self.drag = Some(DragState {
            start_screen_x: screen_x,
            start_screen_y: screen_y,
            start_offset_x: self.offset_x,
            start_offset_y: self.offset_y,
            anchor_grid_x,
            anchor_grid_y,
        });
    }

    /// Re-derive the offset from the fixed anchor so the anchor sits under the
    /// pointer.  Offsets are never accumulated, so long drags don't drift.
    pub fn pan_to(&mut self, screen_x: f64, screen_y: f64) {
        let Some(drag) = self.drag else { return };
        self.offset_x = screen_x - drag.anchor_grid_x * self.zoom;
        self.offset_y = screen_y - drag.anchor_grid_y * self.zoom;
    }

    pub fn end_pan(&mut self) {
        self.drag = None;
    }

    /// Back to identity transform.  Used when a fault left the transform unusable.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
    }

    #[test]
    fn zoom_around_scenario() {
        let mut vp = Viewport::default();
        assert_eq!(vp.screen_to_grid(50.0, 50.0), (50.0, 50.0));
        vp.zoom_around(50.0, 50.0, 2.0);
        assert_eq!(vp.zoom(), 2.0);
        assert!(approx(vp.offset(), (-50.0, -50.0)));
        assert!(approx(vp.screen_to_grid(50.0, 50.0), (50.0, 50.0)));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let starts = [(0.0, 0.0, 1.0), (-37.5, 12.25, 3.3), (400.0, -90.0, 0.25)];
        let points = [(0.0, 0.0), (123.4, 56.7), (-20.0, 800.0)];
        let zooms = [0.1, 0.7, 1.0, 4.2, 10.0];
        for &(ox, oy, z) in &starts {
            for &(px, py) in &points {
                for &nz in &zooms {
                    let mut vp = Viewport::new(ox, oy, z);
                    let before = vp.screen_to_grid(px, py);
                    vp.zoom_around(px, py, nz);
                    let after = vp.screen_to_grid(px, py);
                    assert!(
                        (before.0 - after.0).abs() < 1e-6 && (before.1 - after.1).abs() < 1e-6,
                        "anchor moved: {:?} -> {:?}",
                        before,
                        after
                    );
                }
            }
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::default();
        vp.zoom_around(10.0, 10.0, 0.01);
        assert_eq!(vp.zoom(), MIN_ZOOM);
        vp.zoom_around(10.0, 10.0, 250.0);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        vp.zoom_around(10.0, 10.0, f64::NAN);
        assert_eq!(vp.zoom(), MIN_ZOOM);
    }

    #[test]
    fn zoom_to_same_value_is_a_no_op() {
        let mut vp = Viewport::new(3.0, 4.0, 2.0);
        vp.zoom_around(99.0, -7.0, 2.0);
        assert_eq!(vp, Viewport::new(3.0, 4.0, 2.0));

        // Already at the ceiling: further zoom-in does nothing.
        let mut vp = Viewport::new(3.0, 4.0, MAX_ZOOM);
        vp.zoom_step(50.0, 50.0, 0.1);
        assert_eq!(vp.offset(), (3.0, 4.0));
    }

    #[test]
    fn pan_keeps_anchor_under_pointer() {
        let mut vp = Viewport::new(10.0, -5.0, 2.5);
        vp.begin_pan(100.0, 60.0);
        let anchor = vp.screen_to_grid(100.0, 60.0);
        for &(x, y) in &[(101.0, 61.0), (-300.0, 20.5), (0.1, 0.2), (1e4, -1e4), (100.0, 60.0)] {
            vp.pan_to(x, y);
            assert!(approx(vp.screen_to_grid(x, y), anchor));
        }
        vp.end_pan();
        assert!(!vp.is_panning());
    }

    #[test]
    fn pan_to_without_pan_is_ignored() {
        let mut vp = Viewport::new(1.0, 2.0, 1.0);
        vp.pan_to(500.0, 500.0);
        assert_eq!(vp.offset(), (1.0, 2.0));
        vp.end_pan();
        vp.end_pan();
        assert!(vp.drag_state().is_none());
    }

    #[test]
    fn drag_state_records_start() {
        let mut vp = Viewport::new(4.0, 8.0, 2.0);
        vp.begin_pan(10.0, 20.0);
        let drag = vp.drag_state().copied().unwrap();
        assert_eq!((drag.start_screen_x, drag.start_screen_y), (10.0, 20.0));
        assert_eq!((drag.start_offset_x, drag.start_offset_y), (4.0, 8.0));
        assert_eq!((drag.anchor_grid_x, drag.anchor_grid_y), (3.0, 6.0));
    }

    #[test]
    fn screen_to_cell_floors_negative_coordinates() {
        let vp = Viewport::new(0.0, 0.0, 4.0);
        assert_eq!(vp.screen_to_cell(-1.0, 7.9), (-1, 1));
        assert_eq!(vp.grid_to_screen(2.0, 3.0), (8.0, 12.0));
    }
}
