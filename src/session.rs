use std::fmt;
use uuid::Uuid;

use crate::brush::{BrushConfig, BrushEngine};
use crate::grid::PixelGrid;
use crate::input::{EventOutcome, InputController, InputEvent};
use crate::render::{self, RenderFrame, ScreenRect};
use crate::settings::Settings;
use crate::viewport::Viewport;

// ============================================================================
// FRAME ERRORS
// ============================================================================

/// A fault that aborts one tick/render cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Offset or zoom stopped being a finite number.
    NonFiniteTransform { offset_x: f64, offset_y: f64, zoom: f64 },
    /// The host reported a pointer position that isn't a finite number.
    NonFinitePointer { x: f64, y: f64 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::NonFiniteTransform { offset_x, offset_y, zoom } => write!(
                f,
                "viewport transform is not finite (offset {}, {}; zoom {})",
                offset_x, offset_y, zoom
            ),
            FrameError::NonFinitePointer { x, y } => {
                write!(f, "pointer position is not finite ({}, {})", x, y)
            }
        }
    }
}

impl std::error::Error for FrameError {}

// ============================================================================
// SESSION: every piece of editor state, owned in one place
// ============================================================================

pub struct Session {
    pub id: Uuid,
    grid: PixelGrid,
    viewport: Viewport,
    brush: BrushEngine,
    input: InputController,
    frames: u64,
}

impl Session {
    pub fn new(width: u32, height: u32, brush: BrushConfig, zoom_step: f64) -> Self {
        let id = Uuid::new_v4();
        crate::log_info!("Session {} started with a {}×{} canvas", id, width, height);
        Self {
            id,
            grid: PixelGrid::new(width, height),
            viewport: Viewport::default(),
            brush: BrushEngine::new(brush),
            input: InputController::new(zoom_step),
            frames: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.canvas_width,
            settings.canvas_height,
            settings.brush,
            settings.zoom_step,
        )
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn brush(&self) -> &BrushEngine {
        &self.brush
    }

    pub fn pointer(&self) -> (f64, f64) {
        self.input.pointer()
    }

    /// Completed frames since the session began.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        self.input.handle(event, &mut self.viewport, &mut self.brush)
    }

    pub fn commit_brush(&mut self, config: BrushConfig) {
        self.brush.commit(config);
    }

    /// Replace the canvas.  All pixel edits and any stroke in flight are dropped.
    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        self.brush.end_stroke();
        self.grid.initialize(width, height);
        crate::log_info!(
            "Canvas reset to {}×{}",
            self.grid.width(),
            self.grid.height()
        );
    }

    /// Put back whatever a fault left unusable: the view returns to identity
    /// and a non-finite pointer moves to the origin.
    pub fn recover(&mut self) {
        if !self.viewport.is_finite() {
            self.viewport.reset();
        }
        self.input.reset_pointer_if_invalid();
    }

    fn check_state(&self) -> Result<(), FrameError> {
        if !self.viewport.is_finite() {
            let (offset_x, offset_y) = self.viewport.offset();
            return Err(FrameError::NonFiniteTransform {
                offset_x,
                offset_y,
                zoom: self.viewport.zoom(),
            });
        }
        let (x, y) = self.input.pointer();
        if !x.is_finite() || !y.is_finite() {
            return Err(FrameError::NonFinitePointer { x, y });
        }
        Ok(())
    }

    /// Advance one tick: while a paint stroke is held, stamp at the cell
    /// under the pointer.  No interpolation between ticks.
    pub fn tick(&mut self) -> Result<(), FrameError> {
        self.check_state()?;
        if self.brush.is_stroking() {
            let (px, py) = self.input.pointer();
            let (cx, cy) = self.viewport.screen_to_cell(px, py);
            self.brush.stamp(&mut self.grid, cx, cy);
        }
        Ok(())
    }

    pub fn render(&self, surface: Option<ScreenRect>) -> Result<RenderFrame, FrameError> {
        self.check_state()?;
        Ok(render::build_frame(
            &self.grid,
            &self.viewport,
            self.input.pointer(),
            surface,
        ))
    }

    /// Tick then render.  A fault in either aborts the whole cycle.
    pub fn frame(&mut self, surface: Option<ScreenRect>) -> Result<RenderFrame, FrameError> {
        self.tick()?;
        let frame = self.render(surface)?;
        self.frames += 1;
        Ok(frame)
    }
}

// ============================================================================
// FRAME LOOP: failure policy lives here, not in the session
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Stop running frames until the host restarts the loop.
    #[default]
    Halt,
    /// Report the fault, reset the view, keep going.
    Resume,
}

impl FaultPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultPolicy::Halt => "halt",
            FaultPolicy::Resume => "resume",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" => Some(FaultPolicy::Halt),
            "resume" => Some(FaultPolicy::Resume),
            _ => None,
        }
    }
}

pub struct FrameLoop {
    policy: FaultPolicy,
    halted: Option<FrameError>,
    /// Most recent fault, kept for display even after a resume.
    last_fault: Option<FrameError>,
}

impl FrameLoop {
    pub fn new(policy: FaultPolicy) -> Self {
        Self {
            policy,
            halted: None,
            last_fault: None,
        }
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// The fault that stopped the loop, if any.
    pub fn halt_reason(&self) -> Option<&FrameError> {
        self.halted.as_ref()
    }

    pub fn last_fault(&self) -> Option<&FrameError> {
        self.last_fault.as_ref()
    }

    /// Forget the last reported fault (the host has shown it to the user).
    pub fn acknowledge(&mut self) {
        self.last_fault = None;
    }

    /// Run one cycle.  Returns `None` when halted or when this cycle faulted.
    pub fn run_frame(
        &mut self,
        session: &mut Session,
        surface: Option<ScreenRect>,
    ) -> Option<RenderFrame> {
        if self.halted.is_some() {
            return None;
        }
        match session.frame(surface) {
            Ok(frame) => Some(frame),
            Err(e) => {
                crate::log_err!("Frame {} aborted: {}", session.frame_count(), e);
                self.last_fault = Some(e.clone());
                match self.policy {
                    FaultPolicy::Halt => {
                        self.halted = Some(e);
                    }
                    FaultPolicy::Resume => {
                        session.recover();
                        crate::log_warn!("Frame loop resumed after fault");
                    }
                }
                None
            }
        }
    }

    /// Clear a halt so frames run again.  The session is recovered first,
    /// otherwise a broken transform would fault the very next frame.
    pub fn restart(&mut self, session: &mut Session) {
        if let Some(e) = self.halted.take() {
            session.recover();
            crate::log_info!("Frame loop restarted after: {}", e);
        }
    }
}
