//! TJPaint: pixel-art painting on a zoomable, pannable grid.
//!
//! The editing core ([`grid`], [`viewport`], [`brush`], [`input`], [`render`])
//! has no GUI dependency beyond color conversion; [`session::Session`] owns one
//! of each and [`session::FrameLoop`] drives it.  [`app`] hosts it in egui.

pub mod logger;

pub mod app;
pub mod brush;
pub mod cli;
pub mod color;
pub mod components;
pub mod grid;
pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod viewport;
