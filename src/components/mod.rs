pub mod colors;
pub mod dialogs;

pub use colors::BrushPanel;
pub use dialogs::{FaultChoice, NewCanvasDialog, show_fault_notice};
