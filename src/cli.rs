// ============================================================================
// TJPaint command line: launch options layered over the settings file
// ============================================================================
//
// Usage examples:
//   tjpaint                                   (settings file / defaults)
//   tjpaint --width 32 --height 32            (start on a 32×32 canvas)
//   tjpaint --brush-color 0,0,255,0.5 --brush-size 1
//   tjpaint --resume-on-fault                 (keep drawing after a frame fault)

use clap::Parser;

use crate::color::Rgba;
use crate::session::FaultPolicy;
use crate::settings::Settings;

/// TJPaint pixel-art editor.
#[derive(Parser, Debug, Default)]
#[command(name = "tjpaint", about = "Zoomable pixel-art painting canvas")]
pub struct CliArgs {
    /// Canvas width in pixels.
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Brush color as "r,g,b,a" (channels 0-255, alpha 0-1).
    #[arg(long, value_name = "R,G,B,A", value_parser = parse_color)]
    pub brush_color: Option<Rgba>,

    /// Brush edge length in pixels.
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    pub brush_size: Option<u32>,

    /// Zoom change per arrow-key press.
    #[arg(long, value_name = "STEP", value_parser = parse_zoom_step)]
    pub zoom_step: Option<f64>,

    /// Keep the frame loop running after a fault instead of halting.
    #[arg(long)]
    pub resume_on_fault: bool,

    /// Ignore the saved settings file and start from defaults.
    #[arg(long)]
    pub reset_settings: bool,
}

fn parse_color(s: &str) -> Result<Rgba, String> {
    Rgba::parse(s).ok_or_else(|| format!("expected r,g,b,a but got '{}'", s))
}

fn parse_zoom_step(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("zoom step must be a positive number, got {}", s))
    }
}

impl CliArgs {
    /// Layer the command-line overrides on top of `base`.
    pub fn apply(&self, base: Settings) -> Settings {
        let mut s = if self.reset_settings { Settings::default() } else { base };
        if let Some(w) = self.width {
            s.canvas_width = w;
        }
        if let Some(h) = self.height {
            s.canvas_height = h;
        }
        if let Some(c) = self.brush_color {
            s.brush.color = c;
        }
        if let Some(size) = self.brush_size {
            s.brush.size = size;
        }
        if let Some(step) = self.zoom_step {
            s.zoom_step = step;
        }
        if self.resume_on_fault {
            s.fault_policy = FaultPolicy::Resume;
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let args = CliArgs::try_parse_from([
            "tjpaint",
            "--width",
            "32",
            "--brush-color",
            "0,0,255,0.5",
            "--resume-on-fault",
        ])
        .expect("valid args");
        let base = Settings {
            canvas_height: 77,
            ..Settings::default()
        };
        let s = args.apply(base);
        assert_eq!((s.canvas_width, s.canvas_height), (32, 77));
        assert_eq!(s.brush.color, Rgba::new(0, 0, 255, 0.5));
        assert_eq!(s.fault_policy, FaultPolicy::Resume);
    }

    #[test]
    fn reset_discards_saved_values() {
        let args = CliArgs::try_parse_from(["tjpaint", "--reset-settings"]).unwrap();
        let base = Settings {
            canvas_width: 5,
            ..Settings::default()
        };
        assert_eq!(args.apply(base), Settings::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(CliArgs::try_parse_from(["tjpaint", "--width", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["tjpaint", "--brush-color", "blue"]).is_err());
        assert!(CliArgs::try_parse_from(["tjpaint", "--zoom-step", "-1"]).is_err());
    }
}
