use egui::Color32;

/// Straight (non-premultiplied) RGBA color.  Channels are 0-255, alpha is 0.0-1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    pub const GRAY: Rgba = Rgba::opaque(128, 128, 128);
    pub const DARK_GRAY: Rgba = Rgba::opaque(169, 169, 169);
    pub const GREEN: Rgba = Rgba::opaque(0, 128, 0);
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color from unvalidated numbers: channels clamp to 0-255, alpha
    /// clamps to 0-1 and a NaN alpha becomes fully opaque.
    pub fn from_raw(r: i64, g: i64, b: i64, a: f64) -> Self {
        let channel = |v: i64| v.clamp(0, 255) as u8;
        let a = if a.is_nan() { 1.0 } else { a.clamp(0.0, 1.0) as f32 };
        Self::new(channel(r), channel(g), channel(b), a)
    }

    /// Parse "r,g,b,a" (same layout the settings file uses).
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return None;
        }
        let r = parts[0].trim().parse::<i64>().ok()?;
        let g = parts[1].trim().parse::<i64>().ok()?;
        let b = parts[2].trim().parse::<i64>().ok()?;
        let a = parts[3].trim().parse::<f64>().ok()?;
        Some(Self::from_raw(r, g, b, a))
    }

    pub fn to_config_string(&self) -> String {
        format!("{},{},{},{}", self.r, self.g, self.b, self.a)
    }

    pub fn to_color32(self) -> Color32 {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
