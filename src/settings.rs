use std::fmt;
use std::path::{Path, PathBuf};

use crate::brush::{BrushConfig, BrushMode};
use crate::color::Rgba;
use crate::input::DEFAULT_ZOOM_STEP;
use crate::session::FaultPolicy;

pub const DEFAULT_CANVAS_SIZE: u32 = 100;

#[derive(Debug)]
pub enum SettingsError {
    NoConfigDir,
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoConfigDir => write!(f, "no settings directory available"),
            SettingsError::Io { path, source } => {
                write!(f, "settings file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::NoConfigDir => None,
        }
    }
}

/// Launch defaults that persist across sessions.  Artwork itself is never saved.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub brush: BrushConfig,
    /// Zoom change per arrow-key press.
    pub zoom_step: f64,
    pub fault_policy: FaultPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            brush: BrushConfig::default(),
            zoom_step: DEFAULT_ZOOM_STEP,
            fault_policy: FaultPolicy::Halt,
        }
    }
}

impl Settings {
    /// Path to the settings file.
    /// On Linux:   ~/.config/tjpaint/tjpaint_settings.cfg  (XDG_CONFIG_HOME respected)
    /// On Windows: %APPDATA%\TJPaint\tjpaint_settings.cfg
    /// On macOS:   ~/Library/Application Support/TJPaint/tjpaint_settings.cfg
    /// Fallback:   same directory as the executable.
    pub fn settings_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            let config_dir = std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
                    PathBuf::from(home).join(".config")
                })
                .join("tjpaint");
            return Some(config_dir.join("tjpaint_settings.cfg"));
        }
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var("APPDATA").or_else(|_| std::env::var("USERPROFILE")).ok()?;
            return Some(PathBuf::from(appdata).join("TJPaint").join("tjpaint_settings.cfg"));
        }
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var("HOME").ok()?;
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("TJPaint")
                    .join("tjpaint_settings.cfg"),
            );
        }
        #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
        {
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join("tjpaint_settings.cfg")))
        }
    }

    /// Load from the default location.  Missing or unreadable files give defaults.
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                crate::log_warn!("Could not read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_config_string()).map_err(io_err)
    }

    pub fn to_config_string(&self) -> String {
        format!(
            "canvas_width={}\n\
             canvas_height={}\n\
             brush_color={}\n\
             brush_size={}\n\
             brush_mode={}\n\
             zoom_step={}\n\
             fault_policy={}\n",
            self.canvas_width,
            self.canvas_height,
            self.brush.color.to_config_string(),
            self.brush.size,
            self.brush.mode.as_str(),
            self.zoom_step,
            self.fault_policy.as_str(),
        )
    }

    /// Parse `key=value` lines.  Unknown keys and bad values are skipped and
    /// the default kept.
    pub fn parse(content: &str) -> Self {
        let mut s = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else { continue };
            let key = key.trim();
            let val = val.trim();
            match key {
                "canvas_width" => {
                    if let Some(v) = parse_dimension(val) {
                        s.canvas_width = v;
                    }
                }
                "canvas_height" => {
                    if let Some(v) = parse_dimension(val) {
                        s.canvas_height = v;
                    }
                }
                "brush_color" => {
                    if let Some(c) = Rgba::parse(val) {
                        s.brush.color = c;
                    }
                }
                "brush_size" => {
                    if let Ok(v) = val.parse::<u32>()
                        && v > 0
                    {
                        s.brush.size = v;
                    }
                }
                "brush_mode" => {
                    if let Some(m) = BrushMode::parse(val) {
                        s.brush.mode = m;
                    }
                }
                "zoom_step" => {
                    if let Ok(v) = val.parse::<f64>()
                        && v.is_finite()
                        && v > 0.0
                    {
                        s.zoom_step = v;
                    }
                }
                "fault_policy" => {
                    if let Some(p) = FaultPolicy::parse(val) {
                        s.fault_policy = p;
                    }
                }
                _ => {
                    crate::log_warn!("Ignoring unknown settings key '{}'", key);
                }
            }
        }
        s
    }
}

fn parse_dimension(val: &str) -> Option<u32> {
    val.parse::<u32>().ok().filter(|v| *v > 0)
}
