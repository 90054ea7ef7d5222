use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::brush::{Brush, BrushSet, DEFAULT_BRUSH_RADIUS};
use crate::geometry::{CanvasBounds, Color};
use crate::palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "daub";
const APP_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_CANVAS_WIDTH: u32 = 750;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 700;

/// Application-level settings from `config.json`. Colors are `#RRGGBB`
/// strings; every field is optional and falls back to the built-in
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub canvas_width: Option<u32>,
    #[serde(default)]
    pub canvas_height: Option<u32>,
    #[serde(default)]
    pub brush_radius: Option<i32>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub palette: Option<Vec<String>>,
}

impl AppConfig {
    pub fn canvas_bounds(&self) -> CanvasBounds {
        CanvasBounds::new(
            self.canvas_width.unwrap_or(DEFAULT_CANVAS_WIDTH),
            self.canvas_height.unwrap_or(DEFAULT_CANVAS_HEIGHT),
        )
    }

    pub fn brush_set(&self) -> BrushSet {
        let primary = resolve_color(self.primary_color.as_deref(), Color::BLACK, "primary_color");
        let secondary =
            resolve_color(self.secondary_color.as_deref(), Color::WHITE, "secondary_color");
        let radius = self.brush_radius.unwrap_or(DEFAULT_BRUSH_RADIUS);

        BrushSet::new(Brush::new(primary, radius), Brush::new(secondary, radius))
    }

    pub fn palette(&self) -> Palette {
        let entries = match &self.palette {
            Some(entries) => entries,
            None => return Palette::default(),
        };

        let mut colors = Vec::new();
        for entry in entries {
            match parse_hex_rgb(entry) {
                Some(color) => colors.push(color),
                None => tracing::warn!(value = %entry, "ignoring unparsable palette color"),
            }
        }

        if colors.is_empty() {
            tracing::warn!("palette override has no usable colors; using defaults");
            return Palette::default();
        }
        Palette::new(colors)
    }
}

fn resolve_color(value: Option<&str>, fallback: Color, field: &'static str) -> Color {
    let raw = match value {
        Some(raw) => raw,
        None => return fallback,
    };
    match parse_hex_rgb(raw) {
        Some(color) => color,
        None => {
            tracing::warn!(value = %raw, field, "ignoring unparsable brush color");
            fallback
        }
    }
}

fn parse_hex_rgb(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }

    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::new(red, green, blue))
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
