//! Configuration and color scheme management for docklayout.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.docklayout/config.toml`
//! - The tool catalog the window can open panels from
//! - Built-in color schemes for the terminal viewer
//!
//! # Configuration File
//!
//! ```toml
//! # Where layout files live (default: ~/.docklayout/layouts)
//! layouts_dir = "/home/me/layouts"
//!
//! # Restored by `view` when no file is given
//! default_layout = "default.json"
//!
//! # Delay before the first restore, letting the window settle
//! restore_delay_ms = 1000
//!
//! titles_visible = true
//!
//! # Color scheme: default, nord, solarized-dark
//! color_scheme = "nord"
//!
//! [window]
//! width = 1000
//! height = 600
//!
//! [[tools]]
//! id = "outline"
//! name = "Outline"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout directory (defaults to `layouts` under the config directory)
    pub layouts_dir: Option<PathBuf>,
    /// Layout restored when none is named
    pub default_layout: String,
    /// Deferred restore delay
    pub restore_delay_ms: u64,
    /// Whether dock title bars start out shown
    pub titles_visible: bool,
    /// Color scheme name
    pub color_scheme: String,
    /// Logical window size
    pub window: WindowConfig,
    /// Tools the window can open
    pub tools: Vec<ToolConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layouts_dir: None,
            default_layout: "default.json".to_string(),
            restore_delay_ms: 1000,
            titles_visible: true,
            color_scheme: "default".to_string(),
            window: WindowConfig::default(),
            tools: default_tools(),
        }
    }
}

/// Logical window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub id: String,
    pub name: String,
}

fn default_tools() -> Vec<ToolConfig> {
    [("outline", "Outline"), ("body", "Body"), ("log", "Log"), ("find", "Find"), ("tags", "Tags")]
        .into_iter()
        .map(|(id, name)| ToolConfig {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

impl Config {
    /// Load configuration from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| toml::from_str::<Config>(&content).map_err(anyhow::Error::from));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Directory holding layout files
    pub fn layouts_dir(&self) -> PathBuf {
        match &self.layouts_dir {
            Some(dir) => dir.clone(),
            None => config_dir()
                .map(|dir| dir.join("layouts"))
                .unwrap_or_else(|| PathBuf::from("layouts")),
        }
    }

    /// Resolve a layout name given on the command line
    ///
    /// Absolute paths and relative paths that exist are used as given,
    /// anything else is looked up in the layout directory.
    pub fn resolve_layout(&self, name: &Path) -> PathBuf {
        if name.is_absolute() || name.exists() {
            name.to_path_buf()
        } else {
            self.layouts_dir().join(name)
        }
    }

    pub fn default_layout_path(&self) -> PathBuf {
        self.layouts_dir().join(&self.default_layout)
    }

    /// `(id, display name)` pairs for the tool registry
    pub fn tool_catalog(&self) -> Vec<(String, String)> {
        self.tools.iter().map(|t| (t.id.clone(), t.name.clone())).collect()
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub name: String,

    // Dock frames
    pub border: Color,
    pub title_fg: Color,

    // Tab strips
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_fg: Color,

    // Body text
    pub text_fg: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl ColorScheme {
    /// Default color scheme
    pub fn default_scheme() -> Self {
        Self {
            name: "default".to_string(),
            border: Color::new(80, 80, 80),
            title_fg: Color::new(255, 255, 255),
            tab_active_bg: Color::new(60, 60, 180),
            tab_active_fg: Color::new(255, 255, 255),
            tab_inactive_fg: Color::new(150, 150, 150),
            text_fg: Color::new(180, 180, 180),
            status_bar_bg: Color::new(0, 100, 0),
            status_bar_fg: Color::new(255, 255, 255),
        }
    }

    /// Nord scheme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            border: Color::new(67, 76, 94),
            title_fg: Color::new(236, 239, 244),
            tab_active_bg: Color::new(94, 129, 172),
            tab_active_fg: Color::new(236, 239, 244),
            tab_inactive_fg: Color::new(216, 222, 233),
            text_fg: Color::new(216, 222, 233),
            status_bar_bg: Color::new(59, 66, 82),
            status_bar_fg: Color::new(216, 222, 233),
        }
    }

    /// Solarized Dark scheme
    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark".to_string(),
            border: Color::new(7, 54, 66),
            title_fg: Color::new(253, 246, 227),
            tab_active_bg: Color::new(38, 139, 210),
            tab_active_fg: Color::new(253, 246, 227),
            tab_inactive_fg: Color::new(101, 123, 131),
            text_fg: Color::new(147, 161, 161),
            status_bar_bg: Color::new(7, 54, 66),
            status_bar_fg: Color::new(147, 161, 161),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nord" => Self::nord(),
            "solarized-dark" | "solarized_dark" => Self::solarized_dark(),
            _ => Self::default_scheme(),
        }
    }
}

/// `~/.docklayout`
pub fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".docklayout"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
