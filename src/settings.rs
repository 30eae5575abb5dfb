//! Game settings and preferences
//!
//! Stored as JSON next to the high score file. Layout detection lives here
//! too: the engine only ever sees the resulting field size.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Field;

/// Viewports at or below this size on either axis are treated as handheld
pub const HANDHELD_MAX_DIM: f32 = 768.0;
/// Fields never shrink below this on either axis
pub const MIN_FIELD_DIM: f32 = 200.0;

/// Playfield layout chosen for the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FieldLayout {
    #[default]
    Desktop,
    /// Tall field for phones held upright
    Portrait,
    /// Wide field for phones held sideways
    Landscape,
}

impl FieldLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldLayout::Desktop => "Desktop",
            FieldLayout::Portrait => "Portrait",
            FieldLayout::Landscape => "Landscape",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(FieldLayout::Desktop),
            "portrait" => Some(FieldLayout::Portrait),
            "landscape" => Some(FieldLayout::Landscape),
            _ => None,
        }
    }

    /// Pick a layout from viewport size and touch support
    pub fn detect(viewport_width: f32, viewport_height: f32, touch: bool) -> Self {
        let handheld = touch || viewport_width.min(viewport_height) <= HANDHELD_MAX_DIM;
        if !handheld {
            FieldLayout::Desktop
        } else if viewport_height > viewport_width {
            FieldLayout::Portrait
        } else {
            FieldLayout::Landscape
        }
    }

    /// Field for this layout inside the given viewport (room left for the HUD)
    pub fn field(&self, viewport_width: f32, viewport_height: f32) -> Field {
        let (w, h) = match self {
            FieldLayout::Desktop => (FIELD_WIDTH, FIELD_HEIGHT),
            FieldLayout::Portrait => (
                (viewport_width - 20.0).min(400.0),
                (viewport_height - 120.0).min(700.0),
            ),
            FieldLayout::Landscape => (
                (viewport_width - 20.0).min(700.0),
                (viewport_height - 80.0).min(400.0),
            ),
        };
        Field::new(w.max(MIN_FIELD_DIM), h.max(MIN_FIELD_DIM))
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Field layout
    pub layout: FieldLayout,
    /// Viewport the layout is fitted into
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Audio ===
    /// Sound on/off
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    /// Fixed RNG seed (random per launch when unset)
    pub seed: Option<u64>,
    /// Where the JSON score store lives
    pub high_score_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: FieldLayout::Desktop,
            viewport_width: FIELD_WIDTH,
            viewport_height: FIELD_HEIGHT,
            sound_enabled: true,
            master_volume: 0.8,
            seed: None,
            high_score_path: PathBuf::from("highscores.json"),
        }
    }
}

impl Settings {
    /// Field size the engine should run with
    pub fn field(&self) -> Field {
        self.layout.field(self.viewport_width, self.viewport_height)
    }

    /// Re-detect the layout for a new viewport
    pub fn fit_viewport(&mut self, width: f32, height: f32, touch: bool) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.layout = FieldLayout::detect(width, height, touch);
        log::info!("Layout {} for {}x{} viewport", self.layout.as_str(), width, height);
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
