//! The editor's key-mapping file (`mapping.ron`): model, persistence and validation.

pub mod keys;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use ron::ser::{to_string_pretty, PrettyConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use keys::{Key, KeyError};
pub use validate::{led_modes, MAX_DELAY, MAX_KEY_PRESSES_884X, MAX_KEY_PRESSES_8890, VENDOR_ID};

pub const DEFAULT_MAPPING_FILE: &str = "mapping.ron";
pub const MAX_LAYERS: usize = 3;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to access mapping file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load mapping {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("serialization failed: {0}")]
    Serialize(#[from] ron::Error),

    #[error("unknown product id 0x{0:04x}")]
    UnknownProduct(u16),

    #[error("number of layers must be > 0 and < 4, got {0}")]
    LayerCount(usize),

    #[error("rows mismatch at layer {layer}")]
    RowsMismatch { layer: usize },

    #[error("cols mismatch at layer {layer} row {row}")]
    ColsMismatch { layer: usize, row: usize },

    #[error("knobs mismatch at layer {layer}")]
    KnobsMismatch { layer: usize },

    #[error("{location}: {source}")]
    Key {
        location: String,
        #[source]
        source: KeyError,
    },

    #[error("LED mode {mode} is not available on 0x{pid:04x}")]
    LedMode { mode: u8, pid: u16 },

    #[error("LED layer must be between 1 and 3, got {0}")]
    LedLayer(u8),
}

/// Mapping for a button or a single knob action
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Button {
    /// Delay between key presses, in milliseconds.
    pub delay: u16,
    pub mapping: String,
}

impl Button {
    pub fn new(mapping: impl Into<String>) -> Self {
        Self { delay: 0, mapping: mapping.into() }
    }
}

/// Mapping for a rotary encoder
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Knob {
    pub ccw: Button,
    pub press: Button,
    pub cw: Button,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Indexed `[row][col]`.
    pub buttons: Vec<Vec<Button>>,
    pub knobs: Vec<Knob>,
}

impl Layer {
    pub fn new(rows: u8, cols: u8, knobs: u8) -> Self {
        Self {
            buttons: vec![vec![Button::default(); cols.into()]; rows.into()],
            knobs: vec![Knob::default(); knobs.into()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    Clockwise,
    CounterClockwise,
    UpsideDown,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LedSettings {
    pub mode: u8,
    pub layer: u8,
    pub color: LedColor,
}

impl Default for LedSettings {
    fn default() -> Self {
        Self { mode: 1, layer: 1, color: LedColor::Cyan }
    }
}

fn default_layers_count() -> u8 {
    MAX_LAYERS as u8
}

/// Physical layout of the macropad
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Device {
    pub orientation: Orientation,
    pub rows: u8,
    pub cols: u8,
    pub knobs: u8,
    #[serde(default = "default_layers_count")]
    pub layers: u8,
}

/// Mapping configuration of a macropad
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Macropad {
    pub device: Device,
    pub layers: Vec<Layer>,
    pub led_settings: Option<LedSettings>,
}

impl Macropad {
    /// Empty mapping with three layers and the default LED settings.
    pub fn new(rows: u8, cols: u8, knobs: u8) -> Self {
        let layers = default_layers_count();
        Self {
            device: Device { orientation: Orientation::Normal, rows, cols, knobs, layers },
            layers: vec![Layer::new(rows, cols, knobs); layers.into()],
            led_settings: Some(LedSettings::default()),
        }
    }

    /// Changes the layout, keeping every assignment whose position still exists.
    pub fn resize(&mut self, rows: u8, cols: u8, knobs: u8, layers: u8) {
        let old = std::mem::take(&mut self.layers);
        self.layers = (0..usize::from(layers))
            .map(|i| {
                let mut layer = Layer::new(rows, cols, knobs);
                if let Some(prev) = old.get(i) {
                    for (row, prev_row) in layer.buttons.iter_mut().zip(&prev.buttons) {
                        for (btn, prev_btn) in row.iter_mut().zip(prev_row) {
                            *btn = prev_btn.clone();
                        }
                    }
                    for (knob, prev_knob) in layer.knobs.iter_mut().zip(&prev.knobs) {
                        *knob = prev_knob.clone();
                    }
                }
                layer
            })
            .collect();
        self.device.rows = rows;
        self.device.cols = cols;
        self.device.knobs = knobs;
        self.device.layers = layers;
    }
}

impl Default for Macropad {
    fn default() -> Self {
        Macropad::new(2, 3, 1)
    }
}

/// Reading, writing and checking mapping files.
pub struct Mapping;

impl Mapping {
    fn pretty_config() -> PrettyConfig {
        PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false)
    }

    /// Loads a mapping, writing the default one first if the file is missing.
    pub fn read(path: &Path) -> Result<Macropad, MappingError> {
        if !path.exists() {
            info!(path = %path.display(), "mapping file missing, creating default");
            Self::save(&Macropad::default(), path)?;
        }
        let content = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content)
            .map_err(|source| MappingError::Parse { path: path.to_path_buf(), source })
    }

    pub fn to_pretty_string(config: &Macropad) -> Result<String, MappingError> {
        Ok(to_string_pretty(config, Self::pretty_config())?)
    }

    pub fn save(config: &Macropad, path: &Path) -> Result<(), MappingError> {
        let s = Self::to_pretty_string(config)?;
        let io_err = |source| MappingError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, s).map_err(io_err)
    }
}
