//! Checks a mapping against what a given macropad model can store.

use tracing::warn;

use super::keys::{Key, KeyError};
use super::{Button, Macropad, Mapping, MappingError, MAX_LAYERS};

pub const VENDOR_ID: u16 = 0x1189;
pub const PRODUCT_ID_8840: u16 = 0x8840;
pub const PRODUCT_ID_8842: u16 = 0x8842;
pub const PRODUCT_ID_8890: u16 = 0x8890;

pub const MAX_KEY_PRESSES_884X: usize = 18;
pub const MAX_KEY_PRESSES_8890: usize = 1;
/// No device selected: accept anything the file format can hold.
pub const MAX_KEY_PRESSES_ANY: usize = 0xff;
/// Milliseconds.
pub const MAX_DELAY: u16 = 6000;

/// LED modes offered by a product, as `(mode, label)`.
pub fn led_modes(pid: u16) -> Vec<(u8, &'static str)> {
    if pid == PRODUCT_ID_8890 {
        vec![(0, "Off"), (1, "Last Pushed"), (2, "Cycle Colors")]
    } else {
        vec![
            (0, "Off"),
            (1, "Always On (Color)"),
            (2, "Shock (Color)"),
            (3, "Shock2 (Color)"),
            (4, "Light Key (Color)"),
            (5, "White Always On"),
        ]
    }
}

fn max_key_presses(pid: Option<u16>) -> Result<usize, MappingError> {
    match pid {
        None => Ok(MAX_KEY_PRESSES_ANY),
        Some(PRODUCT_ID_8840 | PRODUCT_ID_8842) => Ok(MAX_KEY_PRESSES_884X),
        Some(PRODUCT_ID_8890) => Ok(MAX_KEY_PRESSES_8890),
        Some(other) => Err(MappingError::UnknownProduct(other)),
    }
}

impl Mapping {
    /// Validates layout consistency and every key assignment.
    ///
    /// With `pid` set, per-product limits apply (key press count, delay,
    /// media keys, LED modes).
    pub fn validate(cfg: &Macropad, pid: Option<u16>) -> Result<(), MappingError> {
        let max_presses = max_key_presses(pid)?;

        if cfg.layers.is_empty() || cfg.layers.len() > MAX_LAYERS {
            return Err(MappingError::LayerCount(cfg.layers.len()));
        }

        for (i, layer) in cfg.layers.iter().enumerate() {
            let layer_no = i + 1;
            if layer.buttons.len() != usize::from(cfg.device.rows) {
                return Err(MappingError::RowsMismatch { layer: layer_no });
            }
            for (j, row) in layer.buttons.iter().enumerate() {
                if row.len() != usize::from(cfg.device.cols) {
                    return Err(MappingError::ColsMismatch { layer: layer_no, row: j + 1 });
                }
                for (k, btn) in row.iter().enumerate() {
                    validate_key_mapping(btn, max_presses, pid).map_err(|source| {
                        MappingError::Key {
                            location: format!("layer {} row {} btn {}", layer_no, j + 1, k + 1),
                            source,
                        }
                    })?;
                }
            }

            if layer.knobs.len() != usize::from(cfg.device.knobs) {
                return Err(MappingError::KnobsMismatch { layer: layer_no });
            }
            for (k, knob) in layer.knobs.iter().enumerate() {
                for (part, btn) in [("ccw", &knob.ccw), ("press", &knob.press), ("cw", &knob.cw)] {
                    validate_key_mapping(btn, max_presses, pid).map_err(|source| {
                        MappingError::Key {
                            location: format!("layer {} knob {} {}", layer_no, k + 1, part),
                            source,
                        }
                    })?;
                }
            }
        }

        if let (Some(pid), Some(led)) = (pid, cfg.led_settings.as_ref()) {
            if !led_modes(pid).iter().any(|(mode, _)| *mode == led.mode) {
                return Err(MappingError::LedMode { mode: led.mode, pid });
            }
            if led.layer == 0 || usize::from(led.layer) > MAX_LAYERS {
                return Err(MappingError::LedLayer(led.layer));
            }
        }

        Ok(())
    }
}

fn validate_key_mapping(
    btn: &Button,
    max_presses: usize,
    pid: Option<u16>,
) -> Result<(), KeyError> {
    // unassigned
    if btn.mapping.trim().is_empty() {
        return Ok(());
    }

    let presses: Vec<&str> = btn.mapping.split(',').collect();
    if presses.len() > max_presses {
        return Err(KeyError::TooManyKeys { count: presses.len(), max: max_presses });
    }

    let single_chord_device = max_presses == MAX_KEY_PRESSES_8890;
    if single_chord_device {
        if btn.delay > 0 {
            warn!(delay = btn.delay, "0x8890 doesn't support delay, it will be ignored");
        }
    } else if btn.delay > MAX_DELAY {
        return Err(KeyError::DelayTooHigh { delay: btn.delay, max: MAX_DELAY });
    }

    for press in &presses {
        for name in press.split('-').map(str::trim) {
            let key = Key::parse(name)?;
            if let Key::Media(media) = key {
                if pid == Some(PRODUCT_ID_8890) && !media.supported_on_8890() {
                    return Err(KeyError::UnsupportedMedia(name.to_string()));
                }
            }
        }
    }
    Ok(())
}
