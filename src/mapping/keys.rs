//! Key names accepted in button mappings.
//!
//! A mapping is a comma separated sequence of key presses, each press a dash
//! separated chord such as `ctrl-shift-a`. Names are case-insensitive.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Win,
    RCtrl,
    RShift,
    RAlt,
    RWin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum MediaCode {
    Play,
    Stop,
    Next,
    #[strum(to_string = "prev", serialize = "previous")]
    Previous,
    Mute,
    #[strum(to_string = "volup", serialize = "volumeup")]
    VolumeUp,
    #[strum(to_string = "voldown", serialize = "volumedown")]
    VolumeDown,
    BrightnessUp,
    BrightnessDown,
}

impl MediaCode {
    /// Media keys the single-layer 0x8890 firmware can send.
    pub fn supported_on_8890(&self) -> bool {
        matches!(
            self,
            MediaCode::Play
                | MediaCode::Previous
                | MediaCode::Next
                | MediaCode::Mute
                | MediaCode::VolumeUp
                | MediaCode::VolumeDown
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum MouseAction {
    Click,
    RClick,
    MClick,
    WheelUp,
    WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum WellKnownCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    #[strum(serialize = "0")]
    N0,
    #[strum(serialize = "1")]
    N1,
    #[strum(serialize = "2")]
    N2,
    #[strum(serialize = "3")]
    N3,
    #[strum(serialize = "4")]
    N4,
    #[strum(serialize = "5")]
    N5,
    #[strum(serialize = "6")]
    N6,
    #[strum(serialize = "7")]
    N7,
    #[strum(serialize = "8")]
    N8,
    #[strum(serialize = "9")]
    N9,
    Enter,
    #[strum(to_string = "esc", serialize = "escape")]
    Escape,
    Backspace,
    Tab,
    Space,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    Grave,
    Comma,
    Dot,
    Slash,
    CapsLock,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    PrintScreen,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    Right,
    Left,
    Down,
    Up,
    NumLock,
}

/// A single chord member of a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Modifier(Modifier),
    Media(MediaCode),
    Mouse(MouseAction),
    Code(WellKnownCode),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key - {0}")]
    UnknownKey(String),

    #[error("too many keys: {count} presses, at most {max} supported")]
    TooManyKeys { count: usize, max: usize },

    #[error("delay too high: {delay} ms, at most {max} ms supported")]
    DelayTooHigh { delay: u16, max: u16 },

    #[error("unsupported media key for 8890 - {0}")]
    UnsupportedMedia(String),
}

impl Key {
    /// Modifiers are tried first, then media keys, regular keys and mouse actions.
    pub fn parse(name: &str) -> Result<Key, KeyError> {
        if let Ok(m) = Modifier::from_str(name) {
            return Ok(Key::Modifier(m));
        }
        if let Ok(m) = MediaCode::from_str(name) {
            return Ok(Key::Media(m));
        }
        if let Ok(c) = WellKnownCode::from_str(name) {
            return Ok(Key::Code(c));
        }
        if let Ok(a) = MouseAction::from_str(name) {
            return Ok(Key::Mouse(a));
        }
        Err(KeyError::UnknownKey(name.to_string()))
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s)
    }
}
