//! Persisted key mapping
//!
//! Devices without a full keyboard remap their hardware buttons to virtual
//! keys. The mapping is kept in a small text store of `NAME=INTEGER` lines:
//!
//! ```text
//! # hardware button 0xC1 -> modifier 1 + space
//! KEY:C1=536936641
//! ORIENTATION=0
//! ALLOWVIRTUALKEYS=1
//! ```
//!
//! A `KEY:` entry packs `button_code | modifiers << 16 | virtual_key << 24`;
//! only button codes below 256 are kept. The same configuration can also be
//! stored as a compact binary snapshot (postcard).
//!
//! The configuration is an ordinary value: load it once at startup and pass
//! it to whatever needs it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::display::Orientation;

/// Number of remappable button codes.
pub const TABLE_SIZE: usize = 256;

const KEY_PREFIX: &str = "KEY:";

/// Remapping of one hardware button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonMapping {
    pub key_modifiers: u8,
    pub virtual_key_code: u8,
}

impl ButtonMapping {
    pub const UNMAPPED: ButtonMapping = ButtonMapping {
        key_modifiers: 0xFF,
        virtual_key_code: 0xFF,
    };

    pub const fn new(key_modifiers: u8, virtual_key_code: u8) -> Self {
        Self {
            key_modifiers,
            virtual_key_code,
        }
    }

    pub fn is_mapped(&self) -> bool {
        *self != Self::UNMAPPED
    }
}

impl Default for ButtonMapping {
    fn default() -> Self {
        Self::UNMAPPED
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Line {line}: expected NAME=VALUE")]
    Syntax { line: usize },
    #[error("Line {line}: {key} has a non-integer value")]
    InvalidValue {
        line: usize,
        key: heapless::String<32>,
    },
    #[error("Snapshot error: {0}")]
    Snapshot(postcard::Error),
}

/// Pack a button code and its mapping into a stored `KEY:` value.
pub fn pack_key_value(code: u16, mapping: ButtonMapping) -> u32 {
    code as u32 | (mapping.key_modifiers as u32) << 16 | (mapping.virtual_key_code as u32) << 24
}

/// Split a stored `KEY:` value into button code and mapping.
pub fn unpack_key_value(value: u32) -> (u16, ButtonMapping) {
    (
        (value & 0xFFFF) as u16,
        ButtonMapping::new((value >> 16) as u8, (value >> 24) as u8),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapConfig {
    mappings: [ButtonMapping; TABLE_SIZE],
    pub orientation: Orientation,
    pub allow_virtual_keys: bool,
    pub hide_task_bar: bool,
    pub double_pixels: bool,
    pub dont_turn_off_device: bool,
}

impl Default for KeyMapConfig {
    fn default() -> Self {
        Self {
            mappings: [ButtonMapping::UNMAPPED; TABLE_SIZE],
            orientation: Orientation::Normal,
            allow_virtual_keys: false,
            hide_task_bar: false,
            double_pixels: false,
            dont_turn_off_device: false,
        }
    }
}

/// Binary form: only the mapped entries of the table are stored.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    orientation: Orientation,
    allow_virtual_keys: bool,
    hide_task_bar: bool,
    double_pixels: bool,
    dont_turn_off_device: bool,
    mappings: Vec<(u8, ButtonMapping)>,
}

impl KeyMapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text store.
    ///
    /// Blank lines and `#` comments are skipped, unknown names are ignored.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let entry = raw.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let Some((name, value)) = entry.split_once('=') else {
                return Err(ConfigError::Syntax { line });
            };
            let name = name.trim();
            let value = value
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue {
                    line,
                    key: truncated(name),
                })?;
            config.apply_entry(name, value);
        }
        debug!(
            "Loaded key map: {} mapped button(s), {:?}",
            config.mapped().count(),
            config.orientation
        );
        Ok(config)
    }

    /// Apply one `NAME=VALUE` entry.
    pub fn apply_entry(&mut self, name: &str, value: i64) {
        if name.starts_with(KEY_PREFIX) {
            let (code, mapping) = unpack_key_value(value as u32);
            match self.mappings.get_mut(code as usize) {
                Some(slot) => *slot = mapping,
                None => warn!("Ignoring {}: button code {} out of range", name, code),
            }
            return;
        }

        let flag = value != 0;
        match name {
            "ORIENTATION" => match Orientation::from_config_code(value as i32) {
                Some(orientation) => self.orientation = orientation,
                None => warn!("Unknown orientation code {}", value),
            },
            "ALLOWVIRTUALKEYS" => self.allow_virtual_keys = flag,
            "HIDETASKBAR" => self.hide_task_bar = flag,
            "DOUBLEPIXELS" => self.double_pixels = flag,
            "DONTTURNOFFDEVICE" => self.dont_turn_off_device = flag,
            _ => debug!("Ignoring unknown key map entry {}", name),
        }
    }

    /// Render the text store; [`parse`](Self::parse) reads it back.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        if let Some(code) = self.orientation.config_code() {
            let _ = writeln!(out, "ORIENTATION={}", code);
        }
        let _ = writeln!(out, "ALLOWVIRTUALKEYS={}", self.allow_virtual_keys as i32);
        let _ = writeln!(out, "HIDETASKBAR={}", self.hide_task_bar as i32);
        let _ = writeln!(out, "DOUBLEPIXELS={}", self.double_pixels as i32);
        let _ = writeln!(out, "DONTTURNOFFDEVICE={}", self.dont_turn_off_device as i32);
        for (code, mapping) in self.mapped() {
            let _ = writeln!(
                out,
                "{}{:02X}={}",
                KEY_PREFIX,
                code,
                pack_key_value(code as u16, mapping)
            );
        }
        out
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let snapshot = Snapshot {
            orientation: self.orientation,
            allow_virtual_keys: self.allow_virtual_keys,
            hide_task_bar: self.hide_task_bar,
            double_pixels: self.double_pixels,
            dont_turn_off_device: self.dont_turn_off_device,
            mappings: self.mapped().collect(),
        };
        postcard::to_allocvec(&snapshot).map_err(ConfigError::Snapshot)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let snapshot: Snapshot = postcard::from_bytes(bytes).map_err(ConfigError::Snapshot)?;
        let mut config = Self {
            orientation: snapshot.orientation,
            allow_virtual_keys: snapshot.allow_virtual_keys,
            hide_task_bar: snapshot.hide_task_bar,
            double_pixels: snapshot.double_pixels,
            dont_turn_off_device: snapshot.dont_turn_off_device,
            ..Self::default()
        };
        for (code, mapping) in snapshot.mappings {
            config.set_mapping(code, mapping);
        }
        Ok(config)
    }

    pub fn mapping(&self, code: u8) -> ButtonMapping {
        self.mappings[code as usize]
    }

    pub fn set_mapping(&mut self, code: u8, mapping: ButtonMapping) {
        self.mappings[code as usize] = mapping;
    }

    /// Mapping for a hardware button, if it has one.
    pub fn remap(&self, code: u16) -> Option<ButtonMapping> {
        self.mappings
            .get(code as usize)
            .copied()
            .filter(ButtonMapping::is_mapped)
    }

    /// Mapped entries in button code order.
    pub fn mapped(&self) -> impl Iterator<Item = (u8, ButtonMapping)> + '_ {
        self.mappings
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_mapped())
            .map(|(code, m)| (code as u8, *m))
    }
}

fn truncated(name: &str) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_matches_the_stored_layout() {
        let mapping = ButtonMapping::new(0x01, 0x20);
        let packed = pack_key_value(0xC1, mapping);
        assert_eq!(packed, 0x2001_00C1);
        assert_eq!(unpack_key_value(packed), (0xC1, mapping));
        assert_eq!(unpack_key_value(0xFFFF_FFFF).1, ButtonMapping::UNMAPPED);
    }

    #[test]
    fn parses_keys_flags_and_orientation() {
        let text = "\
# comment

KEY:C1=536936641
KEY:BIG=1000
ORIENTATION=0
ALLOWVIRTUALKEYS=1
DOUBLEPIXELS=0
SOMETHINGELSE=4
";
        let config = KeyMapConfig::parse(text);
        let Ok(config) = config else {
            panic!("parse failed: {:?}", config.err());
        };
        assert_eq!(config.mapping(0xC1), ButtonMapping::new(0x01, 0x20));
        assert_eq!(config.remap(0xC1), Some(ButtonMapping::new(0x01, 0x20)));
        assert_eq!(config.remap(0x10), None);
        assert_eq!(config.remap(0x400), None);
        // Code 1000 is out of the table.
        assert_eq!(config.mapped().count(), 1);
        assert_eq!(config.orientation, Orientation::Rotate90Cw);
        assert!(config.allow_virtual_keys);
        assert!(!config.double_pixels);
    }

    #[test]
    fn unknown_orientation_keeps_the_default() {
        let config = KeyMapConfig::parse("ORIENTATION=7").ok();
        assert_eq!(config.map(|c| c.orientation), Some(Orientation::Normal));
    }

    #[test]
    fn reports_bad_lines() {
        assert_eq!(
            KeyMapConfig::parse("ORIENTATION=1\nnonsense"),
            Err(ConfigError::Syntax { line: 2 })
        );
        assert!(matches!(
            KeyMapConfig::parse("HIDETASKBAR=yes"),
            Err(ConfigError::InvalidValue { line: 1, .. })
        ));
    }

    #[test]
    fn text_and_snapshot_round_trip() {
        let mut config = KeyMapConfig::new();
        config.set_mapping(3, ButtonMapping::new(0, 0x1B));
        config.set_mapping(200, ButtonMapping::new(2, 0x0D));
        config.orientation = Orientation::Rotate90Ccw;
        config.hide_task_bar = true;

        assert_eq!(KeyMapConfig::parse(&config.to_text()).ok(), Some(config.clone()));

        let bytes = config.to_bytes();
        let Ok(bytes) = bytes else {
            panic!("encode failed");
        };
        assert_eq!(KeyMapConfig::from_bytes(&bytes).ok(), Some(config));
        assert!(KeyMapConfig::from_bytes(&[0xFF]).is_err());
    }
}
