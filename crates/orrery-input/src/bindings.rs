//! Keyboard shortcuts for the viewer's UI commands.
//!
//! [`KeyBindings`] maps physical keys to [`Command`]s. Defaults can be
//! overridden from the config's `input.keybindings` table, which maps command
//! names (`"toggle_stars"`, `"view_body_4"`) to key names (`"KeyS"`).

use std::collections::HashMap;

use tracing::warn;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Number of `view_body_N` slots, one per catalog entry.
pub const BODY_SLOTS: usize = 9;

/// A UI action triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ToggleRotation,
    ToggleOrbits,
    ToggleStars,
    ToggleClouds,
    ToggleSolarSystem,
    ResetView,
    ZoomIn,
    ZoomOut,
    /// Focus the body at this catalog index (0 is the sun).
    ViewBody(usize),
    CloseInfo,
}

impl Command {
    /// Parse a command name as used in the config file.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "toggle_rotation" => Self::ToggleRotation,
            "toggle_orbits" => Self::ToggleOrbits,
            "toggle_stars" => Self::ToggleStars,
            "toggle_clouds" => Self::ToggleClouds,
            "toggle_solar_system" => Self::ToggleSolarSystem,
            "reset_view" => Self::ResetView,
            "zoom_in" => Self::ZoomIn,
            "zoom_out" => Self::ZoomOut,
            "close_info" => Self::CloseInfo,
            other => {
                let slot = other.strip_prefix("view_body_")?.parse().ok()?;
                if slot >= BODY_SLOTS {
                    return None;
                }
                Self::ViewBody(slot)
            }
        };
        Some(command)
    }
}

/// Physical key to command table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<PhysicalKey, Command>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        const DIGITS: [KeyCode; BODY_SLOTS] = [
            KeyCode::Digit0,
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
        ];

        let mut map = HashMap::from([
            (KeyCode::Space, Command::ToggleRotation),
            (KeyCode::KeyO, Command::ToggleOrbits),
            (KeyCode::KeyS, Command::ToggleStars),
            (KeyCode::KeyC, Command::ToggleClouds),
            (KeyCode::Tab, Command::ToggleSolarSystem),
            (KeyCode::KeyR, Command::ResetView),
            (KeyCode::Equal, Command::ZoomIn),
            (KeyCode::NumpadAdd, Command::ZoomIn),
            (KeyCode::Minus, Command::ZoomOut),
            (KeyCode::NumpadSubtract, Command::ZoomOut),
            (KeyCode::Escape, Command::CloseInfo),
        ]);
        for (slot, code) in DIGITS.into_iter().enumerate() {
            map.insert(code, Command::ViewBody(slot));
        }

        Self {
            map: map
                .into_iter()
                .map(|(code, command)| (PhysicalKey::Code(code), command))
                .collect(),
        }
    }
}

impl KeyBindings {
    /// Defaults with `overrides` (command name -> key name) applied. An
    /// override rebinds the command: its default keys stop triggering it.
    /// Unknown names are skipped with a warning.
    #[must_use]
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (command_name, key_name) in overrides {
            let Some(command) = Command::from_name(command_name) else {
                warn!(command = %command_name, "unknown command in keybindings");
                continue;
            };
            let Some(code) = parse_key_code(key_name) else {
                warn!(key = %key_name, command = %command_name, "unknown key in keybindings");
                continue;
            };
            bindings.map.retain(|_, bound| *bound != command);
            bindings.map.insert(PhysicalKey::Code(code), command);
        }
        bindings
    }

    #[must_use]
    pub fn command_for(&self, key: PhysicalKey) -> Option<Command> {
        self.map.get(&key).copied()
    }
}

/// Parse a winit [`KeyCode`] from its variant name (e.g. `"KeyW"`, `"Digit3"`).
#[must_use]
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0,
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    if let Some(letter) = name.strip_prefix("Key") {
        let mut chars = letter.chars();
        if let (Some(c @ 'A'..='Z'), None) = (chars.next(), chars.next()) {
            return Some(LETTERS[(c as u8 - b'A') as usize]);
        }
    }
    if let Some(digit) = name.strip_prefix("Digit") {
        let index: usize = digit.parse().ok()?;
        return DIGITS.get(index).copied();
    }

    let code = match name {
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "Equal" => KeyCode::Equal,
        "Minus" => KeyCode::Minus,
        "NumpadAdd" => KeyCode::NumpadAdd,
        "NumpadSubtract" => KeyCode::NumpadSubtract,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.command_for(key(KeyCode::Space)), Some(Command::ToggleRotation));
        assert_eq!(bindings.command_for(key(KeyCode::Tab)), Some(Command::ToggleSolarSystem));
        assert_eq!(bindings.command_for(key(KeyCode::Digit4)), Some(Command::ViewBody(4)));
        assert_eq!(bindings.command_for(key(KeyCode::Digit9)), None);
        assert_eq!(bindings.command_for(key(KeyCode::KeyQ)), None);
    }

    #[test]
    fn test_override_replaces_default_key() {
        let overrides = HashMap::from([("toggle_stars".to_string(), "KeyT".to_string())]);
        let bindings = KeyBindings::with_overrides(&overrides);
        assert_eq!(bindings.command_for(key(KeyCode::KeyT)), Some(Command::ToggleStars));
        assert_eq!(bindings.command_for(key(KeyCode::KeyS)), None);
    }

    #[test]
    fn test_bad_overrides_are_skipped() {
        let overrides = HashMap::from([
            ("launch_rocket".to_string(), "KeyL".to_string()),
            ("zoom_in".to_string(), "NotAKey".to_string()),
        ]);
        let bindings = KeyBindings::with_overrides(&overrides);
        assert_eq!(bindings.command_for(key(KeyCode::KeyL)), None);
        assert_eq!(bindings.command_for(key(KeyCode::Equal)), Some(Command::ZoomIn));
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::from_name("reset_view"), Some(Command::ResetView));
        assert_eq!(Command::from_name("view_body_8"), Some(Command::ViewBody(8)));
        assert_eq!(Command::from_name("view_body_9"), None);
        assert_eq!(Command::from_name("view_body_x"), None);
    }

    #[test]
    fn test_parse_key_code() {
        assert_eq!(parse_key_code("KeyA"), Some(KeyCode::KeyA));
        assert_eq!(parse_key_code("KeyZ"), Some(KeyCode::KeyZ));
        assert_eq!(parse_key_code("Digit7"), Some(KeyCode::Digit7));
        assert_eq!(parse_key_code("Escape"), Some(KeyCode::Escape));
        assert_eq!(parse_key_code("Keya"), None);
        assert_eq!(parse_key_code("KeyAB"), None);
        assert_eq!(parse_key_code("Digit10"), None);
    }
}
