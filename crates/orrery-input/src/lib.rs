//! Input plumbing: keyboard state, pointer event translation from winit, and
//! key-to-command bindings.

pub mod bindings;
pub mod keyboard;
pub mod pointer;

pub use bindings::{Command, KeyBindings, parse_key_code};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use pointer::{PointerButton, PointerEvent, PointerTranslator};
