//! Desktop shell for the orrery: window, frame pacing, platform directories
//! and the title-bar HUD.

pub mod hud;
pub mod platform;
pub mod tick_loop;
pub mod window;
