use std::fmt;

use orrery_scene::BodyId;

/// Which part of the scene the viewer is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Close-up globe with free-look rotation.
    #[default]
    EarthFocus,
    SolarSystemOverview,
    /// Camera parked next to one body with orbits paused.
    PlanetFocus(BodyId),
}

impl ViewMode {
    /// True in both solar-system modes.
    #[must_use]
    pub fn is_solar(self) -> bool {
        !matches!(self, ViewMode::EarthFocus)
    }

    /// Distances mapped to 100% and 0% zoom.
    #[must_use]
    pub fn zoom_range(self) -> (f32, f32) {
        if self.is_solar() { (5.0, 100.0) } else { (1.5, 10.0) }
    }

    /// Camera travel of one zoom button press.
    #[must_use]
    pub fn zoom_step(self) -> f32 {
        if self.is_solar() { 2.0 } else { 0.5 }
    }

    /// Multiplier applied to wheel travel.
    #[must_use]
    pub fn wheel_scale(self) -> f32 {
        if self.is_solar() { 5.0 } else { 1.0 }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::EarthFocus => f.write_str("Earth"),
            ViewMode::SolarSystemOverview => f.write_str("Solar System"),
            ViewMode::PlanetFocus(id) => write!(f, "Solar System: {}", id.facts().title),
        }
    }
}
