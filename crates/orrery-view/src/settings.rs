use orrery_config::Config;

/// Camera and pointer tuning taken from the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Radians of target rotation per dragged pixel.
    pub rotate_sensitivity: f32,
    /// Pan distance per dragged pixel per unit of distance to the target.
    pub pan_sensitivity: f32,
    pub wheel_sensitivity: f32,
    pub click_slop_px: f32,
}

impl ViewSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            fov_degrees: config.render.fov_degrees,
            near: config.render.near,
            far: config.render.far,
            rotate_sensitivity: config.input.rotate_sensitivity,
            pan_sensitivity: config.input.pan_sensitivity,
            wheel_sensitivity: config.input.wheel_sensitivity,
            click_slop_px: config.input.click_slop_px,
        }
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_config_defaults() {
        let settings = ViewSettings::default();
        assert_eq!(settings.fov_degrees, 75.0);
        assert_eq!(settings.rotate_sensitivity, 0.005);
        assert_eq!(settings.pan_sensitivity, 0.001);
        assert_eq!(settings.wheel_sensitivity, 0.001);
        assert_eq!(settings.click_slop_px, 4.0);
    }

    #[test]
    fn test_overrides_are_picked_up() {
        let mut config = Config::default();
        config.input.click_slop_px = 10.0;
        config.render.far = 5000.0;
        let settings = ViewSettings::from_config(&config);
        assert_eq!(settings.click_slop_px, 10.0);
        assert_eq!(settings.far, 5000.0);
    }
}
