//! Interactive state of the orrery: which view is active, where the camera
//! is, how pointer input moves it and how the scene animates each tick.
//!
//! [`Orrery`] owns all of it and is the only thing the application shell
//! talks to.

mod camera;
mod input;
mod mode;
mod orrery;
mod picking;
mod settings;

pub use camera::{
    AUTO_ROTATE_STEP, CameraController, DEFAULT_EYE, EARTH_MIN_DISTANCE, OVERVIEW_EYE, SMOOTHING,
};
pub use input::{InputRouter, PointerAction};
pub use mode::ViewMode;
pub use orrery::{CLOUD_PARALLAX, Orrery, SELF_ROTATION_STEP, STAR_SPIN_STEP};
pub use picking::{pick_body, ray_annulus, ray_sphere};
pub use settings::ViewSettings;
