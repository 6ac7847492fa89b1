//! Camera pose and the smoothed free-look rotation of the Earth view.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use orrery_render::{Camera, Ray};

use crate::picking::ray_sphere;

/// Close-in camera position of the Earth view.
pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);
/// High vantage point of the solar-system overview.
pub const OVERVIEW_EYE: Vec3 = Vec3::new(0.0, 30.0, 60.0);
/// Fraction of the remaining rotation covered per tick.
pub const SMOOTHING: f32 = 0.1;
/// Yaw added to the target per tick while idle spin is on.
pub const AUTO_ROTATE_STEP: f32 = 0.001;
/// Closest the camera may come to the globe center in the Earth view.
pub const EARTH_MIN_DISTANCE: f32 = 1.2;

/// Owns the camera plus the rotation the globe eases toward.
///
/// Rotations are stored as `(pitch, yaw)` in radians. Pitch targets stay
/// within ±90°.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    camera: Camera,
    current: Vec2,
    target: Vec2,
    look_at: Vec3,
}

impl CameraController {
    /// Camera at [`DEFAULT_EYE`] looking at the origin.
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        let mut controller = Self {
            camera,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            look_at: Vec3::ZERO,
        };
        controller.place(DEFAULT_EYE, Vec3::ZERO);
        controller
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The point zoom percentages are measured against.
    #[must_use]
    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    #[must_use]
    pub fn rotation(&self) -> Vec2 {
        self.current
    }

    #[must_use]
    pub fn target_rotation(&self) -> Vec2 {
        self.target
    }

    /// Move to `eye` and face `target`.
    pub fn place(&mut self, eye: Vec3, target: Vec3) {
        self.camera.position = eye;
        self.camera.look_at(target);
        self.look_at = target;
    }

    /// Drag the target rotation: `delta.x` turns yaw, `delta.y` pitch.
    pub fn rotate_target(&mut self, delta: Vec2) {
        self.target.y += delta.x;
        self.target.x = (self.target.x + delta.y).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn auto_rotate(&mut self) {
        self.target.y += AUTO_ROTATE_STEP;
    }

    /// Ease the current rotation toward the target by [`SMOOTHING`].
    pub fn smooth(&mut self) {
        self.current += (self.target - self.current) * SMOOTHING;
    }

    /// Zero the target only; the globe eases back.
    pub fn reset_target_rotation(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Zero both current and target rotation.
    pub fn reset_rotation(&mut self) {
        self.current = Vec2::ZERO;
        self.target = Vec2::ZERO;
    }

    /// Slide in the camera's own X/Y plane. The step grows with the distance
    /// to the look-at target so panning feels the same at every zoom level.
    pub fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        let scale = sensitivity * self.camera.position.distance(self.look_at);
        let offset = self.camera.right() * -delta.x + self.camera.up() * delta.y;
        self.camera.position += offset * scale;
    }

    /// Move along the view axis; positive moves away. With `keep_outside_globe`
    /// the camera stops where it would enter the sphere of radius
    /// [`EARTH_MIN_DISTANCE`] around the origin.
    pub fn dolly(&mut self, distance: f32, keep_outside_globe: bool) {
        let start = self.camera.position;
        self.camera.translate_z(distance);
        if !keep_outside_globe {
            return;
        }

        let travel = self.camera.position - start;
        let length = travel.length();
        if length > 0.0 {
            let ray = Ray {
                origin: start,
                direction: travel / length,
            };
            if travel.dot(start) < 0.0
                && let Some((entry, exit)) = ray_sphere(&ray, Vec3::ZERO, EARTH_MIN_DISTANCE)
                && entry <= length
                && exit > 0.0
            {
                self.camera.position = ray.at(entry.max(0.0));
                return;
            }
        }
        if self.camera.position.length() < EARTH_MIN_DISTANCE {
            let direction = self
                .camera
                .position
                .try_normalize()
                .unwrap_or(-self.camera.forward());
            self.camera.position = direction * EARTH_MIN_DISTANCE;
        }
    }

    /// `0` at `far` or beyond, `100` at `near` or closer, linear in between.
    #[must_use]
    pub fn zoom_percent(&self, (near, far): (f32, f32)) -> f32 {
        let distance = self.camera.position.distance(self.look_at);
        ((1.0 - (distance - near) / (far - near)) * 100.0).clamp(0.0, 100.0)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera.set_aspect_ratio(width, height);
    }
}
