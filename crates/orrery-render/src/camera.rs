//! Perspective camera with reverse-Z projection.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::body_pipeline::FrameUniform;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Camera pose plus perspective parameters. Looks down its local -Z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit quaternion.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at the origin looking down -Z.
    #[must_use]
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y,
            aspect_ratio,
            near,
            far,
        }
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Reverse-Z: the near plane maps to depth 1 and the far plane to 0.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Turn to face `target` keeping world +Y as up. No-op when `target`
    /// coincides with the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let back = (self.position - target).normalize_or_zero();
        if back == Vec3::ZERO {
            return;
        }
        let mut right = Vec3::Y.cross(back);
        if right.length_squared() < 1e-12 {
            // Looking straight up or down: any horizontal right axis works.
            right = Vec3::X;
        }
        let right = right.normalize();
        let up = back.cross(right);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize();
    }

    /// Move along the local Z axis. Positive values move backward, away from
    /// what the camera looks at.
    pub fn translate_z(&mut self, distance: f32) {
        self.position += self.rotation * Vec3::new(0.0, 0.0, distance);
    }

    /// Ray from the camera through a point in normalized device coordinates
    /// (`x` right, `y` up, both in `[-1, 1]`).
    #[must_use]
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect_ratio;
        let local = Vec3::new(ndc.x * half_width, ndc.y * half_height, -1.0);
        Ray {
            origin: self.position,
            direction: (self.rotation * local).normalize(),
        }
    }

    pub(crate) fn write_uniform(&self, uniform: &mut FrameUniform) {
        uniform.view_proj = self.view_projection_matrix().to_cols_array_2d();
        uniform.camera_pos = self.position.extend(1.0).to_array();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(75f32.to_radians(), 16.0 / 9.0, 0.1, 2000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn test_default_camera_looks_down_neg_z() {
        let camera = Camera::default();
        assert!(approx(camera.forward(), Vec3::NEG_Z));
        assert!(approx(camera.up(), Vec3::Y));
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 30.0, 60.0);
        camera.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!(approx(camera.forward(), expected));
        // No roll: right stays horizontal.
        assert!(camera.right().y.abs() < 1e-6);
    }

    #[test]
    fn test_look_at_straight_down_is_finite() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 10.0, 0.0);
        camera.look_at(Vec3::ZERO);
        assert!(approx(camera.forward(), Vec3::NEG_Y));
        assert!(camera.rotation.is_finite());
    }

    #[test]
    fn test_look_at_own_position_keeps_rotation() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(1.0, 2.0, 3.0);
        camera.rotation = Quat::from_rotation_y(0.3);
        camera.look_at(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.rotation, Quat::from_rotation_y(0.3));
    }

    #[test]
    fn test_translate_z_moves_along_view_axis() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(0.0, 0.0, 3.0);
        camera.translate_z(-0.5);
        assert!(approx(camera.position, Vec3::new(0.0, 0.0, 2.5)));

        camera.position = Vec3::new(0.0, 30.0, 60.0);
        camera.look_at(Vec3::ZERO);
        let before = camera.position.length();
        camera.translate_z(2.0);
        assert!((camera.position.length() - (before + 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_center_ray_matches_forward() {
        let mut camera = Camera::default();
        camera.position = Vec3::new(5.0, 5.0, 5.0);
        camera.look_at(Vec3::ZERO);
        let ray = camera.ray_through_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, camera.position);
        assert!(approx(ray.direction, camera.forward()));
    }

    #[test]
    fn test_corner_ray_projects_back_to_corner() {
        let mut camera = Camera::default();
        camera.aspect_ratio = 2.0;
        camera.position = Vec3::new(0.0, 0.0, 3.0);
        let ray = camera.ray_through_ndc(Vec2::new(1.0, -1.0));
        let clip = camera.view_projection_matrix() * ray.at(10.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!((ndc.x - 1.0).abs() < 1e-4);
        assert!((ndc.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_reverse_z_depth_range() {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix();
        let near = vp * Vec3::new(0.0, 0.0, -camera.near).extend(1.0);
        let far = vp * Vec3::new(0.0, 0.0, -camera.far).extend(1.0);
        assert!((near.z / near.w - 1.0).abs() < 1e-4);
        assert!((far.z / far.w).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_ignores_degenerate_sizes() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        camera.set_aspect_ratio(800.0, 0.0);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }
}
