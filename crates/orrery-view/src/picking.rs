//! Ray casts against the pickable parts of the solar system.

use glam::Vec3;
use orrery_render::Ray;
use orrery_scene::{BodyId, Primitive, SolarScene};

/// Entry and exit distances of `ray` through a sphere, `None` on a miss.
/// Either distance may be negative when the sphere lies (partly) behind the
/// ray origin.
#[must_use]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<(f32, f32)> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    Some((-b - sqrt_disc, -b + sqrt_disc))
}

/// Distance to a flat ring with the given plane normal, `None` on a miss or
/// when the hit is behind the origin.
#[must_use]
pub fn ray_annulus(ray: &Ray, center: Vec3, normal: Vec3, inner: f32, outer: f32) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let r = ray.at(t).distance(center);
    (inner..=outer).contains(&r).then_some(t)
}

/// Nearest visible pickable part hit by `ray`, resolved to its body.
#[must_use]
pub fn pick_body(solar: &SolarScene, ray: &Ray) -> Option<BodyId> {
    let scene = &solar.scene;
    let mut nearest: Option<(f32, BodyId)> = None;

    for (node_id, body) in solar.pick_targets() {
        if !scene.is_visible_in_tree(node_id) {
            continue;
        }
        let world = scene.world_matrix(node_id);
        let center = world.transform_point3(Vec3::ZERO);
        let hit = match scene.node(node_id).primitive {
            Primitive::Sphere { radius, .. } => ray_sphere(ray, center, radius).and_then(
                |(entry, exit)| match (entry >= 0.0, exit >= 0.0) {
                    (true, _) => Some(entry),
                    (false, true) => Some(exit),
                    _ => None,
                },
            ),
            Primitive::Ring { inner, outer, .. } => {
                let normal = world.transform_vector3(Vec3::Y).normalize_or_zero();
                ray_annulus(ray, center, normal, inner, outer)
            }
            Primitive::Group | Primitive::Points { .. } => None,
        };
        if let Some(t) = hit
            && nearest.is_none_or(|(best, _)| t < best)
        {
            nearest = Some((t, body));
        }
    }

    nearest.map(|(_, body)| body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_scene::{BuildOptions, TextureEvent, TextureSource, build_scene};

    struct NoTextures;

    impl TextureSource for NoTextures {
        fn request(&mut self, _key: &str) {}

        fn poll(&mut self) -> Vec<TextureEvent> {
            Vec::new()
        }
    }

    /// Visible solar system with every body parked on +X at its orbit
    /// distance.
    fn lined_up() -> SolarScene {
        let options = BuildOptions {
            star_count: 8,
            seed: 3,
            ..BuildOptions::default()
        };
        let mut solar = build_scene(&options, &mut NoTextures);
        for id in BodyId::ALL {
            let node = solar.body(id).node;
            solar.scene.node_mut(node).transform.translation =
                Vec3::new(id.spec().distance, 0.0, 0.0);
        }
        let group = solar.handles.solar_group;
        solar.scene.set_visible(group, true);
        solar
    }

    fn straight_down(x: f32) -> Ray {
        ray(Vec3::new(x, 20.0, 0.0), Vec3::NEG_Y)
    }

    fn ray(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let r = ray(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let (entry, exit) = ray_sphere(&r, Vec3::ZERO, 2.0).unwrap();
        assert!((entry - 8.0).abs() < 1e-5);
        assert!((exit - 12.0).abs() < 1e-5);
        assert!(ray_sphere(&r, Vec3::new(5.0, 0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_ray_annulus_ignores_hole() {
        let down = |x: f32| ray(Vec3::new(x, 5.0, 0.0), Vec3::NEG_Y);
        assert!(ray_annulus(&down(1.5), Vec3::ZERO, Vec3::Y, 1.2, 2.0).is_some());
        assert!(ray_annulus(&down(0.5), Vec3::ZERO, Vec3::Y, 1.2, 2.0).is_none());
        assert!(ray_annulus(&down(3.0), Vec3::ZERO, Vec3::Y, 1.2, 2.0).is_none());
    }

    #[test]
    fn test_ray_annulus_parallel_and_behind() {
        let along = ray(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray_annulus(&along, Vec3::ZERO, Vec3::Y, 0.0, 10.0).is_none());
        let away = ray(Vec3::new(1.5, 5.0, 0.0), Vec3::Y);
        assert!(ray_annulus(&away, Vec3::ZERO, Vec3::Y, 1.2, 2.0).is_none());
    }

    #[test]
    fn test_ring_band_picks_its_planet() {
        let solar = lined_up();
        let spec = BodyId::Saturn.spec();
        let ring = spec.ring.unwrap();
        let at = |scale: f32| straight_down(spec.distance + spec.radius * scale);

        assert_eq!(pick_body(&solar, &at(1.6)), Some(BodyId::Saturn));
        // Gap between the planet and the ring's inner edge.
        assert!(ring.inner_scale > 1.1);
        assert_eq!(pick_body(&solar, &at(1.1)), None);
        assert_eq!(pick_body(&solar, &at(ring.outer_scale + 0.3)), None);
    }

    #[test]
    fn test_star_glow_picks_the_sun() {
        let solar = lined_up();
        let radius = BodyId::Sun.spec().radius;

        // Outside the sun's sphere but inside its glow shell.
        assert_eq!(pick_body(&solar, &straight_down(radius * 1.1)), Some(BodyId::Sun));
        assert_eq!(pick_body(&solar, &straight_down(radius * 1.25)), None);
    }

    #[test]
    fn test_nearest_hit_wins() {
        let solar = lined_up();
        // These rays run along the x axis, through every body.
        let from_outside = ray(Vec3::new(100.0, 0.0, 0.0), Vec3::NEG_X);
        assert_eq!(pick_body(&solar, &from_outside), Some(BodyId::Neptune));

        let from_behind_sun = ray(Vec3::new(-100.0, 0.0, 0.0), Vec3::X);
        assert_eq!(pick_body(&solar, &from_behind_sun), Some(BodyId::Sun));

        let between = ray(Vec3::new(32.0, 0.0, 0.0), Vec3::X);
        assert_eq!(pick_body(&solar, &between), Some(BodyId::Saturn));
    }

    #[test]
    fn test_hidden_parts_are_not_picked() {
        let mut solar = lined_up();
        let group = solar.handles.solar_group;
        solar.scene.set_visible(group, false);
        let spec = BodyId::Saturn.spec();
        assert_eq!(pick_body(&solar, &straight_down(spec.distance)), None);
    }
}
