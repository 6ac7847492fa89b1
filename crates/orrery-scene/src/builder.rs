//! Builds the complete scene from the catalog.
//!
//! Every textured node starts with its flat fallback color and is visible
//! immediately. Texture requests go out during the build; completions are fed
//! back through [`SolarScene::apply_texture_events`], which swaps the texture
//! in or, on failure, leaves the fallback color in place for good.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::f64::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::catalog::{
    BodyId, BodyKind, BodySpec, EARTH_CLOUD_TEXTURE, EARTH_DAY_TEXTURE, ORBIT_PATH_COLOR,
    ORBIT_PATH_HALF_WIDTH, ORBIT_PATH_OPACITY, ORBIT_PATH_SEGMENTS, Rgb, STAR_GLOW_COLOR,
    STAR_GLOW_OPACITY, STAR_GLOW_SCALE,
};
use crate::graph::{BlendMode, Material, Node, NodeId, Primitive, Scene};
use crate::starfield::StarfieldGenerator;
use crate::texture::{TextureEvent, TextureSource};

/// Radius of the close-up globe.
pub const GLOBE_RADIUS: f32 = 1.0;
/// Radius of the cloud shell around the close-up globe.
pub const CLOUD_RADIUS: f32 = 1.01;
pub const CLOUD_OPACITY: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    pub globe_segments: u32,
    pub body_segments: u32,
    pub star_count: u32,
    pub star_half_extent: f32,
    pub star_size: f32,
    /// Seeds the initial orbit angles and the starfield.
    pub seed: u64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            globe_segments: 64,
            body_segments: 32,
            star_count: 10_000,
            star_half_extent: 1000.0,
            star_size: 0.7,
            seed: 0,
        }
    }
}

/// Orbital state of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub id: BodyId,
    /// The body's sphere node.
    pub node: NodeId,
    pub distance: f32,
    /// Radians per tick.
    pub orbit_speed: f32,
    /// Current orbit angle in radians. Kept in f64 so long runs do not drift.
    pub angle: f64,
}

impl CelestialBody {
    /// Position on the circular orbit for the current angle.
    #[must_use]
    pub fn orbit_position(&self) -> Vec3 {
        let d = f64::from(self.distance);
        Vec3::new(
            (self.angle.cos() * d) as f32,
            0.0,
            (self.angle.sin() * d) as f32,
        )
    }

    #[must_use]
    pub fn orbits(&self) -> bool {
        self.orbit_speed > 0.0
    }

    #[must_use]
    pub fn spec(&self) -> &'static BodySpec {
        self.id.spec()
    }
}

/// Nodes the view layer toggles directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    /// Close-up globe plus clouds.
    pub earth_group: NodeId,
    pub globe: NodeId,
    pub clouds: NodeId,
    /// Every body, glow, ring and orbit path.
    pub solar_group: NodeId,
    pub starfield: NodeId,
}

/// The built scene plus the bookkeeping around it.
#[derive(Debug)]
pub struct SolarScene {
    pub scene: Scene,
    pub handles: SceneHandles,
    bodies: Vec<CelestialBody>,
    pick_map: HashMap<NodeId, BodyId>,
    pending: HashMap<String, Vec<NodeId>>,
}

impl SolarScene {
    #[must_use]
    pub fn body(&self, id: BodyId) -> &CelestialBody {
        &self.bodies[id.index()]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut CelestialBody {
        &mut self.bodies[id.index()]
    }

    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    /// Current world position of a body.
    #[must_use]
    pub fn body_position(&self, id: BodyId) -> Vec3 {
        self.scene.world_position(self.body(id).node)
    }

    /// Every pickable node with its owning body, in node order.
    pub fn pick_targets(&self) -> impl Iterator<Item = (NodeId, BodyId)> + '_ {
        let mut targets: Vec<(NodeId, BodyId)> =
            self.pick_map.iter().map(|(&n, &b)| (n, b)).collect();
        targets.sort_unstable_by_key(|&(node, _)| node);
        targets.into_iter()
    }

    /// Textures requested but not yet resolved.
    #[must_use]
    pub fn pending_textures(&self) -> usize {
        self.pending.len()
    }

    /// Apply texture completions. Returns how many nodes received a texture.
    pub fn apply_texture_events(&mut self, events: impl IntoIterator<Item = TextureEvent>) -> usize {
        let mut applied = 0;
        for event in events {
            match event {
                TextureEvent::Loaded { key, image } => {
                    let Some(nodes) = self.pending.remove(&key) else {
                        debug!(texture = %key, "ignoring texture nobody is waiting for");
                        continue;
                    };
                    info!(texture = %key, width = image.width, height = image.height, "texture loaded");
                    self.scene.stage_texture(key.as_str(), image);
                    for node in &nodes {
                        self.scene.node_mut(*node).material.apply_texture(&key);
                    }
                    applied += nodes.len();
                }
                TextureEvent::Failed { key, error } => {
                    self.pending.remove(&key);
                    warn!(texture = %key, %error, "texture unavailable, keeping fallback color");
                }
            }
        }
        applied
    }
}

/// Everything created during the build that still needs wiring up.
struct Assembly<'a> {
    scene: Scene,
    pending: HashMap<String, Vec<NodeId>>,
    textures: &'a mut dyn TextureSource,
}

impl Assembly<'_> {
    /// Add a node whose material will be upgraded to `texture` once it loads.
    fn add_textured(&mut self, node: Node, texture: &str) -> NodeId {
        let id = self.scene.add(node);
        match self.pending.entry(texture.to_string()) {
            Entry::Occupied(mut waiting) => waiting.get_mut().push(id),
            Entry::Vacant(slot) => {
                slot.insert(vec![id]);
                self.textures.request(texture);
            }
        }
        id
    }
}

/// Build the Earth group, the solar-system group and the starfield.
///
/// Starts in the Earth view: the solar-system group is hidden.
pub fn build_scene(options: &BuildOptions, textures: &mut dyn TextureSource) -> SolarScene {
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut asm = Assembly {
        scene: Scene::new(),
        pending: HashMap::new(),
        textures,
    };

    let earth_group = asm.scene.add(Node::group("earth-view"));
    let globe = asm.add_textured(
        Node::new(
            "globe",
            Primitive::Sphere {
                radius: GLOBE_RADIUS,
                segments: options.globe_segments,
            },
            Material::lit(BodyId::Earth.spec().color),
        )
        .with_parent(earth_group),
        EARTH_DAY_TEXTURE,
    );
    // Additive black adds nothing, so the shell is invisible until its map loads.
    let clouds = asm.add_textured(
        Node::new(
            "clouds",
            Primitive::Sphere {
                radius: CLOUD_RADIUS,
                segments: options.globe_segments,
            },
            Material::translucent(Rgb::BLACK, CLOUD_OPACITY)
                .with_blend(BlendMode::Additive)
                .with_depth_write(false)
                .with_lighting(true),
        )
        .with_parent(earth_group),
        EARTH_CLOUD_TEXTURE,
    );

    let solar_group = asm
        .scene
        .add(Node::group("solar-system").with_visibility(false));

    let mut bodies = Vec::with_capacity(BodyId::ALL.len());
    let mut pick_map = HashMap::new();
    for id in BodyId::ALL {
        let spec = id.spec();
        let mut body = CelestialBody {
            id,
            node: solar_group,
            distance: spec.distance,
            orbit_speed: spec.orbit_speed,
            angle: rng.random::<f64>() * TAU,
        };

        if spec.kind == BodyKind::Planet {
            asm.scene.add(
                Node::new(
                    format!("{}-orbit", spec.name),
                    Primitive::Ring {
                        inner: spec.distance - ORBIT_PATH_HALF_WIDTH,
                        outer: spec.distance + ORBIT_PATH_HALF_WIDTH,
                        segments: ORBIT_PATH_SEGMENTS,
                    },
                    Material::translucent(ORBIT_PATH_COLOR, ORBIT_PATH_OPACITY),
                )
                .with_parent(solar_group),
            );
        }

        let material = match spec.kind {
            BodyKind::Star => Material::unlit(spec.color),
            BodyKind::Planet => Material::lit(spec.color),
        };
        body.node = asm.add_textured(
            Node::new(
                spec.name,
                Primitive::Sphere {
                    radius: spec.radius,
                    segments: options.body_segments,
                },
                material,
            )
            .with_parent(solar_group)
            .with_translation(body.orbit_position()),
            spec.texture,
        );
        pick_map.insert(body.node, id);

        if id.is_star() {
            let glow = asm.scene.add(
                Node::new(
                    format!("{}-glow", spec.name),
                    Primitive::Sphere {
                        radius: spec.radius * STAR_GLOW_SCALE,
                        segments: options.body_segments,
                    },
                    Material::translucent(STAR_GLOW_COLOR, STAR_GLOW_OPACITY)
                        .with_double_sided(false),
                )
                .with_parent(body.node),
            );
            pick_map.insert(glow, id);
        }

        if let Some(ring) = spec.ring {
            let ring_node = asm.add_textured(
                Node::new(
                    format!("{}-ring", spec.name),
                    Primitive::Ring {
                        inner: spec.radius * ring.inner_scale,
                        outer: spec.radius * ring.outer_scale,
                        segments: ring.segments,
                    },
                    Material::translucent(ring.color, ring.opacity),
                )
                .with_parent(body.node),
                ring.texture,
            );
            pick_map.insert(ring_node, id);
        }

        bodies.push(body);
    }

    let stars = StarfieldGenerator::new(
        options.seed.wrapping_add(1),
        options.star_count,
        options.star_half_extent,
    )
    .generate();
    let starfield = asm.scene.add(Node::new(
        "starfield",
        Primitive::Points {
            positions: stars.into(),
            size: options.star_size,
        },
        Material::unlit(Rgb::WHITE),
    ));

    info!(
        nodes = asm.scene.len(),
        textures = asm.pending.len(),
        stars = options.star_count,
        "scene built"
    );

    SolarScene {
        scene: asm.scene,
        handles: SceneHandles {
            earth_group,
            globe,
            clouds,
            solar_group,
            starfield,
        },
        bodies,
        pick_map,
        pending: asm.pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{TextureImage, TextureLoadError};

    /// Records requests; completions are injected by the test.
    #[derive(Default)]
    struct ScriptedSource {
        requested: Vec<String>,
    }

    impl TextureSource for ScriptedSource {
        fn request(&mut self, key: &str) {
            self.requested.push(key.to_string());
        }

        fn poll(&mut self) -> Vec<TextureEvent> {
            Vec::new()
        }
    }

    fn small() -> BuildOptions {
        BuildOptions {
            star_count: 100,
            seed: 5,
            ..BuildOptions::default()
        }
    }

    fn failed(key: &str) -> TextureEvent {
        TextureEvent::Failed {
            key: key.to_string(),
            error: TextureLoadError::WorkerGone,
        }
    }

    fn loaded(key: &str) -> TextureEvent {
        TextureEvent::Loaded {
            key: key.to_string(),
            image: TextureImage::solid([10, 20, 30, 255]),
        }
    }

    #[test]
    fn test_each_texture_requested_once() {
        let mut source = ScriptedSource::default();
        let built = build_scene(&small(), &mut source);

        // Nine body maps, the cloud map and the ring map; the day map is shared.
        assert_eq!(source.requested.len(), 11);
        assert_eq!(built.pending_textures(), 11);
        let day_maps = source
            .requested
            .iter()
            .filter(|k| k.as_str() == EARTH_DAY_TEXTURE)
            .count();
        assert_eq!(day_maps, 1);
    }

    #[test]
    fn test_failed_fetch_keeps_fallback_color() {
        let mut source = ScriptedSource::default();
        let mut built = build_scene(&small(), &mut source);
        let events: Vec<TextureEvent> = source.requested.iter().map(|k| failed(k)).collect();

        assert_eq!(built.apply_texture_events(events), 0);
        assert_eq!(built.pending_textures(), 0);
        for id in BodyId::ALL {
            let node = built.scene.node(built.body(id).node);
            assert_eq!(node.material.color, id.spec().color, "{id}");
            assert!(node.material.texture.is_none());
            assert!(node.visible);
            assert_eq!(node.material.opacity, 1.0);
        }
        let globe = built.scene.node(built.handles.globe);
        assert_eq!(globe.material.color, BodyId::Earth.spec().color);
    }

    #[test]
    fn test_loaded_texture_upgrades_every_waiting_node() {
        let mut source = ScriptedSource::default();
        let mut built = build_scene(&small(), &mut source);

        assert_eq!(built.apply_texture_events([loaded(EARTH_DAY_TEXTURE)]), 2);
        for node in [built.handles.globe, built.body(BodyId::Earth).node] {
            let material = &built.scene.node(node).material;
            assert_eq!(material.color, Rgb::WHITE);
            assert_eq!(material.texture.as_deref(), Some(EARTH_DAY_TEXTURE));
        }
        let staged = built.scene.take_staged_textures();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].0, EARTH_DAY_TEXTURE);
        // Mars is still waiting on its own map.
        let mars = built.scene.node(built.body(BodyId::Mars).node);
        assert_eq!(mars.material.color, BodyId::Mars.spec().color);
    }

    #[test]
    fn test_late_or_duplicate_completion_is_harmless() {
        let mut source = ScriptedSource::default();
        let mut built = build_scene(&small(), &mut source);
        built.apply_texture_events([failed("2k_mars.jpg")]);
        assert_eq!(built.apply_texture_events([loaded("2k_mars.jpg")]), 0);
        assert_eq!(built.apply_texture_events([loaded("unrequested.png")]), 0);
        let mars = built.scene.node(built.body(BodyId::Mars).node);
        assert_eq!(mars.material.color, BodyId::Mars.spec().color);
    }

    #[test]
    fn test_ring_falls_back_independently() {
        let mut source = ScriptedSource::default();
        let mut built = build_scene(&small(), &mut source);
        let ring_texture = BodyId::Saturn.spec().ring.unwrap().texture;
        built.apply_texture_events([loaded("2k_saturn.jpg"), failed(ring_texture)]);

        let (ring, _) = built
            .pick_targets()
            .find(|&(node, owner)| owner == BodyId::Saturn && node != built.body(BodyId::Saturn).node)
            .unwrap();
        let ring = built.scene.node(ring);
        assert!(matches!(ring.primitive, Primitive::Ring { .. }));
        assert_eq!(ring.material.color, Rgb(0xC9_A8_6A));
        assert_eq!(ring.material.opacity, 0.8);
        let saturn = built.scene.node(built.body(BodyId::Saturn).node);
        assert_eq!(saturn.material.color, Rgb::WHITE);
    }

    #[test]
    fn test_starts_in_earth_view() {
        let mut source = ScriptedSource::default();
        let built = build_scene(&small(), &mut source);
        let h = built.handles;
        assert!(built.scene.is_visible_in_tree(h.globe));
        assert!(built.scene.is_visible_in_tree(h.clouds));
        assert!(!built.scene.is_visible_in_tree(built.body(BodyId::Sun).node));
        assert!(built.scene.is_visible_in_tree(h.starfield));
    }

    #[test]
    fn test_bodies_start_on_their_orbits() {
        let mut source = ScriptedSource::default();
        let built = build_scene(&small(), &mut source);
        for body in built.bodies() {
            let pos = built.body_position(body.id);
            assert!((pos.length() - body.distance).abs() < 1e-4, "{}", body.id);
            assert!((0.0..TAU).contains(&body.angle));
        }
        assert_eq!(built.body_position(BodyId::Sun), Vec3::ZERO);
    }

    #[test]
    fn test_seed_reproduces_angles() {
        let a = build_scene(&small(), &mut ScriptedSource::default());
        let b = build_scene(&small(), &mut ScriptedSource::default());
        let angles = |s: &SolarScene| s.bodies().map(|b| b.angle).collect::<Vec<_>>();
        assert_eq!(angles(&a), angles(&b));
    }

    #[test]
    fn test_pick_map_resolves_sub_parts() {
        let mut source = ScriptedSource::default();
        let built = build_scene(&small(), &mut source);
        let owners: Vec<BodyId> = built.pick_targets().map(|(_, b)| b).collect();
        // Nine bodies, the star glow and the ring.
        assert_eq!(owners.len(), 11);
        assert_eq!(owners.iter().filter(|&&b| b == BodyId::Sun).count(), 2);
        assert_eq!(owners.iter().filter(|&&b| b == BodyId::Saturn).count(), 2);
        assert!(built.pick_targets().all(|(node, _)| node != built.handles.globe));
    }

    #[test]
    fn test_orbit_paths_are_not_pickable() {
        let mut source = ScriptedSource::default();
        let built = build_scene(&small(), &mut source);
        let orbit_paths: Vec<NodeId> = built
            .scene
            .nodes()
            .filter(|(_, n)| n.name.ends_with("-orbit"))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(orbit_paths.len(), 8);
        assert!(built.pick_targets().all(|(node, _)| !orbit_paths.contains(&node)));
    }
}
