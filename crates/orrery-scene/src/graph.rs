//! CPU-side scene graph.
//!
//! Nodes live in a flat arena addressed by [`NodeId`] and point at their
//! parent. World transforms and effective visibility are resolved by walking
//! the parent chain, which stays short (at most three levels here).

use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::catalog::Rgb;
use crate::texture::TextureImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Geometry of a node. Rings are flat in the local XZ plane.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Transform-only node.
    Group,
    Sphere { radius: f32, segments: u32 },
    Ring { inner: f32, outer: f32, segments: u32 },
    Points { positions: Arc<[Vec3]>, size: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Opaque,
    /// Standard `src_alpha, 1 - src_alpha` blending.
    Alpha,
    /// `src_alpha, one`: adds light, never darkens.
    Additive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Tint multiplied with the texture; the flat color when untextured.
    pub color: Rgb,
    /// Key into [`Scene::texture`] once the texture has arrived.
    pub texture: Option<String>,
    pub opacity: f32,
    pub blend: BlendMode,
    /// Shaded by the scene lights when true, emissive otherwise.
    pub lit: bool,
    pub depth_write: bool,
    pub double_sided: bool,
}

impl Material {
    /// Opaque, lit surface.
    #[must_use]
    pub fn lit(color: Rgb) -> Self {
        Self {
            color,
            texture: None,
            opacity: 1.0,
            blend: BlendMode::Opaque,
            lit: true,
            depth_write: true,
            double_sided: false,
        }
    }

    /// Opaque, emissive surface.
    #[must_use]
    pub fn unlit(color: Rgb) -> Self {
        Self {
            lit: false,
            ..Self::lit(color)
        }
    }

    /// Emissive, alpha-blended, visible from both sides.
    #[must_use]
    pub fn translucent(color: Rgb, opacity: f32) -> Self {
        Self {
            opacity,
            blend: BlendMode::Alpha,
            double_sided: true,
            ..Self::unlit(color)
        }
    }

    #[must_use]
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    #[must_use]
    pub fn with_depth_write(mut self, depth_write: bool) -> Self {
        self.depth_write = depth_write;
        self
    }

    #[must_use]
    pub fn with_lighting(mut self, lit: bool) -> Self {
        self.lit = lit;
        self
    }

    #[must_use]
    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// Show `key` instead of the flat color. The tint resets to white so the
    /// texture appears unmodified.
    pub fn apply_texture(&mut self, key: &str) {
        self.texture = Some(key.to_string());
        self.color = Rgb::WHITE;
    }

    /// Drawn after opaque geometry, sorted back to front.
    #[must_use]
    pub fn is_translucent(&self) -> bool {
        self.blend != BlendMode::Opaque
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::lit(Rgb::WHITE)
    }
}

/// Local transform. Rotation is Euler XYZ in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    #[must_use]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.quat(), self.translation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub primitive: Primitive,
    pub material: Material,
    pub transform: Transform,
    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>, primitive: Primitive, material: Material) -> Self {
        Self {
            name: name.into(),
            parent: None,
            primitive,
            material,
            transform: Transform::default(),
            visible: true,
        }
    }

    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, Primitive::Group, Material::default())
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Ambient plus one directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub sun_color: Rgb,
    pub sun_intensity: f32,
    /// Direction from the scene toward the light, normalized.
    pub sun_direction: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: Rgb(0x40_40_40),
            ambient_intensity: 1.5,
            sun_color: Rgb::WHITE,
            sun_intensity: 1.2,
            sun_direction: Vec3::new(5.0, 3.0, 5.0).normalize(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    /// Decoded images waiting for the renderer; see [`Scene::take_staged_textures`].
    staged_textures: Vec<(String, TextureImage)>,
    pub lighting: Lighting,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Parents must be added before their children.
    pub fn add(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.is_none_or(|p| p.index() < self.nodes.len()));
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        self.node_mut(id).visible = visible;
    }

    /// Visible only if the node and every ancestor are.
    #[must_use]
    pub fn is_visible_in_tree(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    #[must_use]
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    #[must_use]
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    /// Queue a decoded image for upload.
    pub fn stage_texture(&mut self, key: impl Into<String>, image: TextureImage) {
        self.staged_textures.push((key.into(), image));
    }

    /// Hand every staged image to the caller. The scene keeps no pixel data
    /// once they are taken.
    pub fn take_staged_textures(&mut self) -> Vec<(String, TextureImage)> {
        std::mem::take(&mut self.staged_textures)
    }
}
