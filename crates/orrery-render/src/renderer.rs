//! Draws a [`Scene`] through a [`Camera`].
//!
//! GPU meshes, per-node uniforms and textures are created the first time a
//! node is drawn and reused afterwards. Opaque nodes are drawn first, then
//! translucent nodes from far to near.

use std::collections::HashMap;

use bytemuck::Zeroable;
use glam::Vec3;
use orrery_scene::{NodeId, Primitive, Scene, TextureImage};

use crate::body_pipeline::{BodyPipelines, FrameUniform, ObjectUniform, PipelineKey};
use crate::buffer::{BufferAllocator, MeshBuffer, VertexPosition};
use crate::camera::Camera;
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, SurfaceError};
use crate::mesh::{ring_mesh, sphere_mesh};
use crate::pass::{Frame, clear_color};
use crate::star_pipeline::StarPipeline;
use crate::texture::TextureManager;

/// Anything that can present a scene. The view layer drives rendering only
/// through this trait.
pub trait SceneRenderer {
    type Error;

    /// Take ownership of a decoded texture's pixels. Called once per key,
    /// before the first frame whose materials reference it; the caller
    /// drops its copy afterwards.
    fn upload_texture(&mut self, key: &str, image: &TextureImage);

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Sphere { radius: u32, segments: u32 },
    Ring { inner: u32, outer: u32, segments: u32 },
    /// Point clouds are unique per node.
    Points(NodeId),
}

impl MeshKey {
    fn of(id: NodeId, primitive: &Primitive) -> Option<Self> {
        match primitive {
            Primitive::Group => None,
            Primitive::Sphere { radius, segments } => Some(MeshKey::Sphere {
                radius: radius.to_bits(),
                segments: *segments,
            }),
            Primitive::Ring {
                inner,
                outer,
                segments,
            } => Some(MeshKey::Ring {
                inner: inner.to_bits(),
                outer: outer.to_bits(),
                segments: *segments,
            }),
            Primitive::Points { positions, .. } if positions.is_empty() => None,
            Primitive::Points { .. } => Some(MeshKey::Points(id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawItem {
    node: NodeId,
    mesh: MeshKey,
    /// `None` for point clouds, which use the star pipeline.
    pipeline: Option<PipelineKey>,
    distance: f32,
}

/// Visible drawable nodes: opaque in scene order, then translucent sorted
/// back to front from `eye`.
fn draw_order(scene: &Scene, eye: Vec3) -> Vec<DrawItem> {
    let mut opaque = Vec::new();
    let mut translucent = Vec::new();

    for (id, node) in scene.nodes() {
        let Some(mesh) = MeshKey::of(id, &node.primitive) else {
            continue;
        };
        if !scene.is_visible_in_tree(id) {
            continue;
        }
        let item = DrawItem {
            node: id,
            mesh,
            pipeline: match node.primitive {
                Primitive::Points { .. } => None,
                _ => Some(PipelineKey::from(&node.material)),
            },
            distance: scene.world_position(id).distance(eye),
        };
        if node.material.is_translucent() {
            translucent.push(item);
        } else {
            opaque.push(item);
        }
    }

    translucent.sort_by(|a, b| b.distance.total_cmp(&a.distance));
    opaque.extend(translucent);
    opaque
}

fn build_mesh(allocator: &BufferAllocator<'_>, primitive: &Primitive) -> Option<MeshBuffer> {
    match primitive {
        Primitive::Group => None,
        Primitive::Sphere { radius, segments } => {
            let mesh = sphere_mesh(*radius, *segments, *segments);
            Some(allocator.create_mesh("sphere", &mesh.vertices, &mesh.indices))
        }
        Primitive::Ring {
            inner,
            outer,
            segments,
        } => {
            let mesh = ring_mesh(*inner, *outer, *segments);
            Some(allocator.create_mesh("ring", &mesh.vertices, &mesh.indices))
        }
        Primitive::Points { positions, .. } => {
            let vertices: Vec<VertexPosition> = positions
                .iter()
                .map(|p| VertexPosition {
                    position: p.to_array(),
                })
                .collect();
            Some(allocator.create_point_list("points", &vertices))
        }
    }
}

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct WgpuSceneRenderer {
    context: RenderContext,
    depth: DepthBuffer,
    textures: TextureManager,
    bodies: BodyPipelines,
    stars: StarPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    meshes: HashMap<MeshKey, MeshBuffer>,
    objects: HashMap<NodeId, ObjectSlot>,
    clear: wgpu::Color,
}

impl WgpuSceneRenderer {
    pub fn new(context: RenderContext, clear: [f64; 3]) -> Self {
        let device = &context.device;
        let (width, height) = context.size();
        let depth = DepthBuffer::new(device, width, height);
        let textures = TextureManager::new(device, &context.queue);
        let bodies = BodyPipelines::new(device, context.surface_format, textures.bind_group_layout());
        let stars = StarPipeline::new(
            device,
            context.surface_format,
            &bodies.frame_bind_group_layout,
            &bodies.object_bind_group_layout,
        );

        let frame_buffer =
            BufferAllocator::new(device).create_uniform_buffer("frame-uniform", &FrameUniform::zeroed());
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame-bind-group"),
            layout: &bodies.frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        Self {
            depth,
            textures,
            bodies,
            stars,
            frame_buffer,
            frame_bind_group,
            meshes: HashMap::new(),
            objects: HashMap::new(),
            clear: clear_color(clear),
            context,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        let (width, height) = self.context.size();
        self.depth.resize(&self.context.device, width, height);
    }

    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    fn prepare(&mut self, scene: &Scene, items: &[DrawItem]) {
        let device = &self.context.device;
        let queue = &self.context.queue;
        let allocator = BufferAllocator::new(device);

        for item in items {
            let node = scene.node(item.node);
            if !self.meshes.contains_key(&item.mesh)
                && let Some(mesh) = build_mesh(&allocator, &node.primitive)
            {
                self.meshes.insert(item.mesh, mesh);
            }

            let uniform = ObjectUniform::new(scene.world_matrix(item.node), &node.material);
            match self.objects.get(&item.node) {
                Some(slot) => queue.write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&uniform)),
                None => {
                    let buffer = allocator.create_uniform_buffer(&node.name, &uniform);
                    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some(&format!("{}-bind-group", node.name)),
                        layout: &self.bodies.object_bind_group_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: buffer.as_entire_binding(),
                        }],
                    });
                    self.objects.insert(item.node, ObjectSlot { buffer, bind_group });
                }
            }

            if let Some(key) = item.pipeline {
                self.bodies.prepare(device, key);
            }
        }
    }
}

impl SceneRenderer for WgpuSceneRenderer {
    type Error = SurfaceError;

    /// A rejected image leaves its materials on the white fallback.
    fn upload_texture(&mut self, key: &str, image: &TextureImage) {
        if let Err(err) = self
            .textures
            .upload(&self.context.device, &self.context.queue, key, image)
        {
            log::warn!("Texture '{key}' rejected by the GPU: {err}");
        }
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), SurfaceError> {
        let items = draw_order(scene, camera.position);
        self.prepare(scene, &items);

        let mut uniform = FrameUniform::zeroed();
        camera.write_uniform(&mut uniform);
        uniform.set_lighting(&scene.lighting);
        self.context
            .queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniform));

        let surface_texture = match self.context.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let mut frame = Frame::new(&self.context.device, surface_texture);
        {
            let mut pass = frame.begin_main_pass(self.clear, &self.depth);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for item in &items {
                let (Some(mesh), Some(object)) =
                    (self.meshes.get(&item.mesh), self.objects.get(&item.node))
                else {
                    continue;
                };
                match item.pipeline {
                    Some(key) => {
                        let Some(pipeline) = self.bodies.get(key) else {
                            continue;
                        };
                        let texture = self
                            .textures
                            .get_or_white(scene.node(item.node).material.texture.as_deref());
                        pass.set_pipeline(pipeline);
                        pass.set_bind_group(1, &texture.bind_group, &[]);
                        pass.set_bind_group(2, &object.bind_group, &[]);
                    }
                    None => {
                        pass.set_pipeline(&self.stars.pipeline);
                        pass.set_bind_group(1, &object.bind_group, &[]);
                    }
                }
                mesh.draw(&mut pass);
            }
        }
        frame.present(&self.context.queue);
        Ok(())
    }
}
