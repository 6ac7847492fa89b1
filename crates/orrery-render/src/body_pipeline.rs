//! Pipelines for textured spheres and rings.
//!
//! One shader serves every material: the texture is multiplied by the
//! material color, optionally lit by an ambient term plus one directional
//! light. Blending, depth writes and face culling vary per material, so a
//! pipeline is created lazily for each combination that is actually drawn.

use std::collections::HashMap;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use orrery_scene::{BlendMode, Lighting, Material};

use crate::buffer::VertexPositionNormalUv;
use crate::depth::DepthBuffer;

/// Per-frame camera and lighting data, bind group 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// xyz toward the light.
    pub sun_direction: [f32; 4],
    /// Linear color premultiplied by intensity.
    pub sun_color: [f32; 4],
    pub ambient: [f32; 4],
}

impl FrameUniform {
    pub fn set_lighting(&mut self, lighting: &Lighting) {
        let scale = |rgb: [f32; 3], k: f32| [rgb[0] * k, rgb[1] * k, rgb[2] * k, 1.0];
        self.sun_direction = lighting.sun_direction.normalize_or_zero().extend(0.0).to_array();
        self.sun_color = scale(lighting.sun_color.to_linear(), lighting.sun_intensity);
        self.ambient = scale(lighting.ambient_color.to_linear(), lighting.ambient_intensity);
    }
}

/// Per-node transform and material, bind group 2 (1 for stars).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Linear rgb, opacity in alpha.
    pub color: [f32; 4],
    /// x: 1.0 when lit.
    pub params: [f32; 4],
}

impl ObjectUniform {
    #[must_use]
    pub fn new(model: glam::Mat4, material: &Material) -> Self {
        let [r, g, b] = material.color.to_linear();
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, material.opacity],
            params: [if material.lit { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// The render state that differs between materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub blend: BlendMode,
    pub depth_write: bool,
    pub double_sided: bool,
}

impl From<&Material> for PipelineKey {
    fn from(material: &Material) -> Self {
        Self {
            blend: material.blend,
            depth_write: material.depth_write,
            double_sided: material.double_sided,
        }
    }
}

pub(crate) fn blend_state(mode: BlendMode) -> Option<wgpu::BlendState> {
    match mode {
        BlendMode::Opaque => None,
        BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        BlendMode::Additive => {
            let additive = wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            };
            Some(wgpu::BlendState {
                color: additive,
                alpha: additive,
            })
        }
    }
}

pub(crate) fn uniform_layout_entry(size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

pub struct BodyPipelines {
    shader: wgpu::ShaderModule,
    layout: wgpu::PipelineLayout,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
    pub object_bind_group_layout: wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
}

impl BodyPipelines {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("frame-bind-group-layout"),
                entries: &[uniform_layout_entry(size_of::<FrameUniform>())],
            });
        let object_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("object-bind-group-layout"),
                entries: &[uniform_layout_entry(size_of::<ObjectUniform>())],
            });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body-pipeline-layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                texture_layout,
                &object_bind_group_layout,
            ],
            immediate_size: 0,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("body-shader"),
            source: wgpu::ShaderSource::Wgsl(BODY_SHADER_SOURCE.into()),
        });

        Self {
            shader,
            layout,
            frame_bind_group_layout,
            object_bind_group_layout,
            surface_format,
            pipelines: HashMap::new(),
        }
    }

    /// Create the pipeline for `key` if it does not exist yet.
    pub fn prepare(&mut self, device: &wgpu::Device, key: PipelineKey) {
        let Self {
            shader,
            layout,
            surface_format,
            pipelines,
            ..
        } = self;
        pipelines
            .entry(key)
            .or_insert_with(|| create_pipeline(device, shader, layout, *surface_format, key));
    }

    #[must_use]
    pub fn get(&self, key: PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(&key)
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    log::debug!("Creating body pipeline {key:?}");
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("body-pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[VertexPositionNormalUv::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: if key.double_sided {
                None
            } else {
                Some(wgpu::Face::Back)
            },
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthBuffer::FORMAT,
            depth_write_enabled: key.depth_write,
            depth_compare: DepthBuffer::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: blend_state(key.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// WGSL for spheres and rings.
pub const BODY_SHADER_SOURCE: &str = r#"
struct Frame {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    sun_direction: vec4<f32>,
    sun_color: vec4<f32>,
    ambient: vec4<f32>,
};

struct Object {
    model: mat4x4<f32>,
    color: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0) var<uniform> frame: Frame;
@group(1) @binding(0) var base_texture: texture_2d<f32>;
@group(1) @binding(1) var base_sampler: sampler;
@group(2) @binding(0) var<uniform> object: Object;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = object.model * vec4<f32>(in.position, 1.0);
    out.clip_position = frame.view_proj * world;
    out.world_normal = (object.model * vec4<f32>(in.normal, 0.0)).xyz;
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    let texel = textureSample(base_texture, base_sampler, in.uv);
    var rgb = texel.rgb * object.color.rgb;
    if object.params.x > 0.5 {
        var n = normalize(in.world_normal);
        if !front {
            n = -n;
        }
        let diffuse = max(dot(n, frame.sun_direction.xyz), 0.0);
        rgb = rgb * (frame.ambient.rgb + frame.sun_color.rgb * diffuse);
    }
    return vec4<f32>(rgb, texel.a * object.color.a);
}
"#;
