//! wgpu renderer for the orrery scene graph: GPU context, camera, meshes,
//! textures and the pipelines that draw bodies, rings and stars.

pub mod body_pipeline;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod mesh;
pub mod pass;
pub mod renderer;
pub mod star_pipeline;
pub mod surface;
pub mod texture;

pub use body_pipeline::{BodyPipelines, FrameUniform, ObjectUniform, PipelineKey};
pub use buffer::{BufferAllocator, MeshBuffer, VertexPosition, VertexPositionNormalUv};
pub use camera::{Camera, Ray};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use mesh::{MeshData, ring_mesh, sphere_mesh};
pub use pass::Frame;
pub use renderer::{SceneRenderer, WgpuSceneRenderer};
pub use star_pipeline::StarPipeline;
pub use surface::{SurfaceWrapper, ViewportSize};
pub use texture::{ManagedTexture, TextureError, TextureManager};

#[cfg(test)]
mod test_util;
