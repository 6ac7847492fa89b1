//! Per-frame command recording.

use crate::depth::DepthBuffer;

/// One swapchain image plus the encoder that draws into it. Consumed by
/// [`Frame::present`].
pub struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

impl Frame {
    pub fn new(device: &wgpu::Device, surface_texture: wgpu::SurfaceTexture) -> Self {
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        Self {
            surface_texture,
            view,
            encoder,
        }
    }

    /// Start the scene pass, clearing color to `clear` and depth to the far
    /// plane.
    pub fn begin_main_pass<'a>(
        &'a mut self,
        clear: wgpu::Color,
        depth: &'a DepthBuffer,
    ) -> wgpu::RenderPass<'a> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(depth.attachment()),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    pub fn present(self, queue: &wgpu::Queue) {
        queue.submit(std::iter::once(self.encoder.finish()));
        self.surface_texture.present();
    }
}

/// Clear color from linear RGB components.
#[must_use]
pub fn clear_color(rgb: [f64; 3]) -> wgpu::Color {
    wgpu::Color {
        r: rgb[0],
        g: rgb[1],
        b: rgb[2],
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_is_opaque() {
        let color = clear_color([0.0, 0.0, 0.02]);
        assert_eq!(color.b, 0.02);
        assert_eq!(color.a, 1.0);
        assert_eq!(clear_color([0.0; 3]), wgpu::Color::BLACK);
    }
}
