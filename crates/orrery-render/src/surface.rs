//! Window size tracking.
//!
//! Wayland may report a zero-size window before the compositor assigns one
//! and scale factor changes alter the physical size without a resize, so the
//! size that feeds the swapchain, the depth buffer and the camera aspect is
//! kept here and clamped to at least 1×1.

use glam::Vec2;

pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Drawable area in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SURFACE_DIMENSION),
            height: height.max(MIN_SURFACE_DIMENSION),
        }
    }

    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Pixel position (origin top-left, y down) to normalized device
    /// coordinates (origin center, y up).
    #[must_use]
    pub fn to_ndc(self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.width as f32 * 2.0 - 1.0,
            -(pixel.y / self.height as f32 * 2.0 - 1.0),
        )
    }
}

pub struct SurfaceWrapper {
    size: ViewportSize,
}

impl SurfaceWrapper {
    pub fn new(physical_width: u32, physical_height: u32) -> Self {
        Self {
            size: ViewportSize::new(physical_width, physical_height),
        }
    }

    /// Returns the new size if it differs from the current one. Also used
    /// after a scale factor change, which alters the physical size without a
    /// resize event.
    pub fn handle_resize(&mut self, physical_width: u32, physical_height: u32) -> Option<ViewportSize> {
        let size = ViewportSize::new(physical_width, physical_height);
        if size == self.size {
            return None;
        }
        self.size = size;
        Some(size)
    }

    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }
}
