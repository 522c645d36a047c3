//! 2D orthographic camera over simulation space

use glam::{DVec2, Mat4, Vec2};

/// Orthographic camera; `zoom` is the half-height of the view in world units.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub center: Vec2,
    pub zoom: f32,
    pub viewport: Vec2,
}

impl Camera2D {
    /// Frames `[0, width] × [0, height]` so one world unit maps to one pixel.
    pub fn fit(width: u32, height: u32) -> Self {
        let viewport = Vec2::new(width as f32, height as f32);
        Self {
            center: viewport * 0.5,
            zoom: viewport.y * 0.5,
            viewport,
        }
    }

    fn aspect_ratio(&self) -> f32 {
        self.viewport.x / self.viewport.y.max(1.0)
    }

    fn half_extent(&self) -> Vec2 {
        Vec2::new(self.zoom * self.aspect_ratio(), self.zoom)
    }

    pub fn view_projection(&self) -> Mat4 {
        let half = self.half_extent();
        let projection = Mat4::orthographic_rh(-half.x, half.x, -half.y, half.y, -1.0, 1.0);
        let view = Mat4::from_translation(-self.center.extend(0.0));
        projection * view
    }

    /// World units covered by one physical pixel
    pub fn world_per_pixel(&self) -> f64 {
        (2.0 * self.zoom / self.viewport.y.max(1.0)) as f64
    }

    /// Convert a window position (pixels, y down) to simulation space (y up)
    pub fn screen_to_world(&self, x: f64, y: f64) -> DVec2 {
        let ndc_x = 2.0 * x as f32 / self.viewport.x.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * y as f32 / self.viewport.y.max(1.0);
        let half = self.half_extent();
        let world = self.center + Vec2::new(ndc_x * half.x, ndc_y * half.y);
        world.as_dvec2()
    }

    pub fn pan(&mut self, direction: Vec2) {
        self.center += direction * self.zoom * 0.1;
    }

    pub fn zoom_by(&mut self, scroll: f32) {
        self.zoom = (self.zoom * (1.0 - scroll * 0.1)).clamp(10.0, 20_000.0);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
        }
    }
}
