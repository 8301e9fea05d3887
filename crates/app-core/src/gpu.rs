//! Upload-ready uniform packing shared by both renderers. Field order must
//! match `shaders/points.wgsl`.

use bytemuck::{Pod, Zeroable};

use crate::config::{BlendMode, Fog};
use crate::scene::SceneContext;

pub const FOG_MODE_NONE: f32 = 0.0;
pub const FOG_MODE_LINEAR: f32 = 1.0;
pub const FOG_MODE_EXP2: f32 = 2.0;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointUniforms {
    pub proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub fog_color: [f32; 4],
    pub fog_params: [f32; 4],
    pub misc: [f32; 4],
}

impl PointUniforms {
    pub fn pack(
        scene: &SceneContext,
        viewport_height: u32,
        size_attenuation: f32,
        opacity: f32,
        blend: BlendMode,
    ) -> Self {
        let camera = scene.camera();
        let (mode, density, near, far) = match *scene.fog() {
            Fog::None => (FOG_MODE_NONE, 0.0, 0.0, 0.0),
            Fog::Linear { near, far, .. } => (FOG_MODE_LINEAR, 0.0, near, far),
            Fog::Exp2 { density, .. } => (FOG_MODE_EXP2, density, 0.0, 0.0),
        };
        let fog_rgb = scene.fog().color();
        let fog_to_black = match blend {
            BlendMode::Additive => 1.0,
            BlendMode::Alpha => 0.0,
        };
        // A sprite of size s covers s * attenuation / depth pixels, which is
        // a fixed view-space extent once fov and viewport height are known.
        let size_to_view = size_attenuation * 2.0 * (camera.fovy_radians * 0.5).tan()
            / viewport_height.max(1) as f32;
        Self {
            proj: camera.projection_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            model: scene.model_matrix().to_cols_array_2d(),
            fog_color: [fog_rgb[0], fog_rgb[1], fog_rgb[2], mode],
            fog_params: [density, near, far, fog_to_black],
            misc: [size_to_view, opacity, 0.0, 0.0],
        }
    }
}

/// Unit quad (two triangles) instanced once per point, matching the
/// `corner` vertex input of the shader.
pub const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];
