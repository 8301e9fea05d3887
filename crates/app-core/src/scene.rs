//! Camera, fog, and background state for one renderable surface.

use glam::{Mat4, Vec2, Vec3};

use crate::config::{Fog, ParallaxConfig, SurfaceConfig};

/// Right-handed perspective camera. Intrinsics (fov, planes) are fixed at
/// construction; aspect follows the viewport and extrinsics follow parallax.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[derive(Clone, Debug)]
struct ParallaxState {
    config: ParallaxConfig,
    target: Vec2,
}

/// Per-instance scene state: one camera, the variant's fog and background,
/// cloud spin, and the smoothed pointer-parallax offset. Between frames the
/// only retained motion state is the spin angle and the camera-follow
/// smoothing.
#[derive(Clone, Debug)]
pub struct SceneContext {
    camera: Camera,
    base_eye: Vec3,
    fog: Fog,
    background: [f32; 4],
    spin_speed: f32,
    spin_angle: f32,
    parallax: Option<ParallaxState>,
}

impl SceneContext {
    pub fn from_config(config: &SurfaceConfig) -> Self {
        let camera = Camera {
            eye: config.camera.eye,
            target: config.camera.look_at,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: config.camera.fov_y_degrees.to_radians(),
            znear: config.camera.near,
            zfar: config.camera.far,
        };
        Self {
            base_eye: camera.eye,
            camera,
            fog: config.fog,
            background: config.background,
            spin_speed: config.spin_speed,
            spin_angle: 0.0,
            parallax: config.parallax.map(|config| ParallaxState {
                config,
                target: Vec2::ZERO,
            }),
        }
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    #[inline]
    pub fn background(&self) -> [f32; 4] {
        self.background
    }

    /// Model transform for the whole cloud (spin about +Y).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin_angle)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.camera.projection_matrix() * self.camera.view_matrix()
    }

    /// Pointer position relative to the viewport center, in pixels. Updates
    /// the parallax target immediately; the eye catches up over frames.
    pub fn set_pointer_offset(&mut self, offset: Vec2) {
        if let Some(p) = &mut self.parallax {
            p.target = offset * p.config.strength;
        }
    }

    /// Advance spin and ease the camera toward the parallax target. The
    /// easing factor is per frame, not per second, matching the source
    /// motion; it never overshoots because the factor is in (0, 1].
    pub fn step(&mut self, dt_sec: f32) {
        self.spin_angle += self.spin_speed * dt_sec;
        if let Some(p) = &self.parallax {
            let d = p.config.damping;
            let goal_x = self.base_eye.x + p.target.x;
            let goal_y = self.base_eye.y - p.target.y;
            self.camera.eye.x += (goal_x - self.camera.eye.x) * d;
            self.camera.eye.y += (goal_y - self.camera.eye.y) * d;
        }
    }

    /// Viewport change: recompute aspect ratio only. Position and
    /// orientation are untouched.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }
}
