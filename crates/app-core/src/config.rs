//! Per-variant configuration for a particle surface.
//!
//! A `SurfaceConfig` is supplied once at mount time and never mutated
//! afterwards. Everything a variant differs in (grid shape, wave terms,
//! palette, fog, camera, blending) lives here as plain data, so the engine
//! itself has no per-variant code paths.

use glam::Vec3;
use smallvec::SmallVec;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid must have at least one vertex per axis (got {count_x}x{count_z})")]
    EmptyGrid { count_x: u32, count_z: u32 },
    #[error("grid spacing must be positive and finite (got {0})")]
    BadSpacing(f32),
    #[error("at least one wave term is required")]
    NoWaveTerms,
    #[error("wave term {0} has a non-finite parameter")]
    BadWaveTerm(usize),
    #[error("palette needs at least two anchor colors (got {0})")]
    PaletteTooSmall(usize),
    #[error("clock must advance by a positive amount")]
    BadClockStep,
}

/// Spatial input a wave term is evaluated over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveAxis {
    X,
    Z,
    /// x + z, producing diagonal wavefronts.
    Diagonal,
    /// Euclidean distance from the grid origin, producing rings.
    Radial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveShape {
    Sine,
    Cosine,
}

/// One sinusoidal term of a wave field: `amplitude * shape(frequency * s + phase_speed * t)`
/// where `s` is the spatial input selected by `axis`.
#[derive(Clone, Copy, Debug)]
pub struct WaveTerm {
    pub axis: WaveAxis,
    pub shape: WaveShape,
    pub frequency: f32,
    pub amplitude: f32,
    pub phase_speed: f32,
}

/// Variants use 2-3 terms; keep them inline.
pub type WaveTerms = SmallVec<[WaveTerm; 3]>;

#[derive(Clone, Copy, Debug)]
pub enum Fog {
    None,
    Linear { color: [f32; 3], near: f32, far: f32 },
    Exp2 { color: [f32; 3], density: f32 },
}

impl Fog {
    pub fn color(&self) -> [f32; 3] {
        match *self {
            Fog::None => [0.0, 0.0, 0.0],
            Fog::Linear { color, .. } | Fog::Exp2 { color, .. } => color,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub look_at: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Alpha,
    Additive,
}

/// Construction-time random blend toward white applied to a fraction of
/// vertices, giving the palette some sparkle variance.
#[derive(Clone, Copy, Debug)]
pub struct Sparkle {
    pub probability: f32,
    pub blend: f32,
}

#[derive(Clone, Debug)]
pub enum ColorMode {
    /// Every vertex shares one color; fixed at construction.
    Uniform([f32; 3]),
    /// Lerp between palette anchors by x fraction; fixed at construction.
    PaletteX {
        anchors: Vec<[f32; 3]>,
        sparkle: Option<Sparkle>,
    },
    /// Recomputed per frame from the vertex height.
    HeightRamp {
        low: [f32; 3],
        high: [f32; 3],
        min_height: f32,
        max_height: f32,
    },
}

impl ColorMode {
    pub fn is_per_frame(&self) -> bool {
        matches!(self, ColorMode::HeightRamp { .. })
    }
}

#[derive(Clone, Copy, Debug)]
pub enum SizeMode {
    /// Same point size everywhere; fixed at construction.
    Fixed(f32),
    /// Recomputed per frame from the vertex height.
    HeightRamp {
        low: f32,
        high: f32,
        min_height: f32,
        max_height: f32,
    },
}

impl SizeMode {
    pub fn is_per_frame(&self) -> bool {
        matches!(self, SizeMode::HeightRamp { .. })
    }
}

/// How the animation clock advances each frame. Both modes are monotonic;
/// they differ only in whether motion is coupled to wall time or to frame
/// count.
#[derive(Clone, Copy, Debug)]
pub enum ClockMode {
    /// Accumulate real frame deltas, scaled.
    Elapsed { scale: f32 },
    /// Fixed increment per frame, regardless of frame duration.
    Counter { step: f32 },
}

/// Pointer-driven camera offset. `strength` maps pixels from viewport center
/// to world units; `damping` is the per-frame interpolation factor toward
/// the target.
#[derive(Clone, Copy, Debug)]
pub struct ParallaxConfig {
    pub strength: f32,
    pub damping: f32,
}

#[derive(Clone, Debug)]
pub struct SurfaceConfig {
    pub name: &'static str,
    pub count_x: u32,
    pub count_z: u32,
    pub spacing: f32,
    pub wave_terms: WaveTerms,
    pub color: ColorMode,
    pub size: SizeMode,
    /// Numerator of the point-size attenuation: pixel size = size * attenuation / depth.
    pub size_attenuation: f32,
    pub opacity: f32,
    pub clock: ClockMode,
    pub camera: CameraConfig,
    pub fog: Fog,
    pub background: [f32; 4],
    pub blend: BlendMode,
    /// Rotation of the whole cloud about +Y, radians per second.
    pub spin_speed: f32,
    pub parallax: Option<ParallaxConfig>,
    /// Seed for construction-time randomness (sparkle). The per-frame path
    /// is fully deterministic.
    pub seed: u64,
}

impl SurfaceConfig {
    /// Reject bad configurations before any GPU resource is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count_x == 0 || self.count_z == 0 {
            return Err(ConfigError::EmptyGrid {
                count_x: self.count_x,
                count_z: self.count_z,
            });
        }
        if !(self.spacing > 0.0 && self.spacing.is_finite()) {
            return Err(ConfigError::BadSpacing(self.spacing));
        }
        if self.wave_terms.is_empty() {
            return Err(ConfigError::NoWaveTerms);
        }
        for (i, term) in self.wave_terms.iter().enumerate() {
            let finite = term.frequency.is_finite()
                && term.amplitude.is_finite()
                && term.phase_speed.is_finite();
            if !finite {
                return Err(ConfigError::BadWaveTerm(i));
            }
        }
        if let ColorMode::PaletteX { anchors, .. } = &self.color {
            if anchors.len() < 2 {
                return Err(ConfigError::PaletteTooSmall(anchors.len()));
            }
        }
        match self.clock {
            ClockMode::Elapsed { scale } if !(scale > 0.0 && scale.is_finite()) => {
                return Err(ConfigError::BadClockStep)
            }
            ClockMode::Counter { step } if !(step > 0.0 && step.is_finite()) => {
                return Err(ConfigError::BadClockStep)
            }
            _ => {}
        }
        Ok(())
    }
}
