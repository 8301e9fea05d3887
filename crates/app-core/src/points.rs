//! CPU-side vertex attributes for one particle surface, laid out ready for
//! GPU upload.
//!
//! The buffer is filled in a fixed order (outer `ix`, inner `iz`) at
//! construction, and `update` walks the identical order every frame. The two
//! orders matching is the load-bearing invariant here: a mismatch silently
//! shears the whole field.

use rand::prelude::*;

use crate::config::{ColorMode, ConfigError, SizeMode, Sparkle};
use crate::grid::Grid;
use crate::palette::{lerp_rgb, PaletteGradient};
use crate::wave::WaveField;

/// Which attribute arrays changed since the renderer last consumed them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub positions: bool,
    pub colors: bool,
    pub sizes: bool,
}

impl DirtyFlags {
    pub fn any(&self) -> bool {
        self.positions || self.colors || self.sizes
    }
}

#[derive(Clone, Copy, Debug)]
struct Ramp {
    low: f32,
    high: f32,
    min_height: f32,
    inv_span: f32,
}

impl Ramp {
    fn new(low: f32, high: f32, min_height: f32, max_height: f32) -> Self {
        let span = max_height - min_height;
        Self {
            low,
            high,
            min_height,
            inv_span: if span != 0.0 { 1.0 / span } else { 0.0 },
        }
    }

    #[inline]
    fn at(&self, height: f32) -> f32 {
        let a = ((height - self.min_height) * self.inv_span).clamp(0.0, 1.0);
        self.low + (self.high - self.low) * a
    }
}

#[derive(Clone, Copy, Debug)]
struct ColorRamp {
    low: [f32; 3],
    high: [f32; 3],
    min_height: f32,
    inv_span: f32,
}

impl ColorRamp {
    #[inline]
    fn at(&self, height: f32) -> [f32; 3] {
        let a = ((height - self.min_height) * self.inv_span).clamp(0.0, 1.0);
        lerp_rgb(self.low, self.high, a)
    }
}

/// Mutable per-vertex attributes: interleaved xyz positions, rgb colors, and
/// scalar sizes. x and z are written once at construction and never touched
/// again; y (and color/size for the ramped variants) is rewritten in place
/// every frame with no reallocation.
#[derive(Clone, Debug)]
pub struct PointCloudBuffer {
    grid: Grid,
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    dirty: DirtyFlags,
    color_ramp: Option<ColorRamp>,
    size_ramp: Option<Ramp>,
}

impl PointCloudBuffer {
    pub fn new(
        grid: Grid,
        color: &ColorMode,
        size: &SizeMode,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let n = grid.vertex_count();
        let mut positions = Vec::with_capacity(n * 3);
        let mut colors = Vec::with_capacity(n * 3);
        let mut sizes = Vec::with_capacity(n);

        let palette = match color {
            ColorMode::PaletteX { anchors, .. } => Some(PaletteGradient::new(anchors.clone())?),
            _ => None,
        };
        let sparkle = match color {
            ColorMode::PaletteX { sparkle, .. } => *sparkle,
            _ => None,
        };
        let mut rng = StdRng::seed_from_u64(seed);

        let color_ramp = match *color {
            ColorMode::HeightRamp {
                low,
                high,
                min_height,
                max_height,
            } => {
                let span = max_height - min_height;
                Some(ColorRamp {
                    low,
                    high,
                    min_height,
                    inv_span: if span != 0.0 { 1.0 / span } else { 0.0 },
                })
            }
            _ => None,
        };
        let size_ramp = match *size {
            SizeMode::HeightRamp {
                low,
                high,
                min_height,
                max_height,
            } => Some(Ramp::new(low, high, min_height, max_height)),
            SizeMode::Fixed(_) => None,
        };

        for ix in 0..grid.count_x() {
            let x = grid.ground_x(ix);
            for iz in 0..grid.count_z() {
                let z = grid.ground_z(iz);
                positions.extend_from_slice(&[x, 0.0, z]);

                let c = match color {
                    ColorMode::Uniform(c) => *c,
                    ColorMode::PaletteX { .. } => {
                        let base = palette
                            .as_ref()
                            .map(|p| p.sample(grid.x_fraction(ix)))
                            .unwrap_or([1.0, 1.0, 1.0]);
                        apply_sparkle(base, sparkle, &mut rng)
                    }
                    ColorMode::HeightRamp { .. } => {
                        color_ramp.as_ref().map(|r| r.at(0.0)).unwrap_or([1.0; 3])
                    }
                };
                colors.extend_from_slice(&c);

                let s = match *size {
                    SizeMode::Fixed(s) => s,
                    SizeMode::HeightRamp { .. } => {
                        size_ramp.as_ref().map(|r| r.at(0.0)).unwrap_or(1.0)
                    }
                };
                sizes.push(s);
            }
        }

        Ok(Self {
            grid,
            positions,
            colors,
            sizes,
            // Everything needs a first upload.
            dirty: DirtyFlags {
                positions: true,
                colors: true,
                sizes: true,
            },
            color_ramp,
            size_ramp,
        })
    }

    /// Recompute every vertex height (and ramped color/size) for time `t`,
    /// in the same order the buffer was filled at construction.
    pub fn update(&mut self, t: f32, wave: &WaveField) {
        let count_z = self.grid.count_z() as usize;
        let mut idx = 0usize;
        for ix in 0..self.grid.count_x() {
            let x = self.grid.ground_x(ix);
            for iz in 0..self.grid.count_z() {
                let z = self.grid.ground_z(iz);
                let y = wave.height(x, z, t);
                self.positions[idx * 3 + 1] = y;
                if let Some(r) = &self.color_ramp {
                    let c = r.at(y);
                    self.colors[idx * 3] = c[0];
                    self.colors[idx * 3 + 1] = c[1];
                    self.colors[idx * 3 + 2] = c[2];
                }
                if let Some(r) = &self.size_ramp {
                    self.sizes[idx] = r.at(y);
                }
                debug_assert_eq!(idx, ix as usize * count_z + iz as usize);
                idx += 1;
            }
        }
        self.dirty.positions = true;
        if self.color_ramp.is_some() {
            self.dirty.colors = true;
        }
        if self.size_ramp.is_some() {
            self.dirty.sizes = true;
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.grid.vertex_count()
    }

    /// Return the dirty flags and clear them; the renderer uploads whatever
    /// was flagged.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    /// Height currently stored for grid cell (ix, iz).
    pub fn height_at(&self, ix: u32, iz: u32) -> f32 {
        let idx = ix as usize * self.grid.count_z() as usize + iz as usize;
        self.positions[idx * 3 + 1]
    }
}

fn apply_sparkle(base: [f32; 3], sparkle: Option<Sparkle>, rng: &mut StdRng) -> [f32; 3] {
    match sparkle {
        Some(s) if rng.gen::<f32>() < s.probability => {
            lerp_rgb(base, [1.0, 1.0, 1.0], s.blend)
        }
        _ => base,
    }
}
