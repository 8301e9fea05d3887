//! The built-in surface variants, expressed as configuration data. Each
//! builder returns the full recipe for one look; the engine never branches on
//! a variant name.

use fnv::FnvHashMap;
use smallvec::smallvec;

use crate::config::{
    BlendMode, CameraConfig, ClockMode, ColorMode, Fog, ParallaxConfig, SizeMode, Sparkle,
    SurfaceConfig, WaveAxis, WaveShape, WaveTerm,
};
use crate::palette::rgb;
use glam::Vec3;

pub const VARIANT_NAMES: &[&str] = &[
    "dotted", "luma", "fluid", "void", "circle", "particle", "aether",
];

pub type VariantFn = fn() -> SurfaceConfig;

pub fn registry() -> FnvHashMap<&'static str, VariantFn> {
    let mut m: FnvHashMap<&'static str, VariantFn> = FnvHashMap::default();
    m.insert("dotted", dotted);
    m.insert("luma", luma);
    m.insert("fluid", fluid);
    m.insert("void", void);
    m.insert("circle", circle);
    m.insert("particle", particle);
    m.insert("aether", aether);
    m
}

pub fn by_name(name: &str) -> Option<SurfaceConfig> {
    registry().get(name).map(|build| build())
}

fn opaque(color: [f32; 3]) -> [f32; 4] {
    [color[0], color[1], color[2], 1.0]
}

fn sine(axis: WaveAxis, frequency: f32, amplitude: f32, phase_speed: f32) -> WaveTerm {
    WaveTerm {
        axis,
        shape: WaveShape::Sine,
        frequency,
        amplitude,
        phase_speed,
    }
}

fn cosine(axis: WaveAxis, frequency: f32, amplitude: f32, phase_speed: f32) -> WaveTerm {
    WaveTerm {
        axis,
        shape: WaveShape::Cosine,
        frequency,
        amplitude,
        phase_speed,
    }
}

/// Shared two-tone palette used by the tinted variants.
fn duotone() -> Vec<[f32; 3]> {
    vec![rgb(0xbded8f), rgb(0x308698)]
}

/// Sparse monochrome field seen from high above; the frame-stepped original.
pub fn dotted() -> SurfaceConfig {
    SurfaceConfig {
        name: "dotted",
        count_x: 40,
        count_z: 60,
        spacing: 150.0,
        wave_terms: smallvec![
            sine(WaveAxis::X, 0.3 / 150.0, 50.0, 0.3),
            sine(WaveAxis::Z, 0.5 / 150.0, 50.0, 0.5),
        ],
        color: ColorMode::Uniform([0.78, 0.78, 0.78]),
        size: SizeMode::Fixed(8.0),
        size_attenuation: 450.0,
        opacity: 0.8,
        clock: ClockMode::Counter { step: 0.1 },
        camera: CameraConfig {
            fov_y_degrees: 60.0,
            near: 1.0,
            far: 10_000.0,
            eye: Vec3::new(0.0, 355.0, 1220.0),
            look_at: Vec3::new(0.0, 355.0, 0.0),
        },
        fog: Fog::Linear {
            color: [0.0, 0.0, 0.0],
            near: 2000.0,
            far: 10_000.0,
        },
        background: [0.0, 0.0, 0.0, 1.0],
        blend: BlendMode::Alpha,
        spin_speed: 0.0,
        parallax: None,
        seed: 42,
    }
}

/// Duotone swell whose point sizes ride the wave height.
pub fn luma() -> SurfaceConfig {
    SurfaceConfig {
        name: "luma",
        count_x: 60,
        count_z: 60,
        spacing: 100.0,
        wave_terms: smallvec![
            sine(WaveAxis::X, 0.3 / 100.0, 50.0, 0.3),
            sine(WaveAxis::Z, 0.5 / 100.0, 50.0, 0.5),
        ],
        color: ColorMode::PaletteX {
            anchors: duotone(),
            sparkle: None,
        },
        // size tracks height linearly: 0 in the deepest trough, 8 on the
        // tallest crest
        size: SizeMode::HeightRamp {
            low: 0.0,
            high: 8.0,
            min_height: -100.0,
            max_height: 100.0,
        },
        size_attenuation: 450.0,
        opacity: 0.8,
        clock: ClockMode::Counter { step: 0.1 },
        camera: CameraConfig {
            fov_y_degrees: 75.0,
            near: 1.0,
            far: 10_000.0,
            eye: Vec3::new(0.0, 500.0, 1000.0),
            look_at: Vec3::ZERO,
        },
        fog: Fog::Exp2 {
            color: [0.0, 0.0, 0.0],
            density: 0.0009,
        },
        background: [0.0, 0.0, 0.0, 1.0],
        blend: BlendMode::Alpha,
        spin_speed: 0.0,
        parallax: None,
        seed: 42,
    }
}

/// Dense grayscale sheet where both brightness and size follow height.
pub fn fluid() -> SurfaceConfig {
    SurfaceConfig {
        name: "fluid",
        count_x: 100,
        count_z: 100,
        spacing: 4.0,
        wave_terms: smallvec![
            sine(WaveAxis::X, 0.3 / 4.0, 10.0, 0.3),
            sine(WaveAxis::Z, 0.5 / 4.0, 10.0, 0.5),
            sine(WaveAxis::Diagonal, 0.2 / 4.0, 5.0, 0.2),
        ],
        color: ColorMode::HeightRamp {
            low: rgb(0x666666),
            high: rgb(0xffffff),
            min_height: -25.0,
            max_height: 25.0,
        },
        size: SizeMode::HeightRamp {
            low: 0.5,
            high: 3.5,
            min_height: -25.0,
            max_height: 25.0,
        },
        size_attenuation: 300.0,
        opacity: 1.0,
        clock: ClockMode::Counter { step: 0.05 },
        camera: CameraConfig {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 40.0, 100.0),
            look_at: Vec3::ZERO,
        },
        fog: Fog::Exp2 {
            color: rgb(0x060809),
            density: 0.0015,
        },
        background: opaque(rgb(0x060809)),
        blend: BlendMode::Additive,
        spin_speed: 0.0,
        parallax: None,
        seed: 42,
    }
}

/// Close-up white shimmer with a radial ripple running outward.
pub fn void() -> SurfaceConfig {
    SurfaceConfig {
        name: "void",
        count_x: 60,
        count_z: 60,
        spacing: 1.2,
        wave_terms: smallvec![
            sine(WaveAxis::X, 0.3, 0.5, 1.0),
            cosine(WaveAxis::Z, 0.2, 0.5, 1.0),
            sine(WaveAxis::Radial, 0.5, 1.5, -2.0),
        ],
        color: ColorMode::Uniform([1.0, 1.0, 1.0]),
        size: SizeMode::Fixed(1.8),
        size_attenuation: 450.0,
        opacity: 1.0,
        clock: ClockMode::Counter { step: 0.012 },
        camera: CameraConfig {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 8.0, 25.0),
            look_at: Vec3::ZERO,
        },
        fog: Fog::Exp2 {
            color: rgb(0x050a0a),
            density: 0.035,
        },
        background: opaque(rgb(0x050a0a)),
        blend: BlendMode::Additive,
        spin_speed: 0.0,
        parallax: None,
        seed: 42,
    }
}

/// Wide duotone disc field, slowly spinning, with sparkle accents.
pub fn circle() -> SurfaceConfig {
    SurfaceConfig {
        name: "circle",
        count_x: 120,
        count_z: 120,
        spacing: 1.6,
        wave_terms: smallvec![
            sine(WaveAxis::X, 0.08, 3.5, 0.6),
            cosine(WaveAxis::Z, 0.08, 3.5, 0.4),
            sine(WaveAxis::Diagonal, 0.04, 3.5, 0.3),
        ],
        color: ColorMode::PaletteX {
            anchors: duotone(),
            sparkle: Some(Sparkle {
                probability: 0.15,
                blend: 0.15,
            }),
        },
        size: SizeMode::Fixed(0.55),
        size_attenuation: 450.0,
        opacity: 0.85,
        clock: ClockMode::Elapsed { scale: 1.0 },
        camera: CameraConfig {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 25.0, 60.0),
            look_at: Vec3::ZERO,
        },
        fog: Fog::Exp2 {
            color: rgb(0x050a0a),
            density: 0.002,
        },
        background: opaque(rgb(0x050a0a)),
        blend: BlendMode::Additive,
        spin_speed: 0.03,
        parallax: None,
        seed: 42,
    }
}

/// The parallax variant: the camera leans with the pointer.
pub fn particle() -> SurfaceConfig {
    SurfaceConfig {
        name: "particle",
        count_x: 100,
        count_z: 100,
        spacing: 1.5,
        wave_terms: smallvec![
            sine(WaveAxis::X, 0.1, 2.5, 0.8),
            cosine(WaveAxis::Z, 0.1, 2.5, 0.5),
            sine(WaveAxis::Diagonal, 0.05, 2.5, 0.4),
        ],
        color: ColorMode::PaletteX {
            anchors: duotone(),
            sparkle: Some(Sparkle {
                probability: 0.2,
                blend: 0.2,
            }),
        },
        size: SizeMode::Fixed(0.42),
        size_attenuation: 450.0,
        opacity: 0.9,
        clock: ClockMode::Elapsed { scale: 1.0 },
        camera: CameraConfig {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 20.0, 50.0),
            look_at: Vec3::ZERO,
        },
        fog: Fog::Exp2 {
            color: rgb(0x050a0a),
            density: 0.002,
        },
        background: opaque(rgb(0x050a0a)),
        blend: BlendMode::Additive,
        spin_speed: 0.04,
        parallax: Some(ParallaxConfig {
            strength: 0.05,
            damping: 0.05,
        }),
        seed: 42,
    }
}

/// Soft gray glow with a slow inward ripple; the slowest mover of the set.
pub fn aether() -> SurfaceConfig {
    SurfaceConfig {
        name: "aether",
        count_x: 100,
        count_z: 100,
        spacing: 1.2,
        wave_terms: smallvec![
            sine(WaveAxis::X, 0.1, 3.0, 1.0),
            cosine(WaveAxis::Z, 0.08, 3.0, 1.2),
            sine(WaveAxis::Radial, 0.05, 2.0, -0.5),
        ],
        color: ColorMode::Uniform(rgb(0xe0e0e0)),
        size: SizeMode::Fixed(4.0),
        size_attenuation: 120.0,
        opacity: 0.7,
        clock: ClockMode::Elapsed { scale: 0.4 },
        camera: CameraConfig {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vec3::new(0.0, 15.0, 50.0),
            look_at: Vec3::ZERO,
        },
        fog: Fog::Exp2 {
            color: rgb(0x050505),
            density: 0.0015,
        },
        background: opaque(rgb(0x050505)),
        blend: BlendMode::Additive,
        spin_speed: 0.06,
        parallax: None,
        seed: 42,
    }
}
