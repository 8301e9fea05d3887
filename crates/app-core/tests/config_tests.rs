// Configuration validation and the built-in variant registry.

use app_core::palette::{rgb, PaletteGradient};
use app_core::variants::{self, VARIANT_NAMES};
use app_core::{ConfigError, RenderLoop};

#[test]
fn every_builtin_variant_validates_and_builds() {
    for name in VARIANT_NAMES {
        let config = variants::by_name(name).unwrap_or_else(|| panic!("missing variant {name}"));
        assert_eq!(config.name, *name);
        config
            .validate()
            .unwrap_or_else(|e| panic!("variant {name} invalid: {e}"));
        // full CPU-side construction must succeed for each preset
        RenderLoop::new(&config).unwrap_or_else(|e| panic!("variant {name} failed: {e}"));
    }
}

#[test]
fn unknown_variant_name_is_none() {
    assert!(variants::by_name("nope").is_none());
    assert!(variants::by_name("").is_none());
}

#[test]
fn zero_grid_dimension_is_rejected() {
    let mut config = variants::void();
    config.count_z = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyGrid { .. })
    ));
}

#[test]
fn non_positive_spacing_is_rejected() {
    for bad in [0.0, -1.5, f32::NAN, f32::INFINITY] {
        let mut config = variants::void();
        config.spacing = bad;
        assert!(matches!(config.validate(), Err(ConfigError::BadSpacing(_))));
    }
}

#[test]
fn empty_wave_terms_are_rejected() {
    let mut config = variants::void();
    config.wave_terms.clear();
    assert!(matches!(config.validate(), Err(ConfigError::NoWaveTerms)));
}

#[test]
fn single_anchor_palette_is_rejected() {
    let mut config = variants::circle();
    if let app_core::ColorMode::PaletteX { anchors, .. } = &mut config.color {
        anchors.truncate(1);
    }
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PaletteTooSmall(1))
    ));
}

#[test]
fn non_positive_clock_step_is_rejected() {
    let mut config = variants::dotted();
    config.clock = app_core::ClockMode::Counter { step: 0.0 };
    assert!(matches!(config.validate(), Err(ConfigError::BadClockStep)));
}

#[test]
fn hex_colors_normalize() {
    assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
    assert_eq!(rgb(0x00ff00), [0.0, 1.0, 0.0]);
    assert_eq!(rgb(0x0000ff), [0.0, 0.0, 1.0]);
    let g = rgb(0x808080);
    assert!((g[0] - 128.0 / 255.0).abs() < 1e-6);
}

#[test]
fn palette_gradient_hits_anchors_and_clamps() {
    let p = PaletteGradient::new(vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]).expect("palette");
    assert_eq!(p.sample(0.0), [1.0, 0.0, 0.0]);
    assert_eq!(p.sample(1.0), [0.0, 0.0, 1.0]);
    let mid = p.sample(0.5);
    assert!((mid[0] - 0.5).abs() < 1e-6 && (mid[2] - 0.5).abs() < 1e-6);
    // out-of-range samples clamp to the ends
    assert_eq!(p.sample(-1.0), p.sample(0.0));
    assert_eq!(p.sample(2.0), p.sample(1.0));
}

#[test]
fn palette_gradient_requires_two_anchors() {
    assert!(PaletteGradient::new(vec![[1.0; 3]]).is_err());
}
