// Host-side tests for the pure wave-field math.

use app_core::{WaveAxis, WaveField, WaveShape, WaveTerm};
use std::f32::consts::FRAC_PI_2;

fn term(axis: WaveAxis, frequency: f32, amplitude: f32, phase_speed: f32) -> WaveTerm {
    WaveTerm {
        axis,
        shape: WaveShape::Sine,
        frequency,
        amplitude,
        phase_speed,
    }
}

fn field(terms: Vec<WaveTerm>) -> WaveField {
    WaveField::new(terms.into()).expect("valid terms")
}

#[test]
fn x_term_matches_literal_formula() {
    let wave = field(vec![term(WaveAxis::X, 1.0, 5.0, 1.0)]);
    // y = 5 * sin(x + t)
    let expected = 5.0 * (10.0 + FRAC_PI_2).sin();
    assert!((wave.height(10.0, -3.0, FRAC_PI_2) - expected).abs() < 1e-6);
    // z must not contribute for an X-axis term
    assert_eq!(
        wave.height(10.0, -3.0, FRAC_PI_2),
        wave.height(10.0, 77.0, FRAC_PI_2)
    );
}

#[test]
fn spatial_phase_zero_gives_zero_height_at_t_zero() {
    let wave = field(vec![term(WaveAxis::X, 1.0, 5.0, 1.0)]);
    assert_eq!(wave.height(0.0, 0.0, 0.0), 0.0);
}

#[test]
fn cosine_term_is_sine_shifted() {
    let mut c = term(WaveAxis::Z, 0.2, 2.0, 1.0);
    c.shape = WaveShape::Cosine;
    let wave = field(vec![c]);
    let expected = 2.0 * (7.0_f32 * 0.2 + 1.5).cos();
    assert!((wave.height(0.0, 7.0, 1.5) - expected).abs() < 1e-6);
}

#[test]
fn radial_term_uses_distance_from_origin() {
    let wave = field(vec![term(WaveAxis::Radial, 0.5, 1.5, -2.0)]);
    // (3, 4) sits at radius 5
    let expected = 1.5 * (5.0_f32 * 0.5 - 2.0 * 0.25).sin();
    assert!((wave.height(3.0, 4.0, 0.25) - expected).abs() < 1e-6);
    // radial symmetry
    assert!((wave.height(3.0, 4.0, 0.25) - wave.height(-4.0, 3.0, 0.25)).abs() < 1e-6);
}

#[test]
fn diagonal_term_depends_on_x_plus_z() {
    let wave = field(vec![term(WaveAxis::Diagonal, 0.05, 2.5, 0.4)]);
    assert!((wave.height(1.0, 9.0, 2.0) - wave.height(6.0, 4.0, 2.0)).abs() < 1e-6);
}

#[test]
fn terms_sum() {
    let a = term(WaveAxis::X, 0.3, 10.0, 0.3);
    let b = term(WaveAxis::Z, 0.5, 10.0, 0.5);
    let sum = field(vec![a, b]);
    let only_a = field(vec![a]);
    let only_b = field(vec![b]);
    let (x, z, t) = (12.0, -7.0, 3.3);
    assert!(
        (sum.height(x, z, t) - (only_a.height(x, z, t) + only_b.height(x, z, t))).abs() < 1e-5
    );
}

#[test]
fn evaluation_is_bit_identical() {
    let wave = field(vec![
        term(WaveAxis::X, 0.1, 2.5, 0.8),
        term(WaveAxis::Radial, 0.05, 2.0, -0.5),
    ]);
    for i in 0..100 {
        let x = i as f32 * 1.7 - 50.0;
        let a = wave.height(x, x * 0.3, 4.25);
        let b = wave.height(x, x * 0.3, 4.25);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn total_over_large_inputs() {
    let wave = field(vec![
        term(WaveAxis::X, 0.3, 50.0, 0.3),
        term(WaveAxis::Radial, 0.5, 1.5, -2.0),
    ]);
    for &v in &[-1.0e6_f32, -123.456, 0.0, 123.456, 1.0e6] {
        assert!(wave.height(v, -v, 1.0e5).is_finite());
    }
}

#[test]
fn empty_terms_rejected() {
    assert!(WaveField::new(Vec::new().into()).is_err());
}

#[test]
fn non_finite_term_rejected() {
    let bad = term(WaveAxis::X, f32::NAN, 1.0, 1.0);
    assert!(WaveField::new(vec![bad].into()).is_err());
}

#[test]
fn max_amplitude_sums_absolute_amplitudes() {
    let wave = field(vec![
        term(WaveAxis::X, 0.1, 3.0, 1.0),
        term(WaveAxis::Z, 0.08, -3.0, 1.2),
        term(WaveAxis::Radial, 0.05, 2.0, -0.5),
    ]);
    assert!((wave.max_amplitude() - 8.0).abs() < 1e-6);
}
