// Tests for the point buffer, in particular the construction/update
// iteration-order invariant: the value written for cell (i, j) must be the
// wave evaluated at the exact coordinates that cell was given at
// construction.

use app_core::{
    ColorMode, Grid, PointCloudBuffer, SizeMode, Sparkle, WaveAxis, WaveField, WaveShape, WaveTerm,
};
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

// Deliberately asymmetric in x vs z so a transposed fill order cannot pass.
fn asymmetric_wave() -> WaveField {
    WaveField::new(
        vec![
            term(WaveAxis::X, 0.3, 10.0, 0.3),
            term(WaveAxis::Z, 0.7, 4.0, 0.5),
        ]
        .into(),
    )
    .expect("valid terms")
}

fn plain_buffer(grid: Grid) -> PointCloudBuffer {
    PointCloudBuffer::new(grid, &ColorMode::Uniform([1.0; 3]), &SizeMode::Fixed(1.0), 42)
        .expect("valid buffer")
}

#[test]
fn update_writes_every_height_in_construction_order() {
    // 3x5 so count_x != count_z
    let grid = Grid::new(3, 5, 2.0).expect("grid");
    let wave = asymmetric_wave();
    let mut buffer = plain_buffer(grid);
    let t = 1.25;
    buffer.update(t, &wave);

    assert_eq!(buffer.vertex_count(), 15);
    assert_eq!(buffer.positions().len(), 15 * 3);
    for ix in 0..3 {
        for iz in 0..5 {
            let expected = wave.height(grid.ground_x(ix), grid.ground_z(iz), t);
            assert_eq!(
                buffer.height_at(ix, iz).to_bits(),
                expected.to_bits(),
                "cell ({ix}, {iz})"
            );
        }
    }
}

#[test]
fn ground_plane_coordinates_never_change() {
    let grid = Grid::new(4, 3, 1.5).expect("grid");
    let wave = asymmetric_wave();
    let mut buffer = plain_buffer(grid);
    let before: Vec<(f32, f32)> = buffer
        .positions()
        .chunks(3)
        .map(|p| (p[0], p[2]))
        .collect();
    for frame in 0..10 {
        buffer.update(frame as f32 * 0.1, &wave);
    }
    let after: Vec<(f32, f32)> = buffer
        .positions()
        .chunks(3)
        .map(|p| (p[0], p[2]))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn update_is_bit_identical_for_equal_time() {
    let grid = Grid::new(8, 8, 1.2).expect("grid");
    let wave = asymmetric_wave();
    let mut a = plain_buffer(grid);
    let mut b = plain_buffer(grid);
    a.update(3.75, &wave);
    b.update(0.5, &wave);
    b.update(3.75, &wave);
    let bits = |buf: &PointCloudBuffer| -> Vec<u32> {
        buf.positions().iter().map(|v| v.to_bits()).collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn literal_formula_at_known_vertex() {
    // spacing 10 with 4 columns puts column 3 at x = 3*10 - 20 = 10
    let grid = Grid::new(4, 2, 10.0).expect("grid");
    assert_eq!(grid.ground_x(3), 10.0);
    assert_eq!(grid.ground_x(2), 0.0);

    let wave = WaveField::new(vec![term(WaveAxis::X, 1.0, 5.0, 1.0)].into()).expect("wave");
    let mut buffer = plain_buffer(grid);

    // the vertex with zero spatial phase rests at zero when t = 0
    buffer.update(0.0, &wave);
    assert_eq!(buffer.height_at(2, 0), 0.0);

    buffer.update(FRAC_PI_2, &wave);
    let expected = 5.0 * (10.0 + FRAC_PI_2).sin();
    assert!((buffer.height_at(3, 0) - expected).abs() < 1e-6);
    assert!((buffer.height_at(3, 1) - expected).abs() < 1e-6);
}

#[test]
fn dirty_flags_start_set_and_clear_on_take() {
    let grid = Grid::new(2, 2, 1.0).expect("grid");
    let mut buffer = plain_buffer(grid);
    let first = buffer.take_dirty();
    assert!(first.positions && first.colors && first.sizes);
    let second = buffer.take_dirty();
    assert!(!second.any());
}

#[test]
fn fixed_appearance_update_dirties_positions_only() {
    let grid = Grid::new(2, 2, 1.0).expect("grid");
    let wave = asymmetric_wave();
    let mut buffer = plain_buffer(grid);
    buffer.take_dirty();
    buffer.update(1.0, &wave);
    let dirty = buffer.take_dirty();
    assert!(dirty.positions);
    assert!(!dirty.colors);
    assert!(!dirty.sizes);
}

#[test]
fn height_ramped_appearance_dirties_colors_and_sizes() {
    let grid = Grid::new(2, 2, 1.0).expect("grid");
    let wave = asymmetric_wave();
    let color = ColorMode::HeightRamp {
        low: [0.4, 0.4, 0.4],
        high: [1.0, 1.0, 1.0],
        min_height: -14.0,
        max_height: 14.0,
    };
    let size = SizeMode::HeightRamp {
        low: 0.5,
        high: 3.5,
        min_height: -14.0,
        max_height: 14.0,
    };
    let mut buffer = PointCloudBuffer::new(grid, &color, &size, 42).expect("buffer");
    buffer.take_dirty();
    buffer.update(1.0, &wave);
    let dirty = buffer.take_dirty();
    assert!(dirty.positions && dirty.colors && dirty.sizes);

    // ramps track the written height
    let h = buffer.height_at(1, 0);
    let a = ((h + 14.0) / 28.0).clamp(0.0, 1.0);
    let idx = 2usize; // row-major: ix * count_z + iz
    let expected_size = 0.5 + 3.0 * a;
    assert!((buffer.sizes()[idx] - expected_size).abs() < 1e-5);
    let expected_r = 0.4 + 0.6 * a;
    assert!((buffer.colors()[idx * 3] - expected_r).abs() < 1e-5);
}

#[test]
fn sparkle_is_deterministic_per_seed() {
    let grid = Grid::new(10, 10, 1.0).expect("grid");
    let color = ColorMode::PaletteX {
        anchors: vec![[0.2, 0.8, 0.3], [0.1, 0.4, 0.6]],
        sparkle: Some(Sparkle {
            probability: 0.2,
            blend: 0.2,
        }),
    };
    let size = SizeMode::Fixed(1.0);
    let a = PointCloudBuffer::new(grid, &color, &size, 7).expect("buffer");
    let b = PointCloudBuffer::new(grid, &color, &size, 7).expect("buffer");
    assert_eq!(a.colors(), b.colors());

    let c = PointCloudBuffer::new(grid, &color, &size, 8).expect("buffer");
    assert_ne!(a.colors(), c.colors());
}

#[test]
fn palette_colors_follow_x_fraction() {
    let grid = Grid::new(4, 1, 1.0).expect("grid");
    let color = ColorMode::PaletteX {
        anchors: vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        sparkle: None,
    };
    let buffer =
        PointCloudBuffer::new(grid, &color, &SizeMode::Fixed(1.0), 42).expect("buffer");
    // column 0 sits at the first anchor; later columns shift toward the second
    assert!((buffer.colors()[0] - 1.0).abs() < 1e-6);
    assert!(buffer.colors()[3 * 3] < buffer.colors()[0]);
    assert!(buffer.colors()[3 * 3 + 2] > buffer.colors()[2]);
}
