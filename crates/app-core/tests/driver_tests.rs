// Render-loop state machine tests driven by a mock draw target; no GPU
// involved.

use app_core::{
    BlendMode, CameraConfig, ClockMode, ColorMode, Fog, LoopState, PointCloudBuffer, RenderLoop,
    SceneContext, SizeMode, SurfaceConfig, SurfaceLost, TickOutcome, WaveAxis, WaveShape, WaveTerm,
};
use glam::Vec3;
use std::time::Duration;

fn tiny_config() -> SurfaceConfig {
    SurfaceConfig {
        name: "test",
        count_x: 4,
        count_z: 3,
        spacing: 1.0,
        wave_terms: vec![WaveTerm {
            axis: WaveAxis::X,
            shape: WaveShape::Sine,
            frequency: 0.3,
            amplitude: 2.0,
            phase_speed: 1.0,
        }]
        .into(),
        color: ColorMode::Uniform([1.0; 3]),
        size: SizeMode::Fixed(1.0),
        size_attenuation: 450.0,
        opacity: 1.0,
        clock: ClockMode::Elapsed { scale: 1.0 },
        camera: CameraConfig {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            eye: Vec3::new(0.0, 2.0, 5.0),
            look_at: Vec3::ZERO,
        },
        fog: Fog::None,
        background: [0.0, 0.0, 0.0, 1.0],
        blend: BlendMode::Alpha,
        spin_speed: 0.0,
        parallax: None,
        seed: 1,
    }
}

/// Counts draws; optionally reports the surface lost on the nth draw call
/// (1-based).
#[derive(Default)]
struct MockTarget {
    draws: u64,
    lose_surface_on_draw: Option<u64>,
}

impl app_core::DrawTarget for MockTarget {
    fn draw(
        &mut self,
        _scene: &SceneContext,
        _points: &mut PointCloudBuffer,
    ) -> Result<(), SurfaceLost> {
        self.draws += 1;
        match self.lose_surface_on_draw {
            Some(n) if self.draws >= n => Err(SurfaceLost),
            _ => Ok(()),
        }
    }
}

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn starts_idle_and_start_is_reentrant() {
    let mut rl = RenderLoop::new(&tiny_config()).expect("loop");
    assert_eq!(rl.state(), LoopState::Idle);
    rl.start();
    assert_eq!(rl.state(), LoopState::Running);
    rl.start(); // no-op on a running loop
    assert_eq!(rl.state(), LoopState::Running);
}

#[test]
fn tick_before_start_draws_nothing() {
    let mut rl = RenderLoop::new(&tiny_config()).expect("loop");
    let mut target = MockTarget::default();
    assert_eq!(rl.tick(FRAME, &mut target), TickOutcome::Stopped);
    assert_eq!(target.draws, 0);
}

#[test]
fn stop_before_first_tick_means_zero_draws() {
    let mut rl = RenderLoop::new(&tiny_config()).expect("loop");
    rl.start();
    rl.stop();
    let mut target = MockTarget::default();
    assert_eq!(rl.tick(FRAME, &mut target), TickOutcome::Stopped);
    assert_eq!(target.draws, 0);
    assert_eq!(rl.ticks(), 0);
    assert_eq!(rl.state(), LoopState::Stopped);
}

#[test]
fn stop_is_idempotent() {
    let mut rl = RenderLoop::new(&tiny_config()).expect("loop");
    rl.start();
    rl.stop();
    rl.stop();
    assert_eq!(rl.state(), LoopState::Stopped);
    // a stopped loop cannot be restarted; remounting builds a new one
    rl.start();
    assert_eq!(rl.state(), LoopState::Stopped);
}

#[test]
fn ticks_draw_and_continue_while_running() {
    let mut rl = RenderLoop::new(&tiny_config()).expect("loop");
    rl.start();
    let mut target = MockTarget::default();
    for _ in 0..10 {
        assert_eq!(rl.tick(FRAME, &mut target), TickOutcome::Continue);
    }
    assert_eq!(target.draws, 10);
    assert_eq!(rl.ticks(), 10);
}

#[test]
fn clock_is_strictly_monotonic_across_ticks() {
    for mode in [
        ClockMode::Elapsed { scale: 1.0 },
        ClockMode::Counter { step: 0.1 },
    ] {
        let mut config = tiny_config();
        config.clock = mode;
        let mut rl = RenderLoop::new(&config).expect("loop");
        rl.start();
        let mut target = MockTarget::default();
        let mut last = rl.clock().elapsed();
        for _ in 0..20 {
            rl.tick(FRAME, &mut target);
            let now = rl.clock().elapsed();
            assert!(now > last, "clock went backwards: {now} <= {last}");
            last = now;
        }
    }
}

#[test]
fn surface_lost_stops_the_loop_and_no_further_tick_runs() {
    let mut rl = RenderLoop::new(&tiny_config()).expect("loop");
    rl.start();
    let mut target = MockTarget {
        lose_surface_on_draw: Some(5),
        ..Default::default()
    };
    for _ in 0..4 {
        assert_eq!(rl.tick(FRAME, &mut target), TickOutcome::Continue);
    }
    // tick 5 hits the lost surface: fatal, not retried
    assert_eq!(rl.tick(FRAME, &mut target), TickOutcome::Stopped);
    assert_eq!(rl.state(), LoopState::Stopped);
    assert_eq!(target.draws, 5);

    // a hypothetical tick 6 must not reach the draw target
    assert_eq!(rl.tick(FRAME, &mut target), TickOutcome::Stopped);
    assert_eq!(target.draws, 5);
    assert_eq!(rl.ticks(), 4);
}

#[test]
fn tick_refills_buffer_from_clock_time() {
    let mut config = tiny_config();
    config.clock = ClockMode::Counter { step: 0.5 };
    let mut rl = RenderLoop::new(&config).expect("loop");
    rl.start();
    let mut target = MockTarget::default();
    rl.tick(FRAME, &mut target);
    rl.tick(FRAME, &mut target);
    // after two ticks the buffer reflects t = 1.0
    let x = rl.points().grid().ground_x(0);
    let expected = 2.0 * (x * 0.3 + 1.0_f32).sin();
    assert!((rl.points().height_at(0, 0) - expected).abs() < 1e-6);
}

#[test]
fn invalid_configs_are_rejected_before_any_loop_exists() {
    let mut config = tiny_config();
    config.count_x = 0;
    assert!(RenderLoop::new(&config).is_err());

    let mut config = tiny_config();
    config.spacing = -1.0;
    assert!(RenderLoop::new(&config).is_err());

    let mut config = tiny_config();
    config.spacing = f32::NAN;
    assert!(RenderLoop::new(&config).is_err());

    let mut config = tiny_config();
    config.wave_terms.clear();
    assert!(RenderLoop::new(&config).is_err());
}
