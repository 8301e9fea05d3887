//! The per-instance animation driver.
//!
//! `RenderLoop` owns everything that changes per frame (clock, wave field,
//! point buffer, scene) and exposes a single `tick` that the host scheduler
//! (requestAnimationFrame on web, the winit event loop on native) calls once
//! per display refresh. The loop itself never schedules anything: the host
//! reschedules while `tick` returns `Continue` and stops when it returns
//! `Stopped`, which keeps the state machine testable without a GPU.

use std::time::Duration;

use crate::clock::AnimationClock;
use crate::config::{ConfigError, SurfaceConfig};
use crate::grid::Grid;
use crate::points::PointCloudBuffer;
use crate::scene::SceneContext;
use crate::wave::WaveField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule another tick.
    Continue,
    /// Do not schedule again.
    Stopped,
}

/// Fatal draw failure; the surface is gone and the loop must not retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceLost;

/// One draw of the current buffer against the current scene. Implemented by
/// the platform renderers and by test doubles.
pub trait DrawTarget {
    fn draw(&mut self, scene: &SceneContext, points: &mut PointCloudBuffer)
        -> Result<(), SurfaceLost>;
}

pub struct RenderLoop {
    state: LoopState,
    clock: AnimationClock,
    wave: WaveField,
    points: PointCloudBuffer,
    scene: SceneContext,
    ticks: u64,
}

impl RenderLoop {
    /// Build the full CPU side of an instance from a validated config.
    /// Rejects bad configurations before the caller allocates anything on
    /// the GPU.
    pub fn new(config: &SurfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.count_x, config.count_z, config.spacing)?;
        let wave = WaveField::new(config.wave_terms.clone())?;
        let points = PointCloudBuffer::new(grid, &config.color, &config.size, config.seed)?;
        let scene = SceneContext::from_config(config);
        Ok(Self {
            state: LoopState::Idle,
            clock: AnimationClock::new(config.clock),
            wave,
            points,
            scene,
            ticks: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Idle -> Running. A no-op on a loop that is already Running, and a
    /// stopped loop stays stopped; remounting builds a fresh instance.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
        }
    }

    /// Running -> Stopped. Takes effect no later than the next tick
    /// boundary: a tick in flight finishes its draw, but `tick` refuses to
    /// run again and tells the host not to reschedule.
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            self.state = LoopState::Stopped;
        }
    }

    /// Ticks completed so far (draws that succeeded).
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    #[inline]
    pub fn scene(&self) -> &SceneContext {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut SceneContext {
        &mut self.scene
    }

    #[inline]
    pub fn points(&self) -> &PointCloudBuffer {
        &self.points
    }

    /// One frame: advance the clock, refill the buffer, ease the camera,
    /// draw. Draw errors stop the loop instead of propagating, so a failing
    /// instance can never take the shared scheduler down with it.
    pub fn tick(&mut self, dt: Duration, target: &mut dyn DrawTarget) -> TickOutcome {
        if self.state != LoopState::Running {
            return TickOutcome::Stopped;
        }
        let t = self.clock.advance(dt);
        self.points.update(t, &self.wave);
        self.scene.step(dt.as_secs_f32());
        match target.draw(&self.scene, &mut self.points) {
            Ok(()) => {
                self.ticks += 1;
                TickOutcome::Continue
            }
            Err(SurfaceLost) => {
                log::warn!("[loop] draw target lost after {} ticks; stopping", self.ticks);
                self.state = LoopState::Stopped;
                TickOutcome::Stopped
            }
        }
    }
}
