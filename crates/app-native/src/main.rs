use std::time::Instant;

use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use app_core::{variants, RenderLoop, TickOutcome};

mod render;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let variant = std::env::args().nth(1).unwrap_or_else(|| "particle".into());
    let config = variants::by_name(&variant).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown surface variant '{}' (available: {})",
            variant,
            variants::VARIANT_NAMES.join(", ")
        )
    })?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("surface: {variant}"))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(render::GpuState::new(&window, &config))?;
    let mut render_loop = RenderLoop::new(&config)?;
    let size = window.inner_size();
    render_loop.scene_mut().on_resize(size.width, size.height);
    render_loop.start();
    log::info!(
        "[mount] surface '{}' running ({}x{} points)",
        config.name,
        config.count_x,
        config.count_z
    );

    let window = &window;
    let mut last_frame = Instant::now();
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            gpu.resize_if_needed(size.width, size.height);
            render_loop.scene_mut().on_resize(size.width, size.height);
        }
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let (w, h) = gpu.size();
            render_loop.scene_mut().set_pointer_offset(glam::Vec2::new(
                position.x as f32 - w as f32 / 2.0,
                position.y as f32 - h as f32 / 2.0,
            ));
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            render_loop.stop();
            elwt.exit();
        }
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;
            match render_loop.tick(dt, &mut gpu) {
                TickOutcome::Continue => window.request_redraw(),
                // fatal for this instance; nothing left to drive
                TickOutcome::Stopped => elwt.exit(),
            }
        }
        _ => {}
    })?;
    Ok(())
}
