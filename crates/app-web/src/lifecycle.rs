//! Mount/teardown boundary for one surface instance.
//!
//! `mount` builds everything in dependency order and starts the loop;
//! the returned `Surface` is the teardown capability. Teardown stops the
//! loop, unsubscribes the DOM listeners, releases the GPU buffers, and
//! detaches the canvas, in that order, best-effort, exactly once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use app_core::{RenderLoop, SurfaceConfig, TickOutcome};

use crate::dom;
use crate::events::{self, PointerSubscription, ResizeSubscription};
use crate::render::GpuState;

struct Instance {
    render_loop: RenderLoop,
    gpu: GpuState<'static>,
    last_frame: Instant,
}

pub struct Surface {
    container: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    instance: Rc<RefCell<Instance>>,
    resize: Option<ResizeSubscription>,
    pointer: Option<PointerSubscription>,
    done: Cell<bool>,
}

pub async fn mount(container: web::HtmlElement, config: SurfaceConfig) -> anyhow::Result<Surface> {
    // reject bad configs before any GPU resource exists
    config.validate()?;

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::attach_canvas(&document, &container)?;
    dom::sync_canvas_backing_size(&canvas, &container);

    // leak one JS handle so the wgpu surface can hold it for 'static
    let leaked: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
    let gpu = match GpuState::new(leaked, &config).await {
        Ok(gpu) => gpu,
        Err(e) => {
            // initialization failure: leave the page's static backdrop as-is
            dom::detach_canvas(&container, &canvas);
            return Err(e);
        }
    };

    let mut render_loop = RenderLoop::new(&config)?;
    render_loop
        .scene_mut()
        .on_resize(canvas.width(), canvas.height());
    render_loop.start();

    let instance = Rc::new(RefCell::new(Instance {
        render_loop,
        gpu,
        last_frame: Instant::now(),
    }));

    let resize = {
        let instance = instance.clone();
        let canvas = canvas.clone();
        let container = container.clone();
        ResizeSubscription::subscribe(move || {
            let (w, h) = dom::sync_canvas_backing_size(&canvas, &container);
            if let Ok(mut inst) = instance.try_borrow_mut() {
                inst.gpu.resize_if_needed(w, h);
                inst.render_loop.scene_mut().on_resize(w, h);
            }
        })
    };

    let pointer = if config.parallax.is_some() {
        let instance = instance.clone();
        PointerSubscription::subscribe(move |ev| {
            if let (Some(w), Ok(mut inst)) = (web::window(), instance.try_borrow_mut()) {
                let offset = events::pointer_center_offset(&ev, &w);
                inst.render_loop.scene_mut().set_pointer_offset(offset);
            }
        })
    } else {
        None
    };

    schedule_frames(instance.clone());
    log::info!(
        "[mount] surface '{}' running ({}x{} points)",
        config.name,
        config.count_x,
        config.count_z
    );

    Ok(Surface {
        container,
        canvas,
        instance,
        resize,
        pointer,
        done: Cell::new(false),
    })
}

/// requestAnimationFrame driver. Reschedules while the loop wants to
/// continue; once the loop reports Stopped the closure drops its own
/// self-reference and no further frame is requested.
fn schedule_frames(instance: Rc<RefCell<Instance>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let outcome = {
            let inst = &mut *instance.borrow_mut();
            let now = Instant::now();
            let dt = now - inst.last_frame;
            inst.last_frame = now;
            let Instance {
                render_loop, gpu, ..
            } = inst;
            render_loop.tick(dt, gpu)
        };
        match outcome {
            TickOutcome::Continue => request_frame(&tick_clone),
            TickOutcome::Stopped => {
                tick_clone.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(window), Some(closure)) = (web::window(), tick.borrow().as_ref()) {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

impl Surface {
    /// Stop the loop and release everything this mount created. Every step
    /// runs even if an earlier one fails, and a second call is a no-op.
    pub fn teardown(&mut self) {
        if self.done.replace(true) {
            return;
        }
        if let Ok(mut inst) = self.instance.try_borrow_mut() {
            inst.render_loop.stop();
        }
        if let Some(sub) = &mut self.resize {
            sub.dispose();
        }
        if let Some(sub) = &mut self.pointer {
            sub.dispose();
        }
        if let Ok(mut inst) = self.instance.try_borrow_mut() {
            inst.gpu.dispose();
        }
        dom::detach_canvas(&self.container, &self.canvas);
        log::info!("[teardown] surface released");
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.teardown();
    }
}
