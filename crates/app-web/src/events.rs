//! Scoped DOM event subscriptions.
//!
//! Each subscription owns its JS closure and removes the listener on
//! `dispose` (or drop), so a torn-down surface leaves nothing behind on the
//! window.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct ResizeSubscription {
    window: web::Window,
    closure: Option<Closure<dyn FnMut()>>,
}

impl ResizeSubscription {
    pub fn subscribe(handler: impl FnMut() + 'static) -> Option<Self> {
        let window = web::window()?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            window,
            closure: Some(closure),
        })
    }

    pub fn dispose(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

pub struct PointerSubscription {
    window: web::Window,
    closure: Option<Closure<dyn FnMut(web::PointerEvent)>>,
}

impl PointerSubscription {
    pub fn subscribe(handler: impl FnMut(web::PointerEvent) + 'static) -> Option<Self> {
        let window = web::window()?;
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
        window
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            window,
            closure: Some(closure),
        })
    }

    pub fn dispose(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self.window.remove_event_listener_with_callback(
                "pointermove",
                closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Pointer position relative to the viewport center, in CSS pixels.
pub fn pointer_center_offset(ev: &web::PointerEvent, window: &web::Window) -> glam::Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    glam::Vec2::new(
        (ev.client_x() as f64 - w / 2.0) as f32,
        (ev.client_y() as f64 - h / 2.0) as f32,
    )
}
