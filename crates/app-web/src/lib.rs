#![cfg(target_arch = "wasm32")]

pub mod dom;
pub mod events;
pub mod lifecycle;
pub mod render;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use app_core::variants;

// Seed mixer so surfaces mounted on the same page sparkle differently.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

// Handles for auto-mounted surfaces; they live as long as the page does.
thread_local! {
    static SURFACES: RefCell<Vec<lifecycle::Surface>> = RefCell::new(Vec::new());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = mount_all().await {
            log::error!("mount error: {:?}", e);
        }
    });
    Ok(())
}

/// Mount one surface per `[data-surface]` container in the document. A
/// container that fails to mount is skipped: the page keeps its static
/// backdrop there and everything else carries on.
async fn mount_all() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let nodes = document
        .query_selector_all("[data-surface]")
        .map_err(|e| anyhow::anyhow!(format!("{e:?}")))?;

    let mut mounted = 0u32;
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else { continue };
        let Ok(el) = node.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        let Some(name) = el.get_attribute("data-surface") else {
            continue;
        };
        let Some(mut config) = variants::by_name(&name) else {
            log::warn!("[mount] unknown surface variant '{}'", name);
            continue;
        };
        config.seed ^= (i as u64).wrapping_mul(SEED_MIX);
        match lifecycle::mount(el, config).await {
            Ok(surface) => {
                SURFACES.with(|s| s.borrow_mut().push(surface));
                mounted += 1;
            }
            Err(e) => log::error!("[mount] '{}' failed: {:?}", name, e),
        }
    }
    log::info!("[mount] {} surface(s) running", mounted);
    Ok(())
}

/// JS-facing handle for a surface mounted via `mount_surface`.
#[wasm_bindgen]
pub struct SurfaceHandle {
    inner: Option<lifecycle::Surface>,
}

#[wasm_bindgen]
impl SurfaceHandle {
    /// Stop the animation and release the surface's resources. Calling this
    /// twice is a no-op.
    pub fn teardown(&mut self) {
        if let Some(mut surface) = self.inner.take() {
            surface.teardown();
        }
    }
}

/// Mount a named variant onto a container element and return its teardown
/// handle. Fails (without starting anything) when the variant is unknown or
/// no WebGPU device is available.
#[wasm_bindgen]
pub async fn mount_surface(
    container: web::HtmlElement,
    variant: String,
) -> Result<SurfaceHandle, JsValue> {
    let config = variants::by_name(&variant)
        .ok_or_else(|| JsValue::from_str(&format!("unknown surface variant '{variant}'")))?;
    match lifecycle::mount(container, config).await {
        Ok(surface) => Ok(SurfaceHandle {
            inner: Some(surface),
        }),
        Err(e) => Err(JsValue::from_str(&format!("{e:?}"))),
    }
}
