use wasm_bindgen::JsCast;
use web_sys as web;

// Cap the backing-store scale the way the source pages did; 3x panels are
// not worth the fill-rate on a background effect.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

fn js_err(v: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{v:?}"))
}

/// Create the canvas a surface renders into and attach it to its container.
/// The canvas fills the container; the container controls placement.
pub fn attach_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    let style = canvas.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("inset", "0");
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("height", "100%");
    container.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

/// Remove exactly the canvas we attached, if it is still there.
pub fn detach_canvas(container: &web::HtmlElement, canvas: &web::HtmlCanvasElement) {
    if container.contains(Some(canvas.as_ref())) {
        let _ = container.remove_child(canvas);
    }
}

/// Match the canvas backing store to the container CSS size times the
/// (capped) devicePixelRatio. Returns the resulting pixel size.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    container: &web::HtmlElement,
) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_PIXEL_RATIO);
        let rect = container.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
    (canvas.width(), canvas.height())
}
