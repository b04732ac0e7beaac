use globe_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Find the render canvas: `canvas#webgl`, then `#app-canvas`.
pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id("webgl")
        .or_else(|| document.get_element_by_id("app-canvas"))
        .ok_or_else(|| anyhow::anyhow!("missing #webgl canvas"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("element is not a canvas"))
}

/// Query string of the current page, empty when unavailable.
pub fn location_search() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Keep the canvas backing store at CSS size times the capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let viewport = Viewport::from_css(rect.width() as f32, rect.height() as f32, dpr as f32);
    if canvas.width() != viewport.width {
        canvas.set_width(viewport.width);
    }
    if canvas.height() != viewport.height {
        canvas.set_height(viewport.height);
    }
    viewport
}

pub fn toggle_fullscreen(canvas: &web::HtmlCanvasElement) {
    if let Some(doc) = window_document() {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        } else {
            _ = canvas.request_fullscreen();
        }
    }
}

pub fn exit_fullscreen() {
    if let Some(doc) = window_document() {
        if doc.fullscreen_element().is_some() {
            doc.exit_fullscreen();
        }
    }
}
