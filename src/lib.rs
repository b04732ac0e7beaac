#![cfg(target_arch = "wasm32")]
use globe_core::{ArcId, GeoCoordinate, LineSpec, MarkerId, MarkerSpec, OverlayError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod scene;

use scene::SceneHandles;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, scene: &SceneHandles) {
    *scene.viewport.borrow_mut() = dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let viewport = scene.viewport.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        *viewport.borrow_mut() = dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    // GlobeHandle::new reads the installed scene; it is set before the first await.
    let scene = SceneHandles::new(true);
    if !scene::install(&scene) {
        return Ok(());
    }
    log::info!("globe-web starting");

    spawn_local(async move {
        if let Err(e) = init(scene).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init(scene: SceneHandles) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;

    let debug = input::has_debug_flag(&dom::location_search());

    // Maintain canvas internal pixel size to match CSS size * capped devicePixelRatio
    wire_canvas_resize(&canvas, &scene);

    if debug {
        overlay::show(&document);
        *scene.show_stats.borrow_mut() = true;
    }

    events::wire_global_keydown(scene.clone(), canvas.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        orbit: scene.orbit.clone(),
        drag: Rc::new(RefCell::new(input::DragState::default())),
    });

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] running without a renderer");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(scene, canvas, gpu)));
    frame::start_loop(frame_ctx);
    log::info!("[frame] loop started (debug={})", debug);
    Ok(())
}

fn js_error(e: OverlayError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Turn a JS number or string into a marker id. Integral numbers print
/// without a fractional part so `7` and `"7"` name the same marker.
fn marker_id_from_js(id: &JsValue) -> Result<MarkerId, JsValue> {
    if let Some(s) = id.as_string() {
        return Ok(MarkerId::new(s));
    }
    match id.as_f64() {
        Some(n) if n.is_finite() && n.fract() == 0.0 => Ok(MarkerId::new(format!("{}", n as i64))),
        Some(n) if n.is_finite() => Ok(MarkerId::new(n.to_string())),
        _ => Err(JsValue::from_str("marker id must be a string or a finite number")),
    }
}

/// Script-facing handle onto the running globe.
#[wasm_bindgen]
pub struct GlobeHandle {
    scene: SceneHandles,
}

#[wasm_bindgen]
impl GlobeHandle {
    /// Attach to the globe started by the module entry point.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GlobeHandle, JsValue> {
        scene::current()
            .map(|scene| GlobeHandle { scene })
            .ok_or_else(|| JsValue::from_str("globe not started yet"))
    }

    #[wasm_bindgen(js_name = addMarker)]
    pub fn add_marker(&self, id: JsValue, latitude: f32, longitude: f32) -> Result<(), JsValue> {
        let id = marker_id_from_js(&id)?;
        self.scene
            .overlay
            .borrow_mut()
            .add_marker(MarkerSpec::new(id, latitude, longitude))
            .map_err(js_error)
    }

    /// Returns `false` when no marker has that id.
    #[wasm_bindgen(js_name = removeMarker)]
    pub fn remove_marker(&self, id: JsValue) -> Result<bool, JsValue> {
        let id = marker_id_from_js(&id)?;
        match self.scene.overlay.borrow_mut().remove_marker(&id) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::debug!("[handle] {}", e);
                Ok(false)
            }
        }
    }

    /// Start a route animation; returns its arc id.
    #[wasm_bindgen(js_name = addLine)]
    pub fn add_line(
        &self,
        from_lat: f32,
        from_lon: f32,
        to_lat: f32,
        to_lon: f32,
    ) -> Result<f64, JsValue> {
        let spec = LineSpec::new(
            GeoCoordinate::new(from_lat, from_lon),
            GeoCoordinate::new(to_lat, to_lon),
        );
        self.scene
            .overlay
            .borrow_mut()
            .add_line(spec)
            .map(|id| id.raw() as f64)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeLine)]
    pub fn remove_line(&self, id: f64) -> bool {
        if !(id.is_finite() && id >= 0.0) {
            return false;
        }
        let id = ArcId::from_raw(id as u64);
        match self.scene.overlay.borrow_mut().remove_line(id) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("[handle] {}", e);
                false
            }
        }
    }

    pub fn clear(&self) {
        self.scene.overlay.borrow_mut().clear();
    }

    #[wasm_bindgen(js_name = markerCount)]
    pub fn marker_count(&self) -> usize {
        self.scene.overlay.borrow().marker_count()
    }

    #[wasm_bindgen(js_name = arcCount)]
    pub fn arc_count(&self) -> usize {
        self.scene.overlay.borrow().arc_count()
    }

    #[wasm_bindgen(js_name = setDemo)]
    pub fn set_demo(&self, enabled: bool) {
        *self.scene.demo_enabled.borrow_mut() = enabled;
        log::info!("[handle] demo={}", enabled);
    }

    #[wasm_bindgen(js_name = setPaused)]
    pub fn set_paused(&self, paused: bool) {
        *self.scene.paused.borrow_mut() = paused;
    }
}
