use crate::dom;
use crate::scene::SceneHandles;
use crate::input::{key_action, KeyAction};
use crate::overlay;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    scene: &SceneHandles,
    canvas: &web::HtmlCanvasElement,
) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::TogglePause => {
            let mut p = scene.paused.borrow_mut();
            *p = !*p;
            log::info!("[keys] paused={}", *p);
            ev.prevent_default();
        }
        KeyAction::ToggleStats => {
            if let Some(doc) = dom::window_document() {
                let visible = overlay::toggle(&doc);
                *scene.show_stats.borrow_mut() = visible;
            }
        }
        KeyAction::ToggleDemo => {
            let mut on = scene.demo_enabled.borrow_mut();
            *on = !*on;
            log::info!("[keys] demo={}", *on);
        }
        KeyAction::Clear => {
            scene.overlay.borrow_mut().clear();
            log::info!("[keys] cleared overlay");
        }
        KeyAction::ToggleFullscreen => {
            dom::toggle_fullscreen(canvas);
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => dom::exit_fullscreen(),
    }
}

pub fn wire_global_keydown(scene: SceneHandles, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &scene, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
