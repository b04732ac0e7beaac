use crate::input;
use globe_core::OrbitCamera;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub drag: Rc<RefCell<input::DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        w.drag.borrow_mut().begin(ev.pointer_id(), x, y);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        log::debug!("[input] begin drag pointer={}", ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        let delta = w.drag.borrow_mut().advance(ev.pointer_id(), x, y);
        if let Some((dx, dy)) = delta {
            let (yaw, pitch) = input::drag_to_orbit(dx, dy);
            w.orbit.borrow_mut().rotate(yaw, pitch);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if w.drag.borrow_mut().end(ev.pointer_id()) {
            log::debug!("[input] end drag pointer={}", ev.pointer_id());
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        for name in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }

    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let factor = input::wheel_to_zoom(ev.delta_y() as f32);
        w.orbit.borrow_mut().zoom(factor);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    // Non-passive so prevent_default keeps the page from scrolling
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = canvas_for_listener.add_event_listener_with_callback_and_add_event_listener_options(
        "wheel",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}
