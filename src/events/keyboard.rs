use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keys that close the video overlay.
#[inline]
pub fn is_close_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Escape behaves like the overlay's Close button: it raises the same flag
/// the render loop drains.
pub fn wire_close_on_escape(document: &web::Document, close_requested: Rc<Cell<bool>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if is_close_key(&ev.key()) {
            close_requested.set(true);
        }
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
