use crate::app::ClickOutcome;
use crate::SharedApp;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub document: web::Document,
    pub app: SharedApp,
}

/// Drag rotation and click-to-zoom, all listening on the document so a press
/// anywhere on the page counts.
pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_click(&w);
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}

fn listen<E>(target: &web::Document, event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let app = w.app.clone();
    listen(&w.document, "pointerdown", move |ev: web::PointerEvent| {
        let (x, y) = client_pos(&ev);
        app.borrow_mut().pointer_down(x, y);
    });
}

fn wire_pointermove(w: &InputWiring) {
    let app = w.app.clone();
    listen(&w.document, "pointermove", move |ev: web::PointerEvent| {
        let (x, y) = client_pos(&ev);
        app.borrow_mut().pointer_move(x, y);
    });
}

fn wire_pointerup(w: &InputWiring) {
    let app = w.app.clone();
    listen(&w.document, "pointerup", move |ev: web::PointerEvent| {
        let (x, y) = client_pos(&ev);
        let mut a = app.borrow_mut();
        a.pointer_up(x, y);
        if !a.drag.is_click() {
            log::debug!("[drag] released, orientation {:?}", a.scene.orientation);
        }
    });
}

fn wire_click(w: &InputWiring) {
    let app = w.app.clone();
    listen(&w.document, "click", move |ev: web::MouseEvent| {
        let (x, y) = client_pos(&ev);
        match app.borrow_mut().click(x, y) {
            ClickOutcome::Miss => log::debug!("[zoom] no sphere at ({:.0}, {:.0})", x, y),
            ClickOutcome::DragRelease => log::debug!("[zoom] ignored drag release"),
            ClickOutcome::Zooming(_) | ClickOutcome::Busy => {}
        }
    });
}
