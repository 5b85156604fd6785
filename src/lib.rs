#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod assets;
mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod mesh;
mod overlay;
mod render;
mod scene;
mod shaders;
mod tween;
mod zoom;

pub(crate) type SharedApp = Rc<RefCell<app::App<overlay::DomVideoOverlay>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbit-profiles starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::create_fullscreen_canvas(&document)?;
    dom::sync_canvas_backing_size(&canvas);
    let (width, height) = dom::viewport_size(&window);

    // Raised by the overlay's Close button or Escape, drained by the frame loop
    let close_requested = Rc::new(Cell::new(false));
    let presenter = overlay::DomVideoOverlay::new(document.clone(), close_requested.clone());
    let app: SharedApp = Rc::new(RefCell::new(app::App::new(width, height, presenter)));

    // Textures stream in; the scene renders with placeholders until then
    let uploads: loader::UploadQueue = Rc::new(RefCell::new(Vec::new()));
    loader::spawn_texture_loads(&uploads);

    events::wire_input_handlers(events::InputWiring {
        document: document.clone(),
        app: app.clone(),
    });
    events::wire_close_on_escape(&document, close_requested.clone());

    let gpu = frame::init_gpu(&canvas).await;
    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        gpu,
        uploads,
        close_requested,
        started: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
