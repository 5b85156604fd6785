use crate::constants::{VIDEO_ALLOW, VIDEO_HEIGHT_PX, VIDEO_OVERLAY_ID, VIDEO_WIDTH_PX};
use crate::zoom::VideoPresenter;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const CONTAINER_STYLE: &str = "position:fixed;top:50%;left:50%;transform:translate(-50%,-50%);\
background:rgba(0,0,0,0.8);padding:10px;z-index:1000";
const CLOSE_BUTTON_STYLE: &str = "display:block;margin:10px auto";

/// The video overlay as a DOM element appended to `<body>`.
///
/// The Close button only raises `close_requested`; the render loop picks the
/// flag up and routes it through the zoom controller, which calls back into
/// [`VideoPresenter::hide`]. That keeps the button's listener alive until it
/// has returned.
pub struct DomVideoOverlay {
    document: web::Document,
    container: Option<web::Element>,
    close_listener: Option<Closure<dyn FnMut(web::MouseEvent)>>,
    close_requested: Rc<Cell<bool>>,
}

impl DomVideoOverlay {
    pub fn new(document: web::Document, close_requested: Rc<Cell<bool>>) -> Self {
        Self {
            document,
            container: None,
            close_listener: None,
            close_requested,
        }
    }

    #[inline]
    pub fn is_shown(&self) -> bool {
        self.container.is_some()
    }

    fn build(&mut self, url: &str) -> Result<(), wasm_bindgen::JsValue> {
        let doc = &self.document;
        let body = doc
            .body()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document body"))?;

        let container = doc.create_element("div")?;
        container.set_id(VIDEO_OVERLAY_ID);
        container.set_attribute("style", CONTAINER_STYLE)?;

        let iframe = doc.create_element("iframe")?;
        iframe.set_attribute("width", &VIDEO_WIDTH_PX.to_string())?;
        iframe.set_attribute("height", &VIDEO_HEIGHT_PX.to_string())?;
        iframe.set_attribute("src", url)?;
        iframe.set_attribute("frameborder", "0")?;
        iframe.set_attribute("allow", VIDEO_ALLOW)?;
        iframe.set_attribute("allowfullscreen", "")?;

        let close = doc.create_element("button")?;
        close.set_text_content(Some("Close"));
        close.set_attribute("style", CLOSE_BUTTON_STYLE)?;
        let flag = self.close_requested.clone();
        let listener = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            // Keep the document-level click handler from seeing this click.
            ev.stop_propagation();
            flag.set(true);
        }) as Box<dyn FnMut(_)>);
        close.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;

        container.append_child(&iframe)?;
        container.append_child(&close)?;
        body.append_child(&container)?;

        self.container = Some(container);
        self.close_listener = Some(listener);
        Ok(())
    }
}

impl VideoPresenter for DomVideoOverlay {
    fn show(&mut self, url: &str) {
        if self.is_shown() {
            self.hide();
        }
        if let Err(e) = self.build(url) {
            log::error!("[overlay] failed to build video overlay: {:?}", e);
        }
    }

    fn hide(&mut self) {
        if let Some(el) = self.container.take() {
            el.remove();
        }
        self.close_listener = None;
        self.close_requested.set(false);
    }
}
