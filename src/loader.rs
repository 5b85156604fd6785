use crate::assets::{decode_image, AssetError, DecodedImage, LoadedTexture, TextureSlot};
use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

/// Decoded images waiting for the next frame to upload them.
pub type UploadQueue = Rc<RefCell<Vec<LoadedTexture>>>;

pub async fn fetch_image(url: &str) -> Result<DecodedImage, AssetError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| AssetError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    if !resp.ok() {
        return Err(AssetError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let bytes = resp.binary().await.map_err(|e| AssetError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    decode_image(url, &bytes)
}

/// Fire-and-forget loads for every texture slot. Failures leave the
/// placeholder in place.
pub fn spawn_texture_loads(queue: &UploadQueue) {
    for slot in TextureSlot::all() {
        let Some(url) = slot.url() else {
            continue;
        };
        let queue = queue.clone();
        spawn_local(async move {
            match fetch_image(url).await {
                Ok(image) => {
                    log::info!("[assets] loaded {} ({}x{})", url, image.width, image.height);
                    queue.borrow_mut().push(LoadedTexture { slot, image });
                }
                Err(e) => log::warn!("[assets] {}", e),
            }
        });
    }
}
