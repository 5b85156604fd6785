// Static image assets: which texture slot an image feeds and how its bytes
// turn into RGBA8 pixels.

use crate::constants::{BACKGROUND_IMAGE, PROFILE_COUNT, THUMBNAIL_IMAGES};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("fetching {url} failed: {message}")]
    Fetch { url: String, message: String },
    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("decoding {url} failed: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}

/// Where a loaded image ends up on the GPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    Background,
    Thumbnail(usize),
}

impl TextureSlot {
    pub fn url(&self) -> Option<&'static str> {
        match *self {
            TextureSlot::Background => Some(BACKGROUND_IMAGE),
            TextureSlot::Thumbnail(i) => THUMBNAIL_IMAGES.get(i).copied(),
        }
    }

    /// Every slot loaded at startup.
    pub fn all() -> impl Iterator<Item = TextureSlot> {
        std::iter::once(TextureSlot::Background)
            .chain((0..PROFILE_COUNT).map(TextureSlot::Thumbnail))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Single opaque white texel, used until a real image arrives.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
        }
    }
}

/// Decode PNG, JPEG or GIF bytes. Animated GIFs yield their first frame.
pub fn decode_image(url: &str, bytes: &[u8]) -> Result<DecodedImage, AssetError> {
    let img = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
        url: url.to_string(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[derive(Clone, Debug)]
pub struct LoadedTexture {
    pub slot: TextureSlot,
    pub image: DecodedImage,
}
