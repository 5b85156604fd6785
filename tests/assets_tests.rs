// Host-side tests for texture slots and image decoding.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod assets {
    include!("../src/assets.rs");
}

use assets::*;
use constants::{BACKGROUND_IMAGE, THUMBNAIL_IMAGES};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(img: &RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

#[test]
fn slots_cover_background_and_every_thumbnail() {
    let slots: Vec<_> = TextureSlot::all().collect();
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[0], TextureSlot::Background);
    assert_eq!(slots[0].url(), Some(BACKGROUND_IMAGE));
    for i in 0..4 {
        assert_eq!(slots[i + 1], TextureSlot::Thumbnail(i));
        assert_eq!(slots[i + 1].url(), Some(THUMBNAIL_IMAGES[i]));
    }
    assert_eq!(TextureSlot::Thumbnail(9).url(), None);
}

#[test]
fn decodes_png_to_rgba() {
    let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
    let out = decode_image("a.png", &encode(&img, ImageFormat::Png)).unwrap();
    assert_eq!((out.width, out.height), (3, 2));
    assert_eq!(out.rgba.len(), 3 * 2 * 4);
    assert_eq!(&out.rgba[..4], &[10, 20, 30, 255]);
}

#[test]
fn decodes_gif_first_frame() {
    let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
    let out = decode_image("a.gif", &encode(&img, ImageFormat::Gif)).unwrap();
    assert_eq!((out.width, out.height), (4, 4));
    assert_eq!(out.rgba[3], 255);
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_image("broken.jpg", b"not an image").unwrap_err();
    assert!(matches!(err, AssetError::Decode { ref url, .. } if url == "broken.jpg"));
    assert!(err.to_string().contains("broken.jpg"));
}

#[test]
fn placeholder_is_one_white_texel() {
    let w = DecodedImage::white();
    assert_eq!((w.width, w.height), (1, 1));
    assert_eq!(w.rgba, vec![255, 255, 255, 255]);
}
