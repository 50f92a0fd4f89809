//! Screenshot cleanup before OCR: grayscale, sharpen, auto-contrast.

use image::{imageops, DynamicImage, GrayImage};

/// 3x3 sharpen kernel (centre 32, neighbours -2, scaled by 1/16 by `filter3x3`).
const SHARPEN_KERNEL: [f32; 9] = [-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0];

pub fn prepare_for_ocr(img: &DynamicImage) -> GrayImage {
    let gray = img.to_luma8();
    let sharpened: GrayImage = imageops::filter3x3(&gray, &SHARPEN_KERNEL);
    autocontrast(&sharpened)
}

/// Stretch the darkest pixel to 0 and the brightest to 255. Flat images are returned unchanged.
pub fn autocontrast(img: &GrayImage) -> GrayImage {
    let (lo, hi) = img
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    if lo >= hi {
        return img.clone();
    }

    let span = f32::from(hi - lo);
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        // Truncates toward zero; fractional levels never round up.
        pixel[0] = (f32::from(pixel[0] - lo) * 255.0 / span) as u8;
    }
    out
}
