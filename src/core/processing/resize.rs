//! Lanczos3 resize helpers over `fast_image_resize` for the pixel layouts the
//! pipelines use: interleaved RGB, RGBA, and single-channel masks.
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{GrayImage, RgbImage, RgbaImage};

use crate::error::{Error, Result};

fn lanczos_options() -> ResizeOptions {
    ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3))
}

fn resize_raw(
    data: Vec<u8>,
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
    pixel_type: PixelType,
) -> Result<Vec<u8>> {
    let src_image =
        Image::from_vec_u8(src_width, src_height, data, pixel_type).map_err(Error::external)?;
    let mut dst_image = Image::new(target_width, target_height, pixel_type);
    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, &lanczos_options())
        .map_err(Error::external)?;
    Ok(dst_image.into_vec())
}

pub fn resize_rgb(src: &RgbImage, target_width: u32, target_height: u32) -> Result<RgbImage> {
    if src.dimensions() == (target_width, target_height) {
        return Ok(src.clone());
    }
    let data = resize_raw(
        src.as_raw().clone(),
        src.width(),
        src.height(),
        target_width,
        target_height,
        PixelType::U8x3,
    )?;
    RgbImage::from_raw(target_width, target_height, data)
        .ok_or_else(|| Error::Processing("resized RGB buffer has unexpected length".to_string()))
}

pub fn resize_rgba(src: &RgbaImage, target_width: u32, target_height: u32) -> Result<RgbaImage> {
    if src.dimensions() == (target_width, target_height) {
        return Ok(src.clone());
    }
    let data = resize_raw(
        src.as_raw().clone(),
        src.width(),
        src.height(),
        target_width,
        target_height,
        PixelType::U8x4,
    )?;
    RgbaImage::from_raw(target_width, target_height, data)
        .ok_or_else(|| Error::Processing("resized RGBA buffer has unexpected length".to_string()))
}

pub fn resize_gray(src: &GrayImage, target_width: u32, target_height: u32) -> Result<GrayImage> {
    if src.dimensions() == (target_width, target_height) {
        return Ok(src.clone());
    }
    let data = resize_raw(
        src.as_raw().clone(),
        src.width(),
        src.height(),
        target_width,
        target_height,
        PixelType::U8,
    )?;
    GrayImage::from_raw(target_width, target_height, data)
        .ok_or_else(|| Error::Processing("resized mask buffer has unexpected length".to_string()))
}
