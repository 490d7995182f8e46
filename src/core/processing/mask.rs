//! Alpha-mask primitives for the matting pipeline: saliency normalization,
//! mask rescaling, transparent-canvas pasting, and white-background flatten.
use image::{GrayImage, RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::model::SaliencyMap;

use super::resize::resize_gray;

/// Min-max normalize a raw saliency map into an 8-bit alpha mask.
///
/// Normalization is per call: `(v - min) / (max - min)` scaled to `[0, 255]`.
/// A flat map (max == min) would divide by zero; it is treated as all
/// background and yields an all-zero mask.
pub fn normalize_saliency(map: &SaliencyMap) -> Result<GrayImage> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in &map.data {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;

    let data: Vec<u8> = if range > 0.0 && range.is_finite() {
        map.data
            .iter()
            .map(|&v| (((v - min) / range) * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    } else {
        vec![0u8; map.data.len()]
    };

    GrayImage::from_raw(map.width, map.height, data)
        .ok_or_else(|| Error::Processing("saliency mask buffer has unexpected length".to_string()))
}

/// Rescale a mask to the given pixel grid with the same Lanczos filter the
/// image path uses.
pub fn resize_mask(mask: &GrayImage, width: u32, height: u32) -> Result<GrayImage> {
    resize_gray(mask, width, height)
}

/// Paste `src` onto a fully transparent canvas through `mask`.
///
/// Every channel, alpha included, is scaled by `mask / 255`; where the mask
/// is zero the canvas stays transparent black.
pub fn apply_mask(src: &RgbaImage, mask: &GrayImage) -> Result<RgbaImage> {
    if src.dimensions() != mask.dimensions() {
        return Err(Error::Processing(format!(
            "mask {}x{} does not match image {}x{}",
            mask.width(),
            mask.height(),
            src.width(),
            src.height()
        )));
    }

    let mut out = RgbaImage::new(src.width(), src.height());
    for (dst, (pixel, mask_pixel)) in out
        .pixels_mut()
        .zip(src.pixels().zip(mask.pixels()))
    {
        let m = mask_pixel.0[0] as u16;
        for c in 0..4 {
            dst.0[c] = ((pixel.0[c] as u16 * m + 127) / 255) as u8;
        }
    }
    Ok(out)
}

/// Extract the alpha channel as a standalone mask.
pub fn alpha_channel(src: &RgbaImage) -> GrayImage {
    let data: Vec<u8> = src.pixels().map(|p| p.0[3]).collect();
    GrayImage::from_raw(src.width(), src.height(), data)
        .unwrap_or_else(|| GrayImage::new(src.width(), src.height()))
}

/// Drop the alpha channel, keeping the stored color values as-is.
pub fn rgb_channels(src: &RgbaImage) -> RgbImage {
    let data: Vec<u8> = src
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    RgbImage::from_raw(src.width(), src.height(), data)
        .unwrap_or_else(|| RgbImage::new(src.width(), src.height()))
}

/// Composite `src` over a solid white canvas using `alpha`, flattening to RGB.
pub fn composite_over_white(src: &RgbImage, alpha: &GrayImage) -> Result<RgbImage> {
    if src.dimensions() != alpha.dimensions() {
        return Err(Error::Processing(format!(
            "alpha {}x{} does not match image {}x{}",
            alpha.width(),
            alpha.height(),
            src.width(),
            src.height()
        )));
    }

    let mut out = RgbImage::new(src.width(), src.height());
    for (dst, (pixel, alpha_pixel)) in out
        .pixels_mut()
        .zip(src.pixels().zip(alpha.pixels()))
    {
        let a = alpha_pixel.0[0] as u16;
        for c in 0..3 {
            let blended = pixel.0[c] as u16 * a + 255 * (255 - a);
            dst.0[c] = ((blended + 127) / 255) as u8;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, Rgba};

    #[test]
    fn normalization_spans_full_range() {
        let map = SaliencyMap::new(2, 2, vec![0.0, 1.0, 2.0, 4.0]).unwrap();
        let mask = normalize_saliency(&map).unwrap();
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(1, 1).0[0], 255);
        // 1.0 / 4.0 of the range
        assert_eq!(mask.get_pixel(1, 0).0[0], 64);
    }

    #[test]
    fn flat_map_becomes_all_background() {
        let map = SaliencyMap::new(3, 3, vec![0.42; 9]).unwrap();
        let mask = normalize_saliency(&map).unwrap();
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn non_finite_map_becomes_all_background() {
        let map = SaliencyMap::new(1, 2, vec![f32::NAN, 1.0]).unwrap();
        let mask = normalize_saliency(&map).unwrap();
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn apply_mask_scales_all_channels() {
        let src = RgbaImage::from_pixel(2, 1, Rgba([200, 100, 50, 255]));
        let mut mask = GrayImage::from_pixel(2, 1, Luma([0]));
        mask.put_pixel(1, 0, Luma([255]));

        let out = apply_mask(&src, &mask).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [200, 100, 50, 255]);
    }

    #[test]
    fn apply_mask_rejects_mismatched_sizes() {
        let src = RgbaImage::new(4, 4);
        let mask = GrayImage::new(2, 2);
        assert!(apply_mask(&src, &mask).is_err());
    }

    #[test]
    fn white_composite_blends_by_alpha() {
        let src = RgbImage::from_pixel(3, 1, Rgb([0, 0, 0]));
        let mut alpha = GrayImage::from_pixel(3, 1, Luma([0]));
        alpha.put_pixel(1, 0, Luma([255]));
        alpha.put_pixel(2, 0, Luma([128]));

        let out = composite_over_white(&src, &alpha).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0]);
        // Half-transparent black over white sits near mid gray
        assert_eq!(out.get_pixel(2, 0).0, [127, 127, 127]);
    }

    #[test]
    fn channel_helpers_round_trip() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 31]));
        assert!(alpha_channel(&src).pixels().all(|p| p.0[0] == 31));
        assert!(rgb_channels(&src).pixels().all(|p| p.0 == [9, 8, 7]));
    }
}
