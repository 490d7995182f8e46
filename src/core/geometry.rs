//! Pure crop/scale math shared by the processing pipelines.
//!
//! All functions here are deterministic and side-effect free so the size
//! invariants of the crop pipeline can be tested without touching pixels.

use crate::types::TargetSize;

/// Resize factor that makes the source fully cover the target rectangle.
///
/// Always the larger of the width and height ratios, so one dimension may
/// overflow the target (trimmed later by the center crop). A factor above
/// 1.0 upsamples; that is accepted behavior, not an error.
pub fn fill_scale(src_width: u32, src_height: u32, target: TargetSize) -> f64 {
    let scale_w = target.width as f64 / src_width as f64;
    let scale_h = target.height as f64 / src_height as f64;
    scale_w.max(scale_h)
}

/// Dimensions of the source after fill-scaling.
///
/// Truncates the scaled size, then clamps each dimension to the target so
/// float rounding can never leave the center crop out of bounds.
pub fn scaled_dimensions(src_width: u32, src_height: u32, target: TargetSize) -> (u32, u32) {
    let scale = fill_scale(src_width, src_height, target);
    let new_width = (src_width as f64 * scale) as u32;
    let new_height = (src_height as f64 * scale) as u32;
    (
        new_width.max(target.width),
        new_height.max(target.height),
    )
}

/// Top-left corner of the centered target rectangle inside the resized image.
///
/// Integer floor division; both offsets are non-negative for dimensions
/// produced by [`scaled_dimensions`].
pub fn center_offsets(new_width: u32, new_height: u32, target: TargetSize) -> (u32, u32) {
    (
        (new_width - target.width) / 2,
        (new_height - target.height) / 2,
    )
}

/// First row of the crop that starts below the chin.
///
/// `cut_fraction` positions the cut within the face box: `y0 + f * (y1 - y0)`.
/// Detector boxes may spill outside the image, so the result is clamped into
/// `[0, image_height - 1]`; at least one row always survives the crop.
pub fn chin_row(box_top: i64, box_bottom: i64, cut_fraction: f64, image_height: u32) -> u32 {
    let row = box_top + (cut_fraction * (box_bottom - box_top) as f64) as i64;
    row.clamp(0, image_height as i64 - 1) as u32
}
