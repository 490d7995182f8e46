use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::RgbImage;
use jpeg_encoder::{ColorType, Density, Encoder};

use crate::error::{Error, Result};
use crate::types::Dpi;

/// Write an RGB JPEG with the given quality and a pixels-per-inch density
/// pair embedded in the JFIF header. Density affects only how the file is
/// interpreted for print, never its pixel content.
pub fn write_rgb_jpeg(output: &Path, img: &RgbImage, dpi: Dpi, quality: u8) -> Result<()> {
    let (width, height) = img.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(Error::Processing(format!(
            "image {width}x{height} exceeds the JPEG dimension limit"
        )));
    }

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let mut encoder = Encoder::new(&mut writer, quality);
    encoder.set_density(Density::Inch { x: dpi.x, y: dpi.y });
    encoder
        .encode(img.as_raw(), width as u16, height as u16, ColorType::Rgb)
        .map_err(Error::external)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn written_jpeg_decodes_with_original_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let img = RgbImage::from_pixel(30, 20, Rgb([250, 10, 10]));

        write_rgb_jpeg(&path, &img, Dpi { x: 300, y: 300 }, 95).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (30, 20));
    }

    #[test]
    fn density_marker_lands_in_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let img = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));

        write_rgb_jpeg(&path, &img, Dpi { x: 300, y: 150 }, 95).unwrap();

        // JFIF APP0: units byte 0x01 (dots per inch) then two u16 densities.
        let bytes = std::fs::read(&path).unwrap();
        let marker = [0x01, 0x01, 0x2C, 0x00, 0x96];
        assert!(
            bytes.windows(marker.len()).any(|w| w == marker),
            "no JFIF inch-density marker found"
        );
    }
}
