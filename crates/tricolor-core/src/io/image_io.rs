use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use ndarray::Array2;
use tracing::debug;

use crate::consts::DEFAULT_JPEG_QUALITY;
use crate::error::Result;
use crate::frame::{ColorFrame, Plate};

/// Load a plate scan as grayscale. Color files are reduced to luminance.
pub fn load_plate(path: &Path) -> Result<Plate> {
    let img = image::open(path)?;
    let bit_depth = if img.color().bytes_per_pixel() / img.color().channel_count() > 1 {
        16
    } else {
        8
    };
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for (col, row, pixel) in gray.enumerate_pixels() {
        data[[row as usize, col as usize]] = pixel.0[0] as f32 / 65535.0;
    }

    debug!(path = %path.display(), width = w, height = h, bit_depth, "Loaded plate");

    let mut plate = Plate::new(data, bit_depth);
    plate.source = Some(path.to_path_buf());
    Ok(plate)
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}

fn to_rgb8(color: &ColorFrame) -> RgbImage {
    ImageBuffer::from_fn(color.width() as u32, color.height() as u32, |col, row| {
        let (r, c) = (row as usize, col as usize);
        Rgb([
            to_u8(color.red.data[[r, c]]),
            to_u8(color.green.data[[r, c]]),
            to_u8(color.blue.data[[r, c]]),
        ])
    })
}

/// Save a ColorFrame as 16-bit RGB TIFF.
pub fn save_color_tiff(color: &ColorFrame, path: &Path) -> Result<()> {
    color.ensure_same_shape()?;
    let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
        ImageBuffer::from_fn(color.width() as u32, color.height() as u32, |col, row| {
            let (r, c) = (row as usize, col as usize);
            Rgb([
                to_u16(color.red.data[[r, c]]),
                to_u16(color.green.data[[r, c]]),
                to_u16(color.blue.data[[r, c]]),
            ])
        });
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a ColorFrame as 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) -> Result<()> {
    color.ensure_same_shape()?;
    to_rgb8(color).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a ColorFrame as 8-bit RGB JPEG. `quality` is 1..=100.
pub fn save_color_jpeg(color: &ColorFrame, path: &Path, quality: u8) -> Result<()> {
    color.ensure_same_shape()?;
    let writer = BufWriter::new(File::create(path)?);
    let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100));
    to_rgb8(color).write_with_encoder(encoder)?;
    Ok(())
}

/// Save a ColorFrame, choosing format from file extension.
pub fn save_color_image(color: &ColorFrame, path: &Path) -> Result<()> {
    save_color_image_with_quality(color, path, DEFAULT_JPEG_QUALITY)
}

/// Like [`save_color_image`], with an explicit JPEG quality.
pub fn save_color_image_with_quality(color: &ColorFrame, path: &Path, quality: u8) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => save_color_jpeg(color, path, quality),
        Some("png") => save_color_png(color, path),
        _ => save_color_tiff(color, path),
    }
}
