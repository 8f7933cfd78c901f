//! # Output Module
//!
//! Serializes a rendered linear image as plain-text PPM (`P3`).
//!
//! Each channel is clamped to `[0.000, 0.999]` and scaled by 256, so the
//! integer range 0..=255 is covered evenly. No gamma curve is applied; the
//! written values are the linear intensities.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::camera::LinearImage;
use crate::interval::Interval;

/// Maximum color value written in the PPM header.
pub const MAX_COLOR_VALUE: u32 = 255;

/// Quantize one linear channel to a byte.
pub fn quantize(component: f64) -> u8 {
    let intensity = Interval::new(0.000, 0.999);
    (256.0 * intensity.clamp(component)) as u8
}

/// Write `image` as a `P3` PPM: header, then one `r g b` line per pixel,
/// top row first, left to right.
pub fn write_ppm<W: Write>(image: &LinearImage, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "{}", MAX_COLOR_VALUE)?;

    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        writeln!(
            writer,
            "{} {} {}",
            quantize(r),
            quantize(g),
            quantize(b)
        )?;
    }

    writer.flush()
}

/// Save an image as PPM at `output_path`, or to stdout when the path is `-`.
pub fn save_image_as_ppm(image: &LinearImage, output_path: &str) -> io::Result<()> {
    if output_path == "-" {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_ppm(image, &mut writer)?;
        info!("Image written to stdout");
    } else {
        let file = File::create(Path::new(output_path))?;
        let mut writer = BufWriter::new(file);
        write_ppm(image, &mut writer)?;
        info!("Image saved as {}", output_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(quantize(-0.5), 0);
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(7.0), 255);
    }

    #[test]
    fn test_write_ppm_layout() {
        let mut image = LinearImage::new(2, 2);
        image.put_pixel(0, 0, Rgb([1.0, 0.0, 0.0]));
        image.put_pixel(1, 0, Rgb([0.0, 1.0, 0.0]));
        image.put_pixel(0, 1, Rgb([0.0, 0.0, 1.0]));
        image.put_pixel(1, 1, Rgb([0.5, 0.5, 0.5]));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).expect("writing to memory cannot fail");
        let text = String::from_utf8(out).expect("PPM text is ASCII");
        assert_eq!(
            text,
            "P3\n2 2\n255\n255 0 0\n0 255 0\n0 0 255\n128 128 128\n"
        );
    }

    #[test]
    fn test_quantize_uses_full_precision() {
        // Just below the 127/128 boundary; narrowing to f32 would round up to 0.5
        let just_below_half = 0.5 - 1e-12;
        assert_eq!(quantize(just_below_half), 127);

        let mut image = LinearImage::new(1, 1);
        image.put_pixel(0, 0, Rgb([just_below_half, 0.5, 1.0]));
        let mut out = Vec::new();
        write_ppm(&image, &mut out).expect("writing to memory cannot fail");
        let text = String::from_utf8(out).expect("PPM text is ASCII");
        assert_eq!(text.lines().last(), Some("127 128 255"));
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let image = LinearImage::new(1, 1);
        let result = save_image_as_ppm(&image, "/nonexistent-dir/definitely/missing.ppm");
        assert!(result.is_err());
    }
}
