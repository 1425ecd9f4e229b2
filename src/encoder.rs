//! QR image encoding.
//!
//! The module matrix comes from the `qrcode` crate; this module rasterizes it
//! to a PNG and wraps the bytes in a `data:` URI so records can carry the
//! image inline.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;

/// Prefix of every payload produced by [`PngEncoder`].
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Accepted image widths in pixels. The lower bound is a version 1 code.
pub const WIDTH_RANGE: std::ops::RangeInclusive<u32> = 21..=10_000;

/// Largest accepted quiet zone, in modules.
pub const MAX_MARGIN: u32 = 64;

/// Errors raised while encoding a URL into an image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EncodeError {
    #[error("input is too long to fit in a QR code")]
    DataTooLong,
    #[error("QR encoding failed: {0}")]
    Qr(String),
    #[error("PNG encoding failed: {0}")]
    Png(String),
    #[error("image dimensions overflow")]
    Dimensions,
}

impl From<QrError> for EncodeError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::DataTooLong => Self::DataTooLong,
            other => Self::Qr(other.to_string()),
        }
    }
}

/// Raster options for QR images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Target edge length in pixels. The image is the largest whole-pixel
    /// module scale that fits, never smaller than one pixel per module.
    pub width: u32,
    /// Quiet zone on each side, in modules.
    pub margin: u32,
    /// Dark module color.
    pub dark: [u8; 3],
    /// Light module and quiet zone color.
    pub light: [u8; 3],
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            width: 2000,
            margin: 4,
            dark: [0x00, 0x00, 0x00],
            light: [0xFF, 0xFF, 0xFF],
        }
    }
}

/// Turns text into an image payload.
pub trait Encoder: Send + Sync {
    /// Encode `text` and return the image as a data URI.
    fn encode(&self, text: &str) -> Result<String, EncodeError>;
}

/// PNG encoder using the highest error-correction level.
#[derive(Debug, Clone, Default)]
pub struct PngEncoder {
    options: EncodeOptions,
}

impl PngEncoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Rasterize `text` without wrapping it in a data URI.
    pub fn render(&self, text: &str) -> Result<RgbImage, EncodeError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let span = self
            .options
            .margin
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .ok_or(EncodeError::Dimensions)?;
        let scale = (self.options.width / span).max(1);
        let size = span.checked_mul(scale).ok_or(EncodeError::Dimensions)?;

        let dark = Rgb(self.options.dark);
        let light = Rgb(self.options.light);
        let margin = self.options.margin;

        let image = RgbImage::from_fn(size, size, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            if mx < margin || my < margin || mx >= margin + modules || my >= margin + modules {
                return light;
            }
            let idx = ((my - margin) * modules + (mx - margin)) as usize;
            match colors[idx] {
                Color::Dark => dark,
                Color::Light => light,
            }
        });

        Ok(image)
    }
}

impl Encoder for PngEncoder {
    fn encode(&self, text: &str) -> Result<String, EncodeError> {
        let image = self.render(text)?;

        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| EncodeError::Png(e.to_string()))?;

        Ok(format!("{}{}", PNG_DATA_URI_PREFIX, STANDARD.encode(png.into_inner())))
    }
}

/// Decode a PNG data URI back into raw PNG bytes.
///
/// Returns `None` when the payload is not a base64 PNG data URI.
pub fn decode_data_uri(payload: &str) -> Option<Vec<u8>> {
    let encoded = payload.strip_prefix(PNG_DATA_URI_PREFIX)?;
    STANDARD.decode(encoded.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EncodeOptions::default();
        assert_eq!(options.width, 2000);
        assert_eq!(options.margin, 4);
        assert_eq!(options.dark, [0, 0, 0]);
        assert_eq!(options.light, [255, 255, 255]);
    }

    #[test]
    fn test_render_size_and_quiet_zone() {
        let encoder = PngEncoder::default();
        let image = encoder.render("https://google.com").unwrap();

        assert_eq!(image.width(), image.height());
        assert!(image.width() <= 2000);
        assert!(image.width() > 1500);
        // Quiet zone corner is light, first finder module is dark.
        assert_eq!(*image.get_pixel(0, 0), Rgb([255, 255, 255]));
        let modules = QrCode::with_error_correction_level("https://google.com", EcLevel::H)
            .unwrap()
            .width() as u32;
        let scale = image.width() / (modules + 8);
        assert_eq!(*image.get_pixel(4 * scale, 4 * scale), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_encode_produces_png_data_uri() {
        let encoder = PngEncoder::new(EncodeOptions {
            width: 200,
            ..EncodeOptions::default()
        });
        let uri = encoder.encode("https://example.com").unwrap();
        assert!(uri.starts_with(PNG_DATA_URI_PREFIX));

        let bytes = decode_data_uri(&uri).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_rejects_oversized_input() {
        let encoder = PngEncoder::default();
        let huge = format!("https://example.com/{}", "a".repeat(4000));
        assert!(matches!(encoder.encode(&huge), Err(EncodeError::DataTooLong)));
    }

    #[test]
    fn test_render_overflowing_margin_is_an_error() {
        let encoder = PngEncoder::new(EncodeOptions {
            margin: u32::MAX / 2,
            ..EncodeOptions::default()
        });
        assert!(matches!(
            encoder.render("https://example.com"),
            Err(EncodeError::Dimensions)
        ));
    }

    #[test]
    fn test_decode_rejects_foreign_payload() {
        assert!(decode_data_uri("data:image/svg+xml;base64,AAAA").is_none());
        assert!(decode_data_uri("not a uri").is_none());
    }
}
