//! Image intake pipeline: sniff, bound, decode, downscale, re-encode.
//!
//! Everything an admin uploads goes through here before a single byte
//! reaches object storage.

use image::imageops::FilterType;
use image::GenericImageView;
use showroom_platform_shared::constants::{
    JPEG_QUALITY_FLOOR, JPEG_QUALITY_START, JPEG_QUALITY_STEP, MAX_SOURCE_DIMENSION_PX,
    MAX_UPLOAD_BYTES, TARGET_ENCODED_BYTES, TARGET_MAX_DIMENSION_PX,
};

use crate::error::AppError;

/// Raw bytes as they arrived in the multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Magic-byte sniffing; the client-supplied content type is never trusted.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Validate and recompress one uploaded image.
///
/// Rejects non-image payloads, payloads over the byte ceiling, and frames
/// over the dimension ceiling. Accepted frames are downscaled so the
/// longest side is at most `TARGET_MAX_DIMENSION_PX` and re-encoded as
/// JPEG, stepping the quality down until the output fits the target byte
/// size or the quality floor is hit.
pub fn process_image(file: &UploadedFile) -> Result<ProcessedImage, AppError> {
    sniff_image_mime(&file.bytes)
        .ok_or_else(|| AppError::Image(format!("'{}' is not a supported image", file.filename)))?;

    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Image(format!(
            "'{}' exceeds the {} byte upload limit",
            file.filename, MAX_UPLOAD_BYTES
        )));
    }

    let decoded = image::load_from_memory(&file.bytes)
        .map_err(|err| AppError::Image(format!("'{}' failed to decode: {}", file.filename, err)))?;

    let (width, height) = decoded.dimensions();
    if width > MAX_SOURCE_DIMENSION_PX || height > MAX_SOURCE_DIMENSION_PX {
        return Err(AppError::Image(format!(
            "'{}' is {}x{}, over the {} px limit",
            file.filename, width, height, MAX_SOURCE_DIMENSION_PX
        )));
    }

    let frame = if width.max(height) > TARGET_MAX_DIMENSION_PX {
        decoded.resize(
            TARGET_MAX_DIMENSION_PX,
            TARGET_MAX_DIMENSION_PX,
            FilterType::Triangle,
        )
    } else {
        decoded
    };
    let (width, height) = frame.dimensions();
    let rgb = frame.to_rgb8();

    let mut quality = JPEG_QUALITY_START;
    loop {
        let mut bytes = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder
            .encode_image(&rgb)
            .map_err(|err| AppError::Image(format!("re-encode failed: {}", err)))?;

        if bytes.len() <= TARGET_ENCODED_BYTES || quality <= JPEG_QUALITY_FLOOR {
            return Ok(ProcessedImage {
                bytes,
                content_type: "image/jpeg",
                width,
                height,
            });
        }
        quality = quality.saturating_sub(JPEG_QUALITY_STEP).max(JPEG_QUALITY_FLOOR);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    pub(crate) fn png_file(name: &str, width: u32, height: u32) -> UploadedFile {
        let frame = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 120u8])
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(frame)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        UploadedFile {
            filename: name.to_string(),
            bytes,
        }
    }

    #[test]
    fn sniffs_known_formats_and_rejects_the_rest() {
        assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_image_mime(&[0x89, 0x50, 0x4E, 0x47]), Some("image/png"));
        assert_eq!(sniff_image_mime(b"GIF89a"), Some("image/gif"));
        assert_eq!(
            sniff_image_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            Some("image/webp")
        );
        assert_eq!(sniff_image_mime(b"plain text file"), None);
        assert_eq!(sniff_image_mime(&[]), None);
    }

    #[test]
    fn rejects_non_image_payloads() {
        let file = UploadedFile {
            filename: "notes.txt".to_string(),
            bytes: b"definitely not an image".to_vec(),
        };
        assert!(matches!(process_image(&file), Err(AppError::Image(_))));
    }

    #[test]
    fn rejects_payloads_over_the_byte_ceiling() {
        let mut bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        bytes[0] = 0xFF;
        bytes[1] = 0xD8;
        bytes[2] = 0xFF;
        let file = UploadedFile {
            filename: "huge.jpg".to_string(),
            bytes,
        };
        let err = process_image(&file).unwrap_err();
        assert!(err.to_string().contains("upload limit"));
    }

    #[test]
    fn small_image_keeps_its_dimensions_and_becomes_jpeg() {
        let processed = process_image(&png_file("small.png", 64, 48)).unwrap();
        assert_eq!(processed.content_type, "image/jpeg");
        assert_eq!((processed.width, processed.height), (64, 48));
        assert_eq!(sniff_image_mime(&processed.bytes), Some("image/jpeg"));
    }

    #[test]
    fn oversized_image_is_downscaled_preserving_aspect() {
        let processed = process_image(&png_file("wide.png", 2400, 1200)).unwrap();
        assert_eq!(processed.width, TARGET_MAX_DIMENSION_PX);
        assert_eq!(processed.height, 960);
    }
}
