//! Scannable identifier images for assets

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::error::{AppError, AppResult};

/// Smallest edge of the rendered image, in pixels
const MIN_DIMENSION: u32 = 240;

/// Plain-text payload encoded in an asset's identifier image
pub fn payload(id: i32, name: &str, serial_number: &str, image_url: Option<&str>) -> String {
    format!(
        "ASSET_ID:{}|NAME:{}|SERIAL:{}|IMAGE:{}",
        id,
        name,
        serial_number,
        image_url.unwrap_or("")
    )
}

/// File name under which an asset's identifier image is stored
pub fn file_name(asset_id: i32) -> String {
    format!("asset_{}_qr.png", asset_id)
}

/// Encode a payload as a QR code PNG
pub fn render_png(payload: &str) -> AppResult<Vec<u8>> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| AppError::Render(format!("QR encoding failed: {}", e)))?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| AppError::Render(format!("PNG encoding failed: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_payload_layout() {
        assert_eq!(
            payload(12, "Laptop", "ABC123", Some("/media/assets/laptop.jpg")),
            "ASSET_ID:12|NAME:Laptop|SERIAL:ABC123|IMAGE:/media/assets/laptop.jpg"
        );
    }

    #[test]
    fn test_payload_without_image() {
        assert_eq!(payload(3, "Drill", "D-1", None), "ASSET_ID:3|NAME:Drill|SERIAL:D-1|IMAGE:");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(42), "asset_42_qr.png");
    }

    #[test]
    fn test_render_png() {
        let bytes = render_png(&payload(1, "Projector", "PRJ-0001", None)).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert!(decoded.width() >= MIN_DIMENSION);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn test_render_is_deterministic() {
        let p = payload(5, "Camera", "CAM-5", Some("/media/assets/cam.png"));
        assert_eq!(render_png(&p).unwrap(), render_png(&p).unwrap());
    }
}
