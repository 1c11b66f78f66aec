use async_trait::async_trait;
use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use qrcode::QrCode;
use std::io::Cursor;
use std::time::Instant;
use tracing::debug;

use crate::encoder::{module_layout, BarcodeEncoder, EncodedImage, ImageFormat};
use crate::error::RenderError;
use crate::options::EncodeParams;

/// Raster encoder producing square PNG bytes of `size` pixels, or larger
/// when the symbol needs more than one pixel per module.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

#[async_trait]
impl BarcodeEncoder for PngEncoder {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    async fn encode(&self, data: &str, params: &EncodeParams) -> Result<EncodedImage, RenderError> {
        let start = Instant::now();
        let canvas = rasterize(data, params)?;
        let (width, height) = canvas.dimensions();

        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
        debug!(
            width,
            bytes = buf.len(),
            logo = params.logo.is_some(),
            elapsed_micros = start.elapsed().as_micros(),
            "png_encoded"
        );

        Ok(EncodedImage {
            format: ImageFormat::Png,
            width,
            height,
            data: Bytes::from(buf),
        })
    }
}

/// Renders the symbol, its quiet zone and the optional logo into an RGBA canvas.
pub fn rasterize(data: &str, params: &EncodeParams) -> Result<RgbaImage, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), params.error_correction.into())?;
    let foreground = Rgba(params.foreground.to_rgba());
    let background = Rgba(params.background.to_rgba());

    let (module_px, modules) =
        module_layout(code.width() as u32, params.quiet_zone_modules, params.size);
    let symbol: RgbaImage = code
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_px, module_px)
        .dark_color(foreground)
        .light_color(background)
        .build();

    // Leftover pixels widen the quiet zone. A symbol denser than `size` keeps
    // one pixel per module and the canvas grows instead.
    let side = params.size.max(modules * module_px);
    if side > params.size {
        debug!(requested = params.size, side, modules, "png_canvas_enlarged");
    }
    let mut canvas = RgbaImage::from_pixel(side, side, background);
    let offset = i64::from((side - symbol.width()) / 2);
    imageops::replace(&mut canvas, &symbol, offset, offset);

    if let Some(logo) = params.logo.as_deref() {
        overlay_logo(&mut canvas, logo, background)?;
    }
    Ok(canvas)
}

/// Centers the logo on a background-colored pad covering at most a fifth of the side.
fn overlay_logo(canvas: &mut RgbaImage, logo: &[u8], background: Rgba<u8>) -> Result<(), RenderError> {
    let decoded = image::load_from_memory(logo).map_err(|e| RenderError::Logo(e.to_string()))?;
    let (width, height) = canvas.dimensions();
    let max_side = (width.min(height) / 5).max(1);
    let logo = decoded
        .resize(max_side, max_side, FilterType::Triangle)
        .to_rgba8();
    let (logo_w, logo_h) = logo.dimensions();

    let x = (width - logo_w) / 2;
    let y = (height - logo_h) / 2;
    let pad = (max_side / 10).max(1);
    for py in y.saturating_sub(pad)..(y + logo_h + pad).min(height) {
        for px in x.saturating_sub(pad)..(x + logo_w + pad).min(width) {
            canvas.put_pixel(px, py, background);
        }
    }
    imageops::overlay(canvas, &logo, i64::from(x), i64::from(y));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::options::RenderOptions;

    const URI: &str = "upi://pay?pa=shop@bank&pn=Shop%20Name&am=49.50&cu=INR";

    fn red_logo() -> Vec<u8> {
        let logo = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(logo)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn png_has_requested_size_and_quiet_zone() {
        let params = EncodeParams::from_options(&RenderOptions::default().with_size(300));
        let out = PngEncoder.encode(URI, &params).await.unwrap();
        assert_eq!((out.width, out.height), (300, 300));
        assert_eq!(out.mime_type(), "image/png");

        let decoded = image::load_from_memory(&out.data).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (300, 300));
        assert_eq!(*decoded.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert!(decoded.pixels().any(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn custom_colors_are_used() {
        let opts = RenderOptions::default()
            .with_size(128)
            .with_colors(Color::rgb(0, 0, 128), Color::rgb(255, 255, 200));
        let canvas = rasterize(URI, &EncodeParams::from_options(&opts)).unwrap();
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([255, 255, 200, 255]));
        assert!(canvas.pixels().any(|p| *p == Rgba([0, 0, 128, 255])));
    }

    #[test]
    fn logo_is_drawn_in_the_center() {
        let opts = RenderOptions::default().with_size(500).with_logo(red_logo());
        let canvas = rasterize(URI, &EncodeParams::from_options(&opts)).unwrap();
        let center = canvas.get_pixel(250, 250);
        assert!(center[0] > 200 && center[1] < 50 && center[2] < 50);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn undecodable_logo_is_a_logo_error() {
        let opts = RenderOptions::default().with_logo(vec![0u8, 1, 2, 3]);
        let err = rasterize(URI, &EncodeParams::from_options(&opts)).unwrap_err();
        assert!(matches!(err, RenderError::Logo(_)));
    }

    #[test]
    fn dense_symbol_keeps_whole_modules_at_minimum_size() {
        let note = "n".repeat(100);
        let data = format!("upi://pay?pa=shop@bank&pn=Shop%20Name&am=49.50&tn={note}&cu=INR");
        let params = EncodeParams::from_options(&RenderOptions::default().with_size(64));
        let code = QrCode::with_error_correction_level(data.as_bytes(), params.error_correction.into())
            .unwrap();
        let modules = code.width() as u32 + 2 * params.quiet_zone_modules;
        assert!(modules > 64);

        let canvas = rasterize(&data, &params).unwrap();
        assert_eq!(canvas.dimensions(), (modules, modules));
        // Top-left finder pattern starts right after the quiet zone.
        let qz = params.quiet_zone_modules;
        assert_eq!(*canvas.get_pixel(qz - 1, qz - 1), Rgba([255, 255, 255, 255]));
        assert_eq!(*canvas.get_pixel(qz, qz), Rgba([0, 0, 0, 255]));
    }

    #[tokio::test]
    async fn dense_symbol_reports_real_dimensions() {
        let data = format!("upi://pay?pa=shop@bank&pn=Shop&tn={}&cu=INR", "n".repeat(100));
        let params = EncodeParams::from_options(&RenderOptions::default().with_size(64));
        let out = PngEncoder.encode(&data, &params).await.unwrap();
        let decoded = image::load_from_memory(&out.data).unwrap();
        assert!(out.width > 64);
        assert_eq!((decoded.width(), decoded.height()), (out.width, out.height));
    }

    #[test]
    fn oversized_data_is_an_encode_error() {
        let data = "x".repeat(5000);
        let err = rasterize(&data, &EncodeParams::from_options(&RenderOptions::default()))
            .unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }
}
