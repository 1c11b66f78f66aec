use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use qrcode::render::svg;
use qrcode::QrCode;
use tracing::debug;

use crate::encoder::{module_layout, BarcodeEncoder, EncodedImage, ImageFormat};
use crate::error::RenderError;
use crate::options::EncodeParams;

/// Vector encoder producing a standalone SVG document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgEncoder;

#[async_trait]
impl BarcodeEncoder for SvgEncoder {
    fn format(&self) -> ImageFormat {
        ImageFormat::Svg
    }

    async fn encode(&self, data: &str, params: &EncodeParams) -> Result<EncodedImage, RenderError> {
        let (document, side) = render_svg(data, params)?;
        debug!(width = side, bytes = document.len(), "svg_encoded");
        Ok(EncodedImage {
            format: ImageFormat::Svg,
            width: side,
            height: side,
            data: Bytes::from(document),
        })
    }
}

/// Renders the SVG document and returns it with its edge length in pixels.
pub fn render_svg(data: &str, params: &EncodeParams) -> Result<(String, u32), RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), params.error_correction.into())?;
    let dark = params.foreground.to_string();
    let light = params.background.to_string();

    // qrcode draws a fixed four-module quiet zone when enabled.
    let quiet_zone = params.quiet_zone_modules.max(4);
    let (module_px, modules) = module_layout(code.width() as u32, quiet_zone, params.size);
    let mut document = code
        .render::<svg::Color<'_>>()
        .quiet_zone(params.quiet_zone_modules > 0)
        .module_dimensions(module_px, module_px)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build();

    // The viewBox stays on the module grid; only the displayed size changes.
    let grid = modules * module_px;
    let side = params.size.max(grid);
    if side != grid {
        document = document.replacen(
            &format!(r#"width="{grid}" height="{grid}""#),
            &format!(r#"width="{side}" height="{side}""#),
            1,
        );
    }

    if let Some(logo) = params.logo.as_deref() {
        embed_logo(&mut document, logo, grid, &light)?;
    }
    Ok((document, side))
}

fn embed_logo(document: &mut String, logo: &[u8], side: u32, background: &str) -> Result<(), RenderError> {
    let format = image::guess_format(logo).map_err(|e| RenderError::Logo(e.to_string()))?;
    let mime = format.to_mime_type();
    let logo_side = (side / 5).max(1);
    let pad = (logo_side / 10).max(1);
    let offset = (side - logo_side) / 2;

    let fragment = format!(
        r#"<rect x="{rx}" y="{rx}" width="{rw}" height="{rw}" fill="{background}"/><image x="{offset}" y="{offset}" width="{logo_side}" height="{logo_side}" href="data:{mime};base64,{payload}"/>"#,
        rx = offset.saturating_sub(pad),
        rw = logo_side + 2 * pad,
        payload = STANDARD.encode(logo),
    );
    let close = document
        .rfind("</svg>")
        .ok_or_else(|| RenderError::Image("svg renderer produced no closing tag".into()))?;
    document.insert_str(close, &fragment);
    Ok(())
}
