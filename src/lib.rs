//! Workspace umbrella crate for PayQR.
//!
//! Re-exports the URI builder, the renderer and the regeneration coordinator
//! so callers can go from form input to a QR image through one dependency.
//! One-shot callers use [`render_payment`]; live editors use
//! [`start_coordinator`] with a loaded [`PayqrConfig`].

pub mod config;

pub use config::{
    ConfigLoadError, PayqrConfig, PlaceholderYamlConfig, RegenYamlConfig, RenderYamlConfig,
    UriYamlConfig,
};
pub use regen::{
    Coordinator, DEFAULT_DEBOUNCE, GenerationResult, Phase, RegenConfig, RegenError, RegenStats,
    merge_with_placeholder,
};
pub use render::{
    BarcodeEncoder, Color, ContrastReport, ContrastWarning, DEFAULT_MIN_CONTRAST_RATIO,
    EncodeParams, EncodedImage, ErrorCorrection, ImageFormat, PngEncoder, RenderError,
    RenderOptions, SvgEncoder, contrast_ratio, encoder_for, evaluate_contrast, rasterize,
};
pub use uri::{
    FormField, PaymentFormInput, PaymentUri, UriConfig, UriError, build_minimal_uri, build_uri,
    format_amount, normalize_payee_id, sanitize_name, sanitize_note, validate_required,
};

use std::error::Error;
use std::fmt;
use std::time::Instant;

use tracing::{info, warn};

/// Errors that can occur while turning form input into a QR image.
#[derive(Debug, Clone, PartialEq)]
pub enum PayqrError {
    Uri(UriError),
    Render(RenderError),
    Regen(RegenError),
    Config(String),
}

impl fmt::Display for PayqrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayqrError::Uri(err) => write!(f, "payment uri failure: {err}"),
            PayqrError::Render(err) => write!(f, "barcode render failure: {err}"),
            PayqrError::Regen(err) => write!(f, "regeneration failure: {err}"),
            PayqrError::Config(msg) => write!(f, "configuration failure: {msg}"),
        }
    }
}

impl Error for PayqrError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PayqrError::Uri(err) => Some(err),
            PayqrError::Render(err) => Some(err),
            PayqrError::Regen(err) => Some(err),
            PayqrError::Config(_) => None,
        }
    }
}

impl From<UriError> for PayqrError {
    fn from(value: UriError) -> Self {
        PayqrError::Uri(value)
    }
}

impl From<RenderError> for PayqrError {
    fn from(value: RenderError) -> Self {
        PayqrError::Render(value)
    }
}

impl From<RegenError> for PayqrError {
    fn from(value: RegenError) -> Self {
        PayqrError::Regen(value)
    }
}

impl From<ConfigLoadError> for PayqrError {
    fn from(value: ConfigLoadError) -> Self {
        PayqrError::Config(value.to_string())
    }
}

/// A URI together with its encoded image and contrast verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentQr {
    pub uri: PaymentUri,
    pub image: EncodedImage,
    pub contrast: ContrastReport,
}

impl PaymentQr {
    pub fn advisory(&self) -> Option<ContrastWarning> {
        self.contrast.warning()
    }
}

/// Builds the URI for `input` and encodes it once, without debouncing.
///
/// Unlike the coordinator this surfaces every failure to the caller.
pub async fn render_payment(
    input: &PaymentFormInput,
    uri_cfg: &UriConfig,
    options: &RenderOptions,
    format: ImageFormat,
) -> Result<PaymentQr, PayqrError> {
    let start = Instant::now();
    options.validate()?;
    let uri = build_uri(input, uri_cfg)?;

    let params = EncodeParams::from_options(options);
    let image = match encoder_for(format).encode(uri.as_str(), &params).await {
        Ok(image) => image,
        Err(err) => {
            warn!(error = %err, %format, "render_payment_failure");
            return Err(err.into());
        }
    };
    let contrast = evaluate_contrast(
        options.foreground,
        options.background,
        DEFAULT_MIN_CONTRAST_RATIO,
    );

    info!(
        uri_len = uri.len(),
        %format,
        bytes = image.data.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "render_payment_success"
    );
    Ok(PaymentQr {
        uri,
        image,
        contrast,
    })
}

/// Starts a coordinator with the built-in encoder, wired from `config`.
pub async fn start_coordinator(config: &PayqrConfig) -> Result<Coordinator, PayqrError> {
    config.validate()?;
    let options = config.render_options()?;
    let coordinator = Coordinator::start_builtin(
        config.regen_config(),
        config.uri_config(),
        config.placeholder_input(),
        options,
    )
    .await?;
    Ok(coordinator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn render_payment_produces_png() {
        let input = PaymentFormInput::new("shop@bank", "Shop Name!!").with_amount("49.5");
        let qr = render_payment(
            &input,
            &UriConfig::default(),
            &RenderOptions::default(),
            ImageFormat::Png,
        )
        .await
        .unwrap();

        assert_eq!(qr.uri.param("am").as_deref(), Some("49.50"));
        assert_eq!(qr.image.format, ImageFormat::Png);
        assert_eq!(&qr.image.data[..4], b"\x89PNG");
        assert_eq!(qr.advisory(), None);
    }

    #[tokio::test]
    async fn render_payment_surfaces_validation_errors() {
        let input = PaymentFormInput::new("", "Shop");
        let err = render_payment(
            &input,
            &UriConfig::default(),
            &RenderOptions::default(),
            ImageFormat::Svg,
        )
        .await
        .unwrap_err();
        assert_eq!(err, PayqrError::Uri(UriError::MissingField("payee_id")));
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn render_payment_rejects_invalid_options() {
        let input = PaymentFormInput::new("shop@bank", "Shop");
        let err = render_payment(
            &input,
            &UriConfig::default(),
            &RenderOptions::default().with_size(5000),
            ImageFormat::Png,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PayqrError::Render(RenderError::InvalidOptions(_))));
    }

    #[test]
    fn config_errors_convert() {
        let err: PayqrError = ConfigLoadError::Validation("bad".into()).into();
        assert_eq!(err.to_string(), "configuration failure: validation error: bad");
    }
}
