use thiserror::Error;

/// Errors surfaced by barcode encoders and render option checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The QR encoder rejected the data (usually too long for the symbol).
    #[error("qr encoding failed: {0}")]
    Encode(String),
    /// Rasterizing or serializing the image failed.
    #[error("image output failed: {0}")]
    Image(String),
    /// The overlay logo could not be decoded.
    #[error("logo could not be decoded: {0}")]
    Logo(String),
    /// Render options are out of range or unparsable.
    #[error("invalid render options: {0}")]
    InvalidOptions(String),
}

impl From<qrcode::types::QrError> for RenderError {
    fn from(err: qrcode::types::QrError) -> Self {
        RenderError::Encode(err.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_error_maps_to_encode() {
        let err: RenderError = qrcode::types::QrError::DataTooLong.into();
        assert!(matches!(err, RenderError::Encode(_)));
        assert!(err.to_string().starts_with("qr encoding failed"));
    }

    #[test]
    fn messages_carry_detail() {
        let err = RenderError::InvalidOptions("size 10 below 64".into());
        assert!(err.to_string().contains("size 10 below 64"));
    }
}
