use render::RenderError;
use thiserror::Error;
use uri::UriError;

/// Errors returned by coordinator construction and option updates.
///
/// Failures inside a generation cycle never surface here; they are logged
/// and the previous result stays visible.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegenError {
    #[error(transparent)]
    Uri(#[from] UriError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("invalid regeneration config: {0}")]
    InvalidConfig(String),
    /// The placeholder input could not produce an initial result.
    #[error("placeholder cannot be rendered: {0}")]
    Placeholder(String),
}
