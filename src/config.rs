//! YAML Configuration File Support for PayQR
//!
//! Loads every layer's settings (URI builder, renderer, regeneration
//! coordinator, placeholder input) from a single YAML file.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # PayQR Configuration
//! version: "1.0"
//!
//! uri:
//!   version: 1
//!   scheme: "upi"
//!   currency: "INR"
//!   max_amount: "100000"
//!   max_name_chars: 50
//!   max_note_chars: 100
//!   max_uri_bytes: 1024
//!
//! render:
//!   size: 512
//!   foreground: "#000000"
//!   background: "#ffffff"
//!   logo_path: "assets/logo.png"
//!
//! regen:
//!   debounce_ms: 400
//!   format: "png"
//!   min_contrast_ratio: 4.5
//!   abort_superseded: true
//!
//! placeholder:
//!   payee_id: "merchant@bank"
//!   payee_name: "Your Business"
//!   amount: "499"
//!   note: "Sample payment"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use regen::RegenConfig;
use render::{Color, ImageFormat, MAX_SIZE, MIN_SIZE, RenderOptions};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uri::{DEFAULT_MAX_AMOUNT, PaymentFormInput, UriConfig};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PayqrConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub uri: UriYamlConfig,

    #[serde(default)]
    pub render: RenderYamlConfig,

    #[serde(default)]
    pub regen: RegenYamlConfig,

    /// Input shown before the user has typed anything
    #[serde(default)]
    pub placeholder: PlaceholderYamlConfig,
}

impl PayqrConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PayqrConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.uri.validate()?;
        self.render.validate()?;
        self.regen.validate()?;
        self.placeholder.validate(&self.uri_config())?;
        Ok(())
    }

    pub fn uri_config(&self) -> UriConfig {
        self.uri.to_uri_config()
    }

    /// Render options with the logo file, if any, read from disk.
    pub fn render_options(&self) -> Result<RenderOptions, ConfigLoadError> {
        self.render.to_render_options()
    }

    pub fn regen_config(&self) -> RegenConfig {
        self.regen.to_regen_config()
    }

    pub fn placeholder_input(&self) -> PaymentFormInput {
        self.placeholder.to_input()
    }
}

impl Default for PayqrConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            uri: UriYamlConfig::default(),
            render: RenderYamlConfig::default(),
            regen: RegenYamlConfig::default(),
            placeholder: PlaceholderYamlConfig::default(),
        }
    }
}

/// URI builder YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UriYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,

    #[serde(default = "default_max_name_chars")]
    pub max_name_chars: usize,

    #[serde(default = "default_max_note_chars")]
    pub max_note_chars: usize,

    #[serde(default = "default_max_uri_bytes")]
    pub max_uri_bytes: usize,
}

impl UriYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_uri_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("uri: {err}")))
    }

    fn to_uri_config(&self) -> UriConfig {
        UriConfig {
            version: self.version,
            scheme: self.scheme.clone(),
            currency: self.currency.clone(),
            max_amount: self.max_amount,
            max_name_chars: self.max_name_chars,
            max_note_chars: self.max_note_chars,
            max_uri_bytes: self.max_uri_bytes,
        }
    }
}

impl Default for UriYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            scheme: default_scheme(),
            currency: default_currency(),
            max_amount: DEFAULT_MAX_AMOUNT,
            max_name_chars: 50,
            max_note_chars: 100,
            max_uri_bytes: 1024,
        }
    }
}

/// Renderer YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderYamlConfig {
    #[serde(default = "default_size")]
    pub size: u32,

    #[serde(default = "default_foreground")]
    pub foreground: String,

    #[serde(default = "default_background")]
    pub background: String,

    /// Logo image drawn over the center of the code
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
}

impl RenderYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigLoadError::Validation(format!(
                "render.size must be within {MIN_SIZE}..={MAX_SIZE}"
            )));
        }
        parse_color("render.foreground", &self.foreground)?;
        parse_color("render.background", &self.background)?;
        Ok(())
    }

    fn to_render_options(&self) -> Result<RenderOptions, ConfigLoadError> {
        let mut options = RenderOptions::default()
            .with_size(self.size)
            .with_colors(
                parse_color("render.foreground", &self.foreground)?,
                parse_color("render.background", &self.background)?,
            );
        if let Some(path) = &self.logo_path {
            options = options.with_logo(fs::read(path)?);
        }
        options
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("render: {err}")))?;
        Ok(options)
    }
}

impl Default for RenderYamlConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            foreground: default_foreground(),
            background: default_background(),
            logo_path: None,
        }
    }
}

/// Regeneration coordinator YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegenYamlConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_min_contrast_ratio")]
    pub min_contrast_ratio: f64,

    #[serde(default = "true_value")]
    pub abort_superseded: bool,
}

impl RegenYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if ImageFormat::from_str(&self.format).is_err() {
            return Err(ConfigLoadError::Validation(format!(
                "regen.format must be png or svg, got {:?}",
                self.format
            )));
        }
        self.to_regen_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("regen: {err}")))
    }

    fn to_regen_config(&self) -> RegenConfig {
        RegenConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            format: ImageFormat::from_str(&self.format).unwrap_or_default(),
            min_contrast_ratio: self.min_contrast_ratio,
            abort_superseded: self.abort_superseded,
        }
    }
}

impl Default for RegenYamlConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            format: default_format(),
            min_contrast_ratio: default_min_contrast_ratio(),
            abort_superseded: true,
        }
    }
}

/// Placeholder input YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderYamlConfig {
    #[serde(default = "default_placeholder_id")]
    pub payee_id: String,

    #[serde(default = "default_placeholder_name")]
    pub payee_name: String,

    #[serde(default)]
    pub amount: String,

    #[serde(default)]
    pub note: String,
}

impl PlaceholderYamlConfig {
    fn validate(&self, uri_config: &UriConfig) -> Result<(), ConfigLoadError> {
        uri::build_uri(&self.to_input(), uri_config)
            .map(|_| ())
            .map_err(|err| ConfigLoadError::Validation(format!("placeholder: {err}")))
    }

    fn to_input(&self) -> PaymentFormInput {
        PaymentFormInput::new(self.payee_id.clone(), self.payee_name.clone())
            .with_amount(self.amount.clone())
            .with_note(self.note.clone())
    }
}

impl Default for PlaceholderYamlConfig {
    fn default() -> Self {
        Self {
            payee_id: default_placeholder_id(),
            payee_name: default_placeholder_name(),
            amount: "499".to_string(),
            note: "Sample payment".to_string(),
        }
    }
}

fn parse_color(field: &str, raw: &str) -> Result<Color, ConfigLoadError> {
    raw.parse()
        .map_err(|err| ConfigLoadError::Validation(format!("{field}: {err}")))
}

fn default_version() -> u32 {
    1
}
fn default_scheme() -> String {
    "upi".to_string()
}
fn default_currency() -> String {
    "INR".to_string()
}
fn default_max_amount() -> Decimal {
    DEFAULT_MAX_AMOUNT
}
fn default_max_name_chars() -> usize {
    50
}
fn default_max_note_chars() -> usize {
    100
}
fn default_max_uri_bytes() -> usize {
    1024
}
fn default_size() -> u32 {
    512
}
fn default_foreground() -> String {
    "#000000".to_string()
}
fn default_background() -> String {
    "#ffffff".to_string()
}
fn default_debounce_ms() -> u64 {
    400
}
fn default_format() -> String {
    "png".to_string()
}
fn default_min_contrast_ratio() -> f64 {
    render::DEFAULT_MIN_CONTRAST_RATIO
}
fn true_value() -> bool {
    true
}
fn default_placeholder_id() -> String {
    "merchant@bank".to_string()
}
fn default_placeholder_name() -> String {
    "Your Business".to_string()
}
