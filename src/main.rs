//! PayQR demo: `payqr <payee-id> <payee-name> [amount] [note]`
//!
//! Feeds the arguments through a regeneration coordinator as if they were
//! typed into a form, waits for the settled result, prints it as JSON and
//! writes the image. `PAYQR_CONFIG` points at a YAML config, `PAYQR_OUT`
//! overrides the output path, and `RUST_LOG` controls log verbosity.

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use payqr::{FormField, PayqrConfig, start_coordinator};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: payqr <payee-id> <payee-name> [amount] [note]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if !(2..=4).contains(&args.len()) {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }

    let config = match env::var_os("PAYQR_CONFIG") {
        Some(path) => PayqrConfig::from_file(path)?,
        None => PayqrConfig::default(),
    };

    let coordinator = start_coordinator(&config).await?;
    let fields = [
        FormField::PayeeId,
        FormField::PayeeName,
        FormField::Amount,
        FormField::Note,
    ];
    for (field, value) in fields.into_iter().zip(&args) {
        coordinator.edit(field, value.as_str());
    }

    let result = coordinator.settled().await;
    if !coordinator.is_input_valid() {
        eprintln!("warning: input incomplete, showing placeholder-backed preview");
    }
    if let Some(advisory) = result.advisory() {
        eprintln!("warning: {advisory}");
    }

    let out = env::var_os("PAYQR_OUT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("payqr.{}", result.image.format.extension())));
    fs::write(&out, &result.image.data)?;

    let summary = serde_json::json!({
        "uri": result.uri.as_str(),
        "version": result.version,
        "placeholder_backed": result.placeholder_backed,
        "image": {
            "path": out.display().to_string(),
            "mime_type": result.image.mime_type(),
            "width": result.image.width,
            "height": result.image.height,
        },
        "contrast_ratio": result.contrast.ratio,
        "stats": coordinator.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    coordinator.shutdown().await;
    Ok(())
}
