use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::layout::PageSize;
use crate::render::ExportFormat;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Built browser client to serve alongside the API, if any.
    pub static_dir: Option<PathBuf>,
    pub body_limit_bytes: usize,
    /// Backends tried in order by `POST /api/generate-pdf`.
    pub export_backends: Vec<ExportFormat>,
    pub page_size: PageSize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            body_limit_bytes: std::env::var("BODY_LIMIT_BYTES")
                .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
                .parse::<usize>()
                .context("BODY_LIMIT_BYTES must be a byte count")?,
            export_backends: parse_backends(
                &std::env::var("EXPORT_BACKENDS").unwrap_or_else(|_| "pdf,text".to_string()),
            )?,
            page_size: std::env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "a4".to_string())
                .parse::<PageSize>()
                .map_err(|e| anyhow!(e))
                .context("PAGE_SIZE must be a4 or letter")?,
        })
    }
}

/// Parses a comma-separated backend list such as `pdf,text`.
pub fn parse_backends(value: &str) -> Result<Vec<ExportFormat>> {
    let backends = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<ExportFormat>()
                .map_err(|bad| anyhow!("unknown export backend '{bad}' in EXPORT_BACKENDS"))
        })
        .collect::<Result<Vec<_>>>()?;

    if backends.is_empty() {
        return Err(anyhow!("EXPORT_BACKENDS must name at least one backend"));
    }
    Ok(backends)
}
