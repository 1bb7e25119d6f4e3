//! Document backends. Each turns a normalized résumé into the bytes of one
//! downloadable format; `crate::export` chains them with fallback.

pub mod html;
pub mod pdf;
pub mod text;
pub mod transliterate;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PersonalInfo, ResumeData};

pub use html::HtmlRenderer;
pub use pdf::PdfRenderer;
pub use text::TextRenderer;
pub use transliterate::transliterate;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF backend error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend produced invalid output: {0}")]
    InvalidOutput(String),

    #[error("Render task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Text,
    Html,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "txt",
            ExportFormat::Html => "html",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "txt" | "text" => Ok(ExportFormat::Text),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

/// A single document backend.
///
/// Rendering is synchronous and CPU-bound; async callers wrap it in `spawn_blocking`.
pub trait DocumentRenderer: Send + Sync {
    fn name(&self) -> &'static str;
    fn format(&self) -> ExportFormat;
    fn render(&self, data: &ResumeData) -> Result<RenderedDocument, RenderError>;
}

/// `Last_First_Resume.<ext>`, transliterated and restricted to `[A-Za-z0-9_.-]`.
pub fn download_filename(personal: &PersonalInfo, format: ExportFormat) -> String {
    let first = name_or(&personal.first_name, "User");
    let last = name_or(&personal.last_name, "Resume");
    let raw = format!("{last}_{first}_Resume.{}", format.extension());
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn name_or(name: &str, fallback: &str) -> String {
    if name.trim().is_empty() {
        fallback.to_string()
    } else {
        transliterate(name.trim())
    }
}
