use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportChain;
use crate::layout::PageGeometry;
use crate::render::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-user data; every request is rendered from its own body.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub geometry: PageGeometry,
    /// Fallback chain behind `POST /api/generate-pdf`.
    pub chain: ExportChain,
    /// Used by the layout report so it measures exactly what the PDF draws.
    pub pdf: Arc<PdfRenderer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let geometry = PageGeometry::new(config.page_size);
        let chain = ExportChain::from_formats(&config.export_backends, geometry);
        Self {
            pdf: Arc::new(PdfRenderer::new(geometry)),
            geometry,
            chain,
            config,
        }
    }
}
