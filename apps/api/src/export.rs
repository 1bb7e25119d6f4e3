//! Ordered fallback chain over document backends.
//!
//! The first backend that renders successfully wins; each failure is logged
//! and the next backend is tried. Rendering runs on the blocking pool.

use std::sync::Arc;

use tracing::{info, warn};

use crate::layout::PageGeometry;
use crate::models::ResumeData;
use crate::render::{
    DocumentRenderer, ExportFormat, HtmlRenderer, PdfRenderer, RenderError, RenderedDocument,
    TextRenderer,
};

#[derive(Clone)]
pub struct ExportChain {
    renderers: Vec<Arc<dyn DocumentRenderer>>,
}

impl ExportChain {
    pub fn new(renderers: Vec<Arc<dyn DocumentRenderer>>) -> Self {
        Self { renderers }
    }

    /// Builds one backend per configured format, in order.
    pub fn from_formats(formats: &[ExportFormat], geometry: PageGeometry) -> Self {
        Self::new(
            formats
                .iter()
                .map(|format| renderer_for(*format, geometry))
                .collect(),
        )
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }

    /// Synchronous chain walk. Returns the last backend's error if all fail.
    pub fn export_blocking(&self, data: &ResumeData) -> Result<RenderedDocument, RenderError> {
        let mut last_error =
            RenderError::InvalidOutput("no export backends configured".to_string());

        for renderer in &self.renderers {
            match renderer.render(data) {
                Ok(doc) if doc.format != renderer.format() => {
                    warn!(
                        backend = renderer.name(),
                        produced = doc.format.extension(),
                        "Export backend returned the wrong format, trying next"
                    );
                    last_error = RenderError::InvalidOutput(format!(
                        "{} backend produced {}",
                        renderer.name(),
                        doc.format.extension()
                    ));
                }
                Ok(doc) => {
                    info!(
                        backend = renderer.name(),
                        bytes = doc.bytes.len(),
                        "Résumé document rendered"
                    );
                    return Ok(doc);
                }
                Err(e) => {
                    warn!(
                        backend = renderer.name(),
                        error = %e,
                        "Export backend failed, trying next"
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    pub async fn export(&self, data: ResumeData) -> Result<RenderedDocument, RenderError> {
        let chain = self.clone();
        tokio::task::spawn_blocking(move || chain.export_blocking(&data))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }
}

pub fn renderer_for(format: ExportFormat, geometry: PageGeometry) -> Arc<dyn DocumentRenderer> {
    match format {
        ExportFormat::Pdf => Arc::new(PdfRenderer::new(geometry)),
        ExportFormat::Text => Arc::new(TextRenderer::default()),
        ExportFormat::Html => Arc::new(HtmlRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing {
        calls: AtomicUsize,
    }

    impl DocumentRenderer for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn format(&self) -> ExportFormat {
            ExportFormat::Pdf
        }

        fn render(&self, _data: &ResumeData) -> Result<RenderedDocument, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RenderError::InvalidOutput("broken".to_string()))
        }
    }

    /// Claims PDF but hands back plain text.
    struct Mislabeled;

    impl DocumentRenderer for Mislabeled {
        fn name(&self) -> &'static str {
            "mislabeled"
        }

        fn format(&self) -> ExportFormat {
            ExportFormat::Pdf
        }

        fn render(&self, _data: &ResumeData) -> Result<RenderedDocument, RenderError> {
            Ok(RenderedDocument {
                format: ExportFormat::Text,
                bytes: b"plain".to_vec(),
            })
        }
    }

    fn data() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                first_name: "Ivan".to_string(),
                last_name: "Petrov".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_first_backend_wins() {
        let chain = ExportChain::from_formats(
            &[ExportFormat::Pdf, ExportFormat::Text],
            PageGeometry::default(),
        );
        assert_eq!(chain.names(), vec!["pdf", "text"]);
        let doc = chain.export_blocking(&data()).unwrap();
        assert_eq!(doc.format, ExportFormat::Pdf);
    }

    #[test]
    fn test_falls_back_after_failure() {
        let failing = Arc::new(Failing {
            calls: AtomicUsize::new(0),
        });
        let renderers: Vec<Arc<dyn DocumentRenderer>> =
            vec![failing.clone(), Arc::new(TextRenderer::default())];
        let chain = ExportChain::new(renderers);
        let doc = chain.export_blocking(&data()).unwrap();
        assert_eq!(doc.format, ExportFormat::Text);
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_all_failing_returns_last_error() {
        let renderers: Vec<Arc<dyn DocumentRenderer>> = vec![Arc::new(Failing {
            calls: AtomicUsize::new(0),
        })];
        let chain = ExportChain::new(renderers);
        assert!(matches!(
            chain.export_blocking(&data()),
            Err(RenderError::InvalidOutput(msg)) if msg == "broken"
        ));
    }

    #[test]
    fn test_wrong_format_counts_as_failure() {
        let renderers: Vec<Arc<dyn DocumentRenderer>> =
            vec![Arc::new(Mislabeled), Arc::new(HtmlRenderer)];
        let doc = ExportChain::new(renderers).export_blocking(&data()).unwrap();
        assert_eq!(doc.format, ExportFormat::Html);

        let only: Vec<Arc<dyn DocumentRenderer>> = vec![Arc::new(Mislabeled)];
        assert!(matches!(
            ExportChain::new(only).export_blocking(&data()),
            Err(RenderError::InvalidOutput(msg)) if msg == "mislabeled backend produced txt"
        ));
    }

    #[test]
    fn test_empty_chain_errors() {
        assert!(ExportChain::new(vec![]).export_blocking(&data()).is_err());
    }

    #[tokio::test]
    async fn test_async_export_runs_on_blocking_pool() {
        let chain = ExportChain::from_formats(&[ExportFormat::Text], PageGeometry::default());
        let doc = chain.export(data()).await.unwrap();
        assert!(String::from_utf8(doc.bytes).unwrap().starts_with("PETROV IVAN"));
    }
}
