//! Page fill analysis: how much of the laid-out document each page uses.
//!
//! A multi-page résumé whose last page carries only a few lines usually means
//! the user should trim a section; the form surfaces this as a hint.

use serde::{Deserialize, Serialize};

use crate::layout::compose::LaidOutDocument;

/// A trailing page filled below this fraction is reported as sparse.
pub const SPARSE_TRAILING_FILL: f32 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    SinglePage,
    MultiPage,
    /// More than one page and the last one is under 15% full.
    SparseTrailingPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFillAnalysis {
    pub page_count: usize,
    pub lines_per_page: Vec<usize>,
    /// Height used on the final page, in points below the top margin.
    pub last_page_used_pt: f32,
    pub last_page_fill: f32,
    pub verdict: PageFillVerdict,
}

pub fn analyze_page_fill(doc: &LaidOutDocument) -> PageFillAnalysis {
    let geometry = &doc.geometry;
    let lines_per_page: Vec<usize> = doc.pages.iter().map(|p| p.lines.len()).collect();

    let last_page_used_pt = doc
        .pages
        .last()
        .filter(|p| !p.lines.is_empty())
        .map(|p| (p.content_bottom - geometry.margin_top).max(0.0))
        .unwrap_or(0.0);
    let last_page_fill = (last_page_used_pt / geometry.usable_height()).clamp(0.0, 1.0);

    let verdict = if doc.pages.len() <= 1 {
        PageFillVerdict::SinglePage
    } else if last_page_fill < SPARSE_TRAILING_FILL {
        PageFillVerdict::SparseTrailingPage
    } else {
        PageFillVerdict::MultiPage
    };

    PageFillAnalysis {
        page_count: doc.pages.len(),
        lines_per_page,
        last_page_used_pt,
        last_page_fill,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compose::{LaidOutPage, PlacedLine};
    use crate::layout::font_metrics::FontFace;
    use crate::layout::page::PageGeometry;

    fn page(content_bottom: f32, lines: usize) -> LaidOutPage {
        LaidOutPage {
            lines: (0..lines)
                .map(|i| PlacedLine {
                    x: 50.0,
                    y: 50.0 + i as f32 * 12.0,
                    text: "line".to_string(),
                    face: FontFace::Regular,
                    size: 11.0,
                })
                .collect(),
            content_bottom,
        }
    }

    fn doc(pages: Vec<LaidOutPage>) -> LaidOutDocument {
        LaidOutDocument {
            geometry: PageGeometry::default(),
            pages,
        }
    }

    #[test]
    fn test_single_page_verdict() {
        let analysis = analyze_page_fill(&doc(vec![page(421.0, 20)]));
        assert_eq!(analysis.verdict, PageFillVerdict::SinglePage);
        assert_eq!(analysis.page_count, 1);
        assert!((analysis.last_page_fill - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_sparse_trailing_page() {
        let analysis = analyze_page_fill(&doc(vec![page(790.0, 55), page(80.0, 2)]));
        assert_eq!(analysis.verdict, PageFillVerdict::SparseTrailingPage);
        assert_eq!(analysis.lines_per_page, vec![55, 2]);
        assert!((analysis.last_page_used_pt - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_well_filled_multi_page() {
        let analysis = analyze_page_fill(&doc(vec![page(790.0, 55), page(500.0, 30)]));
        assert_eq!(analysis.verdict, PageFillVerdict::MultiPage);
    }

    #[test]
    fn test_empty_document_has_zero_fill() {
        let analysis = analyze_page_fill(&doc(vec![LaidOutPage::default()]));
        assert_eq!(analysis.last_page_fill, 0.0);
        assert_eq!(analysis.verdict, PageFillVerdict::SinglePage);
    }
}
