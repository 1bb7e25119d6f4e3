//! Direct-draw PDF backend built on `lopdf`.
//!
//! The layout engine positions every line; this module only turns positioned
//! lines into content-stream operators. Text uses the standard Type1 fonts
//! with WinAnsi encoding, so nothing has to be embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::layout::font_metrics::{win_ansi_code, FontFace, ASCENT_EM};
use crate::layout::{compose_resume, LaidOutDocument, LaidOutPage, PageGeometry};
use crate::models::ResumeData;
use crate::render::transliterate::transliterate_preserving_caps;
use crate::render::{DocumentRenderer, ExportFormat, RenderError, RenderedDocument};

const PDF_MAGIC: &[u8] = b"%PDF";

pub struct PdfRenderer {
    geometry: PageGeometry,
}

impl PdfRenderer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    /// Lays the résumé out exactly as `render` would draw it.
    pub fn layout(&self, data: &ResumeData) -> LaidOutDocument {
        compose_resume(data, self.geometry, pdf_text)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, data: &ResumeData) -> Result<RenderedDocument, RenderError> {
        let laid_out = self.layout(data);
        let title = pdf_text(&data.full_name());
        let bytes = write_pdf(&laid_out, &title)?;
        ensure_pdf_header(&bytes)?;

        debug!(
            pages = laid_out.page_count(),
            lines = laid_out.lines().count(),
            bytes = bytes.len(),
            "PDF document written"
        );
        Ok(RenderedDocument {
            format: ExportFormat::Pdf,
            bytes,
        })
    }
}

/// Text as it will be drawn: Cyrillic transliterated, so widths measure the final glyphs.
pub fn pdf_text(s: &str) -> String {
    transliterate_preserving_caps(s)
}

/// Encodes to WinAnsi. Characters the standard fonts cannot draw become `?`.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| win_ansi_code(c).unwrap_or(b'?')).collect()
}

fn ensure_pdf_header(bytes: &[u8]) -> Result<(), RenderError> {
    if bytes.starts_with(PDF_MAGIC) {
        Ok(())
    } else {
        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(50)]).into_owned();
        Err(RenderError::InvalidOutput(format!(
            "missing %PDF header, output starts with {head:?}"
        )))
    }
}

fn font_dictionary(document: &mut Document, face: FontFace) -> ObjectId {
    document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Serializes a laid-out document to PDF bytes.
pub fn write_pdf(laid_out: &LaidOutDocument, title: &str) -> Result<Vec<u8>, RenderError> {
    let geometry = &laid_out.geometry;
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let regular_id = font_dictionary(&mut document, FontFace::Regular);
    let bold_id = font_dictionary(&mut document, FontFace::Bold);
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Regular.resource_name() => regular_id,
            FontFace::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(laid_out.pages.len());
    for page in &laid_out.pages {
        let content = page_content(page, geometry.height);
        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        geometry.width.into(),
        geometry.height.into(),
    ];
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = document.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("resume-api ", env!("CARGO_PKG_VERSION"))),
    });
    document.trailer.set("Root", catalog_id);
    document.trailer.set("Info", info_id);

    document.compress();

    let mut bytes = Vec::new();
    document.save_to(&mut bytes)?;
    Ok(bytes)
}

/// One text object per line. PDF y grows upward, so the top-down layout
/// offset is flipped and moved from the line top to the baseline.
fn page_content(page: &LaidOutPage, page_height: f32) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        let baseline = page_height - (line.y + line.size * ASCENT_EM);
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(line.face.resource_name().as_bytes().to_vec()),
                line.size.into(),
            ],
        ));
        operations.push(Operation::new("Td", vec![line.x.into(), baseline.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PersonalInfo, Responsibility, WorkExperience};

    fn sample() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                first_name: "Иван".to_string(),
                last_name: "Петров".to_string(),
                location: "Москва".to_string(),
                email: Some("ivan@example.com".to_string()),
                ..Default::default()
            },
            work_experience: (0..15)
                .map(|n| WorkExperience {
                    company: format!("Компания {n}"),
                    position: "Разработчик".to_string(),
                    start_date: "2019-01".to_string(),
                    is_current_job: n == 0,
                    responsibilities: vec![Responsibility::Legacy(
                        "Проектирование и разработка сервисов".to_string(),
                    )],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let renderer = PdfRenderer::new(PageGeometry::default());
        let doc = renderer.render(&sample()).unwrap();
        assert_eq!(doc.format, ExportFormat::Pdf);
        assert!(doc.bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_page_count_matches_layout() {
        let renderer = PdfRenderer::new(PageGeometry::default());
        let data = sample();
        let expected = renderer.layout(&data).page_count();
        assert!(expected > 1);

        let bytes = renderer.render(&data).unwrap().bytes;
        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), expected);
    }

    #[test]
    fn test_layout_text_is_transliterated() {
        let renderer = PdfRenderer::new(PageGeometry::default());
        let laid_out = renderer.layout(&sample());
        let first = &laid_out.pages[0].lines[0];
        assert_eq!(first.text, "Petrov Ivan");
        assert!(laid_out.lines().any(|l| l.text == "OPYT RABOTY"));
        assert!(laid_out
            .lines()
            .flat_map(|l| l.text.chars())
            .all(|c| c.is_ascii() || c == '•' || c == '—'));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(to_win_ansi("A•B"), vec![b'A', 0x95, b'B']);
        assert_eq!(to_win_ansi("é"), vec![0xE9]);
        assert_eq!(to_win_ansi("😀"), vec![b'?']);
    }

    #[test]
    fn test_smart_quotes_survive_encoding() {
        assert_eq!(
            to_win_ansi("I’m “ok”… €"),
            vec![b'I', 0x92, b'm', b' ', 0x93, b'o', b'k', 0x94, 0x85, b' ', 0x80]
        );
    }

    #[test]
    fn test_header_check_rejects_non_pdf() {
        assert!(ensure_pdf_header(b"%PDF-1.7\n").is_ok());
        assert!(matches!(
            ensure_pdf_header(b"<html>"),
            Err(RenderError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_baseline_is_flipped() {
        let page = LaidOutPage {
            lines: vec![crate::layout::compose::PlacedLine {
                x: 50.0,
                y: 50.0,
                text: "Hi".to_string(),
                face: FontFace::Regular,
                size: 10.0,
            }],
            content_bottom: 61.56,
        };
        let content = page_content(&page, 842.0);
        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        let y = td.operands[1].as_float().unwrap();
        assert!((y - (842.0 - 57.18)).abs() < 1e-3);
    }
}
