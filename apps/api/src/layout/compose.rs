//! Résumé composition: walks the record section by section, wrapping text and
//! moving a vertical cursor down the page, and opens a new page whenever a
//! threshold or the bottom margin is crossed.
//!
//! # Pagination rules
//! - Section headings break to a new page when the cursor is below 650pt.
//! - Work, education and course entries break when the cursor is below 700pt.
//! - Any single line that would cross the bottom margin moves to the next page,
//!   so long paragraphs continue instead of running off the page.
//!
//! A block advances by a fixed step for its first line and by one line height
//! for every additional wrapped line.

use serde::{Deserialize, Serialize};

use crate::labels;
use crate::layout::font_metrics::{line_height, FontFace, SizedFont};
use crate::layout::page::{PageCursor, PageGeometry, ITEM_BREAK_Y, SECTION_BREAK_Y};
use crate::layout::wrap::wrap_text;
use crate::models::{Responsibility, ResumeData};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One positioned line. `y` is the top of the line box, measured down from the page top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub face: FontFace,
    pub size: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaidOutPage {
    pub lines: Vec<PlacedLine>,
    /// Bottom edge of the lowest line on this page.
    pub content_bottom: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    /// Never empty.
    pub pages: Vec<LaidOutPage>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Styles and spacing
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Style {
    face: FontFace,
    size: f32,
}

const NAME: Style = Style {
    face: FontFace::Bold,
    size: 24.0,
};
const HEADING: Style = Style {
    face: FontFace::Bold,
    size: 14.0,
};
const ENTRY_TITLE: Style = Style {
    face: FontFace::Bold,
    size: 12.0,
};
const BODY: Style = Style {
    face: FontFace::Regular,
    size: 11.0,
};
const BODY_BOLD: Style = Style {
    face: FontFace::Bold,
    size: 11.0,
};

const BULLET_INDENT: f32 = 20.0;
const SUBPOINT_INDENT: f32 = 40.0;

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a normalized résumé.
///
/// `prepare` is applied to every string before it is measured, so the
/// measured text is exactly the drawn text (the PDF backend transliterates here).
pub fn compose_resume(
    data: &ResumeData,
    geometry: PageGeometry,
    prepare: fn(&str) -> String,
) -> LaidOutDocument {
    let mut composer = Composer::new(geometry, prepare);

    composer.header(data);
    composer.contacts(data);
    composer.about(data);
    composer.work(data);
    composer.education(data);
    composer.courses(data);
    composer.languages(data);
    composer.skills(data);
    composer.qualities(data);
    composer.additional(data);

    composer.finish()
}

struct Composer {
    cursor: PageCursor,
    pages: Vec<LaidOutPage>,
    prepare: fn(&str) -> String,
}

impl Composer {
    fn new(geometry: PageGeometry, prepare: fn(&str) -> String) -> Self {
        Self {
            cursor: PageCursor::new(geometry),
            pages: vec![LaidOutPage::default()],
            prepare,
        }
    }

    fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            geometry: *self.cursor.geometry(),
            pages: self.pages,
        }
    }

    fn left(&self) -> f32 {
        self.cursor.geometry().margin_left
    }

    /// Places `text` wrapped to the text area starting at `left + indent`.
    fn block(&mut self, text: &str, indent: f32, style: Style, advance: f32) {
        let prepared = (self.prepare)(text);
        let x = self.left() + indent;
        let width = self.cursor.geometry().right_edge() - x;
        let font = SizedFont::new(style.face, style.size);
        let lines = wrap_text(&prepared, width, &font);
        if lines.is_empty() {
            return;
        }

        let lh = line_height(style.size);
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                self.cursor.advance(lh);
            }
            self.cursor.ensure_room(lh);
            self.place(line, x, style, lh);
        }
        self.cursor.advance(advance);
    }

    fn place(&mut self, text: String, x: f32, style: Style, lh: f32) {
        while self.pages.len() <= self.cursor.page_index {
            self.pages.push(LaidOutPage::default());
        }
        let y = self.cursor.y;
        let page = &mut self.pages[self.cursor.page_index];
        page.content_bottom = page.content_bottom.max(y + lh);
        page.lines.push(PlacedLine {
            x,
            y,
            text,
            face: style.face,
            size: style.size,
        });
    }

    fn heading(&mut self, title: &str) {
        self.cursor.break_if_below(SECTION_BREAK_Y);
        self.block(&title.to_uppercase(), 0.0, HEADING, 25.0);
    }

    fn entry_start(&mut self) {
        self.cursor.break_if_below(ITEM_BREAK_Y);
    }

    // ── sections ────────────────────────────────────────────────────────────

    fn header(&mut self, data: &ResumeData) {
        self.block(&data.full_name(), 0.0, NAME, 40.0);
    }

    fn contacts(&mut self, data: &ResumeData) {
        let rows = labels::contact_rows(&data.personal_info);
        if rows.is_empty() {
            return;
        }
        self.heading(labels::CONTACTS);
        for (label, value) in rows {
            self.block(&format!("{label}: {value}"), 0.0, BODY, 20.0);
        }
        self.cursor.advance(10.0);
    }

    fn about(&mut self, data: &ResumeData) {
        let Some(about) = data.about() else { return };
        self.heading(labels::ABOUT);
        self.block(about, 0.0, BODY, line_height(BODY.size) + 20.0);
    }

    fn work(&mut self, data: &ResumeData) {
        if data.work_experience.is_empty() {
            return;
        }
        self.heading(labels::WORK);

        for job in &data.work_experience {
            self.entry_start();
            self.block(&job.position, 0.0, ENTRY_TITLE, 18.0);
            self.block(&job.company, 0.0, BODY, 15.0);
            self.block(&job.period(), 0.0, BODY, 20.0);

            let lh = line_height(BODY.size);
            for resp in &job.responsibilities {
                match resp {
                    Responsibility::Legacy(text) => {
                        self.block(&format!("• {text}"), BULLET_INDENT, BODY, lh + 5.0);
                    }
                    Responsibility::Structured { title, subpoints } => {
                        if !title.is_empty() {
                            self.block(&format!("• {title}"), BULLET_INDENT, BODY_BOLD, 15.0);
                        }
                        for sub in subpoints {
                            self.block(&format!("- {sub}"), SUBPOINT_INDENT, BODY, lh + 3.0);
                        }
                    }
                }
            }
            self.cursor.advance(15.0);
        }
    }

    fn education(&mut self, data: &ResumeData) {
        if data.education.is_empty() {
            return;
        }
        self.heading(labels::EDUCATION);

        for edu in &data.education {
            self.entry_start();
            self.block(&edu.institution, 0.0, ENTRY_TITLE, 18.0);
            self.block(&edu.summary(), 0.0, BODY, 15.0);
            self.block(&edu.year, 0.0, BODY, 15.0);
            self.cursor.advance(10.0);
        }
    }

    fn courses(&mut self, data: &ResumeData) {
        if data.additional_education.is_empty() {
            return;
        }
        self.heading(labels::COURSES);

        for course in &data.additional_education {
            self.entry_start();
            self.block(&course.institution, 0.0, ENTRY_TITLE, 18.0);
            self.block(&course.course, 0.0, BODY, 15.0);
            self.block(&course.year, 0.0, BODY, 15.0);
            self.cursor.advance(10.0);
        }
    }

    fn languages(&mut self, data: &ResumeData) {
        let items: Vec<String> = data
            .languages
            .iter()
            .map(|l| dashed(&l.name, &l.level))
            .collect();
        self.bullet_list(labels::LANGUAGES, &items);
    }

    fn skills(&mut self, data: &ResumeData) {
        let items: Vec<String> = data
            .skills
            .iter()
            .map(|s| dashed(&s.name, s.level.label()))
            .collect();
        self.bullet_list(labels::SKILLS, &items);
    }

    fn qualities(&mut self, data: &ResumeData) {
        let items: Vec<String> = data.qualities.iter().map(|q| q.name.clone()).collect();
        self.bullet_list(labels::QUALITIES, &items);
    }

    fn additional(&mut self, data: &ResumeData) {
        if !data.has_additional_info() {
            return;
        }
        self.heading(labels::ADDITIONAL);
        let rows = labels::additional_rows(&data.personal_info);
        for (label, value) in rows {
            self.block(&format!("{label}: {value}"), 0.0, BODY, 18.0);
        }
    }

    fn bullet_list(&mut self, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.heading(title);
        for item in items {
            self.block(&format!("• {item}"), 0.0, BODY, 18.0);
        }
        self.cursor.advance(10.0);
    }
}

fn dashed(name: &str, detail: &str) -> String {
    if detail.is_empty() {
        name.to_string()
    } else {
        format!("{name} - {detail}")
    }
}
