//! Plain-text backend. Always available, so it closes the default fallback chain.

use crate::labels;
use crate::layout::font_metrics::Monospace;
use crate::layout::wrap_text;
use crate::models::{join_present, Responsibility, ResumeData};
use crate::render::{DocumentRenderer, ExportFormat, RenderError, RenderedDocument};

pub const DEFAULT_WIDTH: usize = 80;

pub struct TextRenderer {
    width: usize,
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self { width: width.max(20) }
    }

    pub fn render_string(&self, data: &ResumeData) -> String {
        let mut out = TextWriter::new(self.width);

        let name = data.full_name().to_uppercase();
        out.line(&name);
        out.line(&"=".repeat(name.chars().count().min(self.width)));
        out.blank();

        let contacts = labels::contact_rows(&data.personal_info);
        if !contacts.is_empty() {
            out.heading(labels::CONTACTS);
            for (label, value) in contacts {
                out.wrapped(&format!("{label}: {value}"), "", "  ");
            }
            out.blank();
        }

        if let Some(about) = data.about() {
            out.heading(labels::ABOUT);
            out.wrapped(about, "", "");
            out.blank();
        }

        if !data.work_experience.is_empty() {
            out.heading(labels::WORK);
            for job in &data.work_experience {
                out.wrapped(&join_present(&[&job.position, &job.company], " — "), "", "");
                let period = job.period();
                if !period.is_empty() {
                    out.line(&period);
                }
                for resp in &job.responsibilities {
                    match resp {
                        Responsibility::Legacy(text) => out.wrapped(text, "  • ", "    "),
                        Responsibility::Structured { title, subpoints } => {
                            if !title.is_empty() {
                                out.wrapped(title, "  • ", "    ");
                            }
                            for sub in subpoints {
                                out.wrapped(sub, "      - ", "        ");
                            }
                        }
                    }
                }
                out.blank();
            }
        }

        if !data.education.is_empty() {
            out.heading(labels::EDUCATION);
            for edu in &data.education {
                out.wrapped(&join_present(&[&edu.institution, &edu.year], ", "), "", "");
                out.wrapped(&edu.summary(), "  ", "  ");
            }
            out.blank();
        }

        if !data.additional_education.is_empty() {
            out.heading(labels::COURSES);
            for course in &data.additional_education {
                out.wrapped(
                    &join_present(&[&course.institution, &course.year], ", "),
                    "",
                    "",
                );
                out.wrapped(&course.course, "  ", "  ");
            }
            out.blank();
        }

        let languages: Vec<String> = data
            .languages
            .iter()
            .map(|l| join_present(&[&l.name, &l.level], " - "))
            .collect();
        out.list(labels::LANGUAGES, &languages);

        let skills: Vec<String> = data
            .skills
            .iter()
            .map(|s| join_present(&[&s.name, s.level.label()], " - "))
            .collect();
        out.list(labels::SKILLS, &skills);

        let qualities: Vec<String> = data.qualities.iter().map(|q| q.name.clone()).collect();
        out.list(labels::QUALITIES, &qualities);

        if data.has_additional_info() {
            out.heading(labels::ADDITIONAL);
            for (label, value) in labels::additional_rows(&data.personal_info) {
                out.wrapped(&format!("{label}: {value}"), "", "  ");
            }
            out.blank();
        }

        out.finish()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl DocumentRenderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn render(&self, data: &ResumeData) -> Result<RenderedDocument, RenderError> {
        Ok(RenderedDocument {
            format: ExportFormat::Text,
            bytes: self.render_string(data).into_bytes(),
        })
    }
}

struct TextWriter {
    width: usize,
    out: String,
}

impl TextWriter {
    fn new(width: usize) -> Self {
        Self {
            width,
            out: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn heading(&mut self, title: &str) {
        let title = title.to_uppercase();
        let underline = "-".repeat(title.chars().count());
        self.line(&title);
        self.line(&underline);
    }

    /// Wraps with a first-line prefix and a hanging indent for continuation lines.
    fn wrapped(&mut self, text: &str, first: &str, rest: &str) {
        let indent = first.chars().count().max(rest.chars().count());
        let width = self.width.saturating_sub(indent).max(10) as f32;
        for (i, line) in wrap_text(text, width, &Monospace).iter().enumerate() {
            let prefix = if i == 0 { first } else { rest };
            self.line(format!("{prefix}{line}").trim_end());
        }
    }

    fn list(&mut self, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.heading(title);
        for item in items {
            self.wrapped(item, "• ", "  ");
        }
        self.blank();
    }

    fn finish(mut self) -> String {
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
        self.out
    }
}
