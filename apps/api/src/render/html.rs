//! Printable HTML preview: header band, two-column body, A4 page box.
//! Every piece of user text goes through `escape`.

use std::fmt::Write as _;

use crate::labels;
use crate::models::{Responsibility, ResumeData, SkillLevel};
use crate::render::{DocumentRenderer, ExportFormat, RenderError, RenderedDocument};

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: Arial, sans-serif; font-size: 12px; line-height: 1.4; color: #333; background: white; }
.resume-page { width: 210mm; min-height: 297mm; background: white; }
.resume-header { background: #f8f9fa; color: #2c3e50; padding: 30px 40px; display: flex; justify-content: space-between; border-bottom: 5px solid #dee2e6; }
.full-name { font-size: 32px; font-weight: bold; margin-bottom: 10px; letter-spacing: 2px; }
.header-info { display: flex; flex-direction: column; gap: 5px; font-size: 14px; }
.profile-photo { width: 120px; height: 120px; border-radius: 10px; object-fit: cover; border: 4px solid white; }
.resume-body { display: flex; }
.left-column { flex: 2; padding: 30px 40px; }
.right-column { flex: 1; padding: 30px; background: #f8f9fa; border-left: 1px solid #e9ecef; }
section { margin-bottom: 25px; break-inside: avoid; }
h2 { font-size: 16px; color: #2c3e50; margin-bottom: 15px; padding-bottom: 8px; border-bottom: 2px solid #3498db; text-transform: uppercase; letter-spacing: 1px; break-after: avoid; }
h3 { font-size: 14px; color: #2c3e50; }
.item { margin-bottom: 20px; padding-left: 15px; border-left: 3px solid #3498db; break-inside: avoid; }
.item.education { border-left-color: #e74c3c; }
.item-header { display: flex; justify-content: space-between; margin-bottom: 5px; }
.period, .year { font-size: 11px; color: #7f8c8d; font-style: italic; }
.position { font-size: 13px; color: #34495e; font-style: italic; margin-bottom: 8px; }
.responsibility-title { font-weight: bold; margin: 4px 0; }
.responsibility-item { font-size: 11px; padding-left: 15px; margin-bottom: 3px; }
.about-text { font-size: 11px; line-height: 1.5; text-align: justify; white-space: pre-line; }
.contact-item, .quality-item { font-size: 11px; margin-bottom: 8px; }
.info-row { font-size: 10px; margin-bottom: 8px; }
.info-row .label { font-weight: bold; display: block; }
.language-item, .skill-item { background: white; padding: 8px; border-radius: 6px; margin-bottom: 8px; border-left: 3px solid #f39c12; }
.skill-item { border-left-color: #9b59b6; }
.skill-header { display: flex; justify-content: space-between; margin-bottom: 6px; }
.skill-level { display: flex; gap: 3px; }
.skill-bar { width: 15px; height: 4px; background: #ecf0f1; border-radius: 2px; }
.skill-bar.filled { background: #9b59b6; }
@media print { body { -webkit-print-color-adjust: exact; print-color-adjust: exact; } }
"#;

#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn render_string(&self, data: &ResumeData) -> String {
        let mut html = String::with_capacity(8 * 1024);
        let p = &data.personal_info;
        let name = escape(&data.full_name());

        html.push_str("<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"UTF-8\">\n");
        let _ = writeln!(html, "<title>{} - {name}</title>", labels::RESUME);
        let _ = writeln!(
            html,
            "<style>{STYLE}</style>\n</head>\n<body>\n<div class=\"resume-page\">"
        );

        // Header
        html.push_str("<div class=\"resume-header\"><div class=\"header-content\">");
        let _ = write!(
            html,
            "<h1 class=\"full-name\">{}</h1>",
            escape(&data.full_name().to_uppercase())
        );
        html.push_str("<div class=\"header-info\">");
        if !p.location.is_empty() {
            let _ = write!(html, "<div class=\"location\">{}</div>", escape(&p.location));
        }
        if let Some(age) = &p.age {
            let _ = write!(html, "<div class=\"age\">{}: {}</div>", labels::AGE, escape(age));
        }
        html.push_str("</div></div>");
        if let Some(photo) = p.photo.as_deref().filter(|s| s.starts_with("data:image/")) {
            let _ = write!(
                html,
                "<div class=\"photo-container\"><img src=\"{}\" alt=\"{name}\" class=\"profile-photo\"></div>",
                escape(photo)
            );
        }
        html.push_str("</div>\n<div class=\"resume-body\">\n<div class=\"left-column\">\n");

        left_column(&mut html, data);
        html.push_str("</div>\n<div class=\"right-column\">\n");
        right_column(&mut html, data);
        html.push_str("</div>\n</div>\n</div>\n</body>\n</html>\n");
        html
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn name(&self) -> &'static str {
        "html"
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn render(&self, data: &ResumeData) -> Result<RenderedDocument, RenderError> {
        Ok(RenderedDocument {
            format: ExportFormat::Html,
            bytes: self.render_string(data).into_bytes(),
        })
    }
}

fn left_column(html: &mut String, data: &ResumeData) {
    if !data.work_experience.is_empty() {
        let _ = write!(html, "<section><h2>{}</h2>", labels::WORK);
        for job in &data.work_experience {
            let _ = write!(
                html,
                "<div class=\"item work\"><div class=\"item-header\"><h3>{}</h3><span class=\"period\">{}</span></div>",
                escape(&job.company),
                escape(&job.period())
            );
            if !job.position.is_empty() {
                let _ = write!(html, "<div class=\"position\">{}:</div>", escape(&job.position));
            }
            if !job.responsibilities.is_empty() {
                html.push_str("<div class=\"responsibilities\">");
                for resp in &job.responsibilities {
                    match resp {
                        Responsibility::Structured { title, subpoints } => {
                            if !title.is_empty() {
                                let _ = write!(
                                    html,
                                    "<div class=\"responsibility-title\">{}</div>",
                                    escape(title)
                                );
                            }
                            for sub in subpoints {
                                let _ = write!(
                                    html,
                                    "<div class=\"responsibility-item\">• {}</div>",
                                    escape(sub)
                                );
                            }
                        }
                        Responsibility::Legacy(text) => {
                            let _ = write!(
                                html,
                                "<div class=\"responsibility-item\">{}</div>",
                                escape(text)
                            );
                        }
                    }
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }
        html.push_str("</section>\n");
    }

    if !data.education.is_empty() {
        let _ = write!(html, "<section><h2>{}</h2>", labels::EDUCATION);
        for edu in &data.education {
            entry(html, "education", &edu.institution, &edu.year, &edu.summary());
        }
        html.push_str("</section>\n");
    }

    if !data.additional_education.is_empty() {
        let _ = write!(html, "<section><h2>{}</h2>", labels::COURSES);
        for course in &data.additional_education {
            entry(html, "education", &course.institution, &course.year, &course.course);
        }
        html.push_str("</section>\n");
    }

    if let Some(about) = data.about() {
        let _ = write!(
            html,
            "<section><h2>{}</h2><div class=\"about-text\">{}</div></section>\n",
            labels::ABOUT,
            escape(about)
        );
    }
}

fn right_column(html: &mut String, data: &ResumeData) {
    let p = &data.personal_info;
    let _ = write!(html, "<section class=\"contact-section\"><h2>{}</h2>", labels::CONTACTS);
    for (label, value) in labels::contact_rows(p) {
        // Location and age are already in the header band.
        if label == labels::LOCATION || label == labels::AGE {
            continue;
        }
        let _ = write!(html, "<div class=\"contact-item\">{label}: {}</div>", escape(value));
    }
    let additional = labels::additional_rows(p);
    if !additional.is_empty() {
        html.push_str("<div class=\"additional-info\">");
        for (label, value) in additional {
            let _ = write!(
                html,
                "<div class=\"info-row\"><span class=\"label\">{label}:</span><span>{}</span></div>",
                escape(value)
            );
        }
        html.push_str("</div>");
    }
    html.push_str("</section>\n");

    if !data.languages.is_empty() {
        let _ = write!(html, "<section><h2>{}</h2>", labels::LANGUAGES);
        for lang in &data.languages {
            let _ = write!(
                html,
                "<div class=\"language-item\"><div class=\"language-name\"><b>{}</b></div><div class=\"language-level\">{}</div></div>",
                escape(&lang.name),
                escape(&lang.level)
            );
        }
        html.push_str("</section>\n");
    }

    if !data.skills.is_empty() {
        let _ = write!(html, "<section><h2>{}</h2>", labels::SKILLS);
        for skill in &data.skills {
            let _ = write!(
                html,
                "<div class=\"skill-item\"><div class=\"skill-header\"><b>{}</b><span>{}</span></div><div class=\"skill-level\">{}</div></div>",
                escape(&skill.name),
                escape(skill.level.label()),
                skill_bars(&skill.level)
            );
        }
        html.push_str("</section>\n");
    }

    if !data.qualities.is_empty() {
        let _ = write!(html, "<section><h2>{}</h2>", labels::QUALITIES);
        for quality in &data.qualities {
            let _ = write!(html, "<div class=\"quality-item\">• {}</div>", escape(&quality.name));
        }
        html.push_str("</section>\n");
    }
}

fn entry(html: &mut String, class: &str, title: &str, year: &str, detail: &str) {
    let _ = write!(
        html,
        "<div class=\"item {class}\"><div class=\"item-header\"><h3>{}</h3><span class=\"year\">{}</span></div>",
        escape(title),
        escape(year)
    );
    if !detail.is_empty() {
        let _ = write!(html, "<div class=\"degree-info\">{}</div>", escape(detail));
    }
    html.push_str("</div>");
}

/// Three segments, filled up to and including the skill's rank.
fn skill_bars(level: &SkillLevel) -> String {
    let filled = level.rank().map_or(0, |r| r + 1);
    (0..SkillLevel::SCALE)
        .map(|i| {
            if i < filled {
                "<div class=\"skill-bar filled\"></div>"
            } else {
                "<div class=\"skill-bar\"></div>"
            }
        })
        .collect()
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PersonalInfo, Skill};

    fn sample() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                first_name: "Иван".to_string(),
                last_name: "Петров".to_string(),
                location: "Казань".to_string(),
                email: Some("ivan@example.com".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_user_markup_is_escaped() {
        let mut data = sample();
        data.about_me = Some("<script>alert(1)</script>".to_string());
        let html = HtmlRenderer.render_string(&data);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_header_and_contacts() {
        let html = HtmlRenderer.render_string(&sample());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1 class=\"full-name\">ПЕТРОВ ИВАН</h1>"));
        assert!(html.contains("<div class=\"location\">Казань</div>"));
        assert!(html.contains("Email: ivan@example.com"));
        assert!(!html.contains(labels::WORK));
    }

    #[test]
    fn test_skill_bars_follow_rank() {
        assert_eq!(skill_bars(&SkillLevel::Experienced).matches("filled").count(), 2);
        assert_eq!(skill_bars(&SkillLevel::Advanced).matches("filled").count(), 3);
        assert_eq!(
            skill_bars(&SkillLevel::Other("?".to_string())).matches("filled").count(),
            0
        );

        let mut data = sample();
        data.skills = vec![Skill {
            name: "Rust".to_string(),
            level: SkillLevel::Basic,
            ..Default::default()
        }];
        let html = HtmlRenderer.render_string(&data);
        assert_eq!(html.matches("skill-bar filled").count(), 1);
    }

    #[test]
    fn test_non_image_photo_is_ignored() {
        let mut data = sample();
        data.personal_info.photo = Some("javascript:alert(1)".to_string());
        let html = HtmlRenderer.render_string(&data);
        assert!(!html.contains("<img"));
    }
}
