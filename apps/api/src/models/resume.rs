use serde::{Deserialize, Serialize};

use crate::dates::format_period;

/// The résumé record as submitted by the browser form.
///
/// Field names follow the form's camelCase JSON. Every section array may be
/// omitted and defaults to empty; only `personalInfo` is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub additional_education: Vec<AdditionalEducation>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub qualities: Vec<Quality>,
    #[serde(default)]
    pub about_me: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub age: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub telegram: Option<String>,
    pub driving_license: Option<String>,
    pub marital_status: Option<String>,
    /// Shown under the "employment" label on the rendered résumé.
    pub hobbies: Option<String>,
    /// `data:image/...;base64,` URL.
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current_job: bool,
    pub responsibilities: Vec<Responsibility>,
}

/// A work responsibility. Older form versions sent one free-text string per
/// job (one bullet per line); newer ones send titled groups of subpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Responsibility {
    Structured {
        #[serde(default)]
        title: String,
        #[serde(default)]
        subpoints: Vec<String>,
    },
    Legacy(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    #[serde(alias = "fieldOfStudy")]
    pub field: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalEducation {
    pub id: String,
    pub institution: String,
    pub course: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

/// Skill proficiency. The form only offers the three Russian labels, but
/// anything else is kept verbatim rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SkillLevel {
    #[default]
    Basic,
    Experienced,
    Advanced,
    Other(String),
}

impl SkillLevel {
    pub const SCALE: usize = 3;

    pub fn label(&self) -> &str {
        match self {
            SkillLevel::Basic => "Базовый",
            SkillLevel::Experienced => "Опытный",
            SkillLevel::Advanced => "Продвинутый",
            SkillLevel::Other(s) => s,
        }
    }

    /// Zero-based position on the three-step scale, `None` for unknown levels.
    pub fn rank(&self) -> Option<usize> {
        match self {
            SkillLevel::Basic => Some(0),
            SkillLevel::Experienced => Some(1),
            SkillLevel::Advanced => Some(2),
            SkillLevel::Other(_) => None,
        }
    }
}

impl From<String> for SkillLevel {
    fn from(s: String) -> Self {
        match s.trim() {
            "Базовый" => SkillLevel::Basic,
            "Опытный" => SkillLevel::Experienced,
            "Продвинутый" => SkillLevel::Advanced,
            other => SkillLevel::Other(other.to_string()),
        }
    }
}

impl From<SkillLevel> for String {
    fn from(level: SkillLevel) -> Self {
        level.label().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quality {
    pub id: String,
    pub name: String,
}

impl ResumeData {
    /// "LastName FirstName", the order used on every rendered document.
    pub fn full_name(&self) -> String {
        let p = &self.personal_info;
        format!("{} {}", p.last_name, p.first_name).trim().to_string()
    }

    pub fn about(&self) -> Option<&str> {
        self.about_me.as_deref().filter(|s| !s.is_empty())
    }

    pub fn has_additional_info(&self) -> bool {
        let p = &self.personal_info;
        p.driving_license.is_some() || p.marital_status.is_some() || p.hobbies.is_some()
    }

    /// Trims every string, drops blank optional fields and empty list items,
    /// and splits legacy responsibility strings into one entry per line.
    pub fn normalize(mut self) -> Self {
        self.personal_info = self.personal_info.normalize();
        self.about_me = non_blank(self.about_me);

        self.work_experience = self
            .work_experience
            .into_iter()
            .map(WorkExperience::normalize)
            .filter(|w| !w.company.is_empty() || !w.position.is_empty())
            .collect();

        for edu in &mut self.education {
            trim_in_place(&mut edu.institution);
            trim_in_place(&mut edu.degree);
            trim_in_place(&mut edu.field);
            trim_in_place(&mut edu.year);
        }
        self.education
            .retain(|e| !e.institution.is_empty() || !e.degree.is_empty());

        for course in &mut self.additional_education {
            trim_in_place(&mut course.institution);
            trim_in_place(&mut course.course);
            trim_in_place(&mut course.year);
        }
        self.additional_education
            .retain(|c| !c.institution.is_empty() || !c.course.is_empty());

        for skill in &mut self.skills {
            trim_in_place(&mut skill.name);
        }
        self.skills.retain(|s| !s.name.is_empty());

        for lang in &mut self.languages {
            trim_in_place(&mut lang.name);
            trim_in_place(&mut lang.level);
        }
        self.languages.retain(|l| !l.name.is_empty());

        for quality in &mut self.qualities {
            trim_in_place(&mut quality.name);
        }
        self.qualities.retain(|q| !q.name.is_empty());

        self
    }
}

impl PersonalInfo {
    fn normalize(mut self) -> Self {
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.last_name);
        trim_in_place(&mut self.location);
        self.age = non_blank(self.age);
        self.phone = non_blank(self.phone);
        self.email = non_blank(self.email);
        self.telegram = non_blank(self.telegram);
        self.driving_license = non_blank(self.driving_license);
        self.marital_status = non_blank(self.marital_status);
        self.hobbies = non_blank(self.hobbies);
        self.photo = non_blank(self.photo);
        self
    }
}

impl WorkExperience {
    fn normalize(mut self) -> Self {
        trim_in_place(&mut self.company);
        trim_in_place(&mut self.position);
        trim_in_place(&mut self.start_date);
        trim_in_place(&mut self.end_date);

        let mut out = Vec::with_capacity(self.responsibilities.len());
        for resp in self.responsibilities {
            match resp {
                Responsibility::Legacy(text) => out.extend(
                    text.lines()
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .map(|l| Responsibility::Legacy(l.to_string())),
                ),
                Responsibility::Structured { title, subpoints } => {
                    let title = title.trim().to_string();
                    let subpoints: Vec<String> = subpoints
                        .iter()
                        .map(|s| s.trim())
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                    if !title.is_empty() || !subpoints.is_empty() {
                        out.push(Responsibility::Structured { title, subpoints });
                    }
                }
            }
        }
        self.responsibilities = out;
        self
    }

    pub fn period(&self) -> String {
        format_period(&self.start_date, &self.end_date, self.is_current_job)
    }
}

impl Education {
    /// "Field, Degree" with whichever part is present.
    pub fn summary(&self) -> String {
        join_present(&[&self.field, &self.degree], ", ")
    }
}

/// Joins the non-empty parts with `sep`.
pub fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_record_defaults_sections() {
        let data: ResumeData = serde_json::from_value(json!({
            "personalInfo": { "firstName": "Иван", "lastName": "Петров" }
        }))
        .unwrap();
        assert!(data.work_experience.is_empty());
        assert!(data.skills.is_empty());
        assert_eq!(data.about_me, None);
        assert_eq!(data.full_name(), "Петров Иван");
    }

    #[test]
    fn test_missing_personal_info_is_rejected() {
        let result: Result<ResumeData, _> = serde_json::from_value(json!({ "skills": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_responsibility_accepts_both_shapes() {
        let work: WorkExperience = serde_json::from_value(json!({
            "company": "Acme",
            "position": "Engineer",
            "responsibilities": [
                "Wrote code\n\n  Reviewed code  ",
                { "title": "Leadership", "subpoints": ["Mentored juniors", "  "] }
            ]
        }))
        .unwrap();
        let work = work.normalize();
        assert_eq!(
            work.responsibilities,
            vec![
                Responsibility::Legacy("Wrote code".to_string()),
                Responsibility::Legacy("Reviewed code".to_string()),
                Responsibility::Structured {
                    title: "Leadership".to_string(),
                    subpoints: vec!["Mentored juniors".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_field_of_study_alias() {
        let edu: Education = serde_json::from_value(json!({
            "institution": "МГУ",
            "degree": "Бакалавр",
            "fieldOfStudy": "Физика",
            "year": "2015"
        }))
        .unwrap();
        assert_eq!(edu.field, "Физика");
    }

    #[test]
    fn test_skill_level_known_and_unknown() {
        let known: Skill =
            serde_json::from_value(json!({ "name": "Rust", "level": "Продвинутый" })).unwrap();
        assert_eq!(known.level, SkillLevel::Advanced);
        assert_eq!(known.level.rank(), Some(2));

        let unknown: Skill =
            serde_json::from_value(json!({ "name": "Go", "level": "Эксперт" })).unwrap();
        assert_eq!(unknown.level, SkillLevel::Other("Эксперт".to_string()));
        assert_eq!(unknown.level.rank(), None);
        assert_eq!(serde_json::to_value(&unknown.level).unwrap(), json!("Эксперт"));
    }

    #[test]
    fn test_normalize_drops_blank_fields_and_items() {
        let data: ResumeData = serde_json::from_value(json!({
            "personalInfo": {
                "firstName": "  Анна ",
                "lastName": "Смирнова",
                "phone": "   ",
                "email": " anna@example.com "
            },
            "skills": [{ "name": " " }, { "name": "SQL", "level": "Опытный" }],
            "qualities": [{ "name": "" }],
            "aboutMe": "  "
        }))
        .unwrap();
        let data = data.normalize();
        assert_eq!(data.personal_info.first_name, "Анна");
        assert_eq!(data.personal_info.phone, None);
        assert_eq!(data.personal_info.email.as_deref(), Some("anna@example.com"));
        assert_eq!(data.skills.len(), 1);
        assert!(data.qualities.is_empty());
        assert_eq!(data.about(), None);
    }

    #[test]
    fn test_normalize_keeps_education_without_institution() {
        let data: ResumeData = serde_json::from_value(json!({
            "personalInfo": { "firstName": "Анна", "lastName": "Смирнова" },
            "education": [
                { "institution": "", "degree": "Бакалавр" },
                { "institution": " ", "degree": " ", "field": "Физика" },
                { "institution": "МГУ" }
            ]
        }))
        .unwrap();
        let data = data.normalize();
        assert_eq!(data.education.len(), 2);
        assert_eq!(data.education[0].degree, "Бакалавр");
        assert_eq!(data.education[1].institution, "МГУ");
    }

    #[test]
    fn test_education_summary_skips_missing_parts() {
        let mut edu = Education {
            field: "Физика".to_string(),
            degree: "Бакалавр".to_string(),
            ..Default::default()
        };
        assert_eq!(edu.summary(), "Физика, Бакалавр");
        edu.field.clear();
        assert_eq!(edu.summary(), "Бакалавр");
    }

    #[test]
    fn test_has_additional_info() {
        let mut data = ResumeData::default();
        assert!(!data.has_additional_info());
        data.personal_info.marital_status = Some("Женат".to_string());
        assert!(data.has_additional_info());
    }
}
