use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::ResumeData;

pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_PHOTO_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Parses a raw request body into a normalized, validated résumé record.
///
/// Malformed JSON and a missing `personalInfo` both surface as the same
/// validation error, matching what the form shows the user.
pub fn parse_resume(body: &[u8]) -> Result<ResumeData, AppError> {
    let data: ResumeData = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected résumé payload");
        AppError::Validation("Некорректные данные резюме".to_string())
    })?;
    let data = data.normalize();

    let issues = validate_resume(&data);
    if !issues.is_empty() {
        let message = issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::Validation(message));
    }
    Ok(data)
}

/// Checks a normalized record. Returns every issue found, empty when valid.
pub fn validate_resume(data: &ResumeData) -> Vec<ValidationIssue> {
    let p = &data.personal_info;
    let mut issues = Vec::new();

    if p.first_name.is_empty() {
        issues.push(ValidationIssue::new("personalInfo.firstName", "Имя обязательно"));
    }
    if p.last_name.is_empty() {
        issues.push(ValidationIssue::new(
            "personalInfo.lastName",
            "Фамилия обязательна",
        ));
    }
    if let Some(email) = &p.email {
        if !is_plausible_email(email) {
            issues.push(ValidationIssue::new(
                "personalInfo.email",
                "Некорректный email",
            ));
        }
    }
    if let Some(photo) = &p.photo {
        if let Err(message) = check_photo(photo) {
            issues.push(ValidationIssue::new("personalInfo.photo", message));
        }
    }

    issues
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// Accepts `data:<mime>;base64,<payload>` with a whitelisted image type and a
/// decoded payload of at most 5 MiB.
fn check_photo(photo: &str) -> Result<(), &'static str> {
    let rest = photo
        .strip_prefix("data:")
        .ok_or("Фото должно быть передано как data URL")?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or("Фото должно быть передано как data URL")?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or("Фото должно быть закодировано в base64")?;

    if !ALLOWED_PHOTO_TYPES.contains(&mime.to_ascii_lowercase().as_str()) {
        return Err("Поддерживаемые форматы: JPG, PNG, GIF, WebP, BMP");
    }

    // Reject on encoded length first so oversized payloads are never decoded.
    if payload.len() / 4 * 3 > MAX_PHOTO_BYTES + 3 {
        return Err("Размер файла не должен превышать 5MB");
    }
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|_| "Фото повреждено")?;
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err("Размер файла не должен превышать 5MB");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;

    fn named(first: &str, last: &str) -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                first_name: first.to_string(),
                last_name: last.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_minimal_record_passes() {
        assert!(validate_resume(&named("Иван", "Петров")).is_empty());
    }

    #[test]
    fn test_missing_names_reported_together() {
        let issues = validate_resume(&named("", ""));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "personalInfo.firstName");
        assert_eq!(issues[1].field, "personalInfo.lastName");
    }

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("a@b.ru"));
        assert!(!is_plausible_email("a@@b.ru"));
        assert!(!is_plausible_email("@b.ru"));
        assert!(!is_plausible_email("a b@c.ru"));
        assert!(!is_plausible_email("plain"));
    }

    #[test]
    fn test_photo_accepts_small_png() {
        let photo = format!("data:image/png;base64,{}", BASE64.encode([0u8; 64]));
        assert_eq!(check_photo(&photo), Ok(()));
    }

    #[test]
    fn test_photo_rejects_wrong_type_and_scheme() {
        let svg = format!("data:image/svg+xml;base64,{}", BASE64.encode(b"<svg/>"));
        assert!(check_photo(&svg).is_err());
        assert!(check_photo("https://example.com/me.png").is_err());
        assert!(check_photo("data:image/png,rawbytes").is_err());
    }

    #[test]
    fn test_photo_rejects_oversized_payload() {
        let big = BASE64.encode(vec![0u8; MAX_PHOTO_BYTES + 1]);
        let photo = format!("data:image/jpeg;base64,{big}");
        assert_eq!(
            check_photo(&photo),
            Err("Размер файла не должен превышать 5MB")
        );
    }

    #[test]
    fn test_parse_resume_rejects_garbage_and_missing_personal_info() {
        assert!(matches!(
            parse_resume(b"not json"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_resume(br#"{"skills": []}"#),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_resume_normalizes() {
        let body = r#"{"personalInfo":{"firstName":" Иван ","lastName":"Петров"}}"#;
        let data = parse_resume(body.as_bytes()).unwrap();
        assert_eq!(data.personal_info.first_name, "Иван");
    }
}
