//! Display labels shared by every document format.

pub const CONTACTS: &str = "Контакты";
pub const ABOUT: &str = "О себе";
pub const WORK: &str = "Опыт работы";
pub const EDUCATION: &str = "Образование";
pub const COURSES: &str = "Курсы";
pub const LANGUAGES: &str = "Языки";
pub const SKILLS: &str = "Навыки / Технологии";
pub const QUALITIES: &str = "Качества";
pub const ADDITIONAL: &str = "Дополнительная информация";

pub const PHONE: &str = "Телефон";
pub const EMAIL: &str = "Email";
pub const LOCATION: &str = "Город";
pub const TELEGRAM: &str = "Telegram";
pub const AGE: &str = "Возраст";
pub const DRIVING_LICENSE: &str = "Водительские права";
pub const MARITAL_STATUS: &str = "Семейное положение";
pub const EMPLOYMENT: &str = "Занятость";

pub const RESUME: &str = "Резюме";

use crate::models::PersonalInfo;

/// `(label, value)` pairs for the contact block, in display order.
pub fn contact_rows(p: &PersonalInfo) -> Vec<(&'static str, &str)> {
    let mut rows = Vec::new();
    if let Some(phone) = &p.phone {
        rows.push((PHONE, phone.as_str()));
    }
    if let Some(email) = &p.email {
        rows.push((EMAIL, email.as_str()));
    }
    if !p.location.is_empty() {
        rows.push((LOCATION, p.location.as_str()));
    }
    if let Some(telegram) = &p.telegram {
        rows.push((TELEGRAM, telegram.as_str()));
    }
    if let Some(age) = &p.age {
        rows.push((AGE, age.as_str()));
    }
    rows
}

pub fn additional_rows(p: &PersonalInfo) -> Vec<(&'static str, &str)> {
    [
        (DRIVING_LICENSE, &p.driving_license),
        (MARITAL_STATUS, &p.marital_status),
        (EMPLOYMENT, &p.hobbies),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
    .collect()
}
