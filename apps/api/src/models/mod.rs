pub mod resume;

pub use resume::{join_present, PersonalInfo, Responsibility, ResumeData, SkillLevel};
