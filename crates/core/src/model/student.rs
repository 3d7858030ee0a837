use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// First unlock date baked into the built-in profile (2023-09-01T00:00:00Z).
const SAMPLE_UNLOCK_TIMESTAMP: i64 = 1_693_526_400;

/// Static description of the student, sent verbatim with every request.
///
/// The writing service personalizes questions from this record. Nothing in
/// the app mutates it after startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub interests: Vec<String>,
    pub knowledge_tree: KnowledgeTree,
    pub age_grade: u8,
}

/// Course-level progress tree the service uses as context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeTree {
    pub id: i64,
    pub status: String,
    pub title: String,
    pub school_year: String,
    pub course_code: String,
    pub grades: String,
    pub subjects: String,
    pub subject_codes: String,
    pub modules: Vec<CourseModule>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseModule {
    pub id: i64,
    pub name: String,
    pub unlock_at: DateTime<Utc>,
    pub state: String,
    pub items: Vec<ModuleItem>,
    pub progress: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleItem {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub lti_url: String,
    pub progress: f64,
}

impl StudentProfile {
    /// The built-in profile used when no profile file is supplied.
    ///
    /// # Panics
    ///
    /// Panics if the baked-in unlock timestamp cannot be represented.
    #[must_use]
    pub fn sample() -> Self {
        let unlock_at = DateTime::<Utc>::from_timestamp(SAMPLE_UNLOCK_TIMESTAMP, 0)
            .expect("sample unlock timestamp should be valid");
        Self {
            interests: vec!["science".to_string(), "technology".to_string()],
            knowledge_tree: KnowledgeTree {
                id: 1,
                status: "active".to_string(),
                title: "Writing Skills".to_string(),
                school_year: "2023-2024".to_string(),
                course_code: "WRT101".to_string(),
                grades: "9-10".to_string(),
                subjects: "English".to_string(),
                subject_codes: "ENG".to_string(),
                modules: vec![CourseModule {
                    id: 1,
                    name: "Essay Writing".to_string(),
                    unlock_at,
                    state: "unlocked".to_string(),
                    items: vec![ModuleItem {
                        id: 1,
                        name: "Introduction to Essay Writing".to_string(),
                        state: "completed".to_string(),
                        lti_url: "https://example.com/lti/1".to_string(),
                        progress: 1.0,
                    }],
                    progress: 0.5,
                }],
            },
            age_grade: 9,
        }
    }
}
