//! Course aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, Timestamp, ValidationError};

/// One module (lesson) of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub title: String,
    pub content: String,
    pub pdf_path: String,
    pub order: i32,
}

impl CourseModule {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::empty_field("modules.title"));
        }
        Ok(())
    }
}

/// A catalog course.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub modules: Vec<CourseModule>,
    pub is_free: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a course.
#[derive(Debug, Clone, Default)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub modules: Vec<CourseModule>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub modules: Option<Vec<CourseModule>>,
    pub is_free: Option<bool>,
}

impl Course {
    /// Creates a new course. New courses are free until updated.
    pub fn create(draft: CourseDraft) -> Result<Self, ValidationError> {
        let title = required("title", draft.title)?;
        let description = required("description", draft.description)?;
        for module in &draft.modules {
            module.validate()?;
        }

        let now = Timestamp::now();
        Ok(Self {
            id: CourseId::new(),
            title,
            description,
            modules: draft.modules,
            is_free: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update, validating every provided field first.
    pub fn apply(&mut self, patch: CoursePatch) -> Result<(), ValidationError> {
        let title = patch.title.map(|t| required("title", t)).transpose()?;
        let description = patch
            .description
            .map(|d| required("description", d))
            .transpose()?;
        if let Some(modules) = &patch.modules {
            for module in modules {
                module.validate()?;
            }
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(modules) = patch.modules {
            self.modules = modules;
        }
        if let Some(is_free) = patch.is_free {
            self.is_free = is_free;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CourseDraft {
        CourseDraft {
            title: " Rust Basics ".to_string(),
            description: "Ownership and borrowing".to_string(),
            modules: vec![CourseModule {
                title: "Intro".to_string(),
                content: "Welcome".to_string(),
                pdf_path: "/pdfs/intro.pdf".to_string(),
                order: 1,
            }],
        }
    }

    #[test]
    fn create_defaults_to_free_and_trims_title() {
        let course = Course::create(draft()).unwrap();
        assert!(course.is_free);
        assert_eq!(course.title, "Rust Basics");
        assert_eq!(course.modules.len(), 1);
    }

    #[test]
    fn create_requires_title_and_description() {
        let mut d = draft();
        d.title = String::new();
        assert_eq!(
            Course::create(d).unwrap_err(),
            ValidationError::empty_field("title")
        );

        let mut d = draft();
        d.description = "  ".to_string();
        assert!(Course::create(d).is_err());
    }

    #[test]
    fn apply_updates_only_given_fields() {
        let mut course = Course::create(draft()).unwrap();
        course
            .apply(CoursePatch {
                is_free: Some(false),
                ..Default::default()
            })
            .unwrap();

        assert!(!course.is_free);
        assert_eq!(course.title, "Rust Basics");
    }

    #[test]
    fn apply_rejects_blank_title_without_partial_write() {
        let mut course = Course::create(draft()).unwrap();
        let result = course.apply(CoursePatch {
            title: Some(" ".to_string()),
            is_free: Some(false),
            ..Default::default()
        });

        assert!(result.is_err());
        assert!(course.is_free);
    }

    #[test]
    fn module_serializes_pdf_path_in_camel_case() {
        let json = serde_json::to_value(&draft().modules[0]).unwrap();
        assert_eq!(json["pdfPath"], "/pdfs/intro.pdf");
    }
}
