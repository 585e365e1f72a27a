//! Request and response types for catalog endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Course, CourseDraft, CourseModule, CoursePatch};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
}

impl From<CreateCourseRequest> for CourseDraft {
    fn from(request: CreateCourseRequest) -> Self {
        CourseDraft {
            title: request.title,
            description: request.description,
            modules: request.modules,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub modules: Option<Vec<CourseModule>>,
    #[serde(default)]
    pub is_free: Option<bool>,
}

impl From<UpdateCourseRequest> for CoursePatch {
    fn from(request: UpdateCourseRequest) -> Self {
        CoursePatch {
            title: request.title,
            description: request.description,
            modules: request.modules,
            is_free: request.is_free,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub modules: Vec<CourseModule>,
    pub is_free: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            description: course.description,
            modules: course.modules,
            is_free: course.is_free,
            created_at: *course.created_at.as_datetime(),
            updated_at: *course.updated_at.as_datetime(),
        }
    }
}
