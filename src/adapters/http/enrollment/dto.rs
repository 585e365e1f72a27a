//! Request and response types for enrollment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::enrollment::Enrollment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[serde(default)]
    pub course_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProgressRequest {
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub completed_topic: Option<String>,
}

/// Query string of `GET /api/courses/progress`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQueryParams {
    #[serde(default)]
    pub course_title: Option<String>,
}

/// `{message, course}` envelope returned by enroll and progress updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    pub message: String,
    pub course: Enrollment,
}

impl EnrollmentResponse {
    pub fn enrolled(course: Enrollment) -> Self {
        Self {
            message: "Successfully enrolled in course".to_string(),
            course,
        }
    }

    pub fn progress_updated(course: Enrollment) -> Self {
        Self {
            message: "Progress updated successfully".to_string(),
            course,
        }
    }
}

/// One entry when a title was given, the full list otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgressResponse {
    Single(Enrollment),
    All(Vec<Enrollment>),
}
