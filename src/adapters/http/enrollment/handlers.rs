//! HTTP handlers for enrollment and progress endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{error_response, status_for};
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::enrollment::{
    EnrollCommand, EnrollHandler, GetProgressHandler, GetProgressQuery, GetProgressResult,
    RecordProgressCommand, RecordProgressHandler,
};
use crate::domain::enrollment::EnrollmentError;
use crate::ports::UserRepository;

use super::dto::{
    EnrollRequest, EnrollmentResponse, ProgressQueryParams, ProgressResponse,
    RecordProgressRequest,
};

#[derive(Clone)]
pub struct EnrollmentAppState {
    pub users: Arc<dyn UserRepository>,
}

impl EnrollmentAppState {
    pub fn enroll_handler(&self) -> EnrollHandler {
        EnrollHandler::new(self.users.clone())
    }

    pub fn record_progress_handler(&self) -> RecordProgressHandler {
        RecordProgressHandler::new(self.users.clone())
    }

    pub fn get_progress_handler(&self) -> GetProgressHandler {
        GetProgressHandler::new(self.users.clone())
    }
}

/// POST /api/courses/enroll
pub async fn enroll(
    State(state): State<EnrollmentAppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<EnrollRequest>,
) -> Result<impl IntoResponse, EnrollmentApiError> {
    let entry = state
        .enroll_handler()
        .handle(EnrollCommand {
            user_id: user.id,
            course_title: request.course_title,
        })
        .await?;

    Ok(Json(EnrollmentResponse::enrolled(entry)))
}

/// POST /api/courses/progress
pub async fn record_progress(
    State(state): State<EnrollmentAppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<RecordProgressRequest>,
) -> Result<impl IntoResponse, EnrollmentApiError> {
    let entry = state
        .record_progress_handler()
        .handle(RecordProgressCommand {
            user_id: user.id,
            course_title: request.course_title,
            progress: request.progress,
            completed_topic: request.completed_topic,
        })
        .await?;

    Ok(Json(EnrollmentResponse::progress_updated(entry)))
}

/// GET /api/courses/progress?courseTitle=...
pub async fn get_progress(
    State(state): State<EnrollmentAppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ProgressQueryParams>,
) -> Result<impl IntoResponse, EnrollmentApiError> {
    let result = state
        .get_progress_handler()
        .handle(GetProgressQuery {
            user_id: user.id,
            course_title: params.course_title,
        })
        .await?;

    let response = match result {
        GetProgressResult::Single(entry) => ProgressResponse::Single(entry),
        GetProgressResult::All(entries) => ProgressResponse::All(entries),
    };
    Ok(Json(response))
}

/// API error type that converts enrollment errors to HTTP responses.
#[derive(Debug)]
pub struct EnrollmentApiError(EnrollmentError);

impl From<EnrollmentError> for EnrollmentApiError {
    fn from(err: EnrollmentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for EnrollmentApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        error_response(status_for(code), code, self.0.message())
    }
}
