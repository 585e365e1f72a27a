//! HTTP handlers for catalog endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::{error_response, status_for};
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAdmin;
use crate::application::handlers::catalog::{
    CreateCourseCommand, CreateCourseHandler, GetCourseHandler, GetCourseQuery,
    ListCoursesHandler, ListCoursesQuery, UpdateCourseCommand, UpdateCourseHandler,
};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{CourseId, ErrorCode};
use crate::ports::CourseRepository;

use super::dto::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};

#[derive(Clone)]
pub struct CatalogAppState {
    pub courses: Arc<dyn CourseRepository>,
}

impl CatalogAppState {
    pub fn list_handler(&self) -> ListCoursesHandler {
        ListCoursesHandler::new(self.courses.clone())
    }

    pub fn get_handler(&self) -> GetCourseHandler {
        GetCourseHandler::new(self.courses.clone())
    }

    pub fn create_handler(&self) -> CreateCourseHandler {
        CreateCourseHandler::new(self.courses.clone())
    }

    pub fn update_handler(&self) -> UpdateCourseHandler {
        UpdateCourseHandler::new(self.courses.clone())
    }
}

/// GET /api/courses
pub async fn list_courses(
    State(state): State<CatalogAppState>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let courses = state.list_handler().handle(ListCoursesQuery).await?;
    let response: Vec<CourseResponse> = courses.into_iter().map(CourseResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/courses/:id
pub async fn get_course(
    State(state): State<CatalogAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let course = state
        .get_handler()
        .handle(GetCourseQuery {
            course_id: parse_course_id(&id)?,
        })
        .await?;
    Ok(Json(CourseResponse::from(course)))
}

/// POST /api/courses (admin only)
pub async fn create_course(
    State(state): State<CatalogAppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiJson(request): ApiJson<CreateCourseRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let course = state
        .create_handler()
        .handle(CreateCourseCommand {
            draft: request.into(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}

/// PUT /api/courses/:id (admin only)
pub async fn update_course(
    State(state): State<CatalogAppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateCourseRequest>,
) -> Result<impl IntoResponse, CatalogApiError> {
    let course = state
        .update_handler()
        .handle(UpdateCourseCommand {
            course_id: parse_course_id(&id)?,
            patch: request.into(),
        })
        .await?;
    Ok(Json(CourseResponse::from(course)))
}

/// An id that is not a UUID cannot name any course.
fn parse_course_id(raw: &str) -> Result<CourseId, CatalogApiError> {
    raw.parse::<CourseId>()
        .map_err(|_| CatalogApiError::NotFound(raw.to_string()))
}

/// API error type that converts catalog errors to HTTP responses.
#[derive(Debug)]
pub enum CatalogApiError {
    Catalog(CatalogError),
    /// Path id that could not be parsed.
    NotFound(String),
}

impl From<CatalogError> for CatalogApiError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl IntoResponse for CatalogApiError {
    fn into_response(self) -> Response {
        match self {
            CatalogApiError::Catalog(err) => {
                let code = err.code();
                error_response(status_for(code), code, err.message())
            }
            CatalogApiError::NotFound(_) => error_response(
                StatusCode::NOT_FOUND,
                ErrorCode::CourseNotFound,
                "Course not found".to_string(),
            ),
        }
    }
}
