use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::errors::ParcError;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::internal_error;

pub async fn create_course(
    service: &CourseService,
    mut body: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    body.name = body.name.trim().to_string();
    if body.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course name is required.",
        )));
    }

    let storage = service.get_storage(request)?;

    match storage.create_course(body).await {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success(
            course,
            "Course created successfully",
        ))),
        Err(ParcError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                "A course with this name already exists.",
            ),
        )),
        Err(e) => Ok(internal_error("Course creation failed", e)),
    }
}
