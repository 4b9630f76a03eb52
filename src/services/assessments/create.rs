use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, check_course_material, validate_questions};
use crate::models::{ApiResponse, ErrorCode, assessments::requests::CreateAssessmentRequest};
use crate::services::{current_user, internal_error};

pub async fn create_assessment(
    service: &AssessmentService,
    mut body: CreateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    body.title = body.title.trim().to_string();
    if body.title.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Title is required.",
        )));
    }
    if body.max_score.is_some_and(|score| score < 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Max score cannot be negative.",
        )));
    }
    if let Err(msg) = validate_questions(&body.questions) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;

    if let Err(response) = check_course_material(storage.as_ref(), body.course, body.material).await
    {
        return Ok(response);
    }

    match storage.create_assessment(body, user.id).await {
        Ok(assessment) => Ok(HttpResponse::Created().json(ApiResponse::success(
            assessment,
            "Assessment created successfully",
        ))),
        Err(e) => Ok(internal_error("Assessment creation failed", e)),
    }
}
