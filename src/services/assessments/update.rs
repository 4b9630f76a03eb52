use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, assessment_not_found, check_course_material, validate_questions};
use crate::models::{ApiResponse, ErrorCode, assessments::requests::UpdateAssessmentRequest};
use crate::services::internal_error;

pub async fn update_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    mut body: UpdateAssessmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(title) = body.title.take() {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Title cannot be empty.",
            )));
        }
        body.title = Some(title);
    }
    if body.max_score.is_some_and(|score| score < 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Max score cannot be negative.",
        )));
    }
    if let Some(questions) = &body.questions
        && let Err(msg) = validate_questions(questions)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;

    let existing = match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => return Ok(assessment_not_found()),
        Err(e) => return Ok(internal_error("Assessment update failed", e)),
    };
    if body.course.is_some() || body.material.is_some() {
        let course_id = body.course.unwrap_or(existing.course);
        let material_id = body.material.or(existing.material);
        if let Err(response) =
            check_course_material(storage.as_ref(), course_id, material_id).await
        {
            return Ok(response);
        }
    }

    match storage.update_assessment(assessment_id, body).await {
        Ok(Some(assessment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assessment,
            "Assessment updated successfully",
        ))),
        Ok(None) => Ok(assessment_not_found()),
        Err(e) => Ok(internal_error("Assessment update failed", e)),
    }
}
