use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, assessment_not_found};
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};
use crate::services::{current_user, internal_error};

pub async fn get_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    if user.role == UserRole::Student && !user.assigned_assessments.contains(&assessment_id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "This assessment has not been assigned to you.",
        )));
    }

    let storage = service.get_storage(request)?;

    match storage.get_assessment_by_id(assessment_id).await {
        Ok(Some(assessment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assessment,
            "Assessment retrieved successfully",
        ))),
        Ok(None) => Ok(assessment_not_found()),
        Err(e) => Ok(internal_error("Failed to retrieve assessment", e)),
    }
}
