use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssessmentService, assessment_not_found};
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn delete_assessment(
    service: &AssessmentService,
    assessment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_assessment(assessment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Assessment deleted successfully",
        ))),
        Ok(false) => Ok(assessment_not_found()),
        Err(e) => Ok(internal_error("Assessment deletion failed", e)),
    }
}
