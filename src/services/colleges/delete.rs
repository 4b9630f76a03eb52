use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CollegeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn delete_college(
    service: &CollegeService,
    college_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_college(college_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "College deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CollegeNotFound,
            "College not found",
        ))),
        Err(e) => Ok(internal_error("College deletion failed", e)),
    }
}
