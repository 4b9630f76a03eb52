use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CollegeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn get_college(
    service: &CollegeService,
    college_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_college_by_id(college_id).await {
        Ok(Some(college)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            college,
            "College retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CollegeNotFound,
            "College not found",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve college", e)),
    }
}
