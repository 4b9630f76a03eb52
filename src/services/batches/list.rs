use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BatchService;
use crate::models::{ApiResponse, batches::requests::BatchListParams};
use crate::services::internal_error;
use crate::storage::ListFilter;

pub async fn list_batches(
    service: &BatchService,
    query: BatchListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let filter = ListFilter {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course,
        college_id: query.college,
        ..Default::default()
    };

    match storage.list_batches_with_pagination(filter).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Batch list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve batch list", e)),
    }
}
