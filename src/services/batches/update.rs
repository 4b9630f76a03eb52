use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BatchService, check_references, validate_date_range};
use crate::models::{ApiResponse, ErrorCode, batches::requests::UpdateBatchRequest};
use crate::services::internal_error;

pub async fn update_batch(
    service: &BatchService,
    batch_id: i64,
    mut body: UpdateBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = body.name.take() {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Batch name cannot be empty.",
            )));
        }
        body.name = Some(name);
    }

    let storage = service.get_storage(request)?;

    let existing = match storage.get_batch_by_id(batch_id).await {
        Ok(Some(batch)) => batch,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BatchNotFound,
                "Batch not found",
            )));
        }
        Err(e) => return Ok(internal_error("Batch update failed", e)),
    };

    // 只改一端日期时与原值比较
    let start = body.start_date.unwrap_or(existing.start_date);
    let end = body.end_date.unwrap_or(existing.end_date);
    if let Err(response) = validate_date_range(start, end) {
        return Ok(response);
    }
    if let Err(response) = check_references(storage.as_ref(), body.course, body.college).await {
        return Ok(response);
    }

    match storage.update_batch(batch_id, body).await {
        Ok(Some(batch)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            batch,
            "Batch updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BatchNotFound,
            "Batch not found",
        ))),
        Err(e) => Ok(internal_error("Batch update failed", e)),
    }
}
