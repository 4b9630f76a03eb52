use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BatchService, check_references, check_students, validate_date_range};
use crate::models::{ApiResponse, ErrorCode, batches::requests::CreateBatchRequest};
use crate::services::internal_error;

pub async fn create_batch(
    service: &BatchService,
    mut body: CreateBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    body.name = body.name.trim().to_string();
    if body.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Batch name is required.",
        )));
    }
    if let Err(response) = validate_date_range(body.start_date, body.end_date) {
        return Ok(response);
    }

    let storage = service.get_storage(request)?;

    if let Err(response) =
        check_references(storage.as_ref(), Some(body.course), Some(body.college)).await
    {
        return Ok(response);
    }
    if !body.student_ids.is_empty()
        && let Err(response) = check_students(storage.as_ref(), &body.student_ids).await
    {
        return Ok(response);
    }

    match storage.create_batch(body).await {
        Ok(batch) => Ok(HttpResponse::Created().json(ApiResponse::success(
            batch,
            "Batch created successfully",
        ))),
        Err(e) => Ok(internal_error("Batch creation failed", e)),
    }
}
