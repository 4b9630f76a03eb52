use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{BatchService, check_students};
use crate::models::{ApiResponse, ErrorCode, batches::requests::BatchStudentsRequest};
use crate::services::internal_error;

fn batch_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::BatchNotFound,
        "Batch not found",
    ))
}

fn empty_ids() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        "student_ids cannot be empty.",
    ))
}

pub async fn add_students(
    service: &BatchService,
    batch_id: i64,
    body: BatchStudentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.student_ids.is_empty() {
        return Ok(empty_ids());
    }

    let storage = service.get_storage(request)?;

    match storage.get_batch_by_id(batch_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(batch_not_found()),
        Err(e) => return Ok(internal_error("Failed to add students", e)),
    }
    if let Err(response) = check_students(storage.as_ref(), &body.student_ids).await {
        return Ok(response);
    }

    let added = match storage.add_batch_students(batch_id, &body.student_ids).await {
        Ok(added) => added,
        Err(e) => return Ok(internal_error("Failed to add students", e)),
    };
    info!("Added {} students to batch {}", added, batch_id);

    match storage.get_batch_by_id(batch_id).await {
        Ok(Some(batch)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            batch,
            "Students added successfully",
        ))),
        Ok(None) => Ok(batch_not_found()),
        Err(e) => Ok(internal_error("Failed to add students", e)),
    }
}

pub async fn remove_students(
    service: &BatchService,
    batch_id: i64,
    body: BatchStudentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.student_ids.is_empty() {
        return Ok(empty_ids());
    }

    let storage = service.get_storage(request)?;

    match storage.get_batch_by_id(batch_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(batch_not_found()),
        Err(e) => return Ok(internal_error("Failed to remove students", e)),
    }

    let removed = match storage
        .remove_batch_students(batch_id, &body.student_ids)
        .await
    {
        Ok(removed) => removed,
        Err(e) => return Ok(internal_error("Failed to remove students", e)),
    };
    info!("Removed {} students from batch {}", removed, batch_id);

    match storage.get_batch_by_id(batch_id).await {
        Ok(Some(batch)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            batch,
            "Students removed successfully",
        ))),
        Ok(None) => Ok(batch_not_found()),
        Err(e) => Ok(internal_error("Failed to remove students", e)),
    }
}
