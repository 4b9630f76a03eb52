use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ApplicationService, application_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{files::file_response, internal_error};

pub async fn get_application(
    service: &ApplicationService,
    application_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_application_by_id(application_id).await {
        Ok(Some(application)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            application,
            "Application retrieved successfully",
        ))),
        Ok(None) => Ok(application_not_found()),
        Err(e) => Ok(internal_error("Failed to retrieve application", e)),
    }
}

pub async fn view_resume(
    service: &ApplicationService,
    application_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_application_resume_path(application_id).await {
        Ok(Some(path)) => file_response(&path, "application/pdf", "resume.pdf", true).await,
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Resume not found for this application.",
        ))),
        Err(e) => Ok(internal_error("Failed to load resume", e)),
    }
}
