use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{files::file_response, internal_error};

pub async fn view_resume(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_user_resume_path(user_id).await {
        Ok(Some(path)) => file_response(&path, "application/pdf", "resume.pdf", true).await,
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Resume not found for this user.",
        ))),
        Err(e) => Ok(internal_error("Failed to load resume", e)),
    }
}
