use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ApplicationService, application_not_found};
use crate::models::ApiResponse;
use crate::services::{files::remove_upload, internal_error};

pub async fn delete_application(
    service: &ApplicationService,
    application_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let resume_path = storage
        .get_application_resume_path(application_id)
        .await
        .ok()
        .flatten();

    match storage.delete_application(application_id).await {
        Ok(true) => {
            if let Some(path) = resume_path {
                remove_upload(&path).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Application deleted successfully",
            )))
        }
        Ok(false) => Ok(application_not_found()),
        Err(e) => Ok(internal_error("Application deletion failed", e)),
    }
}
