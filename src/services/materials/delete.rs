use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{files::remove_upload, internal_error};

pub async fn delete_material(
    service: &MaterialService,
    material_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_material(material_id).await {
        Ok(Some(file_path)) => {
            remove_upload(&file_path).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Material deleted successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => Ok(internal_error("Material deletion failed", e)),
    }
}
