use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{files::file_response, internal_error};

/// 以资料自身的 Content-Type 内联返回文件
pub async fn material_content(
    service: &MaterialService,
    material_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_material_file(material_id).await {
        Ok(Some(file)) => {
            file_response(
                &file.file_path,
                &file.content_type,
                &file.original_name,
                true,
            )
            .await
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve material", e)),
    }
}
