use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode, materials::requests::UpdateMaterialRequest};
use crate::services::internal_error;

pub async fn update_material(
    service: &MaterialService,
    material_id: i64,
    mut body: UpdateMaterialRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(title) = body.title.take() {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Title cannot be empty.",
            )));
        }
        body.title = Some(title);
    }
    if body.duration_in_minutes.is_some_and(|d| d < 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Duration must be a non-negative number of minutes.",
        )));
    }

    let storage = service.get_storage(request)?;

    if let Some(course_id) = body.course {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => return Ok(internal_error("Material update failed", e)),
        }
    }

    match storage.update_material(material_id, body).await {
        Ok(Some(material)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            material,
            "Material updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => Ok(internal_error("Material update failed", e)),
    }
}
