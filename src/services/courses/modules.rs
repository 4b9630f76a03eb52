use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::CourseService;
use crate::errors::ParcError;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::requests::{CreateCourseModuleRequest, UpdateCourseModuleRequest},
};
use crate::services::internal_error;
use crate::storage::Storage;

fn module_conflict() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::CourseModuleConflict,
        "A module with this number already exists in the course.",
    ))
}

fn module_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseModuleNotFound,
        "Course module not found",
    ))
}

/// 模块引用的资料必须全部存在，返回错误响应或 None
async fn check_materials(storage: &dyn Storage, material_ids: &[i64]) -> Option<HttpResponse> {
    let unique: HashSet<i64> = material_ids.iter().copied().collect();
    let ids: Vec<i64> = unique.into_iter().collect();
    match storage.list_materials_by_ids(&ids).await {
        Ok(found) if found.len() == ids.len() => None,
        Ok(_) => Some(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidMaterialIds,
            "One or more material IDs are invalid.",
        ))),
        Err(e) => Some(internal_error("Failed to verify materials", e)),
    }
}

fn validate_module(module_number: Option<i32>, title: Option<&str>) -> Result<(), &'static str> {
    if module_number.is_some_and(|n| n < 1) {
        return Err("Module number must be positive.");
    }
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err("Module title cannot be empty.");
    }
    Ok(())
}

pub async fn create_module(
    service: &CourseService,
    course_id: i64,
    body: CreateCourseModuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_module(Some(body.module_number), Some(&body.title)) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to retrieve course", e)),
    }
    if let Some(response) = check_materials(storage.as_ref(), &body.material_ids).await {
        return Ok(response);
    }

    match storage.create_course_module(course_id, body).await {
        Ok(module) => Ok(HttpResponse::Created().json(ApiResponse::success(
            module,
            "Course module created successfully",
        ))),
        Err(ParcError::Conflict(_)) => Ok(module_conflict()),
        Err(e) => Ok(internal_error("Course module creation failed", e)),
    }
}

pub async fn update_module(
    service: &CourseService,
    course_id: i64,
    module_id: i64,
    body: UpdateCourseModuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_module(body.module_number, body.title.as_deref()) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;

    if let Some(material_ids) = &body.material_ids
        && let Some(response) = check_materials(storage.as_ref(), material_ids).await
    {
        return Ok(response);
    }

    match storage.update_course_module(course_id, module_id, body).await {
        Ok(Some(module)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            module,
            "Course module updated successfully",
        ))),
        Ok(None) => Ok(module_not_found()),
        Err(ParcError::Conflict(_)) => Ok(module_conflict()),
        Err(e) => Ok(internal_error("Course module update failed", e)),
    }
}

pub async fn delete_module(
    service: &CourseService,
    course_id: i64,
    module_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_course_module(course_id, module_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Course module deleted successfully",
        ))),
        Ok(false) => Ok(module_not_found()),
        Err(e) => Ok(internal_error("Course module deletion failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_module;

    #[test]
    fn test_validate_module() {
        assert!(validate_module(Some(1), Some("Intro")).is_ok());
        assert!(validate_module(None, None).is_ok());
        assert!(validate_module(Some(0), None).is_err());
        assert!(validate_module(None, Some("  ")).is_err());
    }
}
