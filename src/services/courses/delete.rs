use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{files::remove_upload, internal_error};

pub async fn delete_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    // 资料记录会随课程级联删除，先取出文件路径
    let files = match storage.list_course_material_paths(course_id).await {
        Ok(files) => files,
        Err(e) => {
            warn!("Failed to collect materials of course {}: {}", course_id, e);
            Vec::new()
        }
    };

    match storage.delete_course(course_id).await {
        Ok(true) => {
            for file in files {
                remove_upload(&file).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Course deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error("Course deletion failed", e)),
    }
}
