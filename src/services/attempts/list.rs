use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttemptService;
use crate::models::{
    ApiResponse,
    attempts::requests::{AttemptListParams, AttemptListQuery},
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};

pub async fn list_attempts(
    service: &AttemptService,
    query: AttemptListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    let student_id = match user.role {
        UserRole::Student => Some(user.id),
        _ => query.student,
    };

    let list_query = AttemptListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id,
        assessment_id: query.assessment,
    };

    match storage.list_attempts_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Attempt list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve attempt list", e)),
    }
}
