use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssessmentService;
use crate::models::{
    ApiResponse,
    assessments::requests::{AssessmentListParams, AssessmentListQuery},
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};

pub async fn list_assessments(
    service: &AssessmentService,
    query: AssessmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    let only_ids = match user.role {
        UserRole::Student => Some(user.assigned_assessments.clone()),
        _ => None,
    };

    let list_query = AssessmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course,
        only_ids,
    };

    match storage.list_assessments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assessment list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve assessment list", e)),
    }
}
