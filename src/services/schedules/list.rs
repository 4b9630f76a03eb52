use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{
    ApiResponse, schedules::requests::ScheduleListParams, users::entities::UserRole,
};
use crate::services::{current_user, internal_error};
use crate::storage::ListFilter;

pub async fn list_schedules(
    service: &ScheduleService,
    query: ScheduleListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    // 讲师只能看到自己的排课
    let trainer_id = match user.role {
        UserRole::Trainer => Some(user.id),
        _ => query.trainer,
    };

    let filter = ListFilter {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: query.course,
        college_id: query.college,
        trainer_id,
        ..Default::default()
    };

    match storage.list_schedules_with_pagination(filter).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Schedule list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve schedule list", e)),
    }
}
