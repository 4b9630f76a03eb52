use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, refresh_access_logged};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, mailer_from_request};

pub async fn delete_schedule(
    service: &ScheduleService,
    schedule_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);

    let trainer_id = match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(schedule)) => schedule.trainer,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "Schedule not found",
            )));
        }
        Err(e) => return Ok(internal_error("Schedule deletion failed", e)),
    };

    match storage.delete_schedule(schedule_id).await {
        Ok(true) => {
            refresh_access_logged(storage.as_ref(), mailer.as_ref(), trainer_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Schedule deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule not found",
        ))),
        Err(e) => Ok(internal_error("Schedule deletion failed", e)),
    }
}
