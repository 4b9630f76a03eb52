use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, refresh_access_logged, validate_record};
use crate::models::{
    ApiResponse,
    schedules::requests::{CreateScheduleRequest, ScheduleRecord},
};
use crate::services::{internal_error, mailer_from_request};

pub async fn create_schedule(
    service: &ScheduleService,
    body: CreateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);

    let record = ScheduleRecord {
        trainer_id: body.trainer,
        college_id: body.college,
        course_id: body.course,
        batch_id: body.batch,
        start_date: body.start_date,
        end_date: body.end_date,
        material_ids: body.materials,
    };
    if let Err(response) = validate_record(storage.as_ref(), &record).await {
        return Ok(response);
    }

    let schedule = match storage.create_schedule(record).await {
        Ok(schedule) => schedule,
        Err(e) => return Ok(internal_error("Schedule creation failed", e)),
    };

    refresh_access_logged(storage.as_ref(), mailer.as_ref(), schedule.trainer).await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        schedule,
        "Schedule created successfully",
    )))
}
