use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, refresh_access_logged, validate_record};
use crate::models::{
    ApiResponse, ErrorCode,
    schedules::{
        entities::Schedule,
        requests::{ScheduleRecord, UpdateScheduleRequest},
    },
};
use crate::services::{internal_error, mailer_from_request};

/// 未提供的字段沿用原排课的值
fn merge(existing: &Schedule, body: UpdateScheduleRequest) -> ScheduleRecord {
    ScheduleRecord {
        trainer_id: body.trainer.unwrap_or(existing.trainer),
        college_id: body.college.unwrap_or(existing.college),
        course_id: body.course.unwrap_or(existing.course),
        batch_id: body.batch.unwrap_or(existing.batch),
        start_date: body.start_date.unwrap_or(existing.start_date),
        end_date: body.end_date.unwrap_or(existing.end_date),
        material_ids: body
            .materials
            .unwrap_or_else(|| existing.materials.clone()),
    }
}

pub async fn update_schedule(
    service: &ScheduleService,
    schedule_id: i64,
    body: UpdateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);

    let existing = match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "Schedule not found",
            )));
        }
        Err(e) => return Ok(internal_error("Schedule update failed", e)),
    };

    let record = merge(&existing, body);
    if let Err(response) = validate_record(storage.as_ref(), &record).await {
        return Ok(response);
    }

    let schedule = match storage.update_schedule(schedule_id, record).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "Schedule not found",
            )));
        }
        Err(e) => return Ok(internal_error("Schedule update failed", e)),
    };

    refresh_access_logged(storage.as_ref(), mailer.as_ref(), schedule.trainer).await;
    if existing.trainer != schedule.trainer {
        refresh_access_logged(storage.as_ref(), mailer.as_ref(), existing.trainer).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        schedule,
        "Schedule updated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let now = Utc::now();
        let existing = Schedule {
            id: 1,
            trainer: 2,
            trainer_name: "Grace Hopper".to_string(),
            college: 3,
            college_name: "North".to_string(),
            course: 4,
            course_name: "Rust".to_string(),
            batch: Some(5),
            batch_name: Some("Spring".to_string()),
            start_date: now,
            end_date: now + Duration::hours(2),
            materials: vec![7, 8],
            material_details: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let record = merge(
            &existing,
            UpdateScheduleRequest {
                trainer: Some(9),
                end_date: Some(now + Duration::hours(4)),
                ..Default::default()
            },
        );
        assert_eq!(record.trainer_id, 9);
        assert_eq!(record.college_id, 3);
        assert_eq!(record.batch_id, Some(5));
        assert_eq!(record.end_date, now + Duration::hours(4));
        assert_eq!(record.material_ids, vec![7, 8]);

        let record = merge(
            &existing,
            UpdateScheduleRequest {
                course: Some(6),
                batch: Some(None),
                ..Default::default()
            },
        );
        assert_eq!(record.course_id, 6);
        assert_eq!(record.batch_id, None);
    }
}
