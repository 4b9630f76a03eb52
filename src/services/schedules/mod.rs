//! 排课服务
//!
//! 管理员维护排课，讲师只能查看自己的排课。每次写操作后重新计算相关讲师的访问窗口。

pub mod access;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use access::{AccessPlan, plan_access_window, refresh_trainer_access};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::error;

use crate::models::{
    ApiResponse, ErrorCode,
    schedules::requests::{
        CreateScheduleRequest, ScheduleListParams, ScheduleRecord, UpdateScheduleRequest,
    },
    users::entities::UserRole,
};
use crate::services::internal_error;
use crate::services::mail::Mailer;
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取排课列表
    pub async fn list_schedules(
        &self,
        query: ScheduleListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, query, request).await
    }

    pub async fn create_schedule(
        &self,
        body: CreateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, body, request).await
    }

    pub async fn get_schedule(
        &self,
        schedule_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_schedule(self, schedule_id, request).await
    }

    pub async fn update_schedule(
        &self,
        schedule_id: i64,
        body: UpdateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, schedule_id, body, request).await
    }

    pub async fn delete_schedule(
        &self,
        schedule_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, schedule_id, request).await
    }
}

fn invalid_reference(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ScheduleReferenceInvalid,
        message,
    ))
}

/// 校验排课记录的时间与引用关系
pub(crate) async fn validate_record(
    storage: &dyn Storage,
    record: &ScheduleRecord,
) -> Result<(), HttpResponse> {
    if record.end_date < record.start_date {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ScheduleDateRangeInvalid,
            "End date cannot be before start date.",
        )));
    }

    let failed = |e| internal_error("Failed to verify schedule", e);

    match storage.get_user_by_id(record.trainer_id).await.map_err(failed)? {
        Some(user) if user.role == UserRole::Trainer => {}
        Some(_) => return Err(invalid_reference("The selected user is not a trainer.")),
        None => return Err(invalid_reference("Trainer does not exist.")),
    }
    if storage
        .get_college_by_id(record.college_id)
        .await
        .map_err(failed)?
        .is_none()
    {
        return Err(invalid_reference("College does not exist."));
    }
    if storage
        .get_course_by_id(record.course_id)
        .await
        .map_err(failed)?
        .is_none()
    {
        return Err(invalid_reference("Course does not exist."));
    }

    if let Some(batch_id) = record.batch_id {
        match storage.get_batch_by_id(batch_id).await.map_err(failed)? {
            Some(batch)
                if batch.college_id == record.college_id && batch.course_id == record.course_id => {}
            Some(_) => {
                return Err(invalid_reference(
                    "The batch does not belong to the selected college and course.",
                ));
            }
            None => return Err(invalid_reference("Batch does not exist.")),
        }
    }

    let material_ids: BTreeSet<i64> = record.material_ids.iter().copied().collect();
    let ids: Vec<i64> = material_ids.into_iter().collect();
    let found = storage.list_materials_by_ids(&ids).await.map_err(failed)?;
    if found.len() != ids.len() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidMaterialIds,
            "One or more material IDs are invalid.",
        )));
    }

    Ok(())
}

/// 重新计算讲师访问窗口，失败只记录日志
pub(crate) async fn refresh_access_logged(
    storage: &dyn Storage,
    mailer: &dyn Mailer,
    trainer_id: i64,
) {
    if let Err(e) = refresh_trainer_access(storage, mailer, trainer_id).await {
        error!("Failed to refresh access for trainer {}: {}", trainer_id, e);
    }
}
