//! 批次服务
//!
//! 批次属于唯一的课程与学院，名单可从 CSV/XLSX 导入，缺失的学员会自动开户。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod roster;
pub mod students;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    batches::requests::{
        BatchListParams, BatchStudentsRequest, CreateBatchRequest, UpdateBatchRequest,
    },
    colleges::entities::College,
    users::entities::UserRole,
};
use crate::services::internal_error;
use crate::storage::Storage;

pub struct BatchService {
    storage: Option<Arc<dyn Storage>>,
}

impl BatchService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取批次列表
    pub async fn list_batches(
        &self,
        query: BatchListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_batches(self, query, request).await
    }

    pub async fn create_batch(
        &self,
        body: CreateBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_batch(self, body, request).await
    }

    // 创建批次并导入名单
    pub async fn create_with_students(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::create_with_students(self, payload, request).await
    }

    pub async fn get_batch(&self, batch_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_batch(self, batch_id, request).await
    }

    pub async fn update_batch(
        &self,
        batch_id: i64,
        body: UpdateBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_batch(self, batch_id, body, request).await
    }

    pub async fn delete_batch(
        &self,
        batch_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_batch(self, batch_id, request).await
    }

    // 从名单文件加入学员
    pub async fn add_students_from_file(
        &self,
        batch_id: i64,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        roster::add_students_from_file(self, batch_id, payload, request).await
    }

    pub async fn add_students(
        &self,
        batch_id: i64,
        body: BatchStudentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::add_students(self, batch_id, body, request).await
    }

    pub async fn remove_students(
        &self,
        batch_id: i64,
        body: BatchStudentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        students::remove_students(self, batch_id, body, request).await
    }
}

/// 结束日期不能早于开始日期
pub(crate) fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), HttpResponse> {
    if end < start {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BatchDateRangeInvalid,
            "End date cannot be before start date.",
        )));
    }
    Ok(())
}

/// 确认课程与学院存在，返回学院
pub(crate) async fn check_references(
    storage: &dyn Storage,
    course_id: Option<i64>,
    college_id: Option<i64>,
) -> Result<Option<College>, HttpResponse> {
    if let Some(course_id) = course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course does not exist.",
                )));
            }
            Err(e) => return Err(internal_error("Failed to verify course", e)),
        }
    }

    match college_id {
        Some(college_id) => match storage.get_college_by_id(college_id).await {
            Ok(Some(college)) => Ok(Some(college)),
            Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CollegeNotFound,
                "College does not exist.",
            ))),
            Err(e) => Err(internal_error("Failed to verify college", e)),
        },
        None => Ok(None),
    }
}

/// 所有 id 必须是已存在的学员
pub(crate) async fn check_students(
    storage: &dyn Storage,
    student_ids: &[i64],
) -> Result<(), HttpResponse> {
    let users = storage
        .list_users_by_ids(student_ids)
        .await
        .map_err(|e| internal_error("Failed to verify students", e))?;

    let mut unique = student_ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    if users.len() != unique.len() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "One or more student IDs are invalid.",
        )));
    }
    if users.iter().any(|user| user.role != UserRole::Student) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserRoleMismatch,
            "Only students can be enrolled in a batch.",
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(start, start.succ_opt().unwrap()).is_ok());
        assert!(validate_date_range(start, start.pred_opt().unwrap()).is_err());
    }
}
