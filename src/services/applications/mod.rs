//! 讲师入驻申请
//!
//! 申请公开提交（附 PDF 简历），管理员审批后创建停用状态的讲师账号，
//! 讲师在首次被排课时才会收到登录凭据。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod review;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode, applications::requests::ApplicationListParams};
use crate::storage::Storage;

pub struct ApplicationService {
    storage: Option<Arc<dyn Storage>>,
}

impl ApplicationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 提交申请（公开）
    pub async fn submit_application(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::submit_application(self, payload, request).await
    }

    // 待审批的申请列表
    pub async fn list_applications(
        &self,
        query: ApplicationListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_applications(self, query, request).await
    }

    pub async fn get_application(
        &self,
        application_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_application(self, application_id, request).await
    }

    pub async fn view_resume(
        &self,
        application_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::view_resume(self, application_id, request).await
    }

    pub async fn delete_application(
        &self,
        application_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_application(self, application_id, request).await
    }

    pub async fn approve_application(
        &self,
        application_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        review::approve_application(self, application_id, request).await
    }

    pub async fn decline_application(
        &self,
        application_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        review::decline_application(self, application_id, request).await
    }
}

pub(crate) fn application_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ApplicationNotFound,
        "Application not found",
    ))
}
