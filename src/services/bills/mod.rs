pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod pay;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    bills::{
        entities::Bill,
        requests::{BillListParams, CreateBillRequest},
    },
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

pub struct BillService {
    storage: Option<Arc<dyn Storage>>,
}

impl BillService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取账单列表，讲师只能看到自己的账单
    pub async fn list_bills(
        &self,
        query: BillListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_bills(self, query, request).await
    }

    pub async fn create_bill(
        &self,
        body: CreateBillRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_bill(self, body, request).await
    }

    pub async fn get_bill(&self, bill_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_bill(self, bill_id, request).await
    }

    pub async fn delete_bill(
        &self,
        bill_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_bill(self, bill_id, request).await
    }

    // 标记为已付款
    pub async fn mark_as_paid(
        &self,
        bill_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        pay::mark_as_paid(self, bill_id, request).await
    }
}

pub(crate) fn bill_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::BillNotFound,
        "Bill not found",
    ))
}

/// 讲师只能访问自己的账单
pub(crate) fn can_access(user: &User, bill: &Bill) -> bool {
    user.role == UserRole::Admin || bill.trainer == user.id
}
