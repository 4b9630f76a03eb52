pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attempts::requests::{AttemptListParams, CreateAttemptRequest};
use crate::storage::Storage;

pub struct AttemptService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttemptService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 学员提交作答
    pub async fn submit_attempt(
        &self,
        body: CreateAttemptRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::submit_attempt(self, body, request).await
    }

    // 作答列表，学员只能看到自己的
    pub async fn list_attempts(
        &self,
        query: AttemptListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_attempts(self, query, request).await
    }
}
