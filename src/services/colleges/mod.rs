pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::colleges::requests::{
    CollegeListParams, CreateCollegeRequest, UpdateCollegeRequest,
};
use crate::storage::Storage;

pub struct CollegeService {
    storage: Option<Arc<dyn Storage>>,
}

impl CollegeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取学院列表
    pub async fn list_colleges(
        &self,
        query: CollegeListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_colleges(self, query, request).await
    }

    pub async fn create_college(
        &self,
        body: CreateCollegeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_college(self, body, request).await
    }

    pub async fn get_college(
        &self,
        college_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_college(self, college_id, request).await
    }

    pub async fn update_college(
        &self,
        college_id: i64,
        body: UpdateCollegeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_college(self, college_id, body, request).await
    }

    // 删除学院，关联的批次与排课一并删除
    pub async fn delete_college(
        &self,
        college_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_college(self, college_id, request).await
    }
}

/// 联系邮箱与电话为空时不校验
pub(crate) fn validate_contact(
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), &'static str> {
    if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
        crate::utils::validate::validate_email(email)?;
    }
    if let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) {
        crate::utils::validate::validate_phone(phone)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_contact;

    #[test]
    fn test_validate_contact_allows_blank_fields() {
        assert!(validate_contact(None, None).is_ok());
        assert!(validate_contact(Some("  "), Some("")).is_ok());
        assert!(validate_contact(Some("office@college.edu"), None).is_ok());
        assert!(validate_contact(Some("not-an-email"), None).is_err());
    }
}
