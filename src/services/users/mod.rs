pub mod assign;
pub mod create;
pub mod delete;
pub mod get;
pub mod import;
pub mod list;
pub mod resume;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{
    AssignAssessmentsRequest, AssignMaterialsRequest, CreateUserRequest, UpdateUserRequest,
    UserListParams,
};
use crate::storage::Storage;

pub use create::{NewAccount, provision_account};

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建用户
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }

    // 为学员分配资料
    pub async fn assign_materials(
        &self,
        user_id: i64,
        body: AssignMaterialsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_materials(self, user_id, body, request).await
    }

    // 为学员分配测评
    pub async fn assign_assessments(
        &self,
        user_id: i64,
        body: AssignAssessmentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_assessments(self, user_id, body, request).await
    }

    // 查看简历
    pub async fn view_resume(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        resume::view_resume(self, user_id, request).await
    }

    // 从名单批量创建学员
    pub async fn bulk_create_students(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::bulk_create_students(self, payload, request).await
    }
}
