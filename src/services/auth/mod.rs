pub mod login;
pub mod password;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::auth::requests::{LoginRequest, RefreshTokenRequest, SetPasswordRequest};
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::TokenSubject;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(
        &self,
        body: RefreshTokenRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, body, request).await
    }

    // 当前用户
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_get_user(self, request).await
    }

    // 首次登录设置密码
    pub async fn set_password(
        &self,
        body: SetPasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_set_password(self, body, request).await
    }
}

/// 组装 access token 的声明，学员附带批次与课程
pub(crate) async fn token_subject(storage: &dyn Storage, user: &User) -> Result<TokenSubject> {
    let (batches, courses) = if user.role == UserRole::Student {
        (
            user.batches.clone(),
            storage.list_student_course_names(user.id).await?,
        )
    } else {
        (Vec::new(), Vec::new())
    };

    Ok(TokenSubject {
        user_id: user.id,
        role: user.role.to_string(),
        username: user.username.clone(),
        name: user.full_name.clone(),
        must_change_password: user.must_change_password,
        batches,
        courses,
    })
}
