use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{AuthService, token_subject};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    users::{entities::UserStatus, requests::AccessUpdate},
};
use crate::services::internal_error;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "No active account found with the given credentials",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 用户名即邮箱，两者都可以登录
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(auth_failed()),
        Err(e) => return Ok(internal_error("Login failed", e)),
    };

    // 2. 校验密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(auth_failed());
    }

    // 3. 账号状态
    if !user.is_active() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountInactive,
            "Your account is inactive. Please contact an administrator.",
        )));
    }

    // 4. 讲师访问期已过：停用账号
    let now = chrono::Utc::now();
    if user.access_expired_at(now) {
        let update = AccessUpdate {
            status: UserStatus::Inactive,
            access_expiry_date: user.access_expiry_date,
            password_hash: None,
        };
        if let Err(e) = storage.update_user_access(user.id, update).await {
            warn!("Failed to deactivate expired trainer {}: {}", user.id, e);
        }
        info!("Trainer {} tried to log in after access expiry", user.id);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccessExpired,
            "Your access period has expired. Please contact an administrator to be assigned to a new schedule.",
        )));
    }

    // 5. 签发令牌
    let subject = match token_subject(storage.as_ref(), &user).await {
        Ok(subject) => subject,
        Err(e) => return Ok(internal_error("Login failed", e)),
    };
    let tokens = JwtUtils::generate_access_token(&subject).and_then(|access| {
        JwtUtils::generate_refresh_token(user.id, user.role.as_str())
            .map(|refresh| (access, refresh))
    });
    let (access, refresh) = match tokens {
        Ok(pair) => pair,
        Err(e) => return Ok(internal_error("Login failed, unable to generate token", e)),
    };

    // 6. 记录最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for {}: {}", user.id, e);
    }

    info!("User {} logged in successfully", user.username);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&refresh);
    let response = LoginResponse {
        access,
        refresh,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
