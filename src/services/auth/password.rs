use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AuthService;
use crate::models::auth::requests::SetPasswordRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password;

/// 设置新密码并清除“必须修改密码”标记
pub async fn handle_set_password(
    service: &AuthService,
    body: SetPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;

    if let Err(msg) = validate_password(&body.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PasswordPolicyViolation,
            msg,
        )));
    }

    let password_hash = match hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    let storage = service.get_storage(request)?;
    match storage.set_user_password(user.id, &password_hash, false).await {
        Ok(true) => {
            info!("User {} set a new password", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Password updated successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error("Password update failed", e)),
    }
}
