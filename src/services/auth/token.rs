use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AuthService, token_subject};
use crate::models::auth::requests::RefreshTokenRequest;
use crate::models::auth::responses::RefreshTokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::jwt::JwtUtils;

fn refresh_rejected(message: &'static str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::RefreshTokenInvalid,
        message,
    ))
}

/// 刷新 access token
///
/// refresh token 优先取请求体，其次取 cookie。新 token 的声明按当前用户数据重新生成，
/// 停用或访问期已过的账号不能刷新。
pub async fn handle_refresh_token(
    service: &AuthService,
    body: RefreshTokenRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = body
        .refresh
        .filter(|token| !token.is_empty())
        .or_else(|| JwtUtils::extract_refresh_token_from_cookie(request))
    else {
        return Ok(refresh_rejected("Refresh token is required"));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(refresh_rejected("Token is invalid or expired"));
        }
    };

    let Some(user_id) = claims.user_id() else {
        return Ok(refresh_rejected("Token is invalid or expired"));
    };

    let storage = service.get_storage(request)?;
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(refresh_rejected("User no longer exists")),
        Err(e) => return Ok(internal_error("Token refresh failed", e)),
    };

    if !user.is_active() || user.access_expired_at(chrono::Utc::now()) {
        return Ok(refresh_rejected("User is not active"));
    }

    let subject = match token_subject(storage.as_ref(), &user).await {
        Ok(subject) => subject,
        Err(e) => return Ok(internal_error("Token refresh failed", e)),
    };

    match JwtUtils::generate_access_token(&subject) {
        Ok(access) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access,
                expires_in: JwtUtils::access_token_ttl(),
            },
            "Token refreshed successfully",
        ))),
        Err(e) => Ok(internal_error("Token refresh failed", e)),
    }
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        user,
        "User information retrieved successfully",
    )))
}
