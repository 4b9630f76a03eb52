/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，通过后把当前用户放入请求扩展，
 * 处理程序用 `RequireJWT::extract_user_claims` 等函数读取。
 *
 * 用户对象按 token 缓存，缓存未命中时从存储重新加载并检查账号状态：
 * 停用账号返回 401，访问期已过的讲师返回 403。
 */

use crate::cache::{ObjectCache, traits::get_json, traits::insert_json};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败的原因
enum Rejection {
    Unauthorized(String),
    Forbidden(ErrorCode, &'static str),
    Internal(&'static str),
}

async fn authenticate(req: &ServiceRequest) -> Result<User, Rejection> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            Rejection::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        Rejection::Unauthorized("Invalid or expired token".to_string())
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(Rejection::Internal("Cache not configured"))?;

    let cache_key = format!("user:{token}");
    let user = match get_json::<User>(cache.as_ref(), &cache_key).await {
        Some(user) => user,
        None => {
            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|data| data.get_ref().clone())
                .ok_or(Rejection::Internal("Storage not configured"))?;

            let user_id = claims
                .user_id()
                .ok_or_else(|| Rejection::Unauthorized("Invalid user ID in token".to_string()))?;

            let user = storage
                .get_user_by_id(user_id)
                .await
                .map_err(|e| {
                    error!("Failed to load user {}: {}", user_id, e);
                    Rejection::Internal("Failed to load user")
                })?
                .ok_or_else(|| Rejection::Unauthorized("User not found".to_string()))?;

            insert_json(
                cache.as_ref(),
                cache_key,
                &user,
                AppConfig::get().cache.default_ttl,
            )
            .await;
            user
        }
    };

    if !user.is_active() {
        return Err(Rejection::Unauthorized("User is not active".to_string()));
    }
    if user.access_expired_at(chrono::Utc::now()) {
        return Err(Rejection::Forbidden(
            ErrorCode::AccessExpired,
            "Your access period has expired.",
        ));
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求交给 CORS 处理
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let response = match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Err(Rejection::Unauthorized(reason)) => {
                    info!("JWT authentication failed for {}: {}", req.path(), reason);
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        &format!("Unauthorized: {reason}"),
                    )
                }
                Err(Rejection::Forbidden(code, message)) => {
                    create_error_response(StatusCode::FORBIDDEN, code, message)
                }
                Err(Rejection::Internal(message)) => create_error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    message,
                ),
            };

            Ok(req.into_response(response.map_into_right_body()))
        })
    }
}

// 处理程序读取当前用户
impl RequireJWT {
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role.clone())
    }
}
