//! 固定窗口速率限制中间件
//!
//! 按客户端 IP（已认证时按用户 ID）计数，窗口内超过上限返回 429。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 键: `前缀:标识`，值: (窗口开始时间, 计数)
static RATE_LIMIT_WINDOWS: Lazy<Cache<String, (Instant, u32)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
            key_prefix,
        }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 刷新令牌：10 次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 公开的讲师申请：3 次/分钟/IP
    pub fn application() -> Self {
        Self::new("application", 3, 60)
    }
}

/// 客户端 IP，优先使用连接信息，其次是代理头
fn client_ip(req: &ServiceRequest) -> String {
    let is_ip = |value: &str| value.trim().parse::<IpAddr>().is_ok();

    if let Some(ip) = req.connection_info().realip_remote_addr()
        && is_ip(ip)
    {
        return ip.to_string();
    }

    ["X-Forwarded-For", "X-Real-IP"]
        .iter()
        .filter_map(|name| req.headers().get(*name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|ip| is_ip(ip))
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limited_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests. Please try again later.",
        ))
}

/// 记录一次请求，超限时返回剩余等待秒数
async fn hit(key: String, max_requests: u32, window: Duration) -> Result<(), u64> {
    let now = Instant::now();
    let (started, count) = match RATE_LIMIT_WINDOWS.get(&key).await {
        Some((started, count)) if now.duration_since(started) < window => (started, count),
        _ => (now, 0),
    };

    if count >= max_requests {
        let remaining = window.saturating_sub(now.duration_since(started));
        return Err(remaining.as_secs().max(1));
    }

    RATE_LIMIT_WINDOWS.insert(key, (started, count + 1)).await;
    Ok(())
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let user_id = req.extensions().get::<User>().map(|user| user.id);
            let identifier = match user_id {
                Some(id) => format!("user:{id}"),
                None => format!("ip:{}", client_ip(&req)),
            };
            let key = format!("{}:{}", limit.key_prefix, identifier);

            if let Err(retry_after) = hit(key.clone(), limit.max_requests, limit.window).await {
                warn!("Rate limit exceeded for {}", key);
                return Ok(
                    req.into_response(rate_limited_response(retry_after).map_into_right_body())
                );
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window, Duration::from_secs(60));
        assert_eq!(RateLimit::application().key_prefix, "application");
    }

    #[tokio::test]
    async fn test_window_blocks_after_limit() {
        let key = format!("test:{}", uuid::Uuid::new_v4());
        for _ in 0..3 {
            assert!(hit(key.clone(), 3, Duration::from_secs(60)).await.is_ok());
        }
        let retry_after = hit(key.clone(), 3, Duration::from_secs(60)).await.unwrap_err();
        assert!(retry_after >= 1 && retry_after <= 60);
    }

    #[tokio::test]
    async fn test_window_resets() {
        let key = format!("test:{}", uuid::Uuid::new_v4());
        assert!(hit(key.clone(), 1, Duration::from_millis(20)).await.is_ok());
        assert!(hit(key.clone(), 1, Duration::from_millis(20)).await.is_err());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(hit(key, 1, Duration::from_millis(20)).await.is_ok());
    }
}
