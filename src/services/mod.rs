pub mod applications;
pub mod assessments;
pub mod attempts;
pub mod auth;
pub mod batches;
pub mod bills;
pub mod colleges;
pub mod courses;
pub mod files;
pub mod mail;
pub mod materials;
pub mod reporting;
pub mod schedules;
pub mod users;

pub use applications::ApplicationService;
pub use assessments::AssessmentService;
pub use attempts::AttemptService;
pub use auth::AuthService;
pub use batches::BatchService;
pub use bills::BillService;
pub use colleges::CollegeService;
pub use courses::CourseService;
pub use materials::MaterialService;
pub use reporting::ReportingService;
pub use schedules::ScheduleService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error::InternalError, web};
use std::fmt::Display;
use std::sync::Arc;
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};
use crate::storage::Storage;
use mail::{LogMailer, Mailer};

/// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            rejection(
                HttpResponse::InternalServerError(),
                ErrorCode::InternalServerError,
                "Storage not configured",
            )
        })
}

/// 未注册邮件发送器时只写日志
pub(crate) fn mailer_from_request(request: &HttpRequest) -> Arc<dyn Mailer> {
    request
        .app_data::<web::Data<Arc<dyn Mailer>>>()
        .map(|data| data.get_ref().clone())
        .unwrap_or_else(|| Arc::new(LogMailer))
}

/// 当前登录用户，由 `RequireJWT` 放入请求扩展
pub(crate) fn current_user(request: &HttpRequest) -> ActixResult<User> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        rejection(
            HttpResponse::Unauthorized(),
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )
    })
}

/// 把 `ApiResponse` 包装成 actix 错误，便于在处理函数中用 `?` 提前返回
pub(crate) fn rejection(
    mut builder: actix_web::HttpResponseBuilder,
    code: ErrorCode,
    message: &'static str,
) -> actix_web::Error {
    let response = builder.json(ApiResponse::error_empty(code, message));
    InternalError::from_response(message, response).into()
}

/// 记录错误并返回 500
pub(crate) fn internal_error(context: &str, err: impl Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}
