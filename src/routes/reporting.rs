use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::ReportingService;

static REPORTING_SERVICE: Lazy<ReportingService> = Lazy::new(ReportingService::new_lazy);

pub async fn get_reporting(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORTING_SERVICE.get_reporting(&req).await
}

pub async fn get_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORTING_SERVICE.get_overview(&req).await
}

pub fn configure_reporting_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reporting")
            .wrap(middlewares::RequireJWT)
            // 排行榜对所有登录用户开放
            .route("", web::get().to(get_reporting))
            .service(
                web::resource("/overview")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::get().to(get_overview)),
            ),
    );
}
