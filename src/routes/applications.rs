use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::applications::requests::ApplicationListParams;
use crate::models::users::entities::UserRole;
use crate::services::ApplicationService;
use crate::utils::SafeIDI64;

static APPLICATION_SERVICE: Lazy<ApplicationService> = Lazy::new(ApplicationService::new_lazy);

pub async fn submit_application(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE.submit_application(payload, &req).await
}

pub async fn list_applications(
    req: HttpRequest,
    query: web::Query<ApplicationListParams>,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .list_applications(query.into_inner(), &req)
        .await
}

pub async fn get_application(
    req: HttpRequest,
    application_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE.get_application(application_id.0, &req).await
}

pub async fn delete_application(
    req: HttpRequest,
    application_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .delete_application(application_id.0, &req)
        .await
}

pub async fn view_resume(req: HttpRequest, application_id: SafeIDI64) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE.view_resume(application_id.0, &req).await
}

pub async fn approve_application(
    req: HttpRequest,
    application_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .approve_application(application_id.0, &req)
        .await
}

pub async fn decline_application(
    req: HttpRequest,
    application_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    APPLICATION_SERVICE
        .decline_application(application_id.0, &req)
        .await
}

pub fn configure_application_routes(cfg: &mut web::ServiceConfig) {
    let admin = || middlewares::RequireRole::new_any(UserRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/applications")
            // 公开提交，按 IP 限流
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(submit_application)
                            .wrap(middlewares::RateLimit::application()),
                    )
                    .route(
                        web::get()
                            .to(list_applications)
                            .wrap(admin())
                            .wrap(middlewares::RequireJWT),
                    ),
            )
            .service(
                web::scope("")
                    .wrap(admin())
                    .wrap(middlewares::RequireJWT)
                    .route("/{id}", web::get().to(get_application))
                    .route("/{id}", web::delete().to(delete_application))
                    .route("/{id}/resume", web::get().to(view_resume))
                    .route("/{id}/approve", web::post().to(approve_application))
                    .route("/{id}/decline", web::post().to(decline_application)),
            ),
    );
}
