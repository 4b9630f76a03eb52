use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseListParams, CreateCourseModuleRequest, CreateCourseRequest, UpdateCourseModuleRequest,
    UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::{SafeIDI64, SafeModuleIdI64};

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.0, &req).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeIDI64,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(course_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(course_id.0, &req).await
}

pub async fn create_module(
    req: HttpRequest,
    course_id: SafeIDI64,
    body: web::Json<CreateCourseModuleRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_module(course_id.0, body.into_inner(), &req)
        .await
}

pub async fn update_module(
    req: HttpRequest,
    course_id: SafeIDI64,
    module_id: SafeModuleIdI64,
    body: web::Json<UpdateCourseModuleRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_module(course_id.0, module_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_module(
    req: HttpRequest,
    course_id: SafeIDI64,
    module_id: SafeModuleIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .delete_module(course_id.0, module_id.0, &req)
        .await
}

pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    let admin = || middlewares::RequireRole::new_any(UserRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course).wrap(admin())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_course))
                    .route(web::patch().to(update_course).wrap(admin()))
                    .route(web::put().to(update_course).wrap(admin()))
                    .route(web::delete().to(delete_course).wrap(admin())),
            )
            .service(
                web::resource("/{id}/modules")
                    .wrap(admin())
                    .route(web::post().to(create_module)),
            )
            .service(
                web::resource("/{id}/modules/{module_id}")
                    .wrap(admin())
                    .route(web::patch().to(update_module))
                    .route(web::put().to(update_module))
                    .route(web::delete().to(delete_module)),
            ),
    );
}
