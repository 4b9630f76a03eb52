use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::colleges::requests::{
    CollegeListParams, CreateCollegeRequest, UpdateCollegeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CollegeService;
use crate::utils::SafeIDI64;

static COLLEGE_SERVICE: Lazy<CollegeService> = Lazy::new(CollegeService::new_lazy);

pub async fn list_colleges(
    req: HttpRequest,
    query: web::Query<CollegeListParams>,
) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE.list_colleges(query.into_inner(), &req).await
}

pub async fn create_college(
    req: HttpRequest,
    body: web::Json<CreateCollegeRequest>,
) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE.create_college(body.into_inner(), &req).await
}

pub async fn get_college(req: HttpRequest, college_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE.get_college(college_id.0, &req).await
}

pub async fn update_college(
    req: HttpRequest,
    college_id: SafeIDI64,
    body: web::Json<UpdateCollegeRequest>,
) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE
        .update_college(college_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_college(req: HttpRequest, college_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COLLEGE_SERVICE.delete_college(college_id.0, &req).await
}

pub fn configure_college_routes(cfg: &mut web::ServiceConfig) {
    let admin = || middlewares::RequireRole::new_any(UserRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/colleges")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 所有登录用户可查看
                    .route(web::get().to(list_colleges))
                    .route(web::post().to(create_college).wrap(admin())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_college))
                    .route(web::patch().to(update_college).wrap(admin()))
                    .route(web::put().to(update_college).wrap(admin()))
                    .route(web::delete().to(delete_college).wrap(admin())),
            ),
    );
}
