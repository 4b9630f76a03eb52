use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    AssignAssessmentsRequest, AssignMaterialsRequest, CreateUserRequest, UpdateUserRequest,
    UserListParams,
};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn bulk_create_students(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    USER_SERVICE.bulk_create_students(payload, &req).await
}

pub async fn get_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(user_id.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: SafeIDI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(user_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(user_id.0, &req).await
}

pub async fn assign_materials(
    req: HttpRequest,
    user_id: SafeIDI64,
    body: web::Json<AssignMaterialsRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .assign_materials(user_id.0, body.into_inner(), &req)
        .await
}

pub async fn assign_assessments(
    req: HttpRequest,
    user_id: SafeIDI64,
    body: web::Json<AssignAssessmentsRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .assign_assessments(user_id.0, body.into_inner(), &req)
        .await
}

pub async fn view_resume(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.view_resume(user_id.0, &req).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    let admin = || middlewares::RequireRole::new_any(UserRole::admin_roles());

    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .wrap(admin())
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/bulk_create_students")
                    .wrap(admin())
                    .route(web::post().to(bulk_create_students)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(admin())
                    .route(web::get().to(get_user))
                    .route(web::patch().to(update_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            )
            .service(
                web::resource("/{id}/assign_materials")
                    .wrap(admin())
                    .route(web::post().to(assign_materials)),
            )
            // 讲师也可以为学员分配测评
            .service(
                web::resource("/{id}/assign_assessments")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::post().to(assign_assessments)),
            )
            .service(
                web::resource("/{id}/resume")
                    .wrap(admin())
                    .route(web::get().to(view_resume)),
            ),
    );
}
