use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::{MaterialListParams, UpdateMaterialRequest};
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::SafeIDI64;

static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn list_materials(
    req: HttpRequest,
    query: web::Query<MaterialListParams>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_materials(query.into_inner(), &req).await
}

pub async fn upload_material(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.upload_material(payload, &req).await
}

pub async fn get_material(req: HttpRequest, material_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(material_id.0, &req).await
}

pub async fn material_content(
    req: HttpRequest,
    material_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.material_content(material_id.0, &req).await
}

pub async fn update_material(
    req: HttpRequest,
    material_id: SafeIDI64,
    body: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(material_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(material_id.0, &req).await
}

pub fn configure_material_routes(cfg: &mut web::ServiceConfig) {
    // 管理员与讲师可以维护资料，所有登录用户可以查看
    let staff = || middlewares::RequireRole::new_any(UserRole::staff_roles());

    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_materials))
                    .route(web::post().to(upload_material).wrap(staff())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_material))
                    .route(web::patch().to(update_material).wrap(staff()))
                    .route(web::put().to(update_material).wrap(staff()))
                    .route(web::delete().to(delete_material).wrap(staff())),
            )
            .service(web::resource("/{id}/content").route(web::get().to(material_content))),
    );
}
