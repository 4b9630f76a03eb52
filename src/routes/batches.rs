use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::batches::requests::{
    BatchListParams, BatchStudentsRequest, CreateBatchRequest, UpdateBatchRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::BatchService;
use crate::utils::SafeIDI64;

static BATCH_SERVICE: Lazy<BatchService> = Lazy::new(BatchService::new_lazy);

pub async fn list_batches(
    req: HttpRequest,
    query: web::Query<BatchListParams>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.list_batches(query.into_inner(), &req).await
}

pub async fn create_batch(
    req: HttpRequest,
    body: web::Json<CreateBatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.create_batch(body.into_inner(), &req).await
}

pub async fn create_with_students(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.create_with_students(payload, &req).await
}

pub async fn get_batch(req: HttpRequest, batch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.get_batch(batch_id.0, &req).await
}

pub async fn update_batch(
    req: HttpRequest,
    batch_id: SafeIDI64,
    body: web::Json<UpdateBatchRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .update_batch(batch_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_batch(req: HttpRequest, batch_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BATCH_SERVICE.delete_batch(batch_id.0, &req).await
}

pub async fn add_students_from_file(
    req: HttpRequest,
    batch_id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .add_students_from_file(batch_id.0, payload, &req)
        .await
}

pub async fn add_students(
    req: HttpRequest,
    batch_id: SafeIDI64,
    body: web::Json<BatchStudentsRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .add_students(batch_id.0, body.into_inner(), &req)
        .await
}

pub async fn remove_students(
    req: HttpRequest,
    batch_id: SafeIDI64,
    body: web::Json<BatchStudentsRequest>,
) -> ActixResult<HttpResponse> {
    BATCH_SERVICE
        .remove_students(batch_id.0, body.into_inner(), &req)
        .await
}

pub fn configure_batch_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/batches")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_batches))
                    .route("", web::post().to(create_batch))
                    .route(
                        "/create_with_students",
                        web::post().to(create_with_students),
                    )
                    .route("/{id}", web::get().to(get_batch))
                    .route("/{id}", web::patch().to(update_batch))
                    .route("/{id}", web::put().to(update_batch))
                    .route("/{id}", web::delete().to(delete_batch))
                    .route(
                        "/{id}/add_students_from_file",
                        web::post().to(add_students_from_file),
                    )
                    .route("/{id}/add_students", web::post().to(add_students))
                    .route("/{id}/remove_students", web::post().to(remove_students)),
            ),
    );
}
