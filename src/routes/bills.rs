use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::bills::requests::{BillListParams, CreateBillRequest};
use crate::models::users::entities::UserRole;
use crate::services::BillService;
use crate::utils::SafeIDI64;

static BILL_SERVICE: Lazy<BillService> = Lazy::new(BillService::new_lazy);

pub async fn list_bills(
    req: HttpRequest,
    query: web::Query<BillListParams>,
) -> ActixResult<HttpResponse> {
    BILL_SERVICE.list_bills(query.into_inner(), &req).await
}

pub async fn create_bill(
    req: HttpRequest,
    body: web::Json<CreateBillRequest>,
) -> ActixResult<HttpResponse> {
    BILL_SERVICE.create_bill(body.into_inner(), &req).await
}

pub async fn get_bill(req: HttpRequest, bill_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BILL_SERVICE.get_bill(bill_id.0, &req).await
}

pub async fn delete_bill(req: HttpRequest, bill_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BILL_SERVICE.delete_bill(bill_id.0, &req).await
}

pub async fn mark_as_paid(req: HttpRequest, bill_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BILL_SERVICE.mark_as_paid(bill_id.0, &req).await
}

pub fn configure_bill_routes(cfg: &mut web::ServiceConfig) {
    // 讲师只能访问自己的账单（业务层过滤）
    cfg.service(
        web::scope("/api/v1/bills")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}/mark_as_paid")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::post().to(mark_as_paid)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .route("", web::get().to(list_bills))
                    .route("", web::post().to(create_bill))
                    .route("/{id}", web::get().to(get_bill))
                    .route("/{id}", web::delete().to(delete_bill)),
            ),
    );
}
