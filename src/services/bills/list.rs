use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BillService;
use crate::models::{
    ApiResponse,
    bills::requests::{BillListParams, BillListQuery},
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};

pub async fn list_bills(
    service: &BillService,
    query: BillListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    let trainer_id = match user.role {
        UserRole::Admin => query.trainer,
        _ => Some(user.id),
    };

    let list_query = BillListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        trainer_id,
        status: query.status,
    };

    match storage.list_bills_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Bill list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve bill list", e)),
    }
}
