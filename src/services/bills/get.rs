use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BillService, bill_not_found, can_access};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

pub async fn get_bill(
    service: &BillService,
    bill_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    match storage.get_bill_by_id(bill_id).await {
        Ok(Some(bill)) if !can_access(&user, &bill) => Ok(HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::Forbidden, "You can only view your own bills."),
        )),
        Ok(Some(bill)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            bill,
            "Bill retrieved successfully",
        ))),
        Ok(None) => Ok(bill_not_found()),
        Err(e) => Ok(internal_error("Failed to retrieve bill", e)),
    }
}
