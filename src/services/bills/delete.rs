use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BillService, bill_not_found, can_access};
use crate::models::{ApiResponse, ErrorCode, bills::entities::BillStatus, users::entities::UserRole};
use crate::services::{current_user, internal_error};

/// 管理员可删除任意账单，讲师只能删除自己未付款的账单
pub async fn delete_bill(
    service: &BillService,
    bill_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    let bill = match storage.get_bill_by_id(bill_id).await {
        Ok(Some(bill)) => bill,
        Ok(None) => return Ok(bill_not_found()),
        Err(e) => return Ok(internal_error("Bill deletion failed", e)),
    };
    if !can_access(&user, &bill) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only delete your own bills.",
        )));
    }
    if user.role != UserRole::Admin && bill.status == BillStatus::Paid {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BillInvalid,
            "Paid bills cannot be deleted.",
        )));
    }

    match storage.delete_bill(bill_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Bill deleted successfully",
        ))),
        Ok(false) => Ok(bill_not_found()),
        Err(e) => Ok(internal_error("Bill deletion failed", e)),
    }
}
