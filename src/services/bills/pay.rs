use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{BillService, bill_not_found};
use crate::models::{ApiResponse, bills::entities::BillStatus};
use crate::services::internal_error;

pub async fn mark_as_paid(
    service: &BillService,
    bill_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_bill_status(bill_id, BillStatus::Paid).await {
        Ok(Some(bill)) => {
            info!("Bill {} marked as paid", bill.invoice_number);
            Ok(HttpResponse::Ok().json(ApiResponse::success(bill, "Bill marked as paid")))
        }
        Ok(None) => Ok(bill_not_found()),
        Err(e) => Ok(internal_error("Failed to update bill", e)),
    }
}
