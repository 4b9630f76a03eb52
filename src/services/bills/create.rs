use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::BillService;
use crate::errors::ParcError;
use crate::models::{
    ApiResponse, ErrorCode,
    bills::requests::{CreateBillRequest, ExpenseInput, NewBill},
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};
use crate::utils::random_code::generate_invoice_number;

/// 发票号冲突时的重试次数
const INVOICE_ATTEMPTS: usize = 3;

fn invalid_bill(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BillInvalid, message))
}

/// 至少一项费用，金额必须为正数
fn validate_expenses(expenses: &[ExpenseInput]) -> Result<(), String> {
    if expenses.is_empty() {
        return Err("A bill must contain at least one expense.".to_string());
    }
    for (index, expense) in expenses.iter().enumerate() {
        if !expense.amount.is_finite() || expense.amount <= 0.0 {
            return Err(format!(
                "Expense {} must have an amount greater than zero.",
                index + 1
            ));
        }
    }
    Ok(())
}

pub async fn create_bill(
    service: &BillService,
    body: CreateBillRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_expenses(&body.expenses) {
        return Ok(invalid_bill(msg));
    }

    // 讲师提交的账单总是属于自己
    let trainer_id = match user.role {
        UserRole::Trainer => user.id,
        _ => match body.trainer {
            Some(trainer_id) => trainer_id,
            None => return Ok(invalid_bill("A trainer is required.")),
        },
    };
    if trainer_id != user.id {
        match storage.get_user_by_id(trainer_id).await {
            Ok(Some(trainer)) if trainer.role == UserRole::Trainer => {}
            Ok(_) => return Ok(invalid_bill("The selected user is not a trainer.")),
            Err(e) => return Ok(internal_error("Bill creation failed", e)),
        }
    }

    let mut last_error = None;
    for _ in 0..INVOICE_ATTEMPTS {
        let bill = NewBill {
            trainer_id,
            invoice_number: generate_invoice_number(body.date),
            date: body.date,
            expenses: body.expenses.clone(),
        };
        match storage.create_bill(bill).await {
            Ok(bill) => {
                info!("Bill {} ({}) created", bill.id, bill.invoice_number);
                return Ok(HttpResponse::Created().json(ApiResponse::success(
                    bill,
                    "Bill created successfully",
                )));
            }
            Err(ParcError::Conflict(msg)) => {
                warn!("Invoice number collision, retrying: {}", msg);
                last_error = Some(ParcError::Conflict(msg));
            }
            Err(e) => return Ok(internal_error("Bill creation failed", e)),
        }
    }

    Ok(internal_error(
        "Bill creation failed",
        last_error.unwrap_or_else(|| ParcError::conflict("invoice number collision")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bills::entities::ExpenseType;

    fn expense(amount: f64) -> ExpenseInput {
        ExpenseInput {
            expense_type: ExpenseType::Travel,
            description: "Train".to_string(),
            amount,
        }
    }

    #[test]
    fn test_validate_expenses() {
        assert!(validate_expenses(&[expense(12.5)]).is_ok());
        assert!(validate_expenses(&[]).is_err());
        assert_eq!(
            validate_expenses(&[expense(10.0), expense(0.0)]).unwrap_err(),
            "Expense 2 must have an amount greater than zero."
        );
        assert!(validate_expenses(&[expense(f64::NAN)]).is_err());
    }
}
