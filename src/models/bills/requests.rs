use super::entities::{BillStatus, ExpenseType};
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "bill.ts")]
pub struct BillListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub trainer: Option<i64>,
    pub status: Option<BillStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bill.ts")]
pub struct ExpenseInput {
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

// 讲师提交时 `trainer` 会被忽略并替换为当前用户
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bill.ts")]
pub struct CreateBillRequest {
    pub trainer: Option<i64>,
    pub date: chrono::NaiveDate,
    pub expenses: Vec<ExpenseInput>,
}

/// 存储层账单记录
#[derive(Debug, Clone)]
pub struct NewBill {
    pub trainer_id: i64,
    pub invoice_number: String,
    pub date: chrono::NaiveDate,
    pub expenses: Vec<ExpenseInput>,
}

/// 存储层账单查询
#[derive(Debug, Clone, Default)]
pub struct BillListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub trainer_id: Option<i64>,
    pub status: Option<BillStatus>,
}
