use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 账单状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "bill.ts")]
pub enum BillStatus {
    Pending,
    Paid,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "PENDING",
            BillStatus::Paid => "PAID",
        }
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BillStatus::Pending),
            "PAID" => Ok(BillStatus::Paid),
            _ => Err(format!("Invalid bill status: {s}")),
        }
    }
}

// 费用类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "bill.ts")]
pub enum ExpenseType {
    Travel,
    Accommodation,
    Food,
    Materials,
    Other,
}

impl ExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Travel => "Travel",
            ExpenseType::Accommodation => "Accommodation",
            ExpenseType::Food => "Food",
            ExpenseType::Materials => "Materials",
            ExpenseType::Other => "Other",
        }
    }
}

impl std::str::FromStr for ExpenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Travel" => Ok(ExpenseType::Travel),
            "Accommodation" => Ok(ExpenseType::Accommodation),
            "Food" => Ok(ExpenseType::Food),
            "Materials" => Ok(ExpenseType::Materials),
            "Other" => Ok(ExpenseType::Other),
            _ => Err(format!("Invalid expense type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "bill.ts")]
pub struct Expense {
    pub id: i64,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bill.ts")]
pub struct Bill {
    pub id: i64,
    pub trainer: i64,
    pub trainer_name: String,
    pub invoice_number: String,
    pub date: chrono::NaiveDate,
    pub status: BillStatus,
    pub expenses: Vec<Expense>,
    pub total_amount: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
