//! 费用明细实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bill_id: i64,
    pub expense_type: String,
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bills::Entity",
        from = "Column::BillId",
        to = "super::bills::Column::Id"
    )]
    Bill,
}

impl Related<super::bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bill.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_expense(self) -> crate::models::bills::entities::Expense {
        use crate::models::bills::entities::{Expense, ExpenseType};

        Expense {
            id: self.id,
            expense_type: self
                .expense_type
                .parse::<ExpenseType>()
                .unwrap_or(ExpenseType::Other),
            description: self.description,
            amount: self.amount,
        }
    }
}
