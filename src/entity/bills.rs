//! 账单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub trainer_id: i64,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub date: Date,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TrainerId",
        to = "super::users::Column::Id"
    )]
    Trainer,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trainer.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_bill(
        self,
        trainer_name: String,
        expenses: Vec<crate::models::bills::entities::Expense>,
    ) -> crate::models::bills::entities::Bill {
        use super::to_utc;
        use crate::models::bills::entities::{Bill, BillStatus};

        let total_amount = expenses.iter().map(|e| e.amount).sum();
        Bill {
            id: self.id,
            trainer: self.trainer_id,
            trainer_name,
            invoice_number: self.invoice_number,
            date: self.date,
            status: self.status.parse::<BillStatus>().unwrap_or(BillStatus::Pending),
            expenses,
            total_amount,
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        }
    }
}
