use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::bills::{ActiveModel, Column};
use crate::entity::expenses;
use crate::entity::prelude::*;
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    bills::{
        entities::{Bill, BillStatus, Expense},
        requests::{BillListQuery, NewBill},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    async fn to_bills(&self, models: Vec<BillModel>) -> Result<Vec<Bill>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let trainer_ids: Vec<i64> = models.iter().map(|m| m.trainer_id).collect();

        let expense_rows = Expenses::find()
            .filter(expenses::Column::BillId.is_in(ids))
            .order_by_asc(expenses::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询费用明细失败: {e}")))?;
        let trainers = self.user_names(&trainer_ids).await?;

        let mut by_bill: HashMap<i64, Vec<Expense>> = HashMap::new();
        for row in expense_rows {
            by_bill.entry(row.bill_id).or_default().push(row.into_expense());
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let trainer_name = trainers.get(&m.trainer_id).cloned().unwrap_or_default();
                let expenses = by_bill.remove(&m.id).unwrap_or_default();
                m.into_bill(trainer_name, expenses)
            })
            .collect())
    }

    /// 账单与费用明细在同一事务中写入
    pub async fn create_bill_impl(&self, bill: NewBill) -> Result<Bill> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ParcError::database_operation(format!("开启事务失败: {e}")))?;

        let saved = ActiveModel {
            trainer_id: Set(bill.trainer_id),
            invoice_number: Set(bill.invoice_number),
            date: Set(bill.date),
            status: Set(BillStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("创建账单失败"))?;

        let rows = bill.expenses.into_iter().map(|e| expenses::ActiveModel {
            bill_id: Set(saved.id),
            expense_type: Set(e.expense_type.as_str().to_string()),
            description: Set(e.description),
            amount: Set(e.amount),
            ..Default::default()
        });
        Expenses::insert_many(rows)
            .exec(&txn)
            .await
            .map_err(db_error("写入费用明细失败"))?;

        txn.commit()
            .await
            .map_err(|e| ParcError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_bill_by_id_impl(saved.id)
            .await?
            .ok_or_else(|| ParcError::database_operation("创建账单失败: 未返回记录"))
    }

    pub async fn get_bill_by_id_impl(&self, id: i64) -> Result<Option<Bill>> {
        let result = Bills::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询账单失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_bills(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 按账单日期倒序
    pub async fn list_bills_with_pagination_impl(
        &self,
        query: BillListQuery,
    ) -> Result<PaginatedResponse<Bill>> {
        let mut select = Bills::find();

        if let Some(trainer_id) = query.trainer_id {
            select = select.filter(Column::TrainerId.eq(trainer_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        select = select.order_by_desc(Column::Date).order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, query.page, query.size).await?;

        Ok(PaginatedResponse {
            items: self.to_bills(models).await?,
            pagination,
        })
    }

    pub async fn update_bill_status_impl(&self, id: i64, status: BillStatus) -> Result<Option<Bill>> {
        let Some(existing) = Bills::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询账单失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.as_str().to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("更新账单状态失败: {e}")))?;

        Ok(self.to_bills(vec![result]).await?.pop())
    }

    pub async fn delete_bill_impl(&self, id: i64) -> Result<bool> {
        let result = Bills::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除账单失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
