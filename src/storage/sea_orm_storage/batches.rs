use super::{SeaOrmStorage, db_error};
use crate::entity::batch_students;
use crate::entity::batches::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    batches::{
        entities::Batch,
        requests::{CreateBatchRequest, UpdateBatchRequest},
    },
};
use crate::storage::ListFilter;
use crate::utils::sql::contains_literal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

/// 插入尚未在批次中的学员，返回新增数量
async fn insert_missing_students<C: ConnectionTrait>(
    conn: &C,
    batch_id: i64,
    user_ids: &[i64],
) -> Result<u64> {
    if user_ids.is_empty() {
        return Ok(0);
    }

    let existing: Vec<i64> = BatchStudents::find()
        .filter(batch_students::Column::BatchId.eq(batch_id))
        .filter(batch_students::Column::UserId.is_in(user_ids.to_vec()))
        .all(conn)
        .await
        .map_err(|e| ParcError::database_operation(format!("查询批次学员失败: {e}")))?
        .into_iter()
        .map(|row| row.user_id)
        .collect();

    let now = chrono::Utc::now().timestamp();
    let mut pending: Vec<i64> = user_ids
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();
    pending.sort_unstable();
    pending.dedup();

    if pending.is_empty() {
        return Ok(0);
    }

    let rows = pending.iter().map(|user_id| batch_students::ActiveModel {
        batch_id: Set(batch_id),
        user_id: Set(*user_id),
        joined_at: Set(now),
        ..Default::default()
    });

    BatchStudents::insert_many(rows)
        .exec(conn)
        .await
        .map_err(db_error("加入批次学员失败"))?;

    Ok(pending.len() as u64)
}

impl SeaOrmStorage {
    async fn to_batches(&self, models: Vec<BatchModel>) -> Result<Vec<Batch>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();
        let college_ids: Vec<i64> = models.iter().map(|m| m.college_id).collect();

        let mut students = self.batch_student_ids(&ids).await?;
        let courses = self.course_names(&course_ids).await?;
        let colleges = self.college_names(&college_ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let course = courses.get(&m.course_id).cloned().unwrap_or_default();
                let college = colleges.get(&m.college_id).cloned().unwrap_or_default();
                let student_ids = students.remove(&m.id).unwrap_or_default();
                m.into_batch(course, college, student_ids)
            })
            .collect())
    }

    /// 创建批次，初始学员在同一事务中写入
    pub async fn create_batch_impl(&self, req: CreateBatchRequest) -> Result<Batch> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ParcError::database_operation(format!("开启事务失败: {e}")))?;

        let batch = ActiveModel {
            name: Set(req.name),
            course_id: Set(req.course),
            college_id: Set(req.college),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("创建批次失败"))?;

        insert_missing_students(&txn, batch.id, &req.student_ids).await?;

        txn.commit()
            .await
            .map_err(|e| ParcError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_batch_by_id_impl(batch.id)
            .await?
            .ok_or_else(|| ParcError::database_operation("创建批次失败: 未返回记录"))
    }

    pub async fn get_batch_by_id_impl(&self, id: i64) -> Result<Option<Batch>> {
        let result = Batches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询批次失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_batches(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_batches_with_pagination_impl(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<Batch>> {
        let mut select = Batches::find();

        if let Some(course_id) = filter.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(college_id) = filter.college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }
        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            select = select.filter(contains_literal(Column::Name, search.trim()));
        }

        select = select.order_by_desc(Column::StartDate).order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, filter.page, filter.size).await?;

        Ok(PaginatedResponse {
            items: self.to_batches(models).await?,
            pagination,
        })
    }

    pub async fn update_batch_impl(
        &self,
        id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>> {
        let Some(existing) = Batches::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询批次失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(course) = update.course {
            model.course_id = Set(course);
        }
        if let Some(college) = update.college {
            model.college_id = Set(college);
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model.update(&self.db).await.map_err(db_error("更新批次失败"))?;

        self.get_batch_by_id_impl(id).await
    }

    pub async fn delete_batch_impl(&self, id: i64) -> Result<bool> {
        let result = Batches::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除批次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn add_batch_students_impl(&self, batch_id: i64, user_ids: &[i64]) -> Result<u64> {
        insert_missing_students(&self.db, batch_id, user_ids).await
    }

    pub async fn remove_batch_students_impl(
        &self,
        batch_id: i64,
        user_ids: &[i64],
    ) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let result = BatchStudents::delete_many()
            .filter(batch_students::Column::BatchId.eq(batch_id))
            .filter(batch_students::Column::UserId.is_in(user_ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("移除批次学员失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
