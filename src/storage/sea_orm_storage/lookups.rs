//! 列表接口需要的关联名称批量查询，避免逐条查询

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{batch_students, batches, colleges, courses, materials, users};
use crate::errors::{ParcError, Result};
use crate::models::materials::entities::Material;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

fn dedup(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl SeaOrmStorage {
    pub(crate) async fn course_names(&self, ids: &[i64]) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Courses::find()
            .filter(courses::Column::Id.is_in(dedup(ids)))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询课程名称失败: {e}")))?;
        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }

    pub(crate) async fn college_names(&self, ids: &[i64]) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Colleges::find()
            .filter(colleges::Column::Id.is_in(dedup(ids)))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询学院名称失败: {e}")))?;
        Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
    }

    pub(crate) async fn batch_names(&self, ids: &[i64]) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Batches::find()
            .filter(batches::Column::Id.is_in(dedup(ids)))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询批次名称失败: {e}")))?;
        Ok(rows.into_iter().map(|b| (b.id, b.name)).collect())
    }

    /// 用户全名
    pub(crate) async fn user_names(&self, ids: &[i64]) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Users::find()
            .filter(users::Column::Id.is_in(dedup(ids)))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询用户名称失败: {e}")))?;
        Ok(rows.into_iter().map(|u| (u.id, u.full_name())).collect())
    }

    /// 批次 → 学员 id
    pub(crate) async fn batch_student_ids(&self, batch_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>> {
        if batch_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = BatchStudents::find()
            .filter(batch_students::Column::BatchId.is_in(dedup(batch_ids)))
            .order_by_asc(batch_students::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询批次学员失败: {e}")))?;

        let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in rows {
            map.entry(row.batch_id).or_default().push(row.user_id);
        }
        Ok(map)
    }

    /// 学员 → 所在批次 id
    pub(crate) async fn user_batch_ids(&self, user_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = BatchStudents::find()
            .filter(batch_students::Column::UserId.is_in(dedup(user_ids)))
            .order_by_asc(batch_students::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询学员批次失败: {e}")))?;

        let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in rows {
            map.entry(row.user_id).or_default().push(row.batch_id);
        }
        Ok(map)
    }

    /// 按给定顺序返回资料，不存在的 id 被忽略
    pub(crate) async fn materials_in_order(&self, ids: &[i64]) -> Result<Vec<Material>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = Materials::find()
            .filter(materials::Column::Id.is_in(dedup(ids)))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询资料失败: {e}")))?;

        let course_ids: Vec<i64> = rows.iter().map(|m| m.course_id).collect();
        let course_names = self.course_names(&course_ids).await?;
        let mut by_id: HashMap<i64, MaterialModel> = rows.into_iter().map(|m| (m.id, m)).collect();

        Ok(ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(|m| {
                let course = course_names.get(&m.course_id).cloned().unwrap_or_default();
                m.into_material(course)
            })
            .collect())
    }
}
