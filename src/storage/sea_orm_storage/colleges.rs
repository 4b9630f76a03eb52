use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::batches;
use crate::entity::colleges::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    colleges::{
        entities::College,
        requests::{CreateCollegeRequest, UpdateCollegeRequest},
    },
};
use crate::storage::ListFilter;
use crate::utils::sql::contains_literal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学院 → 在该学院开设过批次的课程
    async fn college_course_ids(&self, college_ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>> {
        if college_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = Batches::find()
            .filter(batches::Column::CollegeId.is_in(college_ids.to_vec()))
            .order_by_asc(batches::Column::CourseId)
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询学院课程失败: {e}")))?;

        let mut map: HashMap<i64, Vec<i64>> = HashMap::new();
        for batch in rows {
            let ids = map.entry(batch.college_id).or_default();
            if !ids.contains(&batch.course_id) {
                ids.push(batch.course_id);
            }
        }
        Ok(map)
    }

    async fn to_colleges(&self, models: Vec<CollegeModel>) -> Result<Vec<College>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut courses = self.college_course_ids(&ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let course_ids = courses.remove(&m.id).unwrap_or_default();
                m.into_college(course_ids)
            })
            .collect())
    }

    pub async fn create_college_impl(&self, req: CreateCollegeRequest) -> Result<College> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            address: Set(req.address),
            contact_person: Set(req.contact_person),
            contact_email: Set(req.contact_email),
            contact_phone: Set(req.contact_phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建学院失败"))?;

        Ok(result.into_college(Vec::new()))
    }

    pub async fn get_college_by_id_impl(&self, id: i64) -> Result<Option<College>> {
        let result = Colleges::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询学院失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_colleges(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn get_college_by_name_impl(&self, name: &str) -> Result<Option<College>> {
        let result = Colleges::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询学院失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_colleges(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_colleges_with_pagination_impl(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<College>> {
        let mut select = Colleges::find();

        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(contains_literal(Column::Name, term))
                    .add(contains_literal(Column::ContactPerson, term)),
            );
        }

        select = select.order_by_asc(Column::Name);

        let (models, pagination) = self.fetch_page(select, filter.page, filter.size).await?;

        Ok(PaginatedResponse {
            items: self.to_colleges(models).await?,
            pagination,
        })
    }

    pub async fn update_college_impl(
        &self,
        id: i64,
        update: UpdateCollegeRequest,
    ) -> Result<Option<College>> {
        let Some(existing) = Colleges::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询学院失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(address) = update.address {
            model.address = Set(address);
        }
        if let Some(contact_person) = update.contact_person {
            model.contact_person = Set(contact_person);
        }
        if let Some(contact_email) = update.contact_email {
            model.contact_email = Set(contact_email);
        }
        if let Some(contact_phone) = update.contact_phone {
            model.contact_phone = Set(contact_phone);
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model.update(&self.db).await.map_err(db_error("更新学院失败"))?;

        self.get_college_by_id_impl(id).await
    }

    pub async fn delete_college_impl(&self, id: i64) -> Result<bool> {
        let result = Colleges::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除学院失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
