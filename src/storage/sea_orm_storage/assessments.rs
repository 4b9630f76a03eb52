use super::{SeaOrmStorage, db_error};
use crate::entity::assessments::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    assessments::{
        entities::Assessment,
        requests::{AssessmentListQuery, CreateAssessmentRequest, UpdateAssessmentRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    async fn to_assessments(&self, models: Vec<AssessmentModel>) -> Result<Vec<Assessment>> {
        let course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();
        let names = self.course_names(&course_ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let course = names.get(&m.course_id).cloned().unwrap_or_default();
                m.into_assessment(course)
            })
            .collect())
    }

    pub async fn create_assessment_impl(
        &self,
        req: CreateAssessmentRequest,
        created_by: i64,
    ) -> Result<Assessment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            course_id: Set(req.course),
            material_id: Set(req.material),
            assessment_type: Set(req.assessment_type.as_str().to_string()),
            questions: Set(serde_json::to_string(&req.questions)?),
            max_score: Set(req.max_score),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建测评失败"))?;

        self.to_assessments(vec![result])
            .await?
            .pop()
            .ok_or_else(|| ParcError::database_operation("创建测评失败: 未返回记录"))
    }

    pub async fn get_assessment_by_id_impl(&self, id: i64) -> Result<Option<Assessment>> {
        let result = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询测评失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_assessments(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn count_existing_assessments_impl(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        Assessments::find()
            .filter(Column::Id.is_in(ids))
            .count(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("统计测评失败: {e}")))
    }

    pub async fn list_assessments_with_pagination_impl(
        &self,
        query: AssessmentListQuery,
    ) -> Result<PaginatedResponse<Assessment>> {
        let mut select = Assessments::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(ids) = query.only_ids {
            select = select.filter(Column::Id.is_in(ids));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, query.page, query.size).await?;

        Ok(PaginatedResponse {
            items: self.to_assessments(models).await?,
            pagination,
        })
    }

    pub async fn update_assessment_impl(
        &self,
        id: i64,
        update: UpdateAssessmentRequest,
    ) -> Result<Option<Assessment>> {
        let Some(existing) = Assessments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询测评失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(course) = update.course {
            model.course_id = Set(course);
        }
        if let Some(material) = update.material {
            model.material_id = Set(Some(material));
        }
        if let Some(assessment_type) = update.assessment_type {
            model.assessment_type = Set(assessment_type.as_str().to_string());
        }
        if let Some(questions) = update.questions {
            model.questions = Set(serde_json::to_string(&questions)?);
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(Some(max_score));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("更新测评失败"))?;

        Ok(self.to_assessments(vec![result]).await?.pop())
    }

    pub async fn delete_assessment_impl(&self, id: i64) -> Result<bool> {
        let result = Assessments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除测评失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
