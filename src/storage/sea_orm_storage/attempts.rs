use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::assessments;
use crate::entity::prelude::*;
use crate::entity::student_attempts::{ActiveModel, Column};
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    attempts::{
        entities::StudentAttempt,
        requests::{AttemptListQuery, NewAttempt},
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub(crate) async fn to_attempts(
        &self,
        models: Vec<StudentAttemptModel>,
    ) -> Result<Vec<StudentAttempt>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        let assessment_ids: Vec<i64> = models.iter().map(|m| m.assessment_id).collect();

        let students = self.user_names(&student_ids).await?;
        let titles: HashMap<i64, String> = Assessments::find()
            .filter(assessments::Column::Id.is_in(assessment_ids))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询测评失败: {e}")))?
            .into_iter()
            .map(|a| (a.id, a.title))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let student = students.get(&m.student_id).cloned().unwrap_or_default();
                let title = titles.get(&m.assessment_id).cloned().unwrap_or_default();
                m.into_attempt(student, title)
            })
            .collect())
    }

    pub async fn create_attempt_impl(&self, attempt: NewAttempt) -> Result<StudentAttempt> {
        let answers = attempt
            .answers
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let model = ActiveModel {
            student_id: Set(attempt.student_id),
            assessment_id: Set(attempt.assessment_id),
            score: Set(attempt.score),
            answers: Set(answers),
            timestamp: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("保存作答失败"))?;

        self.to_attempts(vec![result])
            .await?
            .pop()
            .ok_or_else(|| ParcError::database_operation("保存作答失败: 未返回记录"))
    }

    /// 按作答时间倒序
    pub async fn list_attempts_with_pagination_impl(
        &self,
        query: AttemptListQuery,
    ) -> Result<PaginatedResponse<StudentAttempt>> {
        let mut select = StudentAttempts::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(assessment_id) = query.assessment_id {
            select = select.filter(Column::AssessmentId.eq(assessment_id));
        }

        select = select.order_by_desc(Column::Timestamp).order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, query.page, query.size).await?;

        Ok(PaginatedResponse {
            items: self.to_attempts(models).await?,
            pagination,
        })
    }
}
