use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::trainer_applications::{ActiveModel, Column};
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    applications::{
        entities::{ApplicationStatus, TrainerApplication},
        requests::NewApplication,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_application_impl(
        &self,
        application: NewApplication,
    ) -> Result<TrainerApplication> {
        let form = application.form;
        let model = ActiveModel {
            name: Set(form.name),
            email: Set(form.email),
            phone: Set(form.phone),
            experience: Set(form.experience),
            tech_stack: Set(form.tech_stack),
            expertise_domains: Set(form.expertise_domains),
            resume_path: Set(application.resume_path),
            status: Set(ApplicationStatus::Pending.as_str().to_string()),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("提交申请失败"))?;

        Ok(result.into_application())
    }

    pub async fn get_application_by_id_impl(&self, id: i64) -> Result<Option<TrainerApplication>> {
        let result = TrainerApplications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询申请失败: {e}")))?;

        Ok(result.map(|m| m.into_application()))
    }

    pub async fn get_application_by_email_impl(
        &self,
        email: &str,
    ) -> Result<Option<TrainerApplication>> {
        let result = TrainerApplications::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询申请失败: {e}")))?;

        Ok(result.map(|m| m.into_application()))
    }

    pub async fn get_application_resume_path_impl(&self, id: i64) -> Result<Option<String>> {
        let result = TrainerApplications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询申请失败: {e}")))?;

        Ok(result.map(|m| m.resume_path))
    }

    /// 按提交时间倒序
    pub async fn list_applications_with_pagination_impl(
        &self,
        status: Option<ApplicationStatus>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PaginatedResponse<TrainerApplication>> {
        let mut select = TrainerApplications::find();

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, page, size).await?;

        Ok(PaginatedResponse {
            items: models.into_iter().map(|m| m.into_application()).collect(),
            pagination,
        })
    }

    pub async fn update_application_status_impl(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<TrainerApplication>> {
        let Some(existing) = TrainerApplications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询申请失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.status = Set(status.as_str().to_string());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("更新申请状态失败: {e}")))?;

        Ok(Some(result.into_application()))
    }

    pub async fn delete_application_impl(&self, id: i64) -> Result<bool> {
        let result = TrainerApplications::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除申请失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
