use chrono::{DateTime, Utc};

use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::schedules::{ActiveModel, Column};
use crate::entity::{encode_id_list, to_utc};
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    schedules::{entities::Schedule, requests::ScheduleRecord},
};
use crate::storage::ListFilter;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn to_schedules(
        &self,
        models: Vec<ScheduleModel>,
        with_materials: bool,
    ) -> Result<Vec<Schedule>> {
        let trainer_ids: Vec<i64> = models.iter().map(|m| m.trainer_id).collect();
        let college_ids: Vec<i64> = models.iter().map(|m| m.college_id).collect();
        let course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();
        let batch_ids: Vec<i64> = models.iter().filter_map(|m| m.batch_id).collect();

        let trainers = self.user_names(&trainer_ids).await?;
        let colleges = self.college_names(&college_ids).await?;
        let courses = self.course_names(&course_ids).await?;
        let batches = self.batch_names(&batch_ids).await?;

        let mut schedules = Vec::with_capacity(models.len());
        for m in models {
            let materials = m.material_id_list();
            let material_details = if with_materials {
                self.materials_in_order(&materials).await?
            } else {
                Vec::new()
            };
            schedules.push(Schedule {
                id: m.id,
                trainer: m.trainer_id,
                trainer_name: trainers.get(&m.trainer_id).cloned().unwrap_or_default(),
                college: m.college_id,
                college_name: colleges.get(&m.college_id).cloned().unwrap_or_default(),
                course: m.course_id,
                course_name: courses.get(&m.course_id).cloned().unwrap_or_default(),
                batch: m.batch_id,
                batch_name: m.batch_id.and_then(|id| batches.get(&id).cloned()),
                start_date: to_utc(m.start_date),
                end_date: to_utc(m.end_date),
                materials,
                material_details,
                created_at: to_utc(m.created_at),
                updated_at: to_utc(m.updated_at),
            });
        }
        Ok(schedules)
    }

    pub async fn create_schedule_impl(&self, record: ScheduleRecord) -> Result<Schedule> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            trainer_id: Set(record.trainer_id),
            college_id: Set(record.college_id),
            course_id: Set(record.course_id),
            batch_id: Set(record.batch_id),
            start_date: Set(record.start_date.timestamp()),
            end_date: Set(record.end_date.timestamp()),
            material_ids: Set(encode_id_list(&record.material_ids)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建排课失败"))?;

        self.to_schedules(vec![result], true)
            .await?
            .pop()
            .ok_or_else(|| ParcError::database_operation("创建排课失败: 未返回记录"))
    }

    pub async fn get_schedule_by_id_impl(&self, id: i64) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询排课失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_schedules(vec![m], true).await?.pop()),
            None => Ok(None),
        }
    }

    /// 列表只带资料 id，详情才展开资料
    pub async fn list_schedules_with_pagination_impl(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<Schedule>> {
        let mut select = Schedules::find();

        if let Some(trainer_id) = filter.trainer_id {
            select = select.filter(Column::TrainerId.eq(trainer_id));
        }
        if let Some(college_id) = filter.college_id {
            select = select.filter(Column::CollegeId.eq(college_id));
        }
        if let Some(course_id) = filter.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select = select.order_by_desc(Column::StartDate).order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, filter.page, filter.size).await?;

        Ok(PaginatedResponse {
            items: self.to_schedules(models, false).await?,
            pagination,
        })
    }

    pub async fn update_schedule_impl(
        &self,
        id: i64,
        record: ScheduleRecord,
    ) -> Result<Option<Schedule>> {
        let Some(existing) = Schedules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询排课失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.trainer_id = Set(record.trainer_id);
        model.college_id = Set(record.college_id);
        model.course_id = Set(record.course_id);
        model.batch_id = Set(record.batch_id);
        model.start_date = Set(record.start_date.timestamp());
        model.end_date = Set(record.end_date.timestamp());
        model.material_ids = Set(encode_id_list(&record.material_ids));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("更新排课失败"))?;

        Ok(self.to_schedules(vec![result], true).await?.pop())
    }

    pub async fn delete_schedule_impl(&self, id: i64) -> Result<bool> {
        let result = Schedules::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除排课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn latest_schedule_end_impl(
        &self,
        trainer_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let latest = Schedules::find()
            .filter(Column::TrainerId.eq(trainer_id))
            .filter(Column::EndDate.gte(now.timestamp()))
            .order_by_desc(Column::EndDate)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询讲师排课失败: {e}")))?;

        Ok(latest.map(|m| to_utc(m.end_date)))
    }
}
