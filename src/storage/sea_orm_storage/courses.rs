use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::courses::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::entity::{course_modules, encode_id_list};
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    courses::{
        entities::{Course, CourseModule},
        requests::{
            CreateCourseModuleRequest, CreateCourseRequest, UpdateCourseModuleRequest,
            UpdateCourseRequest,
        },
    },
};
use crate::storage::ListFilter;
use crate::utils::sql::contains_literal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 组装课程，模块按编号排序并展开资料
    async fn to_courses(&self, models: Vec<CourseModel>) -> Result<Vec<Course>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let module_rows = CourseModules::find()
            .filter(course_modules::Column::CourseId.is_in(ids))
            .order_by_asc(course_modules::Column::ModuleNumber)
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询课程模块失败: {e}")))?;

        let mut modules: HashMap<i64, Vec<CourseModule>> = HashMap::new();
        for row in module_rows {
            let materials = self.materials_in_order(&row.material_id_list()).await?;
            modules
                .entry(row.course_id)
                .or_default()
                .push(row.into_course_module(materials));
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let course_modules = modules.remove(&m.id).unwrap_or_default();
                m.into_course(course_modules)
            })
            .collect())
    }

    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            cover_photo: Set(req.cover_photo),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建课程失败"))?;

        Ok(result.into_course(Vec::new()))
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询课程失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_courses(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn get_course_by_name_impl(&self, name: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询课程失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_courses(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn list_courses_with_pagination_impl(
        &self,
        filter: ListFilter,
    ) -> Result<PaginatedResponse<Course>> {
        let mut select = Courses::find();

        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            select = select.filter(contains_literal(Column::Name, search.trim()));
        }

        select = select.order_by_asc(Column::Name);

        let (models, pagination) = self.fetch_page(select, filter.page, filter.size).await?;

        Ok(PaginatedResponse {
            items: self.to_courses(models).await?,
            pagination,
        })
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(cover_photo) = update.cover_photo {
            model.cover_photo = Set(Some(cover_photo));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model.update(&self.db).await.map_err(db_error("更新课程失败"))?;

        self.get_course_by_id_impl(id).await
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建课程模块，同一课程内模块编号唯一
    pub async fn create_course_module_impl(
        &self,
        course_id: i64,
        req: CreateCourseModuleRequest,
    ) -> Result<CourseModule> {
        let now = chrono::Utc::now().timestamp();

        let model = course_modules::ActiveModel {
            course_id: Set(course_id),
            module_number: Set(req.module_number),
            title: Set(req.title),
            material_ids: Set(encode_id_list(&req.material_ids)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建课程模块失败"))?;

        let materials = self.materials_in_order(&result.material_id_list()).await?;
        Ok(result.into_course_module(materials))
    }

    pub async fn update_course_module_impl(
        &self,
        course_id: i64,
        module_id: i64,
        update: UpdateCourseModuleRequest,
    ) -> Result<Option<CourseModule>> {
        let Some(existing) = CourseModules::find_by_id(module_id)
            .filter(course_modules::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询课程模块失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: course_modules::ActiveModel = existing.into();
        if let Some(module_number) = update.module_number {
            model.module_number = Set(module_number);
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(material_ids) = update.material_ids {
            model.material_ids = Set(encode_id_list(&material_ids));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(db_error("更新课程模块失败"))?;

        let materials = self.materials_in_order(&result.material_id_list()).await?;
        Ok(Some(result.into_course_module(materials)))
    }

    pub async fn delete_course_module_impl(&self, course_id: i64, module_id: i64) -> Result<bool> {
        let result = CourseModules::delete_many()
            .filter(course_modules::Column::Id.eq(module_id))
            .filter(course_modules::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除课程模块失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
