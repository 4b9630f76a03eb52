use super::{SeaOrmStorage, db_error};
use crate::entity::materials::{ActiveModel, Column};
use crate::entity::prelude::*;
use crate::errors::{ParcError, Result};
use crate::models::{
    PaginatedResponse,
    materials::{
        entities::Material,
        requests::{MaterialFile, NewMaterial, UpdateMaterialRequest},
    },
};
use crate::storage::ListFilter;
use crate::utils::sql::contains_literal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn to_materials(&self, models: Vec<MaterialModel>) -> Result<Vec<Material>> {
        let course_ids: Vec<i64> = models.iter().map(|m| m.course_id).collect();
        let names = self.course_names(&course_ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let course = names.get(&m.course_id).cloned().unwrap_or_default();
                m.into_material(course)
            })
            .collect())
    }

    pub async fn create_material_impl(&self, material: NewMaterial) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(material.title),
            course_id: Set(material.course_id),
            material_type: Set(material.material_type.as_str().to_string()),
            file_path: Set(material.file_path),
            original_name: Set(material.original_name),
            content_type: Set(material.content_type),
            file_size: Set(material.file_size),
            duration_in_minutes: Set(material.duration_in_minutes),
            uploaded_by: Set(material.uploaded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建资料失败"))?;

        self.to_materials(vec![result])
            .await?
            .pop()
            .ok_or_else(|| ParcError::database_operation("创建资料失败: 未返回记录"))
    }

    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询资料失败: {e}")))?;

        match result {
            Some(m) => Ok(self.to_materials(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn get_material_file_impl(&self, id: i64) -> Result<Option<MaterialFile>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| MaterialFile {
            file_path: m.file_path,
            original_name: m.original_name,
            content_type: m.content_type,
        }))
    }

    pub async fn list_materials_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Material>> {
        self.materials_in_order(ids).await
    }

    pub async fn list_course_material_paths_impl(&self, course_id: i64) -> Result<Vec<String>> {
        let models = Materials::find()
            .filter(Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询课程资料失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.file_path).collect())
    }

    pub async fn list_materials_with_pagination_impl(
        &self,
        filter: ListFilter,
        material_type: Option<String>,
    ) -> Result<PaginatedResponse<Material>> {
        let mut select = Materials::find();

        if let Some(course_id) = filter.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(material_type) = material_type {
            select = select.filter(Column::MaterialType.eq(material_type));
        }
        if let Some(ref search) = filter.search
            && !search.trim().is_empty()
        {
            select = select.filter(contains_literal(Column::Title, search.trim()));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, filter.page, filter.size).await?;

        Ok(PaginatedResponse {
            items: self.to_materials(models).await?,
            pagination,
        })
    }

    pub async fn update_material_impl(
        &self,
        id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        let Some(existing) = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询资料失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(course_id) = update.course {
            model.course_id = Set(course_id);
        }
        if let Some(duration) = update.duration_in_minutes {
            model.duration_in_minutes = Set(Some(duration));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model.update(&self.db).await.map_err(db_error("更新资料失败"))?;

        Ok(self.to_materials(vec![result]).await?.pop())
    }

    /// 删除资料记录，返回文件路径供调用方清理
    pub async fn delete_material_impl(&self, id: i64) -> Result<Option<String>> {
        let Some(existing) = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询资料失败: {e}")))?
        else {
            return Ok(None);
        };

        Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(Some(existing.file_path))
    }
}
