//! 教学资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub course_id: i64,
    pub material_type: String,
    pub file_path: String,
    pub original_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub duration_in_minutes: Option<i32>,
    pub uploaded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self, course_name: String) -> crate::models::materials::entities::Material {
        use super::to_utc;
        use crate::models::materials::entities::{Material, MaterialType};

        Material {
            id: self.id,
            content_url: format!("/api/v1/materials/{}/content", self.id),
            title: self.title,
            course_id: self.course_id,
            course: course_name,
            material_type: self
                .material_type
                .parse::<MaterialType>()
                .unwrap_or(MaterialType::Pdf),
            original_name: self.original_name,
            content_type: self.content_type,
            file_size: self.file_size,
            duration_in_minutes: self.duration_in_minutes,
            uploaded_by: self.uploaded_by,
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        }
    }
}
