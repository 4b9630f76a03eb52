//! 课程模块实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub module_number: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub material_ids: String,
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
    pub fn material_id_list(&self) -> Vec<i64> {
        super::parse_id_list(&self.material_ids)
    }

    pub fn into_course_module(
        self,
        materials: Vec<crate::models::materials::entities::Material>,
    ) -> crate::models::courses::entities::CourseModule {
        let material_ids = self.material_id_list();
        crate::models::courses::entities::CourseModule {
            id: self.id,
            course_id: self.course_id,
            module_number: self.module_number,
            title: self.title,
            material_ids,
            materials,
        }
    }
}
