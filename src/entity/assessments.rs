//! 测评实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub course_id: i64,
    pub material_id: Option<i64>,
    pub assessment_type: String,
    #[sea_orm(column_type = "Text")]
    pub questions: String,
    pub max_score: Option<i32>,
    pub created_by: Option<i64>,
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
    #[sea_orm(has_many = "super::student_attempts::Entity")]
    StudentAttempts,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::student_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentAttempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assessment(
        self,
        course_name: String,
    ) -> crate::models::assessments::entities::Assessment {
        use super::to_utc;
        use crate::models::assessments::entities::{Assessment, AssessmentType};

        Assessment {
            id: self.id,
            title: self.title,
            course: self.course_id,
            course_name,
            material: self.material_id,
            assessment_type: self
                .assessment_type
                .parse::<AssessmentType>()
                .unwrap_or(AssessmentType::Test),
            questions: serde_json::from_str(&self.questions).unwrap_or_default(),
            max_score: self.max_score,
            created_by: self.created_by,
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        }
    }
}
