//! 测评作答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub assessment_id: i64,
    pub score: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub answers: Option<String>,
    pub timestamp: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::assessments::Entity",
        from = "Column::AssessmentId",
        to = "super::assessments::Column::Id"
    )]
    Assessment,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attempt(
        self,
        student_name: String,
        assessment_title: String,
    ) -> crate::models::attempts::entities::StudentAttempt {
        crate::models::attempts::entities::StudentAttempt {
            id: self.id,
            student: self.student_id,
            student_name,
            assessment: self.assessment_id,
            assessment_title,
            score: self.score,
            answers: self
                .answers
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            timestamp: super::to_utc(self.timestamp),
        }
    }
}
