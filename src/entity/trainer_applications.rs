//! 讲师申请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trainer_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub experience: i32,
    pub tech_stack: String,
    #[sea_orm(column_type = "Text")]
    pub expertise_domains: String,
    pub resume_path: String,
    pub status: String,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_application(self) -> crate::models::applications::entities::TrainerApplication {
        use crate::models::applications::entities::{ApplicationStatus, TrainerApplication};

        TrainerApplication {
            id: self.id,
            resume_url: format!("/api/v1/applications/{}/resume", self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            experience: self.experience,
            tech_stack: self.tech_stack,
            expertise_domains: self.expertise_domains,
            status: self
                .status
                .parse::<ApplicationStatus>()
                .unwrap_or(ApplicationStatus::Pending),
            submitted_at: super::to_utc(self.submitted_at),
        }
    }
}
