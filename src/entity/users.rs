//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub experience: Option<i32>,
    pub college: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub education: Option<String>,
    pub resume_path: Option<String>,
    pub access_expiry_date: Option<i64>,
    pub must_change_password: bool,
    #[sea_orm(column_type = "Text")]
    pub assigned_material_ids: String,
    #[sea_orm(column_type = "Text")]
    pub assigned_assessment_ids: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::batch_students::Entity")]
    BatchStudents,
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::bills::Entity")]
    Bills,
    #[sea_orm(has_many = "super::student_attempts::Entity")]
    StudentAttempts,
}

impl Related<super::batch_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchStudents.def()
    }
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bills.def()
    }
}

impl Related<super::student_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentAttempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn full_name(&self) -> String {
        crate::models::users::entities::join_full_name(&self.first_name, &self.last_name)
    }

    pub fn into_user(self, batches: Vec<i64>) -> crate::models::users::entities::User {
        use super::{parse_id_list, to_utc};
        use crate::models::users::entities::{User, UserRole, UserStatus};

        let full_name = self.full_name();
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Student),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Inactive),
            first_name: self.first_name,
            last_name: self.last_name,
            full_name,
            phone: self.phone,
            expertise: self.expertise,
            experience: self.experience,
            college: self.college,
            education: self.education,
            has_resume: self.resume_path.is_some(),
            access_expiry_date: self.access_expiry_date.map(to_utc),
            must_change_password: self.must_change_password,
            assigned_materials: parse_id_list(&self.assigned_material_ids),
            assigned_assessments: parse_id_list(&self.assigned_assessment_ids),
            batches,
            last_login: self.last_login.map(to_utc),
            created_at: to_utc(self.created_at),
            updated_at: to_utc(self.updated_at),
        }
    }
}
