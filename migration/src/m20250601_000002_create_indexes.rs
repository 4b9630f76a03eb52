use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_tables::{
    Assessments, BatchStudents, Bills, CourseModules, Materials, Schedules, StudentAttempts,
    TrainerApplications, Users,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        // 同一批次内学员唯一
        manager
            .create_index(
                Index::create()
                    .name("uq_batch_students_batch_user")
                    .table(BatchStudents::Table)
                    .col(BatchStudents::BatchId)
                    .col(BatchStudents::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 同一课程内模块序号唯一
        manager
            .create_index(
                Index::create()
                    .name("uq_course_modules_course_number")
                    .table(CourseModules::Table)
                    .col(CourseModules::CourseId)
                    .col(CourseModules::ModuleNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_materials_course")
                    .table(Materials::Table)
                    .col(Materials::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_trainer_end")
                    .table(Schedules::Table)
                    .col(Schedules::TrainerId)
                    .col(Schedules::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trainer_applications_status")
                    .table(TrainerApplications::Table)
                    .col(TrainerApplications::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bills_trainer_date")
                    .table(Bills::Table)
                    .col(Bills::TrainerId)
                    .col(Bills::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_course")
                    .table(Assessments::Table)
                    .col(Assessments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_attempts_student")
                    .table(StudentAttempts::Table)
                    .col(StudentAttempts::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_attempts_student")
                    .table(StudentAttempts::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_assessments_course")
                    .table(Assessments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bills_trainer_date")
                    .table(Bills::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_trainer_applications_status")
                    .table(TrainerApplications::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_schedules_trainer_end")
                    .table(Schedules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_materials_course")
                    .table(Materials::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_course_modules_course_number")
                    .table(CourseModules::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uq_batch_students_batch_user")
                    .table(BatchStudents::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
