//! 预导入模块，方便使用

pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::batch_students::{
    ActiveModel as BatchStudentActiveModel, Entity as BatchStudents, Model as BatchStudentModel,
};
pub use super::batches::{ActiveModel as BatchActiveModel, Entity as Batches, Model as BatchModel};
pub use super::bills::{ActiveModel as BillActiveModel, Entity as Bills, Model as BillModel};
pub use super::colleges::{
    ActiveModel as CollegeActiveModel, Entity as Colleges, Model as CollegeModel,
};
pub use super::course_modules::{
    ActiveModel as CourseModuleActiveModel, Entity as CourseModules, Model as CourseModuleModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::expenses::{
    ActiveModel as ExpenseActiveModel, Entity as Expenses, Model as ExpenseModel,
};
pub use super::materials::{
    ActiveModel as MaterialActiveModel, Entity as Materials, Model as MaterialModel,
};
pub use super::schedules::{
    ActiveModel as ScheduleActiveModel, Entity as Schedules, Model as ScheduleModel,
};
pub use super::student_attempts::{
    ActiveModel as StudentAttemptActiveModel, Entity as StudentAttempts,
    Model as StudentAttemptModel,
};
pub use super::trainer_applications::{
    ActiveModel as TrainerApplicationActiveModel, Entity as TrainerApplications,
    Model as TrainerApplicationModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
