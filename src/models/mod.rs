pub mod applications;
pub mod assessments;
pub mod attempts;
pub mod auth;
pub mod batches;
pub mod bills;
pub mod colleges;
pub mod common;
pub mod courses;
pub mod materials;
pub mod reporting;
pub mod schedules;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 业务错误码，随 `ApiResponse.code` 返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    PayloadTooLarge = 1013,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    AccountInactive = 2001,
    AccessExpired = 2002,
    RefreshTokenInvalid = 2003,
    PasswordPolicyViolation = 2004,

    // 用户
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserCreationFailed = 3002,
    UserUpdateFailed = 3003,
    UserDeleteFailed = 3004,
    CanNotDeleteCurrentUser = 3005,
    UserRoleMismatch = 3006,
    InvalidMaterialIds = 3007,
    InvalidAssessmentIds = 3008,

    // 目录（学院 / 课程 / 资料）
    CollegeNotFound = 4000,
    CollegeAlreadyExists = 4001,
    CourseNotFound = 4100,
    CourseAlreadyExists = 4101,
    CourseModuleNotFound = 4102,
    CourseModuleConflict = 4103,
    MaterialNotFound = 4200,
    MaterialFileInvalid = 4201,
    MaterialFileMissing = 4202,

    // 教学（批次 / 排课）
    BatchNotFound = 5000,
    BatchDateRangeInvalid = 5001,
    RosterImportFailed = 5002,
    ScheduleNotFound = 5100,
    ScheduleDateRangeInvalid = 5101,
    ScheduleReferenceInvalid = 5102,

    // 入驻 / 账单 / 测评
    ApplicationNotFound = 6000,
    ApplicationAlreadyExists = 6001,
    ApplicationAlreadyProcessed = 6002,
    BillNotFound = 6100,
    BillInvalid = 6101,
    AssessmentNotFound = 6200,
    AttemptInvalid = 6201,

    // 文件
    FileNotFound = 7000,
    FileUploadFailed = 7001,
    FileTypeNotAllowed = 7002,
    FileSizeExceeded = 7003,
}
