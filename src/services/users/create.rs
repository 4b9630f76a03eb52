use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::errors::{ParcError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{User, UserRole, UserStatus, split_full_name},
        requests::{CreateUserRequest, NewUser},
    },
};
use crate::services::mail::{Mailer, deliver, templates};
use crate::services::{internal_error, mailer_from_request};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_temp_password;
use crate::utils::validate::{normalize_email, validate_email, validate_phone};

/// 临时密码长度
pub const TEMP_PASSWORD_LEN: usize = 12;

/// 新账号的资料，邮箱需已规范化
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub experience: Option<i32>,
    pub college: Option<String>,
    pub education: Option<String>,
}

/// 创建账号并按角色处理凭据
///
/// 讲师创建为停用状态，首次排课时才会收到凭据；学员立即收到临时密码，
/// 并在首次登录时被要求修改；管理员与员工收到不强制修改的登录信息。
pub async fn provision_account(
    storage: &dyn Storage,
    mailer: &dyn Mailer,
    account: NewAccount,
) -> Result<User> {
    let (first_name, last_name) = split_full_name(&account.name);
    let is_trainer = account.role == UserRole::Trainer;
    let is_student = account.role == UserRole::Student;

    let temp_password = generate_temp_password(TEMP_PASSWORD_LEN);
    let password_hash = hash_password(&temp_password)?;

    let user = storage
        .create_user(NewUser {
            email: account.email,
            password_hash,
            role: account.role,
            status: if is_trainer {
                UserStatus::Inactive
            } else {
                UserStatus::Active
            },
            first_name,
            last_name,
            phone: account.phone,
            expertise: account.expertise,
            experience: account.experience,
            college: account.college,
            education: account.education,
            resume_path: None,
            must_change_password: is_student,
        })
        .await?;

    let credentials = match user.role {
        UserRole::Trainer => None,
        UserRole::Student => Some(templates::student_credentials(
            &user.first_name,
            &user.email,
            &temp_password,
        )),
        UserRole::Admin | UserRole::Employee => Some(templates::account_credentials(
            &user.first_name,
            &user.email,
            &temp_password,
        )),
    };
    if let Some(message) = credentials {
        deliver(mailer, message).await;
    }

    info!("Created {} account {} ({})", user.role, user.id, user.email);
    Ok(user)
}

fn validate_request(user_data: &CreateUserRequest) -> std::result::Result<(), &'static str> {
    if user_data.name.trim().is_empty() {
        return Err("Name is required.");
    }
    validate_email(user_data.email.trim())?;
    if let Some(phone) = user_data.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        validate_phone(phone)?;
    }
    Ok(())
}

pub async fn create_user(
    service: &UserService,
    user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_request(&user_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);
    let email = normalize_email(&user_data.email);

    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "A user with this email already exists.",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("User creation failed", e)),
    }

    // 学员批次需先确认存在
    let batch_ids = if user_data.role == UserRole::Student {
        user_data.batches.clone()
    } else {
        Vec::new()
    };
    for batch_id in &batch_ids {
        match storage.get_batch_by_id(*batch_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BatchNotFound,
                    format!("Batch {batch_id} does not exist."),
                )));
            }
            Err(e) => return Ok(internal_error("User creation failed", e)),
        }
    }

    let account = NewAccount {
        name: user_data.name,
        email,
        role: user_data.role,
        phone: user_data.phone.filter(|p| !p.trim().is_empty()),
        expertise: user_data.expertise,
        experience: user_data.experience,
        college: user_data.college,
        education: user_data.education,
    };

    let user = match provision_account(storage.as_ref(), mailer.as_ref(), account).await {
        Ok(user) => user,
        Err(ParcError::Conflict(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "A user with this email already exists.",
            )));
        }
        Err(e) => {
            error!("User creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("User creation failed: {e}"),
                )),
            );
        }
    };

    for batch_id in &batch_ids {
        if let Err(e) = storage.add_batch_students(*batch_id, &[user.id]).await {
            return Ok(internal_error("Failed to enroll student", e));
        }
    }

    let user = if batch_ids.is_empty() {
        user
    } else {
        match storage.get_user_by_id(user.id).await {
            Ok(Some(user)) => user,
            Ok(None) => user,
            Err(e) => return Ok(internal_error("User creation failed", e)),
        }
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
}
