//! 名单导入
//!
//! 批量创建学员与批次名单导入共用这里的读取和开户逻辑。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use tracing::info;

use super::UserService;
use super::create::{NewAccount, provision_account};
use crate::config::AppConfig;
use crate::errors::ParcError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{User, UserRole},
        responses::{BulkCreateStudentsResponse, ImportRowError},
    },
};
use crate::services::files::{FileContent, FileSink, UploadForm, read_upload_form};
use crate::services::mail::Mailer;
use crate::services::mailer_from_request;
use crate::storage::Storage;
use crate::utils::roster::{RosterRow, parse_roster};

const ROSTER_EXTENSIONS: &[&str] = &["csv", "xlsx"];

/// 读取 multipart 中的名单文件（字段 `file`）并解析
pub(crate) async fn read_roster(
    payload: &mut Multipart,
) -> Result<(UploadForm, Vec<RosterRow>), HttpResponse> {
    let max_size = AppConfig::get().upload.roster_max_size;
    let mut form = read_upload_form(payload, "file", ROSTER_EXTENSIONS, max_size, FileSink::Memory)
        .await
        .map_err(|e| e.into_response())?;

    let Some(file) = form.file.take() else {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::RosterImportFailed,
            "A roster file is required.",
        )));
    };
    let FileContent::Memory(data) = &file.content else {
        return Err(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::RosterImportFailed,
            "Roster file was not buffered",
        )));
    };

    let rows = parse_roster(data, &file.original_name).map_err(|e| {
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::RosterImportFailed, e.message()))
    })?;
    Ok((form, rows))
}

/// 名单逐行处理的结果
#[derive(Debug, Default)]
pub(crate) struct RosterOutcome {
    /// 新建的学员
    pub created: Vec<User>,
    /// 邮箱已存在的账号（任意角色）及其行号
    pub existing: Vec<(usize, User)>,
    pub errors: Vec<ImportRowError>,
}

pub(crate) fn row_error(row: &RosterRow, reason: impl Into<String>) -> ImportRowError {
    ImportRowError {
        row: row.row,
        email: Some(row.email.clone()).filter(|email| !email.is_empty()),
        reason: reason.into(),
    }
}

/// 为名单中尚不存在的邮箱开通学员账号
///
/// 同一文件中重复的邮箱只处理第一次出现的行。
pub(crate) async fn provision_roster(
    storage: &dyn Storage,
    mailer: &dyn Mailer,
    rows: Vec<RosterRow>,
    college: Option<String>,
) -> crate::errors::Result<RosterOutcome> {
    let mut outcome = RosterOutcome::default();
    let mut seen = HashSet::new();

    for row in rows {
        if let Err(reason) = row.validate() {
            outcome.errors.push(row_error(&row, reason));
            continue;
        }
        if !seen.insert(row.email.clone()) {
            outcome
                .errors
                .push(row_error(&row, "Duplicate email in the roster file."));
            continue;
        }

        if let Some(user) = storage.get_user_by_email(&row.email).await? {
            outcome.existing.push((row.row, user));
            continue;
        }

        let account = NewAccount {
            name: row.name.clone(),
            email: row.email.clone(),
            role: UserRole::Student,
            phone: row.phone.clone(),
            expertise: None,
            experience: None,
            college: college.clone(),
            education: None,
        };
        match provision_account(storage, mailer, account).await {
            Ok(user) => outcome.created.push(user),
            Err(ParcError::Conflict(_)) => {
                if let Some(user) = storage.get_user_by_email(&row.email).await? {
                    outcome.existing.push((row.row, user));
                }
            }
            Err(e) => outcome.errors.push(row_error(&row, e.message())),
        }
    }

    Ok(outcome)
}

pub async fn bulk_create_students(
    service: &UserService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mailer = mailer_from_request(request);

    let (form, rows) = match read_roster(&mut payload).await {
        Ok(parsed) => parsed,
        Err(response) => return Ok(response),
    };
    let college = form.text("college").map(str::to_string);

    let outcome =
        match provision_roster(storage.as_ref(), mailer.as_ref(), rows, college).await {
            Ok(outcome) => outcome,
            Err(e) => return Ok(crate::services::internal_error("Roster import failed", e)),
        };

    info!(
        "Roster import: {} created, {} skipped, {} errors",
        outcome.created.len(),
        outcome.existing.len(),
        outcome.errors.len()
    );

    let response = BulkCreateStudentsResponse {
        created: outcome.created,
        skipped: outcome
            .existing
            .into_iter()
            .map(|(_, user)| user.email)
            .collect(),
        errors: outcome.errors,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Students imported successfully",
    )))
}
