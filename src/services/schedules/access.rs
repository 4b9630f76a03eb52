//! 讲师访问窗口
//!
//! 讲师只能在最晚一次（当前或未来）排课结束前登录。每次排课变更后重新计算：
//! 有排课则激活并把截止时间设为最晚的结束时间，重新激活时发放新的临时密码；
//! 没有排课则停用并清空截止时间，已失效的账号同时轮换密码，旧密码不再可用。

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::errors::Result;
use crate::models::users::{
    entities::{User, UserStatus},
    requests::AccessUpdate,
};
use crate::services::mail::{Mailer, deliver, templates};
use crate::services::users::create::TEMP_PASSWORD_LEN;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_temp_password;

/// 访问窗口的计算结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPlan {
    pub status: UserStatus,
    pub access_expiry_date: Option<DateTime<Utc>>,
    /// 是否轮换密码，有截止时间时新密码随邮件发出
    pub rotate_password: bool,
}

/// 根据讲师当前状态与最晚排课结束时间计算新的访问窗口
pub fn plan_access_window(
    trainer: &User,
    latest_end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AccessPlan {
    let lapsed = !trainer.is_active()
        || trainer.access_expiry_date.is_some_and(|expiry| expiry < now);

    match latest_end {
        Some(end) => AccessPlan {
            status: UserStatus::Active,
            access_expiry_date: Some(end),
            rotate_password: lapsed,
        },
        None => AccessPlan {
            status: UserStatus::Inactive,
            access_expiry_date: None,
            rotate_password: lapsed,
        },
    }
}

/// 重新计算并保存讲师的访问窗口，发放新密码时发送凭据邮件
pub async fn refresh_trainer_access(
    storage: &dyn Storage,
    mailer: &dyn Mailer,
    trainer_id: i64,
) -> Result<Option<User>> {
    let Some(trainer) = storage.get_user_by_id(trainer_id).await? else {
        warn!("Access refresh skipped: trainer {} not found", trainer_id);
        return Ok(None);
    };

    let now = Utc::now();
    let latest_end = storage.latest_schedule_end(trainer_id, now).await?;
    let plan = plan_access_window(&trainer, latest_end, now);

    let temp_password = plan
        .rotate_password
        .then(|| generate_temp_password(TEMP_PASSWORD_LEN));
    let password_hash = temp_password.as_deref().map(hash_password).transpose()?;

    let updated = storage
        .update_user_access(
            trainer_id,
            AccessUpdate {
                status: plan.status.clone(),
                access_expiry_date: plan.access_expiry_date,
                password_hash,
            },
        )
        .await?;

    info!(
        "Trainer {} access window: status={}, expiry={:?}",
        trainer_id, plan.status, plan.access_expiry_date
    );

    if let (Some(password), Some(expiry)) = (temp_password, plan.access_expiry_date) {
        deliver(
            mailer,
            templates::trainer_credentials(&trainer.first_name, &trainer.email, &password, expiry),
        )
        .await;
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use chrono::Duration;

    fn trainer(status: UserStatus, expiry: Option<DateTime<Utc>>) -> User {
        let now = Utc::now();
        User {
            id: 9,
            username: "t@example.com".to_string(),
            email: "t@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Trainer,
            status,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            full_name: "Grace Hopper".to_string(),
            phone: None,
            expertise: None,
            experience: None,
            college: None,
            education: None,
            has_resume: false,
            access_expiry_date: expiry,
            must_change_password: false,
            assigned_materials: Vec::new(),
            assigned_assessments: Vec::new(),
            batches: Vec::new(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_inactive_trainer_is_activated_with_new_password() {
        let now = Utc::now();
        let end = now + Duration::days(5);
        let plan = plan_access_window(&trainer(UserStatus::Inactive, None), Some(end), now);
        assert_eq!(plan.status, UserStatus::Active);
        assert_eq!(plan.access_expiry_date, Some(end));
        assert!(plan.rotate_password);
    }

    #[test]
    fn test_active_trainer_keeps_password_when_window_moves() {
        let now = Utc::now();
        let current = trainer(UserStatus::Active, Some(now + Duration::days(1)));
        let end = now + Duration::days(30);
        let plan = plan_access_window(&current, Some(end), now);
        assert_eq!(plan.access_expiry_date, Some(end));
        assert!(!plan.rotate_password);
    }

    #[test]
    fn test_expired_trainer_gets_new_password() {
        let now = Utc::now();
        let current = trainer(UserStatus::Active, Some(now - Duration::hours(1)));
        let plan = plan_access_window(&current, Some(now + Duration::days(2)), now);
        assert!(plan.rotate_password);
    }

    #[test]
    fn test_no_schedule_deactivates() {
        let now = Utc::now();
        let current = trainer(UserStatus::Active, Some(now + Duration::days(3)));
        let plan = plan_access_window(&current, None, now);
        assert_eq!(plan.status, UserStatus::Inactive);
        assert_eq!(plan.access_expiry_date, None);
        assert!(!plan.rotate_password);
    }

    #[test]
    fn test_lapsed_trainer_without_schedule_rotates_password() {
        let now = Utc::now();
        let current = trainer(UserStatus::Active, Some(now - Duration::days(1)));
        let plan = plan_access_window(&current, None, now);
        assert_eq!(plan.status, UserStatus::Inactive);
        assert_eq!(plan.access_expiry_date, None);
        assert!(plan.rotate_password);
    }
}
