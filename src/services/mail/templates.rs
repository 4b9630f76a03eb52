use chrono::{DateTime, Utc};

use super::MailMessage;
use crate::config::AppConfig;

const SIGNATURE: &str = "Best regards,\nThe Parc Platform Team";

fn login_hint() -> String {
    format!("You can log in at {}.", AppConfig::get().app.frontend_url)
}

/// 新学员账号的临时凭据
pub fn student_credentials(first_name: &str, email: &str, password: &str) -> MailMessage {
    MailMessage {
        to: email.to_string(),
        subject: "Your Parc Platform Account Credentials".to_string(),
        body: format!(
            "Hi {first_name},\n\n\
             An account has been created for you on the Parc Platform. Please use the following \
             temporary credentials to log in. You will be required to change your password upon \
             your first login.\n\n\
             Username: {email}\n\
             Password: {password}\n\n\
             {}\n\n{SIGNATURE}",
            login_hint()
        ),
    }
}

/// 管理员或员工账号的初始凭据，不要求首次登录修改
pub fn account_credentials(first_name: &str, email: &str, password: &str) -> MailMessage {
    MailMessage {
        to: email.to_string(),
        subject: "Your Parc Platform Login Details".to_string(),
        body: format!(
            "Hi {first_name},\n\n\
             An account has been created for you on the Parc Platform. Your login details are \
             below. You can change your password at any time from your profile.\n\n\
             Username: {email}\n\
             Password: {password}\n\n\
             {}\n\n{SIGNATURE}",
            login_hint()
        ),
    }
}

/// 讲师被排课后重新激活时的凭据，附带访问截止时间
pub fn trainer_credentials(
    first_name: &str,
    email: &str,
    password: &str,
    access_expiry: DateTime<Utc>,
) -> MailMessage {
    MailMessage {
        to: email.to_string(),
        subject: "Your Parc Platform Login Credentials".to_string(),
        body: format!(
            "Hi {first_name},\n\n\
             You have been assigned to a new schedule. Please use the following temporary \
             credentials to log in.\n\n\
             Username: {email}\n\
             Password: {password}\n\n\
             Your access will be valid until: {}\n\n\
             {}\n\n{SIGNATURE}",
            access_expiry.format("%Y-%m-%d %H:%M"),
            login_hint()
        ),
    }
}

/// 申请通过通知，不含凭据
pub fn application_approved(first_name: &str, email: &str) -> MailMessage {
    MailMessage {
        to: email.to_string(),
        subject: "Your Application has been Approved!".to_string(),
        body: format!(
            "Hi {first_name},\n\n\
             Congratulations! Your application to become a trainer at Parc Platform has been \
             approved. You will receive another email with your login credentials once you have \
             been assigned to your first schedule.\n\n{SIGNATURE}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_trainer_credentials_include_expiry() {
        let expiry = Utc.with_ymd_and_hms(2025, 7, 1, 17, 30, 0).unwrap();
        let message = trainer_credentials("Grace", "grace@example.com", "Tmp12345", expiry);
        assert_eq!(message.to, "grace@example.com");
        assert!(message.body.contains("Password: Tmp12345"));
        assert!(message.body.contains("valid until: 2025-07-01 17:30"));
    }

    #[test]
    fn test_account_credentials_do_not_mention_students() {
        let message = account_credentials("Ada", "ada@example.com", "Tmp12345");
        assert!(message.body.contains("Password: Tmp12345"));
        assert!(!message.body.contains("required to change"));
        assert_ne!(message.subject, student_credentials("Ada", "ada@example.com", "x").subject);
    }

    #[test]
    fn test_approval_has_no_credentials() {
        let message = application_approved("Grace", "grace@example.com");
        assert!(!message.body.contains("Password"));
        assert!(message.subject.contains("Approved"));
    }
}
