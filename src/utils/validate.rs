use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ()-]{5,19}$").expect("Invalid phone regex"));

/// 常见弱密码，大小写不敏感
const WEAK_PASSWORDS: &[&str] = &[
    "password1",
    "password123",
    "welcome123",
    "qwerty123",
    "admin123",
    "abcd1234",
    "changeme1",
];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Enter a valid email address.");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if !PHONE_RE.is_match(phone.trim()) {
        return Err("Enter a valid phone number.");
    }
    Ok(())
}

/// 邮箱统一小写、去空白后再存储和比较
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 密码策略：至少 8 位，包含大小写字母和数字，且不在弱密码列表中
///
/// 返回全部不满足的规则，便于前端一次性提示。
pub fn check_password_policy(password: &str) -> Vec<&'static str> {
    let rules: [(bool, &'static str); 4] = [
        (
            password.chars().count() >= 8,
            "Password must be at least 8 characters long.",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Password must contain an uppercase letter.",
        ),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Password must contain a lowercase letter.",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain a digit.",
        ),
    ];

    let mut violations: Vec<&'static str> = rules
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, message)| *message)
        .collect();

    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        violations.push("Password is too common.");
    }
    violations
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let violations = check_password_policy(password);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("trainer@college.edu").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("no-at-sign.example.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_phone_shapes() {
        assert!(validate_phone("+91 98765 43210").is_ok());
        assert!(validate_phone("(020) 555-0199").is_ok());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_password_policy_reports_every_violation() {
        assert!(validate_password("Str0ngEnough").is_ok());

        let violations = check_password_policy("abc");
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(&"Password must contain a digit."));

        let err = validate_password("Password1").unwrap_err();
        assert!(err.contains("too common"));
    }
}
