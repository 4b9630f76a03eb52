use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Admin,    // 管理员
    Trainer,  // 讲师
    Student,  // 学员
    Employee, // 员工
}

impl UserRole {
    pub const ADMIN: &'static str = "ADMIN";
    pub const TRAINER: &'static str = "TRAINER";
    pub const STUDENT: &'static str = "STUDENT";
    pub const EMPLOYEE: &'static str = "EMPLOYEE";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    /// 可以维护教学内容（资料、测评）的角色
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Trainer]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Trainer, &Self::Student, &Self::Employee]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::Trainer => Self::TRAINER,
            UserRole::Student => Self::STUDENT,
            UserRole::Employee => Self::EMPLOYEE,
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    /// 大小写不敏感，兼容旧客户端发送的小写角色
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::TRAINER => Ok(UserRole::Trainer),
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::EMPLOYEE => Ok(UserRole::Employee),
            _ => Err(format!(
                "Invalid user role: '{s}'. Supported roles: ADMIN, TRAINER, STUDENT, EMPLOYEE"
            )),
        }
    }
}

// 用户状态
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserStatus {
    Active,   // 可登录
    Inactive, // 停用（讲师无排课时也会被置为停用）
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!(
                "Invalid user status: '{s}'. Supported statuses: active, inactive"
            )),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub expertise: Option<String>,
    pub experience: Option<i32>,
    pub college: Option<String>,
    pub education: Option<String>,
    pub has_resume: bool,
    pub access_expiry_date: Option<chrono::DateTime<chrono::Utc>>,
    pub must_change_password: bool,
    #[serde(default)]
    pub assigned_materials: Vec<i64>,
    #[serde(default)]
    pub assigned_assessments: Vec<i64>,
    /// 学员所在批次
    #[serde(default)]
    pub batches: Vec<i64>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// 讲师访问期已过
    pub fn access_expired_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.role == UserRole::Trainer && self.access_expiry_date.is_some_and(|expiry| expiry < now)
    }
}

/// 将 "名 姓" 拆成名与姓，只在第一个空格处拆分
pub fn split_full_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (name.to_string(), String::new()),
    }
}

pub fn join_full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserRole::Trainer).unwrap(),
            "\"TRAINER\""
        );
        let role: UserRole = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, UserRole::Student);
        assert!(serde_json::from_str::<UserRole>("\"teacher\"").is_err());
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("Ada  Lovelace King"),
            ("Ada".to_string(), "Lovelace King".to_string())
        );
        assert_eq!(split_full_name("Plato"), ("Plato".to_string(), String::new()));
        assert_eq!(join_full_name("Plato", ""), "Plato");
    }
}
