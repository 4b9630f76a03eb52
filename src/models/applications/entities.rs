use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 申请状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "application.ts")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Declined,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Declined => "DECLINED",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "APPROVED" => Ok(ApplicationStatus::Approved),
            "DECLINED" => Ok(ApplicationStatus::Declined),
            _ => Err(format!("Invalid application status: {s}")),
        }
    }
}

// 讲师入驻申请
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "application.ts")]
pub struct TrainerApplication {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: i32,
    pub tech_stack: String,
    pub expertise_domains: String,
    pub resume_url: String,
    pub status: ApplicationStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
