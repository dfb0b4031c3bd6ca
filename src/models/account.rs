//! Account records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User privilege level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdminType {
    #[serde(rename = "Regular User")]
    #[default]
    RegularUser,
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Super Admin")]
    SuperAdmin,
}

/// Which problems an admin may edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProblemPermission {
    #[default]
    None,
    Own,
    All,
}

/// Author reference embedded in other records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedBy {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub real_name: Option<String>,
}

/// User account as the backend serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub admin_type: AdminType,
    #[serde(default)]
    pub problem_permission: ProblemPermission,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub two_factor_auth: bool,
    #[serde(default)]
    pub open_api: bool,
    #[serde(default)]
    pub is_disabled: bool,
}

impl UserInfo {
    /// Check if user has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self.admin_type, AdminType::Admin | AdminType::SuperAdmin)
    }

    pub fn is_super_admin(&self) -> bool {
        self.admin_type == AdminType::SuperAdmin
    }

    /// Check if user can manage problems at all
    pub fn can_manage_problems(&self) -> bool {
        self.is_super_admin() || self.problem_permission != ProblemPermission::None
    }
}

/// Profile of the logged-in (or a named) user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<u64>,
    pub user: UserInfo,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub accepted_number: u64,
    #[serde(default)]
    pub submission_number: u64,
    #[serde(default)]
    pub total_score: u64,
}

/// One login session of the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_key: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_session: bool,
}

/// Result of `check_username_or_email`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameEmailCheck {
    #[serde(default)]
    pub username: bool,
    #[serde(default)]
    pub email: bool,
}

/// Result of `tfa_required`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfaRequired {
    pub result: bool,
}

/// One row of the user rank list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub user: CreatedBy,
    #[serde(default)]
    pub accepted_number: u64,
    #[serde(default)]
    pub submission_number: u64,
    #[serde(default)]
    pub total_score: u64,
}
