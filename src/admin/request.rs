//! Admin console request records

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::constants::{
    MAX_ANNOUNCEMENT_TITLE_LENGTH, MAX_CONTEST_TITLE_LENGTH, MAX_PROBLEM_TITLE_LENGTH,
    MAX_USERNAME_LENGTH,
};
use crate::models::{AdminType, Difficulty, IoMode, ProblemPermission, Sample, TestCaseScore};

/// Admin login request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Create announcement request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = MAX_ANNOUNCEMENT_TITLE_LENGTH))]
    pub title: String,
    pub content: String,
    pub visible: bool,
}

/// Update announcement request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdateAnnouncementRequest {
    pub id: u64,
    #[validate(length(min = 1, max = MAX_ANNOUNCEMENT_TITLE_LENGTH))]
    pub title: String,
    pub content: String,
    pub visible: bool,
}

/// Edit user request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct EditUserRequest {
    pub id: u64,
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,
    pub real_name: Option<String>,
    #[validate(email)]
    pub email: String,
    /// Leave empty to keep the current password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub admin_type: AdminType,
    pub problem_permission: ProblemPermission,
    pub open_api: bool,
    pub two_factor_auth: bool,
    pub is_disabled: bool,
}

/// One imported account: `[username, password, email]` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedUser(pub String, pub String, pub String);

/// Import users request
#[derive(Debug, Clone, Serialize)]
pub struct ImportUsersRequest {
    pub users: Vec<ImportedUser>,
}

/// Bulk account generation request
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_generate_range"))]
pub struct GenerateUserRequest {
    pub prefix: String,
    pub suffix: String,
    pub number_from: u32,
    pub number_to: u32,
    #[validate(range(min = 1, max = 16))]
    pub password_length: u8,
}

fn validate_generate_range(req: &GenerateUserRequest) -> Result<(), validator::ValidationError> {
    if req.number_from > req.number_to {
        return Err(validator::ValidationError::new("number_from must not exceed number_to"));
    }
    Ok(())
}

/// SMTP settings request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SmtpConfigRequest {
    #[validate(length(min = 1))]
    pub server: String,
    #[validate(email)]
    pub email: String,
    pub port: u16,
    pub tls: bool,
    /// Omit on edit to keep the stored password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// SMTP test request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SmtpTestRequest {
    #[validate(email)]
    pub email: String,
}

/// Update judge server request
#[derive(Debug, Clone, Serialize)]
pub struct UpdateJudgeServerRequest {
    pub id: u64,
    pub is_disabled: bool,
}

/// Contest fields shared by create and edit
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = "validate_contest_window"))]
pub struct ContestPayload {
    #[validate(length(min = 1, max = MAX_CONTEST_TITLE_LENGTH))]
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub rule_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub visible: bool,
    pub real_time_rank: bool,
    pub allowed_ip_ranges: Vec<String>,
}

fn validate_contest_window(c: &ContestPayload) -> Result<(), validator::ValidationError> {
    if c.end_time <= c.start_time {
        return Err(validator::ValidationError::new("start_time must be before end_time"));
    }
    if !crate::constants::rule_types::ALL.contains(&c.rule_type.as_str()) {
        return Err(validator::ValidationError::new("invalid rule_type"));
    }
    Ok(())
}

/// Edit contest request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct EditContestRequest {
    pub id: u64,
    #[serde(flatten)]
    #[validate(nested)]
    pub contest: ContestPayload,
}

/// Create contest announcement request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateContestAnnouncementRequest {
    pub contest_id: u64,
    #[validate(length(min = 1, max = MAX_ANNOUNCEMENT_TITLE_LENGTH))]
    pub title: String,
    pub content: String,
    pub visible: bool,
}

/// Update contest announcement request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdateContestAnnouncementRequest {
    pub id: u64,
    #[validate(length(min = 1, max = MAX_ANNOUNCEMENT_TITLE_LENGTH))]
    pub title: String,
    pub content: String,
    pub visible: bool,
}

/// Problem fields shared by public and contest problems
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ProblemPayload {
    #[serde(rename = "_id")]
    #[validate(length(min = 1))]
    pub display_id: String,
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,
    pub description: String,
    pub input_description: String,
    pub output_description: String,
    #[validate(length(min = 1))]
    pub samples: Vec<Sample>,
    pub test_case_id: String,
    pub test_case_score: Vec<TestCaseScore>,
    pub hint: String,
    /// Milliseconds
    #[validate(range(min = 1))]
    pub time_limit: u64,
    /// Megabytes
    #[validate(range(min = 1))]
    pub memory_limit: u64,
    pub difficulty: Difficulty,
    #[validate(length(min = 1))]
    pub tags: Vec<String>,
    #[validate(length(min = 1))]
    pub languages: Vec<String>,
    pub template: BTreeMap<String, String>,
    pub spj: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spj_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spj_code: Option<String>,
    pub spj_compile_ok: bool,
    pub rule_type: String,
    pub io_mode: IoMode,
    pub visible: bool,
    pub share_submission: bool,
    pub source: String,
    /// Set for contest problems
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<u64>,
}

/// Edit problem request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct EditProblemRequest {
    pub id: u64,
    #[serde(flatten)]
    #[validate(nested)]
    pub problem: ProblemPayload,
}

/// Special-judge compile request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CompileSpjRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[validate(length(min = 1))]
    pub spj_code: String,
    pub spj_language: String,
}

/// Admin problem list filter
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProblemListQuery {
    pub offset: u64,
    pub limit: u64,
    pub keyword: Option<String>,
    pub rule_type: Option<String>,
}

/// Admin contest problem list filter
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContestProblemListQuery {
    pub contest_id: u64,
    pub offset: u64,
    pub limit: u64,
    pub keyword: Option<String>,
}

/// Copy a contest problem into the public set
#[derive(Debug, Clone, Serialize, Validate)]
pub struct MakeContestProblemPublicRequest {
    pub id: u64,
    #[validate(length(min = 1))]
    pub display_id: String,
}

/// Add a public problem to a contest
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AddProblemFromPublicRequest {
    pub contest_id: u64,
    pub problem_id: u64,
    #[validate(length(min = 1))]
    pub display_id: String,
}

/// Export problems request
#[derive(Debug, Clone, Serialize)]
pub struct ExportProblemsRequest {
    pub problem_id: Vec<u64>,
}

/// Tag generation request
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateProblemTagsRequest {
    /// Empty means every problem without tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problem_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
}

/// Bulk problem operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Delete,
    MakeVisible,
    MakeInvisible,
}

/// Bulk problem operation request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct BulkOperationRequest {
    pub operation: BulkAction,
    #[validate(length(min = 1))]
    pub problem_ids: Vec<u64>,
}

/// AI problem generation request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct GenerateAiProblemRequest {
    #[validate(length(min = 1))]
    pub knowledge_point: String,
    pub difficulty: Difficulty,
    pub auto_adjust: bool,
    pub generate_test_cases: bool,
    #[validate(range(min = 1, max = 50))]
    pub test_case_count: u32,
}

impl Default for GenerateAiProblemRequest {
    fn default() -> Self {
        Self {
            knowledge_point: String::new(),
            difficulty: Difficulty::Mid,
            auto_adjust: true,
            generate_test_cases: true,
            test_case_count: 5,
        }
    }
}

/// AI model fields shared by create and update
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AiModelPayload {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub provider: String,
    #[validate(length(min = 1, max = 128))]
    pub api_key: String,
    #[validate(length(min = 1, max = 128))]
    pub model: String,
    pub is_active: bool,
    pub config: Value,
}

/// Update AI model request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct UpdateAiModelRequest {
    pub id: u64,
    #[serde(flatten)]
    #[validate(nested)]
    pub model: AiModelPayload,
}

/// Assignment fields for create and update
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AssignmentPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: Option<String>,
    pub is_personalized: bool,
    pub rule_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Attach a problem to an assignment
#[derive(Debug, Clone, Serialize)]
pub struct AddAssignmentProblemRequest {
    pub problem_id: u64,
    /// OI rule only
    pub score: i64,
}

/// Hand an assignment out to students
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignStudentsRequest {
    pub student_ids: Vec<u64>,
    pub all_students: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_imported_user_wire_shape() {
        let req = ImportUsersRequest {
            users: vec![ImportedUser("u1".into(), "p1".into(), "u1@x.org".into())],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"users": [["u1", "p1", "u1@x.org"]]})
        );
    }

    #[test]
    fn test_contest_window_validation() {
        let start = Utc::now();
        let mut contest = ContestPayload {
            title: "Weekly".into(),
            description: "".into(),
            start_time: start,
            end_time: start + Duration::hours(2),
            rule_type: "ACM".into(),
            password: None,
            visible: true,
            real_time_rank: true,
            allowed_ip_ranges: vec![],
        };
        assert!(contest.validate().is_ok());

        contest.end_time = start;
        assert!(contest.validate().is_err());

        contest.end_time = start + Duration::hours(2);
        contest.rule_type = "IOI".into();
        assert!(contest.validate().is_err());
    }

    #[test]
    fn test_edit_contest_flattens() {
        let start = Utc::now();
        let req = EditContestRequest {
            id: 4,
            contest: ContestPayload {
                title: "Weekly".into(),
                description: "d".into(),
                start_time: start,
                end_time: start + Duration::hours(2),
                rule_type: "OI".into(),
                password: None,
                visible: false,
                real_time_rank: false,
                allowed_ip_ranges: vec![],
            },
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["title"], "Weekly");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_generate_range_validation() {
        let mut req = GenerateUserRequest {
            prefix: "stu".into(),
            suffix: "".into(),
            number_from: 10,
            number_to: 1,
            password_length: 8,
        };
        assert!(req.validate().is_err());
        req.number_to = 20;
        assert!(req.validate().is_ok());
    }
}
