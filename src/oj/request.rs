//! Judge front end request records

use reqwest::Method;
use serde::{Serialize, Serializer};
use validator::Validate;

use crate::constants::{MAX_AI_MESSAGE_LENGTH, MAX_SOURCE_CODE_SIZE, MAX_USERNAME_LENGTH};
use crate::models::{Difficulty, NodeStatus};

/// Booleans the backend expects as `"1"` / `"0"` query values
fn flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "1" } else { "0" })
}

// =============================================================================
// Account
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Only needed when `tfa_required` says so
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfa_code: Option<String>,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub captcha: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UsernameOrEmail<'a> {
    pub username: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// Partial profile update; unset fields are left alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// What a `two_factor_auth` call does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TfaAction {
    /// Fetch the QR code for setup
    Setup,
    /// Confirm a code and turn 2FA on
    Enable,
    /// Confirm a code and turn 2FA off
    Disable,
}

impl TfaAction {
    pub fn method(self) -> Method {
        match self {
            TfaAction::Setup => Method::GET,
            TfaAction::Enable => Method::POST,
            TfaAction::Disable => Method::PUT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TfaCode<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
}

/// Password reset mail request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ApplyResetPasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub captcha: String,
}

/// Password reset with a mailed token
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub captcha: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfa_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ChangeEmailRequest {
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(email)]
    pub new_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tfa_code: Option<String>,
}

// =============================================================================
// Problems & contests
// =============================================================================

/// Problem list filters; falsy values are not sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProblemSearch {
    pub keyword: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tag: Option<String>,
}

/// Contest list filters; falsy values are not sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContestSearch {
    pub keyword: Option<String>,
    pub rule_type: Option<String>,
    /// Status code, see [`crate::models::ContestStatus::code`]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ContestPassword<'a> {
    pub contest_id: u64,
    pub password: &'a str,
}

// =============================================================================
// Submissions & ranks
// =============================================================================

/// Code submission
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SubmitCodeRequest {
    pub problem_id: u64,
    #[validate(length(min = 1))]
    pub language: String,
    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

/// Submission list filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionQuery {
    /// Only the current user's submissions
    #[serde(serialize_with = "flag")]
    pub myself: bool,
    pub result: Option<i64>,
    pub username: Option<String>,
    /// Display id of the problem
    pub problem_id: Option<String>,
    pub contest_id: Option<u64>,
}

/// Share toggle for one submission
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSubmissionRequest {
    pub id: String,
    pub shared: bool,
}

/// Contest scoreboard query
#[derive(Debug, Clone, Serialize)]
pub struct ContestRankQuery {
    pub contest_id: u64,
    pub offset: u64,
    pub limit: u64,
    /// Bypass the backend rank cache
    #[serde(serialize_with = "flag")]
    pub force_refresh: bool,
}

/// Mark a first-accepted balloon as handed out
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAcInfoRequest {
    pub contest_id: u64,
    pub rank_id: u64,
    pub problem_id: String,
    pub checked: bool,
}

// =============================================================================
// AI assistant
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateConversationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<u64>,
}

/// One user turn in a conversation
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SendMessageRequest {
    pub conversation_id: u64,
    #[validate(length(min = 1, max = MAX_AI_MESSAGE_LENGTH))]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<u64>,
}

/// Code handed to the assistant for explanation, review or diagnosis
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CodeRequest {
    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProblemRef {
    pub problem_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubmissionRef<'a> {
    pub submission_id: &'a str,
}

/// Reaction to one recommended problem
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationFeedbackRequest {
    pub problem_id: u64,
    pub helpful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Progress update for a learning path node
#[derive(Debug, Clone, Serialize)]
pub struct UpdateNodeRequest {
    pub status: NodeStatus,
}
