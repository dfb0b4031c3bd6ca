//! Admin console endpoint wrappers

use std::sync::Arc;

use serde_json::{Value, json};

use crate::{
    config::ApiConfig,
    constants::{ADMIN_NETWORK_ERROR_MESSAGE, ADMIN_REQUEST_ERROR_PREFIX},
    dispatcher::Dispatcher,
    envelope::EnvelopeMode,
    error::ClientResult,
    models::{
        Ack, AiModel, Announcement, Assignment, AssignmentListing, AssignmentProblem, ContestInfo,
        InvalidTestCase, JudgeServerList, LanguagesInfo, Paginated, Problem, ProblemTag, Profile,
        SessionInfo, SmtpConfig, StudentAssignment, UserInfo, WebsiteConfig,
    },
    notify::Notifier,
    params::{EmptyValuePolicy, QueryParams},
    transport::{ApiRequest, HttpTransport},
};

use super::{request::*, response::*};

/// Admin console API
#[derive(Debug, Clone)]
pub struct AdminApi {
    dispatcher: Dispatcher,
}

impl AdminApi {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Admin API over HTTP: compat envelopes, no login prompt on expiry
    pub fn connect(config: &ApiConfig, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let transport = HttpTransport::new(config)?;
        let dispatcher = Dispatcher::builder(Arc::new(transport))
            .notifier(notifier)
            .mode(EnvelopeMode::Compat)
            .network_error_message(ADMIN_NETWORK_ERROR_MESSAGE)
            .request_error_prefix(ADMIN_REQUEST_ERROR_PREFIX)
            .build();
        Ok(Self::new(dispatcher))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub async fn login(&self, request: &AdminLoginRequest) -> ClientResult<Ack> {
        self.dispatcher.check("login", request)?;
        self.dispatcher.post("login", request).await
    }

    pub async fn logout(&self) -> ClientResult<Ack> {
        self.dispatcher.get("logout", QueryParams::new()).await
    }

    /// `None` when nobody is logged in
    pub async fn get_profile(&self) -> ClientResult<Option<Profile>> {
        self.dispatcher.get("profile", QueryParams::new()).await
    }

    pub async fn get_sessions(&self) -> ClientResult<Vec<SessionInfo>> {
        self.dispatcher.get("sessions", QueryParams::new()).await
    }

    // =========================================================================
    // Announcements
    // =========================================================================

    pub async fn get_announcement_list(
        &self,
        offset: u64,
        limit: u64,
    ) -> ClientResult<Paginated<Announcement>> {
        self.dispatcher
            .get("admin/announcement", QueryParams::paging(offset, limit))
            .await
    }

    pub async fn delete_announcement(&self, id: u64) -> ClientResult<Ack> {
        self.dispatcher
            .delete("admin/announcement", QueryParams::new().with("id", id))
            .await
    }

    pub async fn update_announcement(
        &self,
        request: &UpdateAnnouncementRequest,
    ) -> ClientResult<Announcement> {
        self.dispatcher.check("admin/announcement", request)?;
        self.dispatcher.put("admin/announcement", request).await
    }

    pub async fn create_announcement(
        &self,
        request: &CreateAnnouncementRequest,
    ) -> ClientResult<Announcement> {
        self.dispatcher.check("admin/announcement", request)?;
        self.dispatcher.post("admin/announcement", request).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// `keyword` is only sent when non-empty
    pub async fn get_user_list(
        &self,
        offset: u64,
        limit: u64,
        keyword: Option<&str>,
    ) -> ClientResult<Paginated<UserInfo>> {
        let params = QueryParams::paging(offset, limit).merge_filtered(
            QueryParams::new().with("keyword", keyword),
            EmptyValuePolicy::DropFalsy,
        );
        self.dispatcher.get("admin/user", params).await
    }

    pub async fn get_user(&self, id: u64) -> ClientResult<UserInfo> {
        self.dispatcher
            .get("admin/user", QueryParams::new().with("id", id))
            .await
    }

    pub async fn edit_user(&self, request: &EditUserRequest) -> ClientResult<UserInfo> {
        self.dispatcher.check("admin/user", request)?;
        self.dispatcher.put("admin/user", request).await
    }

    /// Delete several users at once; ids travel comma-separated
    pub async fn delete_users(&self, ids: &[u64]) -> ClientResult<Ack> {
        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.dispatcher
            .delete("admin/user", QueryParams::new().with("id", joined))
            .await
    }

    pub async fn import_users(&self, users: Vec<ImportedUser>) -> ClientResult<Ack> {
        self.dispatcher
            .post("admin/user", &ImportUsersRequest { users })
            .await
    }

    pub async fn generate_user(&self, request: &GenerateUserRequest) -> ClientResult<GeneratedUsers> {
        self.dispatcher.check("admin/generate_user", request)?;
        self.dispatcher.post("admin/generate_user", request).await
    }

    // =========================================================================
    // Site configuration
    // =========================================================================

    pub async fn get_languages(&self) -> ClientResult<LanguagesInfo> {
        self.dispatcher.get("languages", QueryParams::new()).await
    }

    /// `None` until SMTP has been configured
    pub async fn get_smtp_config(&self) -> ClientResult<Option<SmtpConfig>> {
        self.dispatcher.get("admin/smtp", QueryParams::new()).await
    }

    pub async fn create_smtp_config(&self, request: &SmtpConfigRequest) -> ClientResult<Ack> {
        self.dispatcher.check("admin/smtp", request)?;
        self.dispatcher.post("admin/smtp", request).await
    }

    pub async fn edit_smtp_config(&self, request: &SmtpConfigRequest) -> ClientResult<Ack> {
        self.dispatcher.check("admin/smtp", request)?;
        self.dispatcher.put("admin/smtp", request).await
    }

    pub async fn test_smtp_config(&self, email: &str) -> ClientResult<ToolOutput> {
        let request = SmtpTestRequest {
            email: email.to_string(),
        };
        self.dispatcher.check("admin/smtp_test", &request)?;
        self.dispatcher.post("admin/smtp_test", &request).await
    }

    pub async fn get_website_config(&self) -> ClientResult<WebsiteConfig> {
        self.dispatcher.get("admin/website", QueryParams::new()).await
    }

    pub async fn edit_website_config(&self, config: &WebsiteConfig) -> ClientResult<Ack> {
        self.dispatcher.post("admin/website", config).await
    }

    pub async fn get_release_notes(&self) -> ClientResult<Vec<ReleaseNote>> {
        self.dispatcher.get("admin/versions", QueryParams::new()).await
    }

    pub async fn get_dashboard_info(&self) -> ClientResult<DashboardInfo> {
        self.dispatcher
            .get("admin/dashboard_info", QueryParams::new())
            .await
    }

    // =========================================================================
    // Judge servers & test cases
    // =========================================================================

    pub async fn get_judge_server(&self) -> ClientResult<JudgeServerList> {
        self.dispatcher
            .get("admin/judge_server", QueryParams::new())
            .await
    }

    pub async fn delete_judge_server(&self, hostname: &str) -> ClientResult<Ack> {
        self.dispatcher
            .delete(
                "admin/judge_server",
                QueryParams::new().with("hostname", hostname),
            )
            .await
    }

    pub async fn update_judge_server(&self, request: &UpdateJudgeServerRequest) -> ClientResult<Ack> {
        self.dispatcher.put("admin/judge_server", request).await
    }

    pub async fn get_invalid_test_case_list(&self) -> ClientResult<Vec<InvalidTestCase>> {
        self.dispatcher
            .get("admin/prune_test_case", QueryParams::new())
            .await
    }

    pub async fn prune_test_case(&self, id: &str) -> ClientResult<Ack> {
        self.dispatcher
            .delete("admin/prune_test_case", QueryParams::new().with("id", id))
            .await
    }

    // =========================================================================
    // Contests
    // =========================================================================

    pub async fn create_contest(&self, contest: &ContestPayload) -> ClientResult<ContestInfo> {
        self.dispatcher.check("admin/contest", contest)?;
        self.dispatcher.post("admin/contest", contest).await
    }

    pub async fn get_contest(&self, id: u64) -> ClientResult<ContestInfo> {
        self.dispatcher
            .get("admin/contest", QueryParams::new().with("id", id))
            .await
    }

    pub async fn edit_contest(&self, request: &EditContestRequest) -> ClientResult<ContestInfo> {
        self.dispatcher.check("admin/contest", request)?;
        self.dispatcher.put("admin/contest", request).await
    }

    /// `keyword` is only sent when non-empty
    pub async fn get_contest_list(
        &self,
        offset: u64,
        limit: u64,
        keyword: Option<&str>,
    ) -> ClientResult<Paginated<ContestInfo>> {
        let params = QueryParams::paging(offset, limit).merge_filtered(
            QueryParams::new().with("keyword", keyword),
            EmptyValuePolicy::DropFalsy,
        );
        self.dispatcher.get("admin/contest", params).await
    }

    pub async fn get_contest_announcement_list(
        &self,
        contest_id: u64,
    ) -> ClientResult<Vec<Announcement>> {
        self.dispatcher
            .get(
                "admin/contest/announcement",
                QueryParams::new().with("contest_id", contest_id),
            )
            .await
    }

    pub async fn create_contest_announcement(
        &self,
        request: &CreateContestAnnouncementRequest,
    ) -> ClientResult<Announcement> {
        self.dispatcher.check("admin/contest/announcement", request)?;
        self.dispatcher.post("admin/contest/announcement", request).await
    }

    pub async fn delete_contest_announcement(&self, id: u64) -> ClientResult<Ack> {
        self.dispatcher
            .delete(
                "admin/contest/announcement",
                QueryParams::new().with("id", id),
            )
            .await
    }

    pub async fn update_contest_announcement(
        &self,
        request: &UpdateContestAnnouncementRequest,
    ) -> ClientResult<Announcement> {
        self.dispatcher.check("admin/contest/announcement", request)?;
        self.dispatcher.put("admin/contest/announcement", request).await
    }

    pub async fn get_contest_analytics(&self, contest_id: u64) -> ClientResult<Value> {
        self.dispatcher
            .get(
                "admin/contest/analytics",
                QueryParams::new().with("contest_id", contest_id),
            )
            .await
    }

    // =========================================================================
    // Problems
    // =========================================================================

    /// Tags, optionally filtered by keyword
    pub async fn get_problem_tag_list(&self, keyword: Option<&str>) -> ClientResult<Vec<ProblemTag>> {
        let params = QueryParams::new()
            .with("keyword", keyword)
            .filter_empty(EmptyValuePolicy::DropEmpty);
        self.dispatcher.get("problem/tags", params).await
    }

    pub async fn compile_spj(&self, request: &CompileSpjRequest) -> ClientResult<ToolOutput> {
        self.dispatcher.check("admin/compile_spj", request)?;
        self.dispatcher.post("admin/compile_spj", request).await
    }

    pub async fn create_problem(&self, problem: &ProblemPayload) -> ClientResult<Problem> {
        self.dispatcher.check("admin/problem", problem)?;
        self.dispatcher.post("admin/problem", problem).await
    }

    pub async fn edit_problem(&self, request: &EditProblemRequest) -> ClientResult<Problem> {
        self.dispatcher.check("admin/problem", request)?;
        self.dispatcher.put("admin/problem", request).await
    }

    pub async fn delete_problem(&self, id: u64) -> ClientResult<Ack> {
        self.dispatcher
            .delete("admin/problem", QueryParams::new().with("id", id))
            .await
    }

    pub async fn get_problem(&self, id: u64) -> ClientResult<Problem> {
        self.dispatcher
            .get("admin/problem", QueryParams::new().with("id", id))
            .await
    }

    /// Empty filter values are dropped before sending
    pub async fn get_problem_list(&self, query: &ProblemListQuery) -> ClientResult<Paginated<Problem>> {
        let params = self
            .dispatcher
            .query_params("admin/problem", query)?
            .filter_empty(EmptyValuePolicy::DropEmpty);
        self.dispatcher.get("admin/problem", params).await
    }

    /// Empty filter values are dropped before sending
    pub async fn get_contest_problem_list(
        &self,
        query: &ContestProblemListQuery,
    ) -> ClientResult<Paginated<Problem>> {
        let params = self
            .dispatcher
            .query_params("admin/contest/problem", query)?
            .filter_empty(EmptyValuePolicy::DropEmpty);
        self.dispatcher.get("admin/contest/problem", params).await
    }

    pub async fn get_contest_problem(&self, id: u64) -> ClientResult<Problem> {
        self.dispatcher
            .get("admin/contest/problem", QueryParams::new().with("id", id))
            .await
    }

    pub async fn create_contest_problem(&self, problem: &ProblemPayload) -> ClientResult<Problem> {
        self.dispatcher.check("admin/contest/problem", problem)?;
        self.dispatcher.post("admin/contest/problem", problem).await
    }

    pub async fn edit_contest_problem(&self, request: &EditProblemRequest) -> ClientResult<Problem> {
        self.dispatcher.check("admin/contest/problem", request)?;
        self.dispatcher.put("admin/contest/problem", request).await
    }

    pub async fn delete_contest_problem(&self, id: u64) -> ClientResult<Ack> {
        self.dispatcher
            .delete("admin/contest/problem", QueryParams::new().with("id", id))
            .await
    }

    pub async fn make_contest_problem_public(
        &self,
        request: &MakeContestProblemPublicRequest,
    ) -> ClientResult<Ack> {
        self.dispatcher
            .check("admin/contest_problem/make_public", request)?;
        self.dispatcher
            .post("admin/contest_problem/make_public", request)
            .await
    }

    pub async fn add_problem_from_public(
        &self,
        request: &AddProblemFromPublicRequest,
    ) -> ClientResult<Ack> {
        self.dispatcher
            .check("admin/contest/add_problem_from_public", request)?;
        self.dispatcher
            .post("admin/contest/add_problem_from_public", request)
            .await
    }

    pub async fn export_problems(&self, request: &ExportProblemsRequest) -> ClientResult<Value> {
        self.dispatcher.post("export_problem", request).await
    }

    pub async fn get_problem_tags_stats(&self) -> ClientResult<Value> {
        self.dispatcher
            .get("admin/generate_problem_tags", QueryParams::new())
            .await
    }

    pub async fn generate_problem_tags(
        &self,
        request: &GenerateProblemTagsRequest,
    ) -> ClientResult<Value> {
        self.dispatcher
            .post("admin/generate_problem_tags", request)
            .await
    }

    pub async fn bulk_operation(&self, request: &BulkOperationRequest) -> ClientResult<Value> {
        self.dispatcher
            .check("admin/problem_bulk_operation", request)?;
        self.dispatcher
            .post("admin/problem_bulk_operation", request)
            .await
    }

    // =========================================================================
    // AI
    // =========================================================================

    pub async fn generate_ai_problem(&self, request: &GenerateAiProblemRequest) -> ClientResult<Value> {
        self.dispatcher.check("ai/problem/generate", request)?;
        self.dispatcher.post("ai/problem/generate", request).await
    }

    pub async fn get_ai_models(&self) -> ClientResult<Vec<AiModel>> {
        self.dispatcher
            .get("admin/ai_model/list", QueryParams::new())
            .await
    }

    pub async fn create_ai_model(&self, model: &AiModelPayload) -> ClientResult<AiModel> {
        self.dispatcher.check("admin/ai_model", model)?;
        self.dispatcher.post("admin/ai_model", model).await
    }

    pub async fn update_ai_model(&self, request: &UpdateAiModelRequest) -> ClientResult<AiModel> {
        self.dispatcher.check("admin/ai_model", request)?;
        self.dispatcher.put("admin/ai_model", request).await
    }

    pub async fn delete_ai_model(&self, id: u64) -> ClientResult<Ack> {
        self.dispatcher
            .delete("admin/ai_model", QueryParams::new().with("id", id))
            .await
    }

    pub async fn initialize_knowledge_points(&self) -> ClientResult<Value> {
        self.dispatcher
            .call(ApiRequest::post("ai/knowledge_point/initialize").json(json!({})))
            .await
    }

    // =========================================================================
    // Assignments (bare bodies, no envelope)
    // =========================================================================

    pub async fn create_assignment(&self, assignment: &AssignmentPayload) -> ClientResult<Assignment> {
        self.dispatcher.check("admin/assignments/", assignment)?;
        self.dispatcher.post("admin/assignments/", assignment).await
    }

    pub async fn get_assignment_list(
        &self,
        page: u64,
        page_size: u64,
    ) -> ClientResult<AssignmentListing> {
        let params = QueryParams::new()
            .with("page", page)
            .with("page_size", page_size);
        self.dispatcher.get("admin/assignments/", params).await
    }

    pub async fn get_assignment(&self, assignment_id: u64) -> ClientResult<Assignment> {
        self.dispatcher
            .get(assignment_path(assignment_id, ""), QueryParams::new())
            .await
    }

    pub async fn update_assignment(
        &self,
        assignment_id: u64,
        assignment: &AssignmentPayload,
    ) -> ClientResult<Assignment> {
        let path = assignment_path(assignment_id, "");
        self.dispatcher.check(&path, assignment)?;
        self.dispatcher.put(path, assignment).await
    }

    pub async fn delete_assignment(&self, assignment_id: u64) -> ClientResult<Ack> {
        self.dispatcher
            .delete(assignment_path(assignment_id, ""), QueryParams::new())
            .await
    }

    pub async fn get_assignment_problems(
        &self,
        assignment_id: u64,
    ) -> ClientResult<Vec<AssignmentProblem>> {
        self.dispatcher
            .get(assignment_path(assignment_id, "problems/"), QueryParams::new())
            .await
    }

    pub async fn add_problem_to_assignment(
        &self,
        assignment_id: u64,
        request: &AddAssignmentProblemRequest,
    ) -> ClientResult<Value> {
        self.dispatcher
            .post(assignment_path(assignment_id, "problems/add/"), request)
            .await
    }

    pub async fn remove_problem_from_assignment(
        &self,
        assignment_id: u64,
        problem_id: u64,
    ) -> ClientResult<Ack> {
        self.dispatcher
            .delete(
                assignment_path(assignment_id, &format!("problems/{}/", problem_id)),
                QueryParams::new(),
            )
            .await
    }

    pub async fn assign_assignment_to_students(
        &self,
        assignment_id: u64,
        request: &AssignStudentsRequest,
    ) -> ClientResult<Value> {
        self.dispatcher
            .post(assignment_path(assignment_id, "assign/"), request)
            .await
    }

    pub async fn get_assigned_students(
        &self,
        assignment_id: u64,
    ) -> ClientResult<Vec<StudentAssignment>> {
        self.dispatcher
            .get(assignment_path(assignment_id, "students/"), QueryParams::new())
            .await
    }

    pub async fn get_student_assignment_progress(
        &self,
        student_assignment_id: u64,
    ) -> ClientResult<Value> {
        self.dispatcher
            .get(
                format!("admin/student-assignments/{}/progress/", student_assignment_id),
                QueryParams::new(),
            )
            .await
    }

    pub async fn get_assignment_detailed_statistics(&self, assignment_id: u64) -> ClientResult<Value> {
        self.assignment_report(assignment_id, "detailed-statistics/").await
    }

    pub async fn get_assignment_problem_difficulty_statistics(
        &self,
        assignment_id: u64,
    ) -> ClientResult<Value> {
        self.assignment_report(assignment_id, "problem-difficulty-statistics/")
            .await
    }

    pub async fn get_assignment_student_performance_trend(
        &self,
        assignment_id: u64,
    ) -> ClientResult<Value> {
        self.assignment_report(assignment_id, "student-performance-trend/")
            .await
    }

    pub async fn get_assignment_top_performing_students(
        &self,
        assignment_id: u64,
    ) -> ClientResult<Value> {
        self.assignment_report(assignment_id, "top-performing-students/")
            .await
    }

    pub async fn get_assignment_problem_statistics(&self, assignment_id: u64) -> ClientResult<Value> {
        self.assignment_report(assignment_id, "problem-statistics/").await
    }

    pub async fn export_assignment_statistics(&self, assignment_id: u64) -> ClientResult<Value> {
        self.assignment_report(assignment_id, "export-statistics/").await
    }

    async fn assignment_report(&self, assignment_id: u64, report: &str) -> ClientResult<Value> {
        self.dispatcher
            .get(assignment_path(assignment_id, report), QueryParams::new())
            .await
    }
}

/// `admin/assignments/{id}/{suffix}`
fn assignment_path(assignment_id: u64, suffix: &str) -> String {
    format!("admin/assignments/{}/{}", assignment_id, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockNotifier;
    use crate::transport::{MockTransport, RawResponse};
    use reqwest::Method;
    use serde_json::json;

    fn api_expecting<F>(check: F, data: Value) -> AdminApi
    where
        F: Fn(&ApiRequest) -> bool + Send + 'static,
    {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(check)
            .times(1)
            .returning(move |_| {
                Ok(RawResponse {
                    status: 200,
                    status_text: "OK".to_string(),
                    body: Some(json!({"error": null, "data": data.clone()})),
                })
            });
        let mut notifier = MockNotifier::new();
        notifier.expect_success().return_const(());
        notifier.expect_error().times(0);

        AdminApi::new(
            Dispatcher::builder(Arc::new(transport))
                .notifier(Arc::new(notifier))
                .mode(EnvelopeMode::Compat)
                .build(),
        )
    }

    #[test]
    fn test_connect_uses_admin_console_texts() {
        let api = AdminApi::connect(&ApiConfig::default(), Arc::new(MockNotifier::new())).unwrap();
        let debug = format!("{:?}", api.dispatcher());
        assert!(debug.contains("Compat"));
        assert!(debug.contains(ADMIN_NETWORK_ERROR_MESSAGE));
        assert!(debug.contains(ADMIN_REQUEST_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_announcement_list_uses_paging_bag() {
        let api = api_expecting(
            |req| {
                req.method == Method::GET
                    && req.path == "admin/announcement"
                    && req.params.to_pairs()
                        == vec![
                            ("paging".to_string(), "true".to_string()),
                            ("offset".to_string(), "0".to_string()),
                            ("limit".to_string(), "10".to_string()),
                        ]
            },
            json!({"results": [], "total": 0}),
        );
        let page = api.get_announcement_list(0, 10).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_user_list_skips_empty_keyword() {
        let api = api_expecting(
            |req| req.path == "admin/user" && req.params.get("keyword").is_none(),
            json!({"results": [], "total": 0}),
        );
        api.get_user_list(0, 20, Some("")).await.unwrap();

        let api = api_expecting(
            |req| req.params.get("keyword") == Some(&json!("alice")),
            json!({"results": [{"id": 1, "username": "alice"}], "total": 1}),
        );
        let page = api.get_user_list(0, 20, Some("alice")).await.unwrap();
        assert_eq!(page.results[0].username, "alice");
    }

    #[tokio::test]
    async fn test_problem_list_filters_empty_values() {
        let api = api_expecting(
            |req| {
                req.path == "admin/problem"
                    && req.params.get("keyword").is_none()
                    && req.params.get("rule_type").is_none()
                    && req.params.get("offset") == Some(&json!(0))
            },
            json!({"results": [], "total": 0}),
        );
        let query = ProblemListQuery {
            offset: 0,
            limit: 10,
            keyword: Some(String::new()),
            rule_type: None,
        };
        api.get_problem_list(&query).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_judge_server_sends_hostname() {
        let api = api_expecting(
            |req| {
                req.method == Method::DELETE
                    && req.path == "admin/judge_server"
                    && req.params.get("hostname") == Some(&json!("judge-1"))
            },
            Value::Null,
        );
        api.delete_judge_server("judge-1").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_users_joins_ids() {
        let api = api_expecting(
            |req| req.params.get("id") == Some(&json!("3,5,8")),
            Value::Null,
        );
        api.delete_users(&[3, 5, 8]).await.unwrap();
    }

    #[tokio::test]
    async fn test_assignment_paths() {
        assert_eq!(assignment_path(7, ""), "admin/assignments/7/");
        assert_eq!(
            assignment_path(7, "problems/2/"),
            "admin/assignments/7/problems/2/"
        );

        let api = api_expecting(
            |req| req.method == Method::DELETE && req.path == "admin/assignments/7/problems/2/",
            Value::Null,
        );
        api.remove_problem_from_assignment(7, 2).await.unwrap();
    }

    #[tokio::test]
    async fn test_initialize_knowledge_points_posts_empty_object() {
        let api = api_expecting(
            |req| {
                req.method == Method::POST
                    && req.path == "ai/knowledge_point/initialize"
                    && req.body == Some(json!({}))
            },
            json!({"created": 12}),
        );
        let out = api.initialize_knowledge_points().await.unwrap();
        assert_eq!(out["created"], 12);
    }

    #[tokio::test]
    async fn test_invalid_login_is_not_sent() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);
        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(1).return_const(());

        let api = AdminApi::new(
            Dispatcher::builder(Arc::new(transport))
                .notifier(Arc::new(notifier))
                .build(),
        );
        let err = api
            .login(&AdminLoginRequest {
                username: String::new(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
