//! Judge front end endpoint wrappers

use std::sync::Arc;

use serde_json::{Value, json};

use crate::{
    config::ApiConfig,
    constants::{DEFAULT_RANK_RULE, OJ_NETWORK_ERROR_MESSAGE},
    dispatcher::Dispatcher,
    envelope::EnvelopeMode,
    error::ClientResult,
    models::{
        Ack, AiConversation, AiMessage, AiModel, Announcement, Captcha, CodeReview, ContestAccess,
        ContestInfo, KnowledgePoint, LanguagesInfo, Paginated, Problem, ProblemRecommendation,
        ProblemTag, Profile, RankEntry, SessionInfo, Submission, SubmissionCreated, TfaRequired,
        UsernameEmailCheck, WebsiteConfig,
    },
    notify::{Notifier, StoreDispatch},
    params::{EmptyValuePolicy, QueryParams},
    transport::{ApiRequest, HttpTransport},
};

use super::request::*;

/// Judge front end API
#[derive(Debug, Clone)]
pub struct OjApi {
    dispatcher: Dispatcher,
}

impl OjApi {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Judge API over HTTP: strict envelopes, login prompt when the session
    /// expires
    pub fn connect(
        config: &ApiConfig,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn StoreDispatch>,
    ) -> ClientResult<Self> {
        let transport = HttpTransport::new(config)?;
        let dispatcher = Dispatcher::builder(Arc::new(transport))
            .notifier(notifier)
            .store(store)
            .mode(EnvelopeMode::Strict)
            .network_error_message(OJ_NETWORK_ERROR_MESSAGE)
            .login_prompt_on_expiry()
            .build();
        Ok(Self::new(dispatcher))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    // =========================================================================
    // Site
    // =========================================================================

    pub async fn get_website_conf(&self) -> ClientResult<WebsiteConfig> {
        self.dispatcher.get("website", QueryParams::new()).await
    }

    pub async fn get_announcement_list(
        &self,
        offset: u64,
        limit: u64,
    ) -> ClientResult<Paginated<Announcement>> {
        self.dispatcher
            .get("announcement", QueryParams::window(offset, limit))
            .await
    }

    pub async fn get_languages(&self) -> ClientResult<LanguagesInfo> {
        self.dispatcher.get("languages", QueryParams::new()).await
    }

    pub async fn get_ai_models(&self) -> ClientResult<Vec<AiModel>> {
        self.dispatcher
            .get("admin/ai_model/list", QueryParams::new())
            .await
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<Ack> {
        self.dispatcher.check("login", request)?;
        self.dispatcher.post("login", request).await
    }

    /// Which of the two are already taken
    pub async fn check_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> ClientResult<UsernameEmailCheck> {
        self.dispatcher
            .post(
                "check_username_or_email",
                &UsernameOrEmail { username, email },
            )
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<Ack> {
        self.dispatcher.check("register", request)?;
        self.dispatcher.post("register", request).await
    }

    pub async fn logout(&self) -> ClientResult<Ack> {
        self.dispatcher.get("logout", QueryParams::new()).await
    }

    pub async fn get_captcha(&self) -> ClientResult<Captcha> {
        self.dispatcher.get("captcha", QueryParams::new()).await
    }

    /// Profile of `username`, or of the current user when `None`.
    ///
    /// Anonymous visitors get `Ok(None)`.
    pub async fn get_user_info(&self, username: Option<&str>) -> ClientResult<Option<Profile>> {
        self.dispatcher
            .get("profile", QueryParams::new().with("username", username))
            .await
    }

    pub async fn update_profile(&self, profile: &UpdateProfileRequest) -> ClientResult<Profile> {
        self.dispatcher.put("profile", profile).await
    }

    pub async fn fresh_display_id(&self, user_id: u64) -> ClientResult<Value> {
        self.dispatcher
            .get(
                "profile/fresh_display_id",
                QueryParams::new().with("user_id", user_id),
            )
            .await
    }

    /// Setup returns the QR code; enable and disable need the current code
    pub async fn two_factor_auth(&self, action: TfaAction, code: Option<&str>) -> ClientResult<Value> {
        self.dispatcher
            .with_body(action.method(), "two_factor_auth".to_string(), &TfaCode { code })
            .await
    }

    pub async fn tfa_required_check(&self, username: &str) -> ClientResult<TfaRequired> {
        self.dispatcher
            .post("tfa_required", &json!({ "username": username }))
            .await
    }

    pub async fn get_sessions(&self) -> ClientResult<Vec<SessionInfo>> {
        self.dispatcher.get("sessions", QueryParams::new()).await
    }

    pub async fn delete_session(&self, session_key: &str) -> ClientResult<Ack> {
        self.dispatcher
            .delete(
                "sessions",
                QueryParams::new().with("session_key", session_key),
            )
            .await
    }

    pub async fn apply_reset_password(&self, request: &ApplyResetPasswordRequest) -> ClientResult<Ack> {
        self.dispatcher.check("apply_reset_password", request)?;
        self.dispatcher.post("apply_reset_password", request).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ClientResult<Ack> {
        self.dispatcher.check("reset_password", request)?;
        self.dispatcher.post("reset_password", request).await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<Ack> {
        self.dispatcher.check("change_password", request)?;
        self.dispatcher.post("change_password", request).await
    }

    pub async fn change_email(&self, request: &ChangeEmailRequest) -> ClientResult<Ack> {
        self.dispatcher.check("change_email", request)?;
        self.dispatcher.post("change_email", request).await
    }

    // =========================================================================
    // Problems
    // =========================================================================

    pub async fn get_problem_tag_list(&self) -> ClientResult<Vec<ProblemTag>> {
        self.dispatcher.get("problem/tags", QueryParams::new()).await
    }

    pub async fn get_problem_list(
        &self,
        offset: u64,
        limit: u64,
        search: &ProblemSearch,
    ) -> ClientResult<Paginated<Problem>> {
        let search = self.dispatcher.query_params("problem", search)?;
        let params =
            QueryParams::paging(offset, limit).merge_filtered(search, EmptyValuePolicy::DropFalsy);
        self.dispatcher.get("problem", params).await
    }

    /// Display id of a random problem
    pub async fn pickone(&self) -> ClientResult<String> {
        self.dispatcher.get("pickone", QueryParams::new()).await
    }

    /// Problem by display id
    pub async fn get_problem(&self, problem_id: &str) -> ClientResult<Problem> {
        self.dispatcher
            .get("problem", QueryParams::new().with("problem_id", problem_id))
            .await
    }

    // =========================================================================
    // Contests
    // =========================================================================

    pub async fn get_contest_list(
        &self,
        offset: u64,
        limit: u64,
        search: Option<&ContestSearch>,
    ) -> ClientResult<Paginated<ContestInfo>> {
        let mut params = QueryParams::window(offset, limit);
        if let Some(search) = search {
            let search = self.dispatcher.query_params("contests", search)?;
            params = params.merge_filtered(search, EmptyValuePolicy::DropFalsy);
        }
        self.dispatcher.get("contests", params).await
    }

    pub async fn get_contest(&self, id: u64) -> ClientResult<ContestInfo> {
        self.dispatcher
            .get("contest", QueryParams::new().with("id", id))
            .await
    }

    pub async fn get_contest_access(&self, contest_id: u64) -> ClientResult<ContestAccess> {
        self.dispatcher
            .get(
                "contest/access",
                QueryParams::new().with("contest_id", contest_id),
            )
            .await
    }

    pub async fn check_contest_password(&self, contest_id: u64, password: &str) -> ClientResult<Ack> {
        self.dispatcher
            .post(
                "contest/password",
                &ContestPassword {
                    contest_id,
                    password,
                },
            )
            .await
    }

    pub async fn get_contest_announcement_list(
        &self,
        contest_id: u64,
    ) -> ClientResult<Vec<Announcement>> {
        self.dispatcher
            .get(
                "contest/announcement",
                QueryParams::new().with("contest_id", contest_id),
            )
            .await
    }

    pub async fn get_contest_problem_list(&self, contest_id: u64) -> ClientResult<Vec<Problem>> {
        self.dispatcher
            .get(
                "contest/problem",
                QueryParams::new().with("contest_id", contest_id),
            )
            .await
    }

    pub async fn get_contest_problem(&self, problem_id: &str, contest_id: u64) -> ClientResult<Problem> {
        let params = QueryParams::new()
            .with("contest_id", contest_id)
            .with("problem_id", problem_id);
        self.dispatcher.get("contest/problem", params).await
    }

    /// Scoreboard rows; the shape depends on the contest rule type
    pub async fn get_contest_rank(&self, query: &ContestRankQuery) -> ClientResult<Value> {
        let params = self.dispatcher.query_params("contest_rank", query)?;
        self.dispatcher.get("contest_rank", params).await
    }

    pub async fn get_acm_ac_info(&self, contest_id: u64) -> ClientResult<Value> {
        self.dispatcher
            .get(
                "admin/contest/acm_helper",
                QueryParams::new().with("contest_id", contest_id),
            )
            .await
    }

    pub async fn update_ac_info_checked_status(&self, request: &UpdateAcInfoRequest) -> ClientResult<Ack> {
        self.dispatcher.put("admin/contest/acm_helper", request).await
    }

    // =========================================================================
    // Submissions & ranks
    // =========================================================================

    pub async fn submit_code(&self, request: &SubmitCodeRequest) -> ClientResult<SubmissionCreated> {
        self.dispatcher.check("submission", request)?;
        self.dispatcher.post("submission", request).await
    }

    pub async fn get_submission_list(
        &self,
        offset: u64,
        limit: u64,
        query: &SubmissionQuery,
    ) -> ClientResult<Paginated<Submission>> {
        self.submissions("submissions", offset, limit, query).await
    }

    pub async fn get_contest_submission_list(
        &self,
        offset: u64,
        limit: u64,
        query: &SubmissionQuery,
    ) -> ClientResult<Paginated<Submission>> {
        self.submissions("contest_submissions", offset, limit, query)
            .await
    }

    async fn submissions(
        &self,
        path: &str,
        offset: u64,
        limit: u64,
        query: &SubmissionQuery,
    ) -> ClientResult<Paginated<Submission>> {
        let params = self
            .dispatcher
            .query_params(path, query)?
            .with("limit", limit)
            .with("offset", offset);
        self.dispatcher.get(path, params).await
    }

    pub async fn get_submission(&self, id: &str) -> ClientResult<Submission> {
        self.dispatcher
            .get("submission", QueryParams::new().with("id", id))
            .await
    }

    /// Whether the current user has submitted to the problem
    pub async fn submission_exists(&self, problem_id: u64) -> ClientResult<bool> {
        self.dispatcher
            .get(
                "submission_exists",
                QueryParams::new().with("problem_id", problem_id),
            )
            .await
    }

    pub async fn submission_rejudge(&self, id: &str) -> ClientResult<Ack> {
        self.dispatcher
            .get("admin/submission/rejudge", QueryParams::new().with("id", id))
            .await
    }

    pub async fn update_submission(&self, request: &UpdateSubmissionRequest) -> ClientResult<Ack> {
        self.dispatcher.put("submission", request).await
    }

    pub async fn get_submission_status(&self, submission_id: &str) -> ClientResult<Value> {
        self.dispatcher
            .get(
                "submission_status",
                QueryParams::new().with("id", submission_id),
            )
            .await
    }

    /// User rank list; `rule` defaults to `acm`
    pub async fn get_user_rank(
        &self,
        offset: u64,
        limit: u64,
        rule: Option<&str>,
    ) -> ClientResult<Paginated<RankEntry>> {
        let params = QueryParams::window(offset, limit)
            .with("rule", rule.unwrap_or(DEFAULT_RANK_RULE));
        self.dispatcher.get("user_rank", params).await
    }

    // =========================================================================
    // AI assistant
    // =========================================================================

    pub async fn create_ai_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> ClientResult<AiConversation> {
        self.dispatcher.post("ai/conversation", request).await
    }

    pub async fn get_ai_conversations(&self) -> ClientResult<Vec<AiConversation>> {
        self.dispatcher
            .get("ai/conversations", QueryParams::new())
            .await
    }

    pub async fn get_ai_messages(&self, conversation_id: u64) -> ClientResult<Vec<AiMessage>> {
        self.dispatcher
            .get(
                "ai/message",
                QueryParams::new().with("conversation_id", conversation_id),
            )
            .await
    }

    pub async fn send_ai_message(&self, request: &SendMessageRequest) -> ClientResult<Value> {
        self.dispatcher.check("ai/message", request)?;
        self.dispatcher.post("ai/message", request).await
    }

    pub async fn get_knowledge_points(&self) -> ClientResult<Vec<KnowledgePoint>> {
        self.dispatcher
            .get("ai/knowledge_point", QueryParams::new())
            .await
    }

    /// Recommendations for the current user; `None` sends an empty object
    pub async fn get_knowledge_recommendations(&self, request: Option<&Value>) -> ClientResult<Value> {
        let body = request.cloned().unwrap_or_else(|| json!({}));
        self.dispatcher
            .post("ai/knowledge_point/recommend", &body)
            .await
    }

    pub async fn get_knowledge_point(&self, id: u64) -> ClientResult<KnowledgePoint> {
        self.dispatcher
            .get("ai/knowledge_point", QueryParams::new().with("id", id))
            .await
    }

    pub async fn get_knowledge_point_graph(&self) -> ClientResult<Value> {
        self.dispatcher
            .get("ai/knowledge_point/graph", QueryParams::new())
            .await
    }

    pub async fn get_knowledge_point_problems(
        &self,
        knowledge_point_id: u64,
        offset: u64,
        limit: u64,
    ) -> ClientResult<Value> {
        let params = QueryParams::new()
            .with("knowledge_point_id", knowledge_point_id)
            .with("offset", offset)
            .with("limit", limit);
        self.dispatcher
            .get("ai/knowledge_point/problems", params)
            .await
    }

    pub async fn get_code_explanation(&self, request: &CodeRequest) -> ClientResult<Value> {
        self.code_call("ai/code/explain", request).await
    }

    pub async fn get_problem_solution(&self, problem_id: u64) -> ClientResult<Value> {
        self.dispatcher
            .post("ai/problem/solution", &ProblemRef { problem_id })
            .await
    }

    pub async fn review_code(&self, request: &CodeRequest) -> ClientResult<CodeReview> {
        self.dispatcher.check("ai/code/review", request)?;
        self.dispatcher.post("ai/code/review", request).await
    }

    pub async fn get_submission_diagnosis(&self, submission_id: &str) -> ClientResult<Value> {
        self.dispatcher
            .post("ai/submission/diagnose", &SubmissionRef { submission_id })
            .await
    }

    pub async fn get_code_diagnosis(&self, submission_id: &str) -> ClientResult<Value> {
        self.dispatcher
            .post("ai/code/diagnose", &SubmissionRef { submission_id })
            .await
    }

    pub async fn get_real_time_suggestion(&self, request: &CodeRequest) -> ClientResult<Value> {
        self.code_call("ai/code/suggestion", request).await
    }

    pub async fn get_code_auto_completion(&self, request: &CodeRequest) -> ClientResult<Value> {
        self.code_call("ai/code/autocomplete", request).await
    }

    pub async fn get_real_time_diagnosis(&self, request: &CodeRequest) -> ClientResult<Value> {
        self.code_call("ai/code/realtime_diagnosis", request).await
    }

    async fn code_call(&self, path: &str, request: &CodeRequest) -> ClientResult<Value> {
        self.dispatcher.check(path, request)?;
        self.dispatcher.post(path, request).await
    }

    pub async fn get_recommended_problems(&self) -> ClientResult<Vec<ProblemRecommendation>> {
        self.dispatcher
            .get("ai/problems/recommend", QueryParams::new())
            .await
    }

    pub async fn submit_recommendation_feedback(
        &self,
        request: &RecommendationFeedbackRequest,
    ) -> ClientResult<Ack> {
        self.dispatcher
            .post("ai/recommendation/feedback", request)
            .await
    }

    pub async fn send_feedback(&self, feedback: &Value) -> ClientResult<Ack> {
        self.dispatcher.post("ai/feedback", feedback).await
    }

    pub async fn get_next_problem_recommendation(&self, request: &Value) -> ClientResult<Value> {
        self.dispatcher.post("ai/next_problem", request).await
    }

    pub async fn generate_learning_path(&self, request: &Value) -> ClientResult<Value> {
        self.dispatcher.post("ai/learning_path", request).await
    }

    pub async fn get_learning_paths(&self) -> ClientResult<Value> {
        self.dispatcher
            .get("ai/learning_path", QueryParams::new())
            .await
    }

    pub async fn get_learning_path_detail(&self, path_id: u64) -> ClientResult<Value> {
        self.dispatcher
            .get(format!("ai/learning_path/{}", path_id), QueryParams::new())
            .await
    }

    pub async fn update_learning_path_node(
        &self,
        node_id: u64,
        request: &UpdateNodeRequest,
    ) -> ClientResult<Value> {
        self.dispatcher
            .put(format!("ai/learning_path/node/{}", node_id), request)
            .await
    }

    pub async fn assess_programming_ability(&self) -> ClientResult<Value> {
        self.dispatcher
            .call(ApiRequest::post("ai/ability/assess").json(json!({})))
            .await
    }

    pub async fn get_programming_ability_report(&self) -> ClientResult<Value> {
        self.get_ability_comparison().await
    }

    pub async fn get_ability_comparison(&self) -> ClientResult<Value> {
        self.dispatcher
            .get("ai/ability/compare", QueryParams::new())
            .await
    }

    pub async fn analyze_problem_complexity(&self, problem_id: u64) -> ClientResult<Value> {
        self.dispatcher
            .post("ai/nlp_analysis", &ProblemRef { problem_id })
            .await
    }

    pub async fn get_problem_complexity(&self, problem_id: u64) -> ClientResult<Value> {
        self.dispatcher
            .get(
                "ai/nlp_analysis",
                QueryParams::new().with("problem_id", problem_id),
            )
            .await
    }

    pub async fn get_ollama_code_completion(&self, request: &CodeRequest) -> ClientResult<Value> {
        self.code_call("ollama/code/complete", request).await
    }

    pub async fn get_ollama_models(&self) -> ClientResult<Value> {
        self.dispatcher.get("ollama/models", QueryParams::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::models::Difficulty;
    use crate::notify::{MockNotifier, MockStoreDispatch, UiAction};
    use crate::transport::{MockTransport, RawResponse};
    use mockall::predicate::eq;
    use reqwest::Method;

    fn api_with(transport: MockTransport, notifier: MockNotifier, store: MockStoreDispatch) -> OjApi {
        OjApi::new(
            Dispatcher::builder(Arc::new(transport))
                .notifier(Arc::new(notifier))
                .store(Arc::new(store))
                .network_error_message(OJ_NETWORK_ERROR_MESSAGE)
                .login_prompt_on_expiry()
                .build(),
        )
    }

    fn answering<F>(check: F, body: Value) -> MockTransport
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
                    body: Some(body.clone()),
                })
            });
        transport
    }

    fn quiet() -> (MockNotifier, MockStoreDispatch) {
        let mut notifier = MockNotifier::new();
        notifier.expect_success().return_const(());
        notifier.expect_error().times(0);
        let mut store = MockStoreDispatch::new();
        store.expect_dispatch().times(0);
        (notifier, store)
    }

    #[tokio::test]
    async fn test_problem_list_drops_falsy_search_values() {
        let transport = answering(
            |req| {
                req.path == "problem"
                    && req.params.to_pairs()
                        == vec![
                            ("paging".to_string(), "true".to_string()),
                            ("offset".to_string(), "0".to_string()),
                            ("limit".to_string(), "20".to_string()),
                            ("difficulty".to_string(), "Low".to_string()),
                        ]
            },
            json!({"error": null, "data": {"results": [], "total": 0}}),
        );
        let (notifier, store) = quiet();
        let api = api_with(transport, notifier, store);

        let search = ProblemSearch {
            keyword: Some(String::new()),
            difficulty: Some(Difficulty::Low),
            tag: None,
        };
        api.get_problem_list(0, 20, &search).await.unwrap();
    }

    #[tokio::test]
    async fn test_contest_list_without_search_has_no_paging_flag() {
        let transport = answering(
            |req| {
                req.path == "contests"
                    && req.params.get("paging").is_none()
                    && req.params.get("offset") == Some(&json!(10))
            },
            json!({"error": null, "data": {"results": [], "total": 0}}),
        );
        let (notifier, store) = quiet();
        let api = api_with(transport, notifier, store);
        api.get_contest_list(10, 10, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_user_rank_defaults_to_acm() {
        let transport = answering(
            |req| req.path == "user_rank" && req.params.get("rule") == Some(&json!("acm")),
            json!({"error": null, "data": {"results": [], "total": 0}}),
        );
        let (notifier, store) = quiet();
        let api = api_with(transport, notifier, store);
        api.get_user_rank(0, 30, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_anonymous_profile_is_none() {
        let transport = answering(
            |req| req.path == "profile" && req.params.to_pairs().is_empty(),
            json!({"error": null, "data": null}),
        );
        let (notifier, store) = quiet();
        let api = api_with(transport, notifier, store);
        assert_eq!(api.get_user_info(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_two_factor_auth_uses_action_method() {
        let transport = answering(
            |req| {
                req.method == Method::PUT
                    && req.path == "two_factor_auth"
                    && req.body == Some(json!({"code": "123456"}))
            },
            json!({"error": null, "data": "Succeeded"}),
        );
        let (notifier, store) = quiet();
        let api = api_with(transport, notifier, store);
        api.two_factor_auth(TfaAction::Disable, Some("123456"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_submit_code_returns_submission_id() {
        let transport = answering(
            |req| req.method == Method::POST && req.path == "submission",
            json!({"error": null, "data": {"submission_id": "abc"}}),
        );
        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .with(eq("Succeeded"))
            .times(1)
            .return_const(());
        notifier.expect_error().times(0);
        let api = api_with(transport, notifier, MockStoreDispatch::new());

        let created = api
            .submit_code(&SubmitCodeRequest {
                problem_id: 1,
                language: "Python3".into(),
                code: "print(1)".into(),
                contest_id: None,
                captcha: None,
            })
            .await
            .unwrap();
        assert_eq!(created.submission_id, "abc");
    }

    #[tokio::test]
    async fn test_expired_session_opens_login_dialog() {
        let transport = answering(
            |req| req.path == "submissions",
            json!({"error": "permission-denied", "data": "Please login first"}),
        );
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .with(eq("Please login first"))
            .times(1)
            .return_const(());
        let mut store = MockStoreDispatch::new();
        store
            .expect_dispatch()
            .with(eq(UiAction::show_login()))
            .times(1)
            .return_const(());
        let api = api_with(transport, notifier, store);

        let err = api
            .get_submission_list(0, 20, &SubmissionQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Domain { .. }));
    }

    #[tokio::test]
    async fn test_unwrapped_body_is_rejected() {
        let transport = answering(|req| req.path == "pickone", json!("A-1"));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .with(eq("Malformed response from server"))
            .times(1)
            .return_const(());
        let api = api_with(transport, notifier, MockStoreDispatch::new());
        assert!(api.pickone().await.is_err());
    }
}
