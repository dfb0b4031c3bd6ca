//! Admin console routes

use super::Route;
use crate::constants::ADMIN_FALLBACK_REDIRECT;
use crate::views::View;

/// Routes of the admin console, in match order
pub fn admin_routes() -> Vec<Route> {
    vec![
        Route::view("/login", "login", View::Login),
        Route::view("/init_knowledge", "init_knowledge", View::InitKnowledge),
        Route::layout(
            "/",
            View::Home,
            vec![
                Route::view("", "dashboard", View::Dashboard),
                Route::view("/announcement", "announcement", View::Announcement),
                Route::view("/user", "user", View::User),
                Route::view("/conf", "conf", View::Conf),
                Route::view("/judge-server", "judge-server", View::JudgeServer),
                Route::view("/prune-test-case", "prune-test-case", View::PruneTestCase),
                Route::view("/ai-model", "ai-model", View::AiModel),
                // problems
                Route::view("/problems", "problem-list", View::ProblemList),
                Route::view("/problem/create", "create-problem", View::Problem),
                Route::view("/problem/edit/:problemId", "edit-problem", View::Problem),
                Route::view(
                    "/admin/ai/generate-problem",
                    "AIGenerateProblem",
                    View::AiGenerateProblem,
                )
                .title("AI Generate Problem")
                .permission("admin"),
                Route::view(
                    "/problem/batch_ops",
                    "problem_batch_ops",
                    View::ProblemImportOrExport,
                ),
                // contests
                Route::view("/contest/create", "create-contest", View::Contest),
                Route::view("/contest", "contest-list", View::ContestList),
                Route::view("/contest/:contestId/edit", "edit-contest", View::Contest),
                Route::view(
                    "/contest/:contestId/announcement",
                    "contest-announcement",
                    View::Announcement,
                ),
                Route::view(
                    "/contest/:contestId/problems",
                    "contest-problem-list",
                    View::ProblemList,
                ),
                Route::view(
                    "/contest/:contestId/problem/create",
                    "create-contest-problem",
                    View::Problem,
                ),
                Route::view(
                    "/contest/:contestId/problem/:problemId/edit",
                    "edit-contest-problem",
                    View::Problem,
                ),
                Route::view("/contest/analytics", "contest-analytics", View::ContestAnalytics),
                Route::view("admin/generate-tags", "generate-tags", View::GenerateTags)
                    .requires_auth()
                    .title("Generate Tags"),
                // assignments
                Route::view("/assignment", "assignment-list", View::AssignmentList),
                Route::view("/assignment/create", "create-assignment", View::CreateAssignment),
                Route::view(
                    "/assignment/:assignmentId",
                    "assignment-detail",
                    View::AssignmentDetail,
                ),
                Route::view(
                    "/assignment/:assignmentId/student/:studentAssignmentId/progress",
                    "student-progress",
                    View::StudentProgress,
                ),
            ],
        ),
        Route::redirect("*", ADMIN_FALLBACK_REDIRECT),
    ]
}
