//! Admin console views
//!
//! One variant per page component the route table can mount. Most views
//! ship in the main bundle; a few are loaded on first navigation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// When a view's code is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    /// Part of the main bundle
    Eager,
    /// Fetched the first time a route mounts it
    Lazy,
}

/// Page components of the admin console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Home,
    Login,
    InitKnowledge,
    Dashboard,
    Announcement,
    User,
    Conf,
    JudgeServer,
    PruneTestCase,
    AiModel,
    Problem,
    ProblemList,
    AiGenerateProblem,
    ProblemImportOrExport,
    GenerateTags,
    Contest,
    ContestList,
    ContestAnalytics,
    AssignmentList,
    CreateAssignment,
    AssignmentDetail,
    StudentProgress,
}

impl View {
    pub const ALL: [View; 22] = [
        View::Home,
        View::Login,
        View::InitKnowledge,
        View::Dashboard,
        View::Announcement,
        View::User,
        View::Conf,
        View::JudgeServer,
        View::PruneTestCase,
        View::AiModel,
        View::Problem,
        View::ProblemList,
        View::AiGenerateProblem,
        View::ProblemImportOrExport,
        View::GenerateTags,
        View::Contest,
        View::ContestList,
        View::ContestAnalytics,
        View::AssignmentList,
        View::CreateAssignment,
        View::AssignmentDetail,
        View::StudentProgress,
    ];

    pub fn loading(self) -> Loading {
        match self {
            View::GenerateTags | View::AiGenerateProblem => Loading::Lazy,
            _ => Loading::Eager,
        }
    }

    /// Component module, relative to the views directory
    pub fn module(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Login => "general/Login",
            View::InitKnowledge => "ai/InitKnowledge",
            View::Dashboard => "general/Dashboard",
            View::Announcement => "general/Announcement",
            View::User => "general/User",
            View::Conf => "general/Conf",
            View::JudgeServer => "general/JudgeServer",
            View::PruneTestCase => "general/PruneTestCase",
            View::AiModel => "general/AIModel",
            View::Problem => "problem/Problem",
            View::ProblemList => "problem/ProblemList",
            View::AiGenerateProblem => "problem/AIGenerateProblem",
            View::ProblemImportOrExport => "problem/ImportAndExport",
            View::GenerateTags => "problem/GenerateTags",
            View::Contest => "contest/Contest",
            View::ContestList => "contest/ContestList",
            View::ContestAnalytics => "contest/ContestAnalytics",
            View::AssignmentList => "assignment/AssignmentList",
            View::CreateAssignment => "assignment/CreateAssignment",
            View::AssignmentDetail => "assignment/AssignmentDetail",
            View::StudentProgress => "assignment/StudentProgress",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module())
    }
}
