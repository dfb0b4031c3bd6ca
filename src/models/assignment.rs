//! Assignment records
//!
//! Assignment endpoints answer with bare bodies rather than envelopes, so
//! they only decode through a compat-mode dispatcher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Homework assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<u64>,
    #[serde(default)]
    pub creator_username: Option<String>,
    #[serde(default)]
    pub is_personalized: bool,
    #[serde(default)]
    pub rule_type: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

/// Problem attached to an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentProblem {
    pub id: u64,
    pub problem: u64,
    #[serde(default)]
    pub problem_title: Option<String>,
    #[serde(default)]
    pub score: i64,
}

/// Per-student assignment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentAssignmentStatus {
    Assigned,
    InProgress,
    Completed,
}

/// Assignment handed to one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAssignment {
    pub id: u64,
    pub student: u64,
    #[serde(default)]
    pub student_username: Option<String>,
    #[serde(default)]
    pub student_realname: Option<String>,
    pub status: StudentAssignmentStatus,
    #[serde(default)]
    pub assigned_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_time: Option<DateTime<Utc>>,
}

/// Page of assignments (page-number pagination)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentPage {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Assignment>,
}

/// Assignment list, paged or not depending on the backend's pagination setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignmentListing {
    Paged(AssignmentPage),
    Plain(Vec<Assignment>),
}

impl AssignmentListing {
    pub fn assignments(&self) -> &[Assignment] {
        match self {
            Self::Paged(page) => &page.results,
            Self::Plain(list) => list,
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            Self::Paged(page) => page.count,
            Self::Plain(list) => list.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_accepts_both_shapes() {
        let item = serde_json::json!({
            "id": 1,
            "title": "HW1",
            "start_time": "2024-09-01T00:00:00Z",
            "end_time": "2024-09-08T00:00:00+08:00"
        });
        let paged: AssignmentListing = serde_json::from_value(serde_json::json!({
            "count": 11, "next": null, "previous": null, "results": [item.clone()]
        }))
        .unwrap();
        assert_eq!(paged.total(), 11);
        assert_eq!(paged.assignments().len(), 1);

        let plain: AssignmentListing = serde_json::from_value(serde_json::json!([item])).unwrap();
        assert_eq!(plain.total(), 1);
    }
}
