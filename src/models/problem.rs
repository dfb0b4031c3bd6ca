//! Problem records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::account::CreatedBy;

/// Problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Low,
    #[default]
    Mid,
    High,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
        }
    }
}

/// Sample input/output pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub input: String,
    pub output: String,
}

/// How the program reads and writes data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoMode {
    pub io_mode: String,
    #[serde(default = "default_input_file")]
    pub input: String,
    #[serde(default = "default_output_file")]
    pub output: String,
}

fn default_input_file() -> String {
    "input.txt".to_string()
}

fn default_output_file() -> String {
    "output.txt".to_string()
}

impl Default for IoMode {
    fn default() -> Self {
        Self {
            io_mode: "Standard IO".to_string(),
            input: default_input_file(),
            output: default_output_file(),
        }
    }
}

/// Score assigned to one test case (OI rule)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseScore {
    pub input_name: String,
    #[serde(default)]
    pub output_name: Option<String>,
    pub score: u32,
}

/// Problem tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemTag {
    pub id: u64,
    pub name: String,
}

/// Problem as returned by the list and detail endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: u64,
    /// Display id shown to users
    #[serde(rename = "_id")]
    pub display_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_description: Option<String>,
    #[serde(default)]
    pub output_description: Option<String>,
    #[serde(default)]
    pub samples: Vec<Sample>,
    #[serde(default)]
    pub hint: Option<String>,
    /// Milliseconds
    #[serde(default)]
    pub time_limit: u64,
    /// Megabytes
    #[serde(default)]
    pub memory_limit: u64,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub template: BTreeMap<String, String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub rule_type: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,
    #[serde(default)]
    pub submission_number: u64,
    #[serde(default)]
    pub accepted_number: u64,
    #[serde(default)]
    pub contest: Option<u64>,
    /// Per-user status for the logged-in user, if the backend includes it
    #[serde(default)]
    pub my_status: Option<i64>,
}

impl Problem {
    /// Acceptance ratio in percent, `0.0` when nothing was submitted
    pub fn acceptance_rate(&self) -> f64 {
        if self.submission_number == 0 {
            0.0
        } else {
            self.accepted_number as f64 * 100.0 / self.submission_number as f64
        }
    }
}

/// One test case that no problem references any more
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidTestCase {
    pub id: String,
    #[serde(default)]
    pub create_time: Option<f64>,
}
