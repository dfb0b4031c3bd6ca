//! Submission records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Judge verdict as a numeric result code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    CompileError,
    WrongAnswer,
    Accepted,
    CpuTimeLimitExceeded,
    RealTimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    SystemError,
    Pending,
    Judging,
    PartiallyAccepted,
}

impl Verdict {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            -2 => Self::CompileError,
            -1 => Self::WrongAnswer,
            0 => Self::Accepted,
            1 => Self::CpuTimeLimitExceeded,
            2 => Self::RealTimeLimitExceeded,
            3 => Self::MemoryLimitExceeded,
            4 => Self::RuntimeError,
            5 => Self::SystemError,
            6 => Self::Pending,
            7 => Self::Judging,
            8 => Self::PartiallyAccepted,
            _ => return None,
        })
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::CompileError => -2,
            Self::WrongAnswer => -1,
            Self::Accepted => 0,
            Self::CpuTimeLimitExceeded => 1,
            Self::RealTimeLimitExceeded => 2,
            Self::MemoryLimitExceeded => 3,
            Self::RuntimeError => 4,
            Self::SystemError => 5,
            Self::Pending => 6,
            Self::Judging => 7,
            Self::PartiallyAccepted => 8,
        }
    }

    /// Get verdict as display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompileError => "Compile Error",
            Self::WrongAnswer => "Wrong Answer",
            Self::Accepted => "Accepted",
            Self::CpuTimeLimitExceeded => "Time Limit Exceeded",
            Self::RealTimeLimitExceeded => "Time Limit Exceeded",
            Self::MemoryLimitExceeded => "Memory Limit Exceeded",
            Self::RuntimeError => "Runtime Error",
            Self::SystemError => "System Error",
            Self::Pending => "Pending",
            Self::Judging => "Judging",
            Self::PartiallyAccepted => "Partial Accepted",
        }
    }

    /// Still waiting for the judge
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending | Self::Judging)
    }
}

/// Resource usage reported by the judge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StatisticInfo {
    #[serde(default)]
    pub time_cost: Option<u64>,
    #[serde(default)]
    pub memory_cost: Option<u64>,
    #[serde(default)]
    pub score: Option<u64>,
    #[serde(default)]
    pub err_info: Option<String>,
}

/// Submission as the backend serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    /// Only present when the viewer may read the code
    #[serde(default)]
    pub code: Option<String>,
    pub result: i64,
    pub language: String,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub statistic_info: StatisticInfo,
    #[serde(default)]
    pub contest: Option<u64>,
    /// Whether the current user may toggle sharing
    #[serde(default)]
    pub can_unshare: bool,
}

impl Submission {
    pub fn verdict(&self) -> Option<Verdict> {
        Verdict::from_code(self.result)
    }
}

/// Response of `submission` POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionCreated {
    pub submission_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_codes_round_trip() {
        for code in -2..=8 {
            assert_eq!(Verdict::from_code(code).map(|v| v.code()), Some(code));
        }
        assert_eq!(Verdict::from_code(9), None);
        assert!(!Verdict::Judging.is_final());
        assert!(Verdict::Accepted.is_final());
    }

    #[test]
    fn test_submission_verdict() {
        let s: Submission = serde_json::from_value(serde_json::json!({
            "id": "8f2c",
            "result": -1,
            "language": "C++",
            "statistic_info": {"time_cost": 12}
        }))
        .unwrap();
        assert_eq!(s.verdict(), Some(Verdict::WrongAnswer));
        assert_eq!(s.statistic_info.time_cost, Some(12));
    }
}
