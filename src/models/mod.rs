//! Backend records
//!
//! Response records shared by the admin console and the judge front end.
//! Every record tolerates fields it does not know about.

pub mod account;
pub mod ai;
pub mod announcement;
pub mod assignment;
pub mod contest;
pub mod problem;
pub mod submission;
pub mod system;

pub use account::*;
pub use ai::*;
pub use announcement::*;
pub use assignment::*;
pub use contest::*;
pub use problem::*;
pub use submission::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Acknowledgement for calls whose `data` carries nothing useful
pub type Ack = serde::de::IgnoredAny;

/// One page of a paginated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub total: u64,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Paginated<T> {
    /// Whether more rows exist after `offset + results.len()`
    pub fn has_more(&self, offset: u64) -> bool {
        offset + (self.results.len() as u64) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_has_more() {
        let page: Paginated<u32> = serde_json::from_value(serde_json::json!({
            "results": [1, 2],
            "total": 5
        }))
        .unwrap();
        assert!(page.has_more(0));
        assert!(!page.has_more(3));
    }

    #[test]
    fn test_ack_accepts_anything() {
        let _: Ack = serde_json::from_value(serde_json::json!(null)).unwrap();
        let _: Ack = serde_json::from_value(serde_json::json!({"id": 1})).unwrap();
    }
}
