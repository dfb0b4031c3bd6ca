//! Site configuration and judge infrastructure records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One programming language the judge accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Response of `languages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LanguagesInfo {
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub spj_languages: Vec<Language>,
}

impl LanguagesInfo {
    pub fn names(&self) -> Vec<&str> {
        self.languages.iter().map(|l| l.name.as_str()).collect()
    }
}

/// Judge server health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeServerStatus {
    Normal,
    Abnormal,
}

/// One registered judge server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeServer {
    pub id: u64,
    pub hostname: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub judger_version: Option<String>,
    #[serde(default)]
    pub cpu_core: u32,
    #[serde(default)]
    pub memory_usage: f64,
    #[serde(default)]
    pub cpu_usage: f64,
    #[serde(default)]
    pub last_heartbeat: Option<DateTime<Utc>>,
    #[serde(default)]
    pub task_number: u32,
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
    pub status: JudgeServerStatus,
}

/// Response of `admin/judge_server` GET
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeServerList {
    pub token: String,
    #[serde(default)]
    pub servers: Vec<JudgeServer>,
}

impl JudgeServerList {
    /// Servers that are enabled and reporting heartbeats
    pub fn available(&self) -> impl Iterator<Item = &JudgeServer> {
        self.servers
            .iter()
            .filter(|s| !s.is_disabled && s.status == JudgeServerStatus::Normal)
    }
}

/// Outgoing mail settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    pub email: String,
    pub port: u16,
    #[serde(default)]
    pub tls: bool,
}

/// Site-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteConfig {
    pub website_base_url: String,
    pub website_name: String,
    pub website_name_shortcut: String,
    pub website_footer: String,
    pub allow_register: bool,
    pub submission_list_show_all: bool,
}

/// Captcha image as a data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Captcha(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_servers() {
        let list: JudgeServerList = serde_json::from_value(serde_json::json!({
            "token": "t",
            "servers": [
                {"id": 1, "hostname": "a", "status": "normal"},
                {"id": 2, "hostname": "b", "status": "abnormal"},
                {"id": 3, "hostname": "c", "status": "normal", "is_disabled": true}
            ]
        }))
        .unwrap();
        let names: Vec<_> = list.available().map(|s| s.hostname.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }
}
