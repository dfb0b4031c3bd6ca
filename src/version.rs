//! Build stamp
//!
//! The version string is the build date plus a short commit id,
//! `YYYYMMDD-xxxxx`. Outside a git checkout the commit part is `dev`.

use std::process::{Command, Stdio};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::config::BuildConfig;
use crate::constants::{VERSION_COMMIT_LENGTH, VERSION_FALLBACK_COMMIT};

/// Values baked into the front end bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BuildInfo {
    pub version: String,
    #[serde(rename = "NODE_ENV")]
    pub environment: String,
    pub use_sentry: bool,
}

impl BuildInfo {
    /// Stamp for today and the current checkout
    pub fn current(config: &BuildConfig) -> Self {
        let version = compute_version(Local::now().date_naive(), git_head().as_deref());
        tracing::debug!(%version, "computed build version");
        Self::with_version(config, version)
    }

    pub fn with_version(config: &BuildConfig, version: String) -> Self {
        Self {
            version,
            environment: config.environment.clone(),
            use_sentry: config.use_sentry,
        }
    }
}

/// `YYYYMMDD-` followed by the first characters of `commit`, or `dev`
pub fn compute_version(date: NaiveDate, commit: Option<&str>) -> String {
    let commit = commit
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.chars().take(VERSION_COMMIT_LENGTH).collect::<String>())
        .unwrap_or_else(|| VERSION_FALLBACK_COMMIT.to_string());
    format!("{}-{}", date.format("%Y%m%d"), commit)
}

/// Full hash of `HEAD`, if git is available and this is a checkout
pub fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_version_uses_short_commit() {
        assert_eq!(
            compute_version(date(), Some("3f2a9c1e0b7d")),
            "20240309-3f2a9"
        );
    }

    #[test]
    fn test_version_falls_back_to_dev() {
        assert_eq!(compute_version(date(), None), "20240309-dev");
        assert_eq!(compute_version(date(), Some("  \n")), "20240309-dev");
    }

    #[test]
    fn test_build_info_shape() {
        let config = BuildConfig {
            environment: "production".to_string(),
            use_sentry: true,
        };
        let info = BuildInfo::with_version(&config, "20240309-dev".to_string());
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            serde_json::json!({
                "VERSION": "20240309-dev",
                "NODE_ENV": "production",
                "USE_SENTRY": true
            })
        );
    }

    #[test]
    fn test_current_version_format() {
        let config = BuildConfig {
            environment: "development".to_string(),
            use_sentry: false,
        };
        let info = BuildInfo::current(&config);
        let (day, commit) = info.version.split_once('-').unwrap();
        assert_eq!(day.len(), 8);
        assert!(day.chars().all(|c| c.is_ascii_digit()));
        assert!(commit == "dev" || commit.len() == 5);
    }
}
