use crate::error::{GitError, GitResult};
use std::process::Command;

/// Minimum required git version
const MIN_GIT_VERSION: (u32, u32) = (2, 20);

/// Installed git version
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GitVersion {
    /// Detect the installed git version
    pub fn detect() -> GitResult<Self> {
        let output = Command::new("git")
            .arg("--version")
            .output()
            .map_err(|e| GitError::GitVersionDetectionFailed(format!("Failed to execute git: {}", e)))?;

        if !output.status.success() {
            return Err(GitError::GitVersionDetectionFailed(
                "git --version command failed".to_string(),
            ));
        }

        Self::parse(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse a version string like "git version 2.39.2"
    pub fn parse(version_str: &str) -> GitResult<Self> {
        let mut words = version_str.split_whitespace();
        if words.next() != Some("git") || words.next() != Some("version") {
            return Err(GitError::ParseError(format!(
                "Unexpected git version format: {}",
                version_str
            )));
        }

        let numbers = words.next().ok_or_else(|| {
            GitError::ParseError(format!("Unexpected git version format: {}", version_str))
        })?;

        // "2.39.2" or platform builds like "2.39.2.windows.1"
        let mut parts = numbers.split('.');
        let major = parse_component(parts.next(), numbers)?;
        let minor = parse_component(parts.next(), numbers)?;
        let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        Ok(GitVersion { major, minor, patch })
    }

    /// Check if this version meets minimum requirements
    pub fn is_supported(&self) -> bool {
        (self.major, self.minor) >= MIN_GIT_VERSION
    }

    /// Validate that the installed git version is sufficient
    pub fn validate() -> GitResult<Self> {
        let version = Self::detect()?;

        if !version.is_supported() {
            return Err(GitError::GitVersionTooOld(version.to_string()));
        }

        Ok(version)
    }
}

fn parse_component(part: Option<&str>, numbers: &str) -> GitResult<u32> {
    part.and_then(|p| p.parse().ok())
        .ok_or_else(|| GitError::ParseError(format!("Invalid version number: {}", numbers)))
}

impl std::fmt::Display for GitVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
