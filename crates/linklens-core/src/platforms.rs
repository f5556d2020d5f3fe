//! Platforms configuration file: which platforms are enabled and where
//! their public profile pages live.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::Platform;
use crate::ConfigError;

fn default_enabled() -> bool {
    true
}

/// One configured platform: a profile URL template containing a `{handle}`
/// placeholder, and an enabled flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub platform: Platform,
    pub profile_url: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl PlatformEntry {
    /// Substitute `handle` into the profile URL template.
    #[must_use]
    pub fn url_for(&self, handle: &str) -> String {
        self.profile_url.replace("{handle}", handle)
    }
}

#[derive(Debug, Deserialize)]
pub struct PlatformsFile {
    pub platforms: Vec<PlatformEntry>,
}

impl PlatformsFile {
    #[must_use]
    pub fn entry(&self, platform: Platform) -> Option<&PlatformEntry> {
        self.platforms
            .iter()
            .find(|e| e.platform == platform && e.enabled)
    }

    /// Platforms enabled in this file, in declaration order.
    #[must_use]
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        self.platforms
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.platform)
            .collect()
    }
}

/// Load and validate the platforms configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (duplicate platform, template missing the `{handle}`
/// placeholder).
pub fn load_platforms(path: &Path) -> Result<PlatformsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PlatformsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: PlatformsFile = serde_yaml::from_str(&content)?;
    validate_platforms(&file)?;
    Ok(file)
}

fn validate_platforms(file: &PlatformsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &file.platforms {
        if !seen.insert(entry.platform) {
            return Err(ConfigError::Validation(format!(
                "platform '{}' listed more than once",
                entry.platform
            )));
        }
        if !entry.profile_url.contains("{handle}") {
            return Err(ConfigError::Validation(format!(
                "platform '{}' profile_url must contain a {{handle}} placeholder",
                entry.platform
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<PlatformsFile, ConfigError> {
        let file: PlatformsFile = serde_yaml::from_str(yaml)?;
        validate_platforms(&file)?;
        Ok(file)
    }

    #[test]
    fn parses_minimal_platforms_file() {
        let file = parse(
            "platforms:\n  - platform: linktree\n    profile_url: \"https://linktr.ee/{handle}\"\n",
        )
        .unwrap();
        assert_eq!(file.platforms.len(), 1);
        assert!(file.platforms[0].enabled, "enabled defaults to true");
    }

    #[test]
    fn url_for_substitutes_handle() {
        let entry = PlatformEntry {
            platform: Platform::Linktree,
            profile_url: "https://linktr.ee/{handle}".to_string(),
            enabled: true,
        };
        assert_eq!(entry.url_for("somecreator"), "https://linktr.ee/somecreator");
    }

    #[test]
    fn rejects_duplicate_platform() {
        let err = parse(
            "platforms:\n  - platform: linktree\n    profile_url: \"https://linktr.ee/{handle}\"\n  - platform: linktree\n    profile_url: \"https://linktr.ee/{handle}\"\n",
        )
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("linktree")),
            "expected duplicate-platform validation error, got: {err:?}"
        );
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let err = parse(
            "platforms:\n  - platform: youtube\n    profile_url: \"https://youtube.com/@fixed\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn disabled_entries_are_skipped_by_lookups() {
        let file = parse(
            "platforms:\n  - platform: tiktok\n    profile_url: \"https://www.tiktok.com/@{handle}\"\n    enabled: false\n",
        )
        .unwrap();
        assert!(file.entry(Platform::Tiktok).is_none());
        assert!(file.enabled_platforms().is_empty());
    }
}
