//! Handle resolution: one username per requested platform.

use std::collections::{BTreeMap, HashMap};

use linklens_core::{HandleSet, Platform};

use crate::error::DiscoveryError;

/// Normalize a seed query or override into a handle: trimmed, leading `@`
/// stripped, lower-cased.
fn normalize(raw: &str) -> String {
    raw.trim().trim_start_matches('@').to_lowercase()
}

/// Resolve one handle per requested platform. Overrides take precedence
/// over the normalized seed query.
///
/// # Errors
///
/// Returns [`DiscoveryError::HandleResolution`] if any requested platform
/// ends up without a usable handle — in particular when the seed query is
/// empty and no override covers the platform. This is the only fatal input
/// condition a discovery run has.
pub fn resolve_handles(
    query: &str,
    platforms: &[Platform],
    overrides: &HashMap<Platform, String>,
) -> Result<HandleSet, DiscoveryError> {
    let default = normalize(query);
    let mut handles: BTreeMap<Platform, String> = BTreeMap::new();

    for platform in platforms {
        let handle = overrides
            .get(platform)
            .map(|raw| normalize(raw))
            .filter(|h| !h.is_empty())
            .or_else(|| {
                if default.is_empty() {
                    None
                } else {
                    Some(default.clone())
                }
            })
            .ok_or_else(|| DiscoveryError::HandleResolution {
                query: query.to_string(),
                platform: *platform,
            })?;
        handles.insert(*platform, handle);
    }

    Ok(HandleSet {
        query: query.to_string(),
        handles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_lowercased_and_at_stripped() {
        let handles = resolve_handles("@SomeCreator", &[Platform::Instagram], &HashMap::new())
            .unwrap();
        assert_eq!(handles.get(Platform::Instagram), Some("somecreator"));
    }

    #[test]
    fn override_takes_precedence() {
        let mut overrides = HashMap::new();
        overrides.insert(Platform::Youtube, "@TheRealChannel".to_string());
        let handles = resolve_handles(
            "somecreator",
            &[Platform::Instagram, Platform::Youtube],
            &overrides,
        )
        .unwrap();
        assert_eq!(handles.get(Platform::Instagram), Some("somecreator"));
        assert_eq!(handles.get(Platform::Youtube), Some("therealchannel"));
    }

    #[test]
    fn empty_query_fails_without_overrides() {
        let result = resolve_handles("   ", &[Platform::Instagram], &HashMap::new());
        assert!(matches!(
            result,
            Err(DiscoveryError::HandleResolution {
                platform: Platform::Instagram,
                ..
            })
        ));
    }

    #[test]
    fn bare_at_sign_fails() {
        let result = resolve_handles("@", &[Platform::Tiktok], &HashMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn empty_query_succeeds_when_overrides_cover_all_platforms() {
        let mut overrides = HashMap::new();
        overrides.insert(Platform::Twitch, "streamer".to_string());
        let handles = resolve_handles("", &[Platform::Twitch], &overrides).unwrap();
        assert_eq!(handles.get(Platform::Twitch), Some("streamer"));
    }

    #[test]
    fn empty_query_fails_for_uncovered_platform() {
        let mut overrides = HashMap::new();
        overrides.insert(Platform::Twitch, "streamer".to_string());
        let result = resolve_handles("", &[Platform::Twitch, Platform::Tiktok], &overrides);
        assert!(matches!(
            result,
            Err(DiscoveryError::HandleResolution {
                platform: Platform::Tiktok,
                ..
            })
        ));
    }
}
