use linklens_core::Platform;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The only input-level failure a run can have: no usable handle for a
    /// requested platform. Everything downstream degrades instead of
    /// failing.
    #[error("cannot resolve a handle for platform '{platform}' from query \"{query}\"")]
    HandleResolution { query: String, platform: Platform },
}
