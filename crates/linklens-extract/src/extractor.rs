//! The platform extraction capability and its registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use linklens_core::{Platform, PlatformMetrics, RawLink};

use crate::error::ExtractError;

/// Everything one platform extraction produced: raw links plus whatever
/// profile metrics the page exposed.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub links: Vec<RawLink>,
    pub metrics: Option<PlatformMetrics>,
}

/// One platform's extraction capability.
///
/// Implementations own their HTTP access and parsing; the orchestrator
/// imposes the per-platform deadline externally, so an implementation need
/// not guard against its own stalls. A reachable profile with nothing
/// parseable is a successful empty extraction, not an error.
#[async_trait]
pub trait PlatformExtractor: Send + Sync {
    fn platform(&self) -> Platform;

    async fn extract(&self, handle: &str) -> Result<Extraction, ExtractError>;
}

/// Maps platforms to their registered extractors. Adding a platform means
/// registering a new implementation here, not editing the orchestrator.
#[derive(Default, Clone)]
pub struct ExtractorRegistry {
    extractors: BTreeMap<Platform, Arc<dyn PlatformExtractor>>,
}

impl ExtractorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor, replacing any previous one for its platform.
    pub fn register(&mut self, extractor: Arc<dyn PlatformExtractor>) {
        self.extractors.insert(extractor.platform(), extractor);
    }

    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<Arc<dyn PlatformExtractor>> {
        self.extractors.get(&platform).cloned()
    }

    /// Registered platforms, in alphabetical order.
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        self.extractors.keys().copied().collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extractors.len()
    }
}
