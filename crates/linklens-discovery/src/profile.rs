//! The discovery run's output artifact.

use serde::{Deserialize, Serialize};

use linklens_core::{CanonicalLink, HandleSet, PlatformResult, ProcessedLink, RunMetadata};
use linklens_intel::IntelligenceReport;

/// The sole artifact a discovery run hands back: every per-platform
/// outcome, the processed and deduplicated links, the intelligence report,
/// and run metadata. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorProfile {
    pub handles: HandleSet,
    pub platform_results: Vec<PlatformResult>,
    pub processed_links: Vec<ProcessedLink>,
    pub canonical_links: Vec<CanonicalLink>,
    pub report: IntelligenceReport,
    pub summary: String,
    pub metadata: RunMetadata,
}

/// One-line human summary of a run.
pub(crate) fn build_summary(
    results: &[PlatformResult],
    canonical_links: &[CanonicalLink],
    report: &IntelligenceReport,
) -> String {
    let succeeded = results.iter().filter(|r| r.success).count();
    let failed = results.len() - succeeded;
    format!(
        "{} canonical links from {} of {} platforms ({} failed); estimated ${:.0}/month; overall score {:.0}",
        canonical_links.len(),
        succeeded,
        results.len(),
        failed,
        report.value.total_value,
        report.scores.overall,
    )
}
