//! Confidence scoring for merged links.

/// Each additional observation of a link adds this much confidence…
pub const OCCURRENCE_BOOST_STEP: u32 = 5;

/// …up to this cap.
pub const OCCURRENCE_BOOST_CAP: u32 = 20;

/// Affiliate-tagged links get a flat bonus: a tagged link is maintained on
/// purpose.
pub const AFFILIATE_BONUS: u32 = 10;

/// Score a merged link 0–100 from the strongest contributing source
/// context, how often it was observed, and whether it is affiliate-tagged.
#[must_use]
pub fn score(max_base_confidence: u8, occurrences: usize, is_affiliate: bool) -> u8 {
    let occurrence_boost = OCCURRENCE_BOOST_CAP.min(
        OCCURRENCE_BOOST_STEP.saturating_mul(u32::try_from(occurrences).unwrap_or(u32::MAX)),
    );
    let affiliate_bonus = if is_affiliate { AFFILIATE_BONUS } else { 0 };

    let total = u32::from(max_base_confidence) + occurrence_boost + affiliate_bonus;
    u8::try_from(total.min(100)).expect("clamped to 100")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bio_observation_scores_85() {
        // base 80 + one-occurrence boost 5
        assert_eq!(score(80, 1, false), 85);
    }

    #[test]
    fn two_observations_score_90() {
        assert_eq!(score(80, 2, false), 90);
    }

    #[test]
    fn occurrence_boost_caps_at_20() {
        assert_eq!(score(70, 4, false), 90);
        assert_eq!(score(70, 100, false), 90);
    }

    #[test]
    fn affiliate_bonus_adds_10() {
        assert_eq!(score(70, 1, true), 85);
    }

    #[test]
    fn score_clamps_at_100() {
        assert_eq!(score(90, 10, true), 100);
    }

    #[test]
    fn score_is_monotonic_in_occurrences() {
        let mut previous = 0;
        for occurrences in 1..20 {
            let s = score(80, occurrences, false);
            assert!(s >= previous, "confidence must never drop as observations grow");
            previous = s;
        }
    }
}
