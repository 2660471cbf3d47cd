//! Deterministic placeholder data used when no source produced evidence.

use crate::report::IdentitySummary;
use insight_core::Query;
use insight_sources::BreachRecord;

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Risk score for an odd-length query with no evidence.
pub const RISKY_SCORE: u8 = 85;

/// Risk score for an even-length query with no evidence.
pub const CLEAN_SCORE: u8 = 12;

/// Generated avatar URL seeded by `seed`.
#[must_use]
pub fn avatar_url(seed: &str) -> String {
    format!("{AVATAR_BASE}?seed={}", urlencoding::encode(seed))
}

/// Whether the query falls on the risky side of the parity split.
///
/// Parity is taken over the trimmed query's character count.
#[must_use]
pub fn is_risky(query: &Query) -> bool {
    query.char_len() % 2 == 1
}

/// Placeholder identity.
#[must_use]
pub fn identity(query: &Query) -> IdentitySummary {
    IdentitySummary {
        full_name: "Alex J. Doe".to_string(),
        age_range: "25-34".to_string(),
        location: "San Francisco, CA".to_string(),
        job_title: "Software Engineer".to_string(),
        avatar: avatar_url(query.raw()),
    }
}

/// Placeholder breach list: two records for odd lengths, none for even.
#[must_use]
pub fn breaches(query: &Query) -> Vec<BreachRecord> {
    if !is_risky(query) {
        return Vec::new();
    }
    vec![
        BreachRecord::new(
            "Collection #1",
            "2019-01-07",
            "Email and password exposed in massive data dump.",
        ),
        BreachRecord::new(
            "Verifications.io",
            "2019-02-25",
            "Personal info exposed in marketing database.",
        ),
    ]
}

/// Placeholder risk score.
#[must_use]
pub fn risk_score(query: &Query) -> u8 {
    if is_risky(query) {
        RISKY_SCORE
    } else {
        CLEAN_SCORE
    }
}
