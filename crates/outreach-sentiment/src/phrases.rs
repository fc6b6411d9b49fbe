//! Multi-word pain phrases in customer reviews.
//!
//! These are complaints a marketing pitch can speak to directly, so they
//! are surfaced verbatim as signal details rather than folded into the
//! numeric score.

/// Complaint phrases matched case-insensitively against review text.
pub(crate) const PAIN_PHRASES: &[&str] = &[
    "never called back",
    "never called me back",
    "didn't call back",
    "no call back",
    "never responded",
    "no response",
    "hard to reach",
    "hard to get a hold of",
    "hard to find",
    "couldn't find them online",
    "never showed up",
    "didn't show up",
    "poor communication",
    "slow to respond",
    "website doesn't work",
    "website is down",
];

/// Find distinct pain phrases present in `text`, preserving the order of
/// the phrase table.
#[must_use]
pub fn find_pain_phrases(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    PAIN_PHRASES
        .iter()
        .filter(|phrase| lower.contains(**phrase))
        .map(|phrase| (*phrase).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_case_insensitive() {
        let found = find_pain_phrases("They NEVER CALLED BACK after the estimate.");
        assert_eq!(found, vec!["never called back".to_owned()]);
    }

    #[test]
    fn clean_review_matches_nothing() {
        assert!(find_pain_phrases("Great service, arrived on time.").is_empty());
    }

    #[test]
    fn multiple_phrases_all_reported() {
        let text = "Hard to reach, and then they never showed up.";
        let found = find_pain_phrases(text);
        assert!(found.contains(&"hard to reach".to_owned()));
        assert!(found.contains(&"never showed up".to_owned()));
    }
}
