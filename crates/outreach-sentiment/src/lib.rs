//! Review sentiment analysis for prospect qualification.
//!
//! Scores fetched reviews with a small domain lexicon, blends in star
//! ratings where available, and extracts verbatim complaint phrases. The
//! output feeds the pain-point classifier and gives the email generator
//! concrete facts to reference.

pub mod phrases;
pub mod scorer;

pub use phrases::find_pain_phrases;
pub use scorer::{lexicon_score, review_score};

use outreach_core::{PainPointSignal, Review, SentimentSummary, SignalKind, SignalSource};

/// Mean scores below this mark a prospect's reviews as negative overall.
const NEGATIVE_THRESHOLD: f32 = -0.15;

/// Aggregate a prospect's reviews into one summary.
///
/// The score is the mean per-review score. No reviews is a valid state
/// and yields [`SentimentSummary::empty`], not an error.
#[must_use]
pub fn analyze_reviews(reviews: &[Review]) -> SentimentSummary {
    if reviews.is_empty() {
        return SentimentSummary::empty();
    }

    let mut total = 0.0_f32;
    let mut matched_phrases: Vec<String> = Vec::new();
    for review in reviews {
        total += review_score(&review.text, review.rating);
        for phrase in find_pain_phrases(&review.text) {
            if !matched_phrases.contains(&phrase) {
                matched_phrases.push(phrase);
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let score = total / reviews.len() as f32;

    SentimentSummary {
        score,
        review_count: reviews.len(),
        matched_phrases,
    }
}

/// Derive classifier signals from a review summary.
///
/// A prospect with no reviews gets no reputation signals; absence of
/// reviews is handled as low visibility elsewhere, not as bad reputation.
#[must_use]
pub fn sentiment_signals(summary: &SentimentSummary) -> Vec<PainPointSignal> {
    let mut signals = Vec::new();
    if summary.review_count == 0 {
        return signals;
    }

    if summary.score < NEGATIVE_THRESHOLD {
        signals.push(PainPointSignal::with_detail(
            SignalKind::NegativeReviews,
            SignalSource::Reviews,
            1.0,
            format!(
                "reviews trend negative ({:.2} across {} reviews)",
                summary.score, summary.review_count
            ),
        ));
    }
    for phrase in &summary.matched_phrases {
        signals.push(PainPointSignal::with_detail(
            SignalKind::PainKeyword,
            SignalSource::Reviews,
            1.0,
            format!("reviewers mention \"{phrase}\""),
        ));
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(text: &str, rating: Option<f32>) -> Review {
        Review {
            text: text.to_owned(),
            rating,
        }
    }

    #[test]
    fn no_reviews_yields_empty_summary_and_no_signals() {
        let summary = analyze_reviews(&[]);
        assert_eq!(summary, SentimentSummary::empty());
        assert!(sentiment_signals(&summary).is_empty());
    }

    #[test]
    fn positive_reviews_yield_no_signals() {
        let summary = analyze_reviews(&[
            review("Great work, very professional.", Some(5.0)),
            review("Friendly and reliable crew.", Some(4.0)),
        ]);
        assert!(summary.score > 0.0);
        assert!(sentiment_signals(&summary).is_empty());
    }

    #[test]
    fn negative_reviews_trigger_reputation_signal() {
        let summary = analyze_reviews(&[
            review("Terrible experience, rude and unprofessional.", Some(1.0)),
            review("Worst service I have had, avoid.", Some(1.0)),
        ]);
        assert!(summary.score < NEGATIVE_THRESHOLD);

        let signals = sentiment_signals(&summary);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::NegativeReviews);
        assert!(signals[0].detail.as_deref().unwrap().contains("2 reviews"));
    }

    #[test]
    fn pain_phrase_emits_keyword_signal_even_when_mean_is_neutral() {
        let summary = analyze_reviews(&[
            review("Great result in the end.", Some(5.0)),
            review("They never called back for weeks though.", Some(3.0)),
        ]);
        let signals = sentiment_signals(&summary);
        let keyword = signals
            .iter()
            .find(|s| s.kind == SignalKind::PainKeyword)
            .expect("expected a pain keyword signal");
        assert_eq!(
            keyword.detail.as_deref(),
            Some("reviewers mention \"never called back\"")
        );
    }

    #[test]
    fn duplicate_phrases_across_reviews_collapse() {
        let summary = analyze_reviews(&[
            review("never called back", None),
            review("They never called back again!", None),
        ]);
        assert_eq!(summary.matched_phrases.len(), 1);
    }

    #[test]
    fn mixed_reviews_average_out() {
        let summary = analyze_reviews(&[
            review("excellent", Some(5.0)),
            review("terrible", Some(1.0)),
        ]);
        assert!(summary.score.abs() < 0.2, "got {}", summary.score);
    }
}
