//! Lexicon scorer for local-business review text.

/// Review-vocabulary word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("fantastic", 0.5),
    ("wonderful", 0.5),
    ("friendly", 0.3),
    ("professional", 0.4),
    ("reliable", 0.4),
    ("punctual", 0.4),
    ("responsive", 0.4),
    ("helpful", 0.3),
    ("honest", 0.4),
    ("fair", 0.3),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("quality", 0.3),
    ("thorough", 0.3),
    ("courteous", 0.3),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("horrible", -0.6),
    ("awful", -0.6),
    ("worst", -0.6),
    ("rude", -0.5),
    ("unprofessional", -0.5),
    ("unreliable", -0.5),
    ("late", -0.3),
    ("slow", -0.3),
    ("overpriced", -0.4),
    ("expensive", -0.3),
    ("scam", -0.7),
    ("dishonest", -0.6),
    ("sloppy", -0.4),
    ("damaged", -0.4),
    ("refund", -0.3),
    ("disappointed", -0.4),
    ("disappointing", -0.4),
    ("avoid", -0.5),
    ("unresponsive", -0.5),
    ("problem", -0.3),
];

/// Score a text string using the review lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Score one review, blending lexicon text score with the star rating
/// when a rating is present.
///
/// Ratings are mapped from the 1..=5 star scale onto `[-1.0, 1.0]` around
/// a neutral 3 stars, then averaged with the text score. A review with no
/// rating falls back to the text score alone.
#[must_use]
pub fn review_score(text: &str, rating: Option<f32>) -> f32 {
    let text_score = lexicon_score(text);
    match rating {
        Some(stars) => {
            let rating_score = ((stars - 3.0) / 2.0).clamp(-1.0, 1.0);
            ((text_score + rating_score) / 2.0).clamp(-1.0, 1.0)
        }
        None => text_score,
    }
}
