//! Prospect to spreadsheet-row mapping.
//!
//! One prospect occupies one row in a fixed column order. Conversion back
//! from cells is tolerant: a cell that fails to parse becomes `None` (or
//! the default) rather than poisoning the whole sheet, since rows may
//! have been hand-edited.

use chrono::{DateTime, Utc};

use outreach_core::{
    OutreachEmail, PainPoint, PerformanceScores, Prospect, SendStatus, SentimentSummary,
};

/// Column headers in sheet order, A through U.
pub const COLUMNS: &[&str] = &[
    "listing_id",
    "name",
    "address",
    "phone",
    "website",
    "contact_email",
    "found_titles",
    "pain_point",
    "performance_scores",
    "sentiment_score",
    "review_count",
    "matched_phrases",
    "icebreaker",
    "email_subject",
    "email_body",
    "persona",
    "status",
    "created_at",
    "sent_at",
    "last_contact_at",
    "follow_up_count",
];

/// Multi-value cells (titles, phrases) join on this.
const LIST_SEPARATOR: &str = "; ";

/// The header row written to a fresh sheet.
#[must_use]
pub fn header_row() -> Vec<String> {
    COLUMNS.iter().map(|c| (*c).to_owned()).collect()
}

/// Serialize a prospect into one row of cells, in [`COLUMNS`] order.
#[must_use]
pub fn to_row(prospect: &Prospect) -> Vec<String> {
    let performance = prospect
        .performance
        .as_ref()
        .map(|p| format!("{}/{}/{}", p.performance, p.accessibility, p.seo))
        .unwrap_or_default();
    let (sentiment_score, review_count, phrases) = match &prospect.sentiment {
        Some(s) => (
            format!("{:.3}", s.score),
            s.review_count.to_string(),
            s.matched_phrases.join(LIST_SEPARATOR),
        ),
        None => (String::new(), String::new(), String::new()),
    };
    let (subject, body, persona) = match &prospect.email {
        Some(e) => (e.subject.clone(), e.body.clone(), e.persona.clone()),
        None => (String::new(), String::new(), String::new()),
    };

    vec![
        prospect.listing_id.clone(),
        prospect.name.clone(),
        prospect.address.clone().unwrap_or_default(),
        prospect.phone.clone().unwrap_or_default(),
        prospect.website.clone().unwrap_or_default(),
        prospect.contact_email.clone().unwrap_or_default(),
        prospect.found_titles.join(LIST_SEPARATOR),
        prospect.pain_point.map(PainPoint::as_str).unwrap_or("").to_owned(),
        performance,
        sentiment_score,
        review_count,
        phrases,
        prospect.icebreaker.clone().unwrap_or_default(),
        subject,
        body,
        persona,
        prospect.status.as_str().to_owned(),
        prospect.created_at.to_rfc3339(),
        prospect
            .sent_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        prospect
            .last_contact_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        prospect.follow_up_count.to_string(),
    ]
}

fn cell(cells: &[String], index: usize) -> &str {
    cells.get(index).map_or("", |c| c.as_str())
}

fn optional(cells: &[String], index: usize) -> Option<String> {
    let value = cell(cells, index).trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_scores(raw: &str) -> Option<PerformanceScores> {
    let mut parts = raw.split('/');
    let performance = parts.next()?.trim().parse().ok()?;
    let accessibility = parts.next()?.trim().parse().ok()?;
    let seo = parts.next()?.trim().parse().ok()?;
    Some(PerformanceScores {
        performance,
        accessibility,
        seo,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Deserialize one row of cells back into a prospect.
///
/// Returns `None` when the row has no listing id or name, which covers
/// blank rows and the header row.
#[must_use]
pub fn from_row(cells: &[String]) -> Option<Prospect> {
    let listing_id = optional(cells, 0)?;
    if listing_id == COLUMNS[0] {
        return None;
    }
    let name = optional(cells, 1)?;

    let sentiment = match (
        cell(cells, 9).trim().parse::<f32>().ok(),
        cell(cells, 10).trim().parse::<usize>().ok(),
    ) {
        (Some(score), Some(review_count)) => Some(SentimentSummary {
            score,
            review_count,
            matched_phrases: parse_list(cell(cells, 11)),
        }),
        _ => None,
    };

    let subject = optional(cells, 13);
    let body = optional(cells, 14);
    let email = match (subject, body) {
        (Some(subject), Some(body)) => Some(OutreachEmail {
            subject,
            body,
            persona: cell(cells, 15).trim().to_owned(),
        }),
        _ => None,
    };

    let mut prospect = Prospect::new(listing_id, name);
    prospect.address = optional(cells, 2);
    prospect.phone = optional(cells, 3);
    prospect.website = optional(cells, 4);
    prospect.contact_email = optional(cells, 5);
    prospect.found_titles = parse_list(cell(cells, 6));
    prospect.pain_point = PainPoint::parse(cell(cells, 7));
    prospect.performance = parse_scores(cell(cells, 8));
    prospect.sentiment = sentiment;
    prospect.icebreaker = optional(cells, 12);
    prospect.email = email;
    prospect.status = SendStatus::parse(cell(cells, 16));
    if let Some(created_at) = parse_timestamp(cell(cells, 17)) {
        prospect.created_at = created_at;
    }
    prospect.sent_at = parse_timestamp(cell(cells, 18));
    prospect.last_contact_at = parse_timestamp(cell(cells, 19));
    prospect.follow_up_count = cell(cells, 20).trim().parse().unwrap_or(0);
    Some(prospect)
}
