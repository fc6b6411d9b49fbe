//! The send-follow-ups command: staged re-touches for contacted prospects.
//!
//! A prospect whose initial email went out gets up to three follow-ups,
//! spaced 3, 5, and 7 days after the previous touch. Stage 3 closes the
//! sequence; after it the prospect is never contacted again.

use chrono::{DateTime, Duration, Utc};

use outreach_core::{PainPoint, PersonaCatalog, Prospect, SendStatus};
use outreach_llm::{follow_up_email, MAX_FOLLOW_UPS};
use outreach_mailer::EmailTransport;
use outreach_store::ProspectStore;

/// Days between touches, indexed by the number of follow-ups already sent.
const STAGE_DELAY_DAYS: [i64; MAX_FOLLOW_UPS as usize] = [3, 5, 7];

/// Counters reported at the end of a follow-up run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct FollowUpSummary {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
}

/// The follow-up stage (1-based) this prospect is due for, if any.
///
/// Only rows that were actually sent qualify; `last_contact()` falls back
/// to the initial send time for rows written before the follow-up columns
/// existed.
fn due_stage(prospect: &Prospect, now: DateTime<Utc>) -> Option<u8> {
    if prospect.status != SendStatus::Sent
        || prospect.contact_email.is_none()
        || prospect.follow_up_count >= MAX_FOLLOW_UPS
    {
        return None;
    }
    let last = prospect.last_contact()?;
    let delay = Duration::days(STAGE_DELAY_DAYS[usize::from(prospect.follow_up_count)]);
    (now >= last + delay).then_some(prospect.follow_up_count + 1)
}

/// Run one capped follow-up pass over the contacted rows.
///
/// A transport failure leaves the row untouched, so the same stage comes
/// up again on the next run.
///
/// # Errors
///
/// Returns an error when the store cannot be read or a row write-back
/// fails; losing a sent follow-up risks re-sending it.
pub(crate) async fn run_follow_ups(
    store: &dyn ProspectStore,
    mailer: &dyn EmailTransport,
    catalog: &PersonaCatalog,
    limit: usize,
    now: DateTime<Utc>,
) -> anyhow::Result<FollowUpSummary> {
    let due: Vec<(Prospect, u8)> = store
        .list()
        .await?
        .into_iter()
        .filter_map(|p| due_stage(&p, now).map(|stage| (p, stage)))
        .collect();

    let mut summary = FollowUpSummary {
        due: due.len(),
        ..FollowUpSummary::default()
    };
    tracing::info!(due = summary.due, limit, "follow-up run starting");

    for (mut prospect, stage) in due.into_iter().take(limit) {
        let pain = prospect.pain_point.unwrap_or(PainPoint::Generic);
        let persona = catalog.select(pain);
        // due_stage keeps stage within the sequence.
        let Some(email) = follow_up_email(&prospect.name, stage, persona) else {
            continue;
        };
        let Some(to) = prospect.contact_email.clone() else {
            continue;
        };

        match mailer.send(&to, &email.subject, &email.body).await {
            Ok(()) => {
                prospect.follow_up_count = stage;
                prospect.last_contact_at = Some(now);
                store.upsert(&prospect).await?;
                summary.sent += 1;
                tracing::info!(business = %prospect.name, stage, to, "follow-up sent");
            }
            Err(e) => {
                tracing::warn!(business = %prospect.name, stage, error = %e, "follow-up send failed");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(sent = summary.sent, failed = summary.failed, "follow-up run finished");
    Ok(summary)
}
