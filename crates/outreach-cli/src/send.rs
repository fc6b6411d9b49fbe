//! The send-daily command: dispatch pending drafts under the daily cap.

use chrono::Utc;

use outreach_core::SendStatus;
use outreach_mailer::EmailTransport;
use outreach_store::ProspectStore;

/// Counters reported at the end of a send run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SendSummary {
    pub eligible: usize,
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Run one capped send pass over the sendable rows.
///
/// A transport failure marks that row `send_failed` and moves on; it
/// still counts against the cap, since the SMTP conversation happened.
///
/// # Errors
///
/// Returns an error when the store cannot be read or a status write-back
/// fails. Losing track of what was already sent risks double-sending, so
/// write-back failures abort the run.
pub(crate) async fn run_send(
    store: &dyn ProspectStore,
    mailer: &dyn EmailTransport,
    cap: usize,
) -> anyhow::Result<SendSummary> {
    let sendable: Vec<_> = store
        .list()
        .await?
        .into_iter()
        .filter(outreach_core::Prospect::is_sendable)
        .collect();

    let mut summary = SendSummary {
        eligible: sendable.len(),
        ..SendSummary::default()
    };
    tracing::info!(eligible = summary.eligible, cap, "send run starting");

    for prospect in sendable.into_iter().take(cap) {
        summary.attempted += 1;

        // is_sendable guarantees both fields; guard anyway so a racing
        // sheet edit cannot panic the run.
        let (Some(to), Some(email)) = (&prospect.contact_email, &prospect.email) else {
            continue;
        };

        match mailer.send(to, &email.subject, &email.body).await {
            Ok(()) => {
                store
                    .update_status(&prospect.listing_id, SendStatus::Sent, Some(Utc::now()))
                    .await?;
                summary.sent += 1;
                tracing::info!(business = %prospect.name, to, "email sent");
            }
            Err(e) => {
                tracing::warn!(business = %prospect.name, to, error = %e, "send failed");
                store
                    .update_status(&prospect.listing_id, SendStatus::SendFailed, None)
                    .await?;
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        sent = summary.sent,
        failed = summary.failed,
        attempted = summary.attempted,
        "send run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    use outreach_core::{OutreachEmail, Prospect};
    use outreach_mailer::MockMailer;
    use outreach_store::{MemoryStore, ProspectStore};

    fn sendable(id: &str, to: &str) -> Prospect {
        let mut p = Prospect::new(id, format!("Biz {id}"));
        p.contact_email = Some(to.to_owned());
        p.email = Some(OutreachEmail {
            subject: "An idea".to_owned(),
            body: "Hi there.".to_owned(),
            persona: "Jordan Hale".to_owned(),
        });
        p
    }

    #[tokio::test]
    async fn cap_limits_how_many_emails_go_out() {
        let store = MemoryStore::seeded(vec![
            sendable("a", "a@example.com"),
            sendable("b", "b@example.com"),
            sendable("c", "c@example.com"),
            sendable("d", "d@example.com"),
            sendable("e", "e@example.com"),
        ]);
        let mailer = MockMailer::new();

        let summary = run_send(&store, &mailer, 3).await.unwrap();

        assert_eq!(summary.eligible, 5);
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.sent, 3);
        assert_eq!(mailer.sent().len(), 3);

        let sent_rows = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.status == SendStatus::Sent)
            .count();
        assert_eq!(sent_rows, 3);
    }

    #[tokio::test]
    async fn one_transport_failure_does_not_block_the_rest() {
        let store = MemoryStore::seeded(vec![
            sendable("a", "a@example.com"),
            sendable("b", "bounce@example.com"),
            sendable("c", "c@example.com"),
        ]);
        let mailer = MockMailer::failing_for(&["bounce@example.com"]);

        let summary = run_send(&store, &mailer, 10).await.unwrap();

        assert_eq!(summary.sent, 2);
        assert_eq!(summary.failed, 1);

        let rows = store.list().await.unwrap();
        let bounced = rows.iter().find(|p| p.listing_id == "b").unwrap();
        assert_eq!(bounced.status, SendStatus::SendFailed);
        assert!(bounced.sent_at.is_none());
        let delivered = rows.iter().find(|p| p.listing_id == "a").unwrap();
        assert_eq!(delivered.status, SendStatus::Sent);
        assert!(delivered.sent_at.is_some());
    }

    #[tokio::test]
    async fn only_sendable_rows_are_considered() {
        let mut already_sent = sendable("a", "a@example.com");
        already_sent.status = SendStatus::Sent;
        let mut no_contact = sendable("b", "b@example.com");
        no_contact.contact_email = None;
        no_contact.status = SendStatus::MissingContact;
        let mut failed_generation = Prospect::new("c", "Biz c");
        failed_generation.status = SendStatus::GenerationFailed;
        let mut retryable = sendable("d", "d@example.com");
        retryable.status = SendStatus::SendFailed;

        let store = MemoryStore::seeded(vec![
            already_sent,
            no_contact,
            failed_generation,
            retryable,
            sendable("e", "e@example.com"),
        ]);
        let mailer = MockMailer::new();

        let summary = run_send(&store, &mailer, 10).await.unwrap();

        assert_eq!(summary.eligible, 2);
        assert_eq!(summary.sent, 2);
        let recipients: Vec<String> = mailer.sent().into_iter().map(|(to, _, _)| to).collect();
        assert_eq!(recipients, vec!["d@example.com", "e@example.com"]);
    }
}
