//! The build-list command: discover, enrich, classify, and draft.
//!
//! Per-prospect failures are recorded on the prospect's row and skipped
//! rather than propagated so a single bad listing does not abort the full
//! run. Store failures do propagate; without persistence the run has
//! nothing to show for its API spend.

use std::collections::HashSet;

use outreach_core::{classify, PainPointSignal, PersonaCatalog, Prospect, SendStatus};
use outreach_llm::{generate_email, generate_icebreaker, ChatModel};
use outreach_places::BusinessDirectory;
use outreach_scraper::{performance_signals, PerformanceProbe, WebPresence};
use outreach_sentiment::{analyze_reviews, sentiment_signals};
use outreach_store::ProspectStore;

/// Everything the build run needs, behind trait objects so tests can
/// substitute deterministic fakes.
pub(crate) struct BuildDeps<'a> {
    pub directory: &'a dyn BusinessDirectory,
    pub presence: &'a dyn WebPresence,
    pub probe: &'a dyn PerformanceProbe,
    pub model: &'a dyn ChatModel,
    pub store: &'a dyn ProspectStore,
    pub catalog: &'a PersonaCatalog,
    /// Pause between prospects; zero in tests.
    pub inter_request_delay_ms: u64,
}

/// Counters reported at the end of a build run.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BuildSummary {
    pub discovered: usize,
    pub added: usize,
    pub skipped_duplicates: usize,
    pub missing_contact: usize,
    pub generation_failures: usize,
}

/// Run one build-list pass for a search query.
///
/// # Errors
///
/// Returns an error when discovery yields nothing usable or when the
/// store rejects a write. Enrichment and generation failures for a single
/// prospect are recorded in that prospect's status instead.
pub(crate) async fn run_build(
    deps: &BuildDeps<'_>,
    query: &str,
    max_leads: usize,
) -> anyhow::Result<BuildSummary> {
    let run_id = uuid::Uuid::new_v4();
    tracing::info!(%run_id, query, max_leads, "build run starting");

    // Rows that failed generation last time are left out of the seen set
    // so a rediscovered listing gets re-enriched and re-drafted; the
    // upsert keyed by listing id overwrites the stale row.
    let mut seen: HashSet<String> = deps
        .store
        .list()
        .await?
        .into_iter()
        .filter(|p| p.status != SendStatus::GenerationFailed)
        .map(|p| p.listing_id)
        .collect();

    let listings = deps.directory.find_businesses(query, max_leads).await?;
    let mut summary = BuildSummary {
        discovered: listings.len(),
        ..BuildSummary::default()
    };

    for listing in listings {
        if !seen.insert(listing.listing_id.clone()) {
            tracing::debug!(listing_id = %listing.listing_id, "skipping known listing");
            summary.skipped_duplicates += 1;
            continue;
        }

        let mut prospect = Prospect::new(&listing.listing_id, &listing.name);
        prospect.address = listing.address.clone();
        prospect.phone = listing.phone.clone();
        prospect.website = listing.website.clone();

        enrich_and_draft(deps, &mut prospect, &mut summary).await;

        deps.store.upsert(&prospect).await?;
        summary.added += 1;

        if deps.inter_request_delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(deps.inter_request_delay_ms))
                .await;
        }
    }

    tracing::info!(
        %run_id,
        discovered = summary.discovered,
        added = summary.added,
        skipped = summary.skipped_duplicates,
        missing_contact = summary.missing_contact,
        generation_failures = summary.generation_failures,
        "build run finished"
    );
    Ok(summary)
}

/// Fill in one prospect's enrichment fields, pain point, and email draft.
async fn enrich_and_draft(
    deps: &BuildDeps<'_>,
    prospect: &mut Prospect,
    summary: &mut BuildSummary,
) {
    let mut signals: Vec<PainPointSignal> = Vec::new();

    let report = deps.presence.scrape(prospect.website.as_deref()).await;
    signals.extend(report.signals);
    prospect.contact_email = report.emails.first().cloned();
    prospect.found_titles = report.titles;

    if let Some(website) = &prospect.website {
        prospect.performance = deps.probe.scores(website).await;
        signals.extend(performance_signals(prospect.performance.as_ref()));
    }

    let reviews = match deps.directory.reviews(&prospect.listing_id).await {
        Ok(reviews) => reviews,
        Err(e) => {
            tracing::warn!(
                listing_id = %prospect.listing_id,
                error = %e,
                "review fetch failed, scoring without reviews"
            );
            Vec::new()
        }
    };
    let sentiment = analyze_reviews(&reviews);
    signals.extend(sentiment_signals(&sentiment));
    prospect.sentiment = Some(sentiment);

    let pain = classify(&signals, deps.catalog.priority());
    prospect.pain_point = Some(pain);
    let persona = deps.catalog.select(pain);

    prospect.icebreaker = Some(generate_icebreaker(deps.model, prospect).await);

    if prospect.contact_email.is_none() {
        // No address to send to; keep the row for manual follow-up but
        // skip the draft.
        tracing::info!(business = %prospect.name, "no contact email found");
        prospect.status = SendStatus::MissingContact;
        summary.missing_contact += 1;
        return;
    }

    let facts = PainPointSignal::details(&signals);
    let icebreaker = prospect.icebreaker.clone().unwrap_or_default();
    match generate_email(deps.model, prospect, pain, &facts, &icebreaker, persona).await {
        Ok(email) => {
            prospect.email = Some(email);
            prospect.status = SendStatus::Pending;
        }
        Err(e) => {
            tracing::warn!(business = %prospect.name, error = %e, "email generation failed");
            prospect.status = SendStatus::GenerationFailed;
            summary.generation_failures += 1;
        }
    }
}
