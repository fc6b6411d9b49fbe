//! Icebreaker and outreach email generation.

use outreach_core::{OutreachEmail, PainPoint, Persona, Prospect};

use crate::error::LlmError;
use crate::prompt::{self, ICEBREAKER_SYSTEM};
use crate::ChatModel;

/// Generate a one-sentence icebreaker for a prospect.
///
/// Infallible: a model failure logs a warning and falls back to a neutral
/// opener so one flaky completion never blocks the pipeline.
pub async fn generate_icebreaker(model: &dyn ChatModel, prospect: &Prospect) -> String {
    let user = prompt::icebreaker_prompt(prospect);
    match model.complete(ICEBREAKER_SYSTEM, &user).await {
        Ok(text) => text.trim().to_owned(),
        Err(e) => {
            tracing::warn!(
                business = %prospect.name,
                error = %e,
                "icebreaker generation failed, using fallback"
            );
            format!(
                "I came across {} while researching local businesses and was impressed by \
what you've built.",
                prospect.name
            )
        }
    }
}

/// Generate the persona-voiced outreach email for a prospect.
///
/// # Errors
///
/// Propagates the model call failure, or a parse error when the
/// completion is not a usable subject/body draft. The caller records the
/// failure on the prospect rather than aborting the run.
pub async fn generate_email(
    model: &dyn ChatModel,
    prospect: &Prospect,
    pain_point: PainPoint,
    facts: &[&str],
    icebreaker: &str,
    persona: &Persona,
) -> Result<OutreachEmail, LlmError> {
    let system = prompt::persona_system_prompt(persona);
    let user = prompt::email_prompt(prospect, pain_point, facts, icebreaker, persona);

    let completion = model.complete(&system, &user).await?;
    let draft = prompt::parse_email_draft(&completion)?;

    Ok(OutreachEmail {
        subject: draft.subject,
        body: draft.body,
        persona: persona.name.clone(),
    })
}
