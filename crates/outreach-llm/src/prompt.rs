//! Prompt construction and completion parsing.
//!
//! Prompts embed only facts the pipeline actually observed. The model is
//! never asked to invent findings about a prospect.

use serde::Deserialize;

use outreach_core::{PainPoint, Persona, Prospect};

use crate::error::LlmError;

pub(crate) const ICEBREAKER_SYSTEM: &str = "You write warm, specific one-sentence openers \
for emails to small local businesses. Mention something concrete and positive about the \
business. One sentence only, no greeting, no sales pitch.";

/// Build the user prompt for icebreaker generation.
#[must_use]
pub fn icebreaker_prompt(prospect: &Prospect) -> String {
    let mut prompt = format!("Business: {}\n", prospect.name);
    if let Some(address) = &prospect.address {
        prompt.push_str(&format!("Location: {address}\n"));
    }
    if let Some(sentiment) = &prospect.sentiment {
        if sentiment.review_count > 0 && sentiment.score > 0.2 {
            prompt.push_str(&format!(
                "Customers speak well of them across {} reviews.\n",
                sentiment.review_count
            ));
        }
    }
    prompt.push_str("Write the opener now.");
    prompt
}

/// Build the system prompt that puts the model in the persona's voice.
#[must_use]
pub fn persona_system_prompt(persona: &Persona) -> String {
    format!(
        "You are {name}, {title}. Your tone is {tone}. You write short cold outreach \
emails to local business owners. Reference only the findings given to you. Respond with \
a single JSON object with exactly two string fields, \"subject\" and \"body\". No markdown, \
no commentary outside the JSON.",
        name = persona.name,
        title = persona.title,
        tone = persona.tone,
    )
}

/// Build the user prompt for the outreach email itself.
///
/// `facts` are the concrete observations (signal details) backing the
/// chosen pain point.
#[must_use]
pub fn email_prompt(
    prospect: &Prospect,
    pain_point: PainPoint,
    facts: &[&str],
    icebreaker: &str,
    persona: &Persona,
) -> String {
    let mut prompt = format!(
        "Write an outreach email to {name}.\nTheir main gap: {pain}.\n",
        name = prospect.name,
        pain = pain_point.as_str(),
    );

    if !facts.is_empty() {
        prompt.push_str("What we found:\n");
        for fact in facts {
            prompt.push_str(&format!("- {fact}\n"));
        }
    }
    if !prospect.found_titles.is_empty() {
        prompt.push_str(&format!(
            "Likely decision makers on site: {}\n",
            prospect.found_titles.join(", ")
        ));
    }

    prompt.push_str(&format!("Open with this icebreaker: {icebreaker}\n"));
    prompt.push_str("Angles to work in:\n");
    for point in &persona.talking_points {
        prompt.push_str(&format!("- {point}\n"));
    }
    prompt.push_str("Keep the body under 150 words. End with a soft call to action.");
    prompt
}

/// A parsed subject/body draft from the model.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Parse a completion into an [`EmailDraft`].
///
/// Models sometimes wrap JSON in code fences or surround it with prose,
/// so after a direct parse fails this retries on the outermost brace span.
///
/// # Errors
///
/// Returns [`LlmError::MalformedCompletion`] when no parse succeeds, and
/// [`LlmError::EmptyCompletion`] when the draft parses but either field
/// is blank.
pub fn parse_email_draft(completion: &str) -> Result<EmailDraft, LlmError> {
    let draft = serde_json::from_str::<EmailDraft>(completion).or_else(|direct_err| {
        match brace_span(completion) {
            Some(span) => serde_json::from_str::<EmailDraft>(span),
            None => Err(direct_err),
        }
    });

    let draft = draft.map_err(|e| LlmError::MalformedCompletion {
        context: "email draft".to_owned(),
        source: e,
    })?;

    if draft.subject.trim().is_empty() || draft.body.trim().is_empty() {
        return Err(LlmError::EmptyCompletion);
    }
    Ok(draft)
}

/// The span from the first `{` to the last `}`, if both exist in order.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
