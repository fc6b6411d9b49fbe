//! Staged follow-up emails.
//!
//! Follow-ups are fixed templates in the persona's voice, not model
//! completions. Stage 3 closes the sequence and promises no further
//! contact.

use outreach_core::{OutreachEmail, Persona};

/// Length of the follow-up sequence.
pub const MAX_FOLLOW_UPS: u8 = 3;

/// Build the follow-up email for a sequence stage (1-based).
///
/// Returns `None` for a stage outside `1..=MAX_FOLLOW_UPS`.
#[must_use]
pub fn follow_up_email(business_name: &str, stage: u8, persona: &Persona) -> Option<OutreachEmail> {
    let signature = format!("{}\n{}", persona.name, persona.title);
    let talking_point = persona
        .talking_points
        .first()
        .map_or("", String::as_str);

    let (subject, body) = match stage {
        1 => (
            format!("Checking in re: {business_name}"),
            format!(
                "Hi,\n\nI hope you're having a great week. I'm following up on my \
previous note about {business_name} — the short version: {talking_point}.\n\n\
Would you be open to a quick chat next week to see whether any of it applies \
to {business_name}?\n\nBest regards,\n{signature}"
            ),
        ),
        2 => (
            format!("Some thoughts for {business_name}"),
            format!(
                "Hi,\n\nJust wanted to touch base one more time. We've helped \
businesses in similar situations, and I'd be happy to share references and \
what worked for them.\n\nIf this is something you're considering for \
{business_name}, I'm glad to share initial thoughts on a brief call — \
no obligation either way.\n\nRespectfully,\n{signature}"
            ),
        ),
        3 => (
            "One last thing...".to_owned(),
            format!(
                "Hi,\n\nI understand now might not be the right time, so I won't \
reach out again. If you ever find yourself looking for ways to grow \
{business_name}, please don't hesitate to get in touch.\n\nWishing you all \
the best with your business.\n\nBest regards,\n{signature}"
            ),
        ),
        _ => return None,
    };

    Some(OutreachEmail {
        subject,
        body,
        persona: persona.name.clone(),
    })
}
