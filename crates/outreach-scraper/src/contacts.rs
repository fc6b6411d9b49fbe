//! Contact discovery across a prospect's website.
//!
//! Checks the homepage plus common contact/about paths for email addresses
//! (body text and `mailto:` links) and senior-level job titles. Individual
//! page failures are logged and skipped; the crawl never fails as a whole.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

use crate::client::WebClient;
use crate::presence::visible_text_lower;

/// Common URL paths for contact/about pages, tried relative to the site root.
const CONTACT_PAGE_PATHS: &[&str] = &["/contact", "/contact-us", "/about", "/about-us", "/team"];

/// Keywords for senior-level roles worth addressing directly.
const SENIOR_LEVEL_TITLES: &[&str] = &[
    "owner",
    "ceo",
    "founder",
    "president",
    "managing director",
    "marketing director",
    "sales director",
    "marketing manager",
];

/// Contact details discovered on a prospect's website.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    /// Cleaned, lowercased, de-duplicated email addresses.
    pub emails: Vec<String>,
    /// Title-cased senior role keywords found in page text.
    pub titles: Vec<String>,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
    })
}

fn mailto_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)href\s*=\s*["']mailto:([^"']+)["']"#).expect("valid mailto regex")
    })
}

/// Extract a clean, lowercased email address from a raw string.
///
/// Tolerates `mailto:` leftovers and `?subject=` suffixes by taking the
/// first regex match only.
#[must_use]
pub fn clean_email(raw: &str) -> Option<String> {
    email_regex().find(raw).map(|m| m.as_str().to_lowercase())
}

/// Parse one page for emails and senior titles.
fn parse_page(html: &str, emails: &mut BTreeSet<String>, titles: &mut BTreeSet<String>) {
    let text = visible_text_lower(html);

    for m in email_regex().find_iter(&text) {
        if let Some(cleaned) = clean_email(m.as_str()) {
            emails.insert(cleaned);
        }
    }
    for cap in mailto_regex().captures_iter(html) {
        if let Some(cleaned) = cap.get(1).and_then(|m| clean_email(m.as_str())) {
            emails.insert(cleaned);
        }
    }

    for title in SENIOR_LEVEL_TITLES {
        if text.contains(title) {
            titles.insert(title_case(title));
        }
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Crawl the homepage (already fetched) plus common contact pages for
/// contact info. BTreeSets keep the output deterministic across runs.
pub(crate) async fn find_contacts(
    client: &WebClient,
    base: &Url,
    homepage_html: &str,
) -> ContactInfo {
    let mut emails = BTreeSet::new();
    let mut titles = BTreeSet::new();

    parse_page(homepage_html, &mut emails, &mut titles);

    for path in CONTACT_PAGE_PATHS {
        let Ok(url) = base.join(path) else { continue };
        match client.fetch_html(&url).await {
            Ok(html) => parse_page(&html, &mut emails, &mut titles),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "contact page fetch failed, skipped");
            }
        }
    }

    ContactInfo {
        emails: emails.into_iter().collect(),
        titles: titles.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_email_extracts_and_lowercases() {
        assert_eq!(
            clean_email("Contact: Office@GreenThumb.Example.COM today"),
            Some("office@greenthumb.example.com".to_owned())
        );
    }

    #[test]
    fn clean_email_strips_mailto_subject() {
        assert_eq!(
            clean_email("mailto:info@example.com?subject=Quote"),
            Some("info@example.com".to_owned())
        );
    }

    #[test]
    fn clean_email_rejects_non_addresses() {
        assert_eq!(clean_email("call us at 619-555-0100"), None);
    }

    #[test]
    fn parse_page_finds_body_and_mailto_emails() {
        let html = r#"
            <p>Reach the owner at office@example.com</p>
            <a href="mailto:Sales@Example.com?subject=hi">email sales</a>
        "#;
        let mut emails = BTreeSet::new();
        let mut titles = BTreeSet::new();
        parse_page(html, &mut emails, &mut titles);

        assert!(emails.contains("office@example.com"));
        assert!(emails.contains("sales@example.com"));
        assert!(titles.contains("Owner"));
    }

    #[test]
    fn titles_are_title_cased() {
        let mut emails = BTreeSet::new();
        let mut titles = BTreeSet::new();
        parse_page("<p>our managing director says hi</p>", &mut emails, &mut titles);
        assert!(titles.contains("Managing Director"));
    }
}
