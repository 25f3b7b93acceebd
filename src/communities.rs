//! Keyword-trigger table for community pages.
//!
//! Matching a phrase in the latest user message drives two things: which
//! pages get crawled for reference content before the completion call,
//! and which community links get appended to the reply afterwards.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone)]
pub struct CommunityPage {
    /// Literal phrase searched case-insensitively in the user message.
    pub phrase: String,
    pub url: String,
    pub link_label: String,
}

impl CommunityPage {
    pub fn new(
        phrase: impl Into<String>,
        url: impl Into<String>,
        link_label: impl Into<String>,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            url: url.into(),
            link_label: link_label.into(),
        }
    }
}

/// The communities the concierge knows about.
pub fn default_pages() -> Vec<CommunityPage> {
    vec![
        CommunityPage::new(
            "carters mill",
            "https://55realty.vercel.app/communities/carters-mill",
            "Carters Mill",
        ),
        CommunityPage::new(
            "heritage hunt",
            "https://55realty.vercel.app/communities/heritage-hunt",
            "Heritage Hunt",
        ),
        CommunityPage::new(
            "regency at dominion valley",
            "https://55realty.vercel.app/communities/regency-at-dominion-valley",
            "Regency at Dominion Valley",
        ),
        CommunityPage::new(
            "potomac green",
            "https://55realty.vercel.app/communities/potomac-green",
            "Potomac Green",
        ),
    ]
}

/// Pages whose phrase occurs in `text`, in table order. A phrase that
/// matches more than once still contributes a single entry; overlapping
/// phrases are not deduplicated.
pub fn matching_pages<'a>(pages: &'a [CommunityPage], text: &str) -> Vec<&'a CommunityPage> {
    let haystack = text.to_lowercase();
    pages
        .iter()
        .filter(|page| haystack.contains(&page.phrase.to_lowercase()))
        .collect()
}

/// Broader trigger for the general listings link: any mention of 55+,
/// active adult, or retirement living, independent of a specific
/// community match.
pub fn mentions_active_adult(text: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(55\s*\+|55[\s-]?plus|active[\s-]adult|retirement|over[\s-]55)").unwrap()
    });
    re.is_match(text)
}
