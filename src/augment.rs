//! Deterministic reply augmentation.
//!
//! Each step takes the current reply text and returns a new one; the
//! steps compose in a fixed order: community links, then the contact
//! card, then the general listings link. Only the contact card is
//! unconditional.

use crate::communities::{self, CommunityPage};

const CONTACT_CARD: &str = "\n\n---\nWant a closer look? Reach out any time:\n\
**Linda Alvarez**, 55+ Community Specialist\n\
Phone: (703) 555-0142\n\
Email: linda@55realty.com\n\
Schedule a tour: https://calendly.com/linda-55realty/intro-call";

const LISTINGS_LINK: &str =
    "\n\n[Browse all 55+ active adult listings](https://55realty.vercel.app/listings)";

pub fn augment_reply(reply: String, latest_user_message: &str, pages: &[CommunityPage]) -> String {
    let reply = append_community_links(reply, latest_user_message, pages);
    let reply = append_contact_card(reply);
    append_listings_link(reply, latest_user_message)
}

fn append_community_links(mut text: String, user_message: &str, pages: &[CommunityPage]) -> String {
    for page in communities::matching_pages(pages, user_message) {
        text.push_str(&format!(
            "\n\n[Learn more about {}]({})",
            page.link_label, page.url
        ));
    }
    text
}

fn append_contact_card(mut text: String) -> String {
    text.push_str(CONTACT_CARD);
    text
}

fn append_listings_link(mut text: String, user_message: &str) -> String {
    if communities::mentions_active_adult(user_message) {
        text.push_str(LISTINGS_LINK);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::communities::default_pages;

    #[test]
    fn contact_card_always_appended() {
        let out = augment_reply("Sure.".to_string(), "how are taxes?", &default_pages());
        assert!(out.starts_with("Sure."));
        assert!(out.contains("Linda Alvarez"));
        assert!(!out.contains("[Learn more about"));
        assert!(!out.contains("Browse all 55+"));
    }

    #[test]
    fn community_match_appends_link_before_contact_card() {
        let out = augment_reply(
            "Great community.".to_string(),
            "tell me about Carters Mill",
            &default_pages(),
        );
        let link = out.find("[Learn more about Carters Mill]").unwrap();
        let card = out.find("Linda Alvarez").unwrap();
        assert!(link < card);
    }

    #[test]
    fn general_mention_appends_listings_link_last() {
        let out = augment_reply(
            "Plenty of options.".to_string(),
            "show me 55+ communities near Carters Mill",
            &default_pages(),
        );
        let link = out.find("[Learn more about Carters Mill]").unwrap();
        let card = out.find("Linda Alvarez").unwrap();
        let listings = out.find("[Browse all 55+ active adult listings]").unwrap();
        assert!(link < card && card < listings);
    }

    #[test]
    fn augmentation_is_deterministic() {
        let a = augment_reply("Hi.".to_string(), "55+ please", &default_pages());
        let b = augment_reply("Hi.".to_string(), "55+ please", &default_pages());
        assert_eq!(a, b);
    }
}
