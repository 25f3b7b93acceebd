//! Reference-page crawling: fetch a community page and reduce it to the
//! plain text the completion prompt can carry.

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::warn;

use crate::communities::CommunityPage;

/// Crawled page text is clipped so the augmented prompt stays bounded.
pub const MAX_PAGE_CHARS: usize = 5000;

/// Fetches `url` and returns its visible body text, collapsed and
/// clipped. Any fetch or parse failure is logged and yields an empty
/// string; this never fails the request pipeline.
pub async fn crawl_page(client: &reqwest::Client, url: &str, timeout: Duration) -> String {
    match fetch_page_text(client, url, timeout).await {
        Ok(text) => text,
        Err(err) => {
            warn!(url, error = %err, "failed to crawl page, continuing without it");
            String::new()
        }
    }
}

async fn fetch_page_text(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String, reqwest::Error> {
    let html = client
        .get(url)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(extract_visible_text(&html))
}

/// All text under `<body>`, whitespace runs collapsed to single spaces,
/// trimmed, clipped to [`MAX_PAGE_CHARS`].
fn extract_visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let body = Selector::parse("body").unwrap();
    let raw = match doc.select(&body).next() {
        Some(node) => node.text().collect::<Vec<_>>().join(" "),
        None => return String::new(),
    };
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, MAX_PAGE_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Crawls every matched page in order and builds the combined reference
/// block: `Content from <url>:` plus the extracted text per page, joined
/// by blank lines. Pages that yield no text contribute nothing; an empty
/// result means no reference message should be appended.
pub async fn reference_content(
    client: &reqwest::Client,
    pages: &[&CommunityPage],
    timeout: Duration,
) -> String {
    let mut sections = Vec::new();
    for page in pages {
        let text = crawl_page(client, &page.url, timeout).await;
        if text.is_empty() {
            continue;
        }
        sections.push(format!("Content from {}:\n{}", page.url, text));
    }
    sections.join("\n\n")
}
