//! Relevance scoring for fetched posts.

use crate::lexicon::Lexicon;
use moltdigest_core::Post;

/// Score a post against a lexicon.
///
/// Substring containment over the lowercased concatenation of title,
/// content, external URL, and submolt name: each matching phrase contributes
/// its weight once no matter how often it occurs, overlapping phrases all
/// contribute, and a post carrying an external link gets a flat +1.
pub fn score_post(post: &Post, lexicon: &Lexicon) -> u32 {
    let text = [
        post.title.as_deref().unwrap_or(""),
        post.content.as_deref().unwrap_or(""),
        post.url.as_deref().unwrap_or(""),
        post.submolt.as_deref().unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase();

    let mut score = 0;
    for (phrase, weight) in lexicon.iter() {
        if text.contains(phrase) {
            score += weight;
        }
    }
    if post.external_url().is_some() {
        score += 1;
    }
    score
}
