//! Ranking and selection of scored posts.

use crate::lexicon::Lexicon;
use crate::scorer::score_post;
use moltdigest_core::{Post, ScoredPost};
use std::collections::HashSet;
use tracing::{debug, info};

/// How many posts a run may surface, and whether previously-seen posts are
/// dropped before scoring.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    pub max_selected: usize,
    pub discovery_count: usize,
    /// Drop posts whose id is already in the seen set before scoring.
    /// Off by default: the seen set is bookkeeping, not a filter.
    pub filter_seen: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_selected: 10,
            discovery_count: 6,
            filter_seen: false,
        }
    }
}

/// Rank candidates and pick the posts worth surfacing.
///
/// Sorts descending by (score, created_at) so ties land most-recent-first.
/// Returns up to `max_selected` positively scored posts; when nothing scores
/// above zero, falls back to the top `discovery_count` of the same ordering
/// regardless of score, so a quiet feed still produces a digest.
pub fn select_top(
    posts: &[Post],
    lexicon: &Lexicon,
    policy: &SelectionPolicy,
    seen: &HashSet<String>,
) -> Vec<ScoredPost> {
    let mut scored: Vec<ScoredPost> = posts
        .iter()
        .filter(|post| !policy.filter_seen || !seen.contains(&post.id))
        .map(|post| ScoredPost {
            score: score_post(post, lexicon),
            post: post.clone(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.post.created_at.cmp(&a.post.created_at))
    });

    let top: Vec<ScoredPost> = scored
        .iter()
        .filter(|sp| sp.score > 0)
        .take(policy.max_selected)
        .cloned()
        .collect();

    if top.is_empty() {
        info!(
            "No positively scored posts among {} candidates; discovery mode",
            scored.len()
        );
        scored.truncate(policy.discovery_count);
        return scored;
    }

    debug!("Selected {} positively scored posts", top.len());
    top
}
