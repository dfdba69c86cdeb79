use crate::annotate::Annotator;
use crate::text::{collapse_whitespace, truncate_chars};
use moltdigest_core::ScoredPost;

const POST_URL_BASE: &str = "https://www.moltbook.com/post";
const SNIPPET_MAX_CHARS: usize = 260;

/// Render one selected post as a Markdown bullet block: title, permalink,
/// external link, zh-Hant summary line, idea bullets, and a copy-paste task
/// template for handing the post to an agent.
pub fn render_entry(scored: &ScoredPost, annotator: &dyn Annotator) -> String {
    let post = &scored.post;
    let title = post.title.as_deref().unwrap_or("(no title)").trim();
    let content = post.content.as_deref().unwrap_or("").trim();
    let post_url = format!("{}/{}", POST_URL_BASE, post.id);

    let snippet = truncate_chars(&collapse_whitespace(content), SNIPPET_MAX_CHARS);
    let zh_summary = annotator
        .translation_hint(post, &snippet)
        .unwrap_or_else(|| snippet.clone());

    let mut lines = Vec::new();
    lines.push(format!("- **{title}**"));
    lines.push(format!("  - 連結：{post_url}"));
    if let Some(ext_url) = post.external_url() {
        lines.push(format!("  - 外部連結：{ext_url}"));
    }
    lines.push(format!("  - 中文摘要：{zh_summary}"));

    let ideas = annotator.idea_bullets(post);
    if !ideas.is_empty() {
        lines.push("  - 可直接用的 idea（Clawdbot / 工作流）：".to_string());
        for (i, idea) in ideas.iter().enumerate() {
            lines.push(format!("    {}. {}", i + 1, idea));
        }
    }

    lines.push("  - 可複製給 molt 的任務（直接貼這段我就會做）：".to_string());
    lines.push("    ```".to_string());
    lines.push("    請閱讀下面這篇 Moltbook 貼文，並用繁體中文輸出：".to_string());
    lines.push("    1) 5–8 點中文重點摘要（偏研究/可執行）".to_string());
    lines.push("    2) 3 個可以落地到我現有 Clawdbot 的自動化/工作流 idea（最好能接 cron + git）".to_string());
    lines.push("    3) 若要實作其中 1 個 idea：給我具體步驟/檔案/cron 設定草案".to_string());
    lines.push(String::new());
    lines.push(format!("    Moltbook 連結：{post_url}"));
    if let Some(ext_url) = post.external_url() {
        lines.push(format!("    外部連結：{ext_url}"));
    }
    lines.push("    ```".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::HeuristicAnnotator;
    use moltdigest_core::Post;

    fn scored(title: Option<&str>, content: &str, url: Option<&str>) -> ScoredPost {
        ScoredPost {
            score: 5,
            post: Post {
                id: "abc123".to_string(),
                title: title.map(str::to_string),
                content: Some(content.to_string()),
                url: url.map(str::to_string),
                submolt: None,
                created_at: None,
            },
        }
    }

    #[test]
    fn test_entry_contains_title_and_permalink() {
        let entry = render_entry(&scored(Some("Etcd outage"), "details", None), &HeuristicAnnotator);
        assert!(entry.starts_with("- **Etcd outage**"));
        assert!(entry.contains("https://www.moltbook.com/post/abc123"));
    }

    #[test]
    fn test_missing_title_substituted() {
        let entry = render_entry(&scored(None, "details", None), &HeuristicAnnotator);
        assert!(entry.starts_with("- **(no title)**"));
    }

    #[test]
    fn test_external_url_line_only_when_present() {
        let without = render_entry(&scored(Some("t"), "c", None), &HeuristicAnnotator);
        assert!(!without.contains("外部連結"));

        let with = render_entry(
            &scored(Some("t"), "c", Some("https://example.com/x")),
            &HeuristicAnnotator,
        );
        assert!(with.contains("  - 外部連結：https://example.com/x"));
    }

    #[test]
    fn test_snippet_collapsed_and_truncated() {
        let long = "word  \n\t spaced ".repeat(40);
        let entry = render_entry(&scored(Some("t"), &long, None), &HeuristicAnnotator);
        assert!(entry.contains("…"));
        assert!(!entry.contains("  \n\t "));
    }

    #[test]
    fn test_cjk_content_used_verbatim_as_summary() {
        let entry = render_entry(&scored(Some("t"), "這是中文內容", None), &HeuristicAnnotator);
        assert!(entry.contains("  - 中文摘要：這是中文內容"));
        assert!(!entry.contains("主題："));
    }

    #[test]
    fn test_english_content_gets_hint_summary() {
        let entry = render_entry(&scored(Some("Title"), "english words", None), &HeuristicAnnotator);
        assert!(entry.contains("中文摘要：主題：Title。"));
    }

    #[test]
    fn test_task_template_block_present() {
        let entry = render_entry(&scored(Some("t"), "c", None), &HeuristicAnnotator);
        assert!(entry.contains("可複製給 molt 的任務"));
        assert!(entry.contains("    ```"));
    }
}
