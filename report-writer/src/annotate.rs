use crate::text::has_cjk;
use moltdigest_core::Post;

/// Text-generation seam for the renderer.
///
/// The heuristic implementation below works from fixed keyword templates; a
/// real summarizer can be swapped in without touching the rendering code.
pub trait Annotator {
    /// A zh-Hant line restating an English post. `None` when the content is
    /// already Chinese and the snippet can stand on its own.
    fn translation_hint(&self, post: &Post, snippet: &str) -> Option<String>;

    /// Up to three actionable idea bullets derived from the post text.
    fn idea_bullets(&self, post: &Post) -> Vec<String>;
}

const MAX_IDEAS: usize = 3;

/// Keyword-template annotator. Not translation, not analysis — a labelled
/// restatement plus canned suggestions keyed on topic groups.
pub struct HeuristicAnnotator;

impl Annotator for HeuristicAnnotator {
    fn translation_hint(&self, post: &Post, snippet: &str) -> Option<String> {
        if has_cjk(post.content.as_deref().unwrap_or("")) {
            return None;
        }
        let title = post.title.as_deref().unwrap_or("(no title)").trim();
        Some(format!("主題：{title}。重點（原文摘錄）：{snippet}"))
    }

    fn idea_bullets(&self, post: &Post) -> Vec<String> {
        let text = format!(
            "{} {} {}",
            post.title.as_deref().unwrap_or(""),
            post.content.as_deref().unwrap_or(""),
            post.url.as_deref().unwrap_or("")
        )
        .to_lowercase();

        let mut ideas: Vec<String> = Vec::new();
        for group in IDEA_GROUPS {
            if group.triggers.iter().any(|trigger| text.contains(trigger)) {
                for idea in group.ideas {
                    if !ideas.iter().any(|existing| existing == idea) {
                        ideas.push((*idea).to_string());
                    }
                }
            }
        }

        if ideas.is_empty() {
            ideas = FALLBACK_IDEAS.iter().map(|s| (*s).to_string()).collect();
        }
        ideas.truncate(MAX_IDEAS);
        ideas
    }
}

struct IdeaGroup {
    triggers: &'static [&'static str],
    ideas: &'static [&'static str],
}

// Fixed group order; every matching group contributes its templates.
const IDEA_GROUPS: &[IdeaGroup] = &[
    IdeaGroup {
        triggers: &["clawdbot", "moltbot", "agent"],
        ideas: &[
            "把這個做成一個 cron/heartbeat：定期抓資料 → 產生摘要 → 推到 git（像你現在的 moltbook digest）。",
            "把流程拆成兩段：① 產生快取（cache）② 準點發送/寫入 git，避免延遲或 API 抖動影響準時性。",
            "把輸出改成『可機器解析』格式（JSON/固定段落），方便後續自動彙整、查詢與回填。",
        ],
    },
    IdeaGroup {
        triggers: &["kubernetes", "k8s", "cni", "etcd"],
        ideas: &[
            "建立『每日 K8s 健康巡檢』：節點資源/Pod 重啟/事件 top N → 產出清單與建議動作。",
            "針對 CNI/網路：加一個『最近 24h 網路錯誤關鍵字』彙整（conntrack/MTU/timeout）並附定位指令。",
            "把 troubleshooting SOP（像你 MinIO 的）寫成 wiki 頁＋每天增量補齊（commit 當作學習日誌）。",
        ],
    },
    IdeaGroup {
        triggers: &["minio", "s3", "erasure", "healing"],
        ideas: &[
            "把 log 關鍵字（例如 canceling remote connection）→ source trace → SOP 變成固定模板，遇到新錯就自動生成一頁。",
            "用 `mc admin heal --json` 落盤成 jsonl，定期把 Items[] 轉成『今日 heal 清單/失敗清單』並推 git。",
            "針對特定 bucket/prefix 建立『一鍵 heal 指令＋結果解析』腳本，縮小範圍避免掃全站。",
        ],
    },
    IdeaGroup {
        triggers: &[
            "vix", "sp500", "s&p", "nasdaq", "earnings", "macro", "gold", "silver", "bitcoin",
            "btc",
        ],
        ideas: &[
            "把 VIX/金銀/BTC 做成固定『風險儀表板』段落（數值 + 變化 + 3 行解讀 + 事件連結），每天自動寫入週報。",
            "把重大事件（財報/Fed/地緣）做成『事件→資產反應』對照表，累積成自己的交易/研究筆記庫。",
            "把 watchlist 的資料抓取與格式化獨立成工具，報告只做『解讀』，降低格式維護成本。",
        ],
    },
];

const FALLBACK_IDEAS: &[&str] = &[
    "把這篇貼文的想法收斂成『一個可重複的自動化流程』，先做 MVP（每天一次即可）。",
    "把輸出固定成 Markdown 模板（標題/重點/下一步），之後才能穩定累積成可搜尋的知識庫。",
    "遇到不確定的地方先加 TODO + 可執行的驗證指令，讓後續能快速補完。",
];
