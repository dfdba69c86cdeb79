use std::collections::HashMap;

/// Weighted keyword table used for relevance scoring.
///
/// An explicit immutable configuration object handed to the scorer, so runs
/// and tests can use alternate lexicons. Phrases are stored lowercased;
/// empty phrases are dropped (an empty phrase would match everything).
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<(String, u32)>,
}

impl Lexicon {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(phrase, weight)| (phrase.into().to_lowercase(), weight))
            .filter(|(phrase, _)| !phrase.is_empty())
            .collect();
        Self { entries }
    }

    pub fn from_map(map: &HashMap<String, u32>) -> Self {
        Self::new(map.iter().map(|(phrase, weight)| (phrase.clone(), *weight)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(phrase, weight)| (phrase.as_str(), *weight))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in bilingual (en / zh-Hant) interest profile: agent
    /// tooling, AI applications, Kubernetes, storage, markets.
    pub fn default_interests() -> Self {
        Self::new(DEFAULT_INTERESTS.iter().map(|&(phrase, weight)| (phrase, weight)))
    }
}

const DEFAULT_INTERESTS: &[(&str, u32)] = &[
    // agent tooling
    ("clawdbot", 10),
    ("moltbot", 10),
    ("openclaw", 8),
    ("clawd", 6),
    ("agent", 4),
    ("agents", 4),
    ("ai agent", 5),
    ("autonomous", 2),
    ("automation", 4),
    ("workflow", 4),
    ("pipeline", 3),
    ("orchestration", 3),
    ("tool", 3),
    ("tools", 3),
    ("tool calling", 4),
    ("mcp", 4),
    ("webhook", 3),
    ("cron", 3),
    ("scheduler", 2),
    ("github", 2),
    ("actions", 2),
    ("telegram", 2),
    ("signal", 2),
    ("slack", 2),
    ("自動化", 5),
    ("工作流", 5),
    ("排程", 4),
    ("腳本", 3),
    ("工具", 3),
    ("代理", 3),
    ("智能體", 4),
    ("機器人", 3),
    ("通知", 2),
    // AI applications
    ("llm", 3),
    ("rag", 3),
    ("embedding", 2),
    ("inference", 3),
    ("gpu", 3),
    ("cuda", 2),
    ("nvidia", 2),
    ("openai", 2),
    ("prompt", 2),
    ("eval", 2),
    ("agents sdk", 2),
    ("ai", 2),
    ("應用", 2),
    ("提示詞", 3),
    ("向量", 2),
    ("推理", 2),
    ("模型", 2),
    // Kubernetes / cloud native
    ("kubernetes", 6),
    ("k8s", 6),
    ("helm", 3),
    ("cni", 3),
    ("cilium", 3),
    ("calico", 3),
    ("ingress", 2),
    ("service mesh", 2),
    ("istio", 2),
    ("etcd", 3),
    ("kubelet", 2),
    ("pod", 2),
    ("node", 2),
    ("operator", 3),
    ("容器", 3),
    ("集群", 3),
    ("叢集", 3),
    ("網路", 2),
    ("網路插件", 2),
    // storage / infra
    ("storage", 5),
    ("s3", 3),
    ("minio", 7),
    ("erasure", 3),
    ("healing", 3),
    ("ceph", 4),
    ("rook", 2),
    ("longhorn", 3),
    ("zfs", 3),
    ("nfs", 2),
    ("iscsi", 2),
    ("nvme", 3),
    ("nvmeof", 2),
    ("lvm", 2),
    ("raid", 2),
    ("latency", 2),
    ("throughput", 2),
    ("observability", 2),
    ("prometheus", 2),
    ("grafana", 2),
    ("loki", 2),
    ("儲存", 5),
    ("存儲", 5),
    ("物件儲存", 4),
    ("檔案系統", 3),
    ("磁碟", 3),
    ("硬碟", 2),
    ("延遲", 2),
    ("吞吐", 2),
    // markets / finance
    ("markets", 4),
    ("market", 3),
    ("finance", 4),
    ("macro", 3),
    ("earnings", 3),
    ("guidance", 2),
    ("cpi", 2),
    ("pce", 2),
    ("fed", 3),
    ("rate", 2),
    ("cut", 1),
    ("yield", 2),
    ("treasury", 2),
    ("bond", 2),
    ("dxy", 2),
    ("usd", 1),
    ("vix", 4),
    ("volatility", 3),
    ("options", 2),
    ("gold", 3),
    ("xau", 2),
    ("silver", 3),
    ("xag", 2),
    ("bitcoin", 3),
    ("btc", 3),
    ("crypto", 2),
    ("etf", 2),
    ("財經", 5),
    ("市場", 5),
    ("美股", 3),
    ("台股", 2),
    ("匯率", 2),
    ("美元", 2),
    ("殖利率", 2),
    ("通膨", 2),
    ("降息", 2),
    ("恐慌", 2),
    ("黃金", 3),
    ("白銀", 3),
    ("比特幣", 3),
    ("加密", 2),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases_lowercased_on_construction() {
        let lexicon = Lexicon::new([("Kubernetes", 6u32), ("ETCD", 3)]);
        let phrases: Vec<&str> = lexicon.iter().map(|(p, _)| p).collect();
        assert_eq!(phrases, vec!["kubernetes", "etcd"]);
    }

    #[test]
    fn test_empty_phrases_dropped() {
        let lexicon = Lexicon::new([("", 10u32), ("minio", 7)]);
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_default_interests_bilingual() {
        let lexicon = Lexicon::default_interests();
        assert!(!lexicon.is_empty());
        assert!(lexicon.iter().any(|(p, w)| p == "kubernetes" && w == 6));
        assert!(lexicon.iter().any(|(p, w)| p == "儲存" && w == 5));
    }
}
