use chrono::{DateTime, Local};
use moltdigest_core::CoreError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

const HEADER_PREFERENCES: &str = "偏好：moltbot/clawdbot、財經/市場、AI 應用、K8s、Storage。";
const EMPTY_ROUND_PLACEHOLDER: &str =
    "- （本輪沒有找到明顯相關的貼文；可能需要擴大關鍵字或改抓特定 submolt。）";

/// Appends digest sections to dated, monthly-bucketed Markdown files.
///
/// A file is created once with a fixed two-line header and only ever grows;
/// every run appends one timestamped section below the previous ones.
#[derive(Debug, Clone)]
pub struct DigestWriter {
    reports_dir: PathBuf,
}

impl DigestWriter {
    pub fn new(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    /// Digest file for `now`: `{reports_dir}/{YYYYMM}/{MM-DD}.md`.
    pub fn digest_path(&self, now: &DateTime<Local>) -> PathBuf {
        self.reports_dir
            .join(now.format("%Y%m").to_string())
            .join(format!("{}.md", now.format("%m-%d")))
    }

    /// Append one timestamped section, creating the file (with its header)
    /// on first use for the date. Returns the digest file path.
    pub fn append_section(
        &self,
        now: &DateTime<Local>,
        intro: &str,
        entries: &[String],
    ) -> Result<PathBuf, CoreError> {
        let path = self.digest_path(now);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let day = now.format("%Y-%m-%d");
        let is_new = !path.exists();

        let mut section = String::new();
        section.push('\n');
        section.push_str(&format!(
            "## {} {} ({})\n\n",
            day,
            now.format("%H:%M"),
            now.format("%:z")
        ));
        section.push_str(intro);
        section.push('\n');
        if entries.is_empty() {
            section.push('\n');
            section.push_str(EMPTY_ROUND_PLACEHOLDER);
            section.push('\n');
        } else {
            for entry in entries {
                section.push('\n');
                section.push_str(entry);
                section.push('\n');
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        if is_new {
            debug!("Creating digest file {}", path.display());
            file.write_all(
                format!("# Moltbook 精選點子（{day}）\n\n{HEADER_PREFERENCES}\n\n").as_bytes(),
            )?;
        }
        file.write_all(section.as_bytes())?;

        info!(
            "Appended digest section with {} entries to {}",
            entries.len(),
            path.display()
        );
        Ok(path)
    }
}
