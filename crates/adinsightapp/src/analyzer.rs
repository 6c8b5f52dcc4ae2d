//! Strategy analysis through a text-generation service.
//!
//! [`StrategyAnalyzer::analyze`] always returns something displayable. Missing
//! configuration, network errors and empty completions all come back as a short
//! message instead of an error, so callers can show the result as-is.
//!
//! [`HttpAnalyzer`] talks to any OpenAI-compatible `/chat/completions` endpoint
//! (OpenAI, Ollama, vLLM, LM Studio).

use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::{AdinsightError, Result};
use crate::model::Entry;

pub const MSG_NOT_CONFIGURED: &str = "API Key 未配置，无法使用 AI 分析功能。";
pub const MSG_EMPTY_RESPONSE: &str = "无法生成分析。";
pub const MSG_REQUEST_FAILED: &str = "AI 分析请求失败，请稍后重试。";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub trait StrategyAnalyzer {
    fn analyze(&self, entry: &Entry) -> String;
}

/// Renders the analysis prompt for an entry.
pub fn build_prompt(entry: &Entry) -> String {
    let groups = entry
        .ad_groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let attrs = group
                .attributes
                .iter()
                .map(|a| format!("- {}: {}", a.key, a.value))
                .collect::<Vec<_>>()
                .join("\n");
            format!("[广告模块 {}: {}]\n{}", i + 1, group.name, attrs)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"作为一个专业的移动游戏商业化分析师，请根据以下试玩数据对该游戏的广告变现策略进行简短的专业分析和总结。
请重点关注：广告对用户体验的影响、变现的激进程度以及潜在的改进建议。

游戏名称: {name}
游戏类型: {genre}

=== 广告策略详情 ===
{groups}

=== 试玩备注 ===
{notes}

请用中文输出一段约 100-150 字的分析报告。"#,
        name = entry.game_name,
        genre = entry.genre,
        groups = groups,
        notes = entry.notes,
    )
}

/// Used when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredAnalyzer;

impl StrategyAnalyzer for UnconfiguredAnalyzer {
    fn analyze(&self, _entry: &Entry) -> String {
        MSG_NOT_CONFIGURED.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn has_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

pub struct HttpAnalyzer {
    config: AnalyzerConfig,
    client: reqwest::blocking::Client,
}

impl HttpAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AdinsightError::Api(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn call_api(&self, prompt: &str) -> Result<String> {
        let request = json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": prompt
            }]
        });

        let url = format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );
        debug!("Analyzer request to: {}", url);

        let mut req = self.client.post(&url).json(&request);
        if let Some(ref key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }

        let response = req
            .send()
            .map_err(|e| AdinsightError::Api(e.to_string()))?;
        let status = response.status();
        info!(status = %status, "Analyzer response");

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AdinsightError::Api(format!("API error {}: {}", status, body)));
        }

        let result: Value = response
            .json()
            .map_err(|e| AdinsightError::Api(e.to_string()))?;
        Ok(completion_text(&result))
    }
}

impl StrategyAnalyzer for HttpAnalyzer {
    fn analyze(&self, entry: &Entry) -> String {
        if !self.config.has_key() {
            return MSG_NOT_CONFIGURED.to_string();
        }
        match self.call_api(&build_prompt(entry)) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => MSG_EMPTY_RESPONSE.to_string(),
            Err(e) => {
                warn!(error = %e, "Strategy analysis failed");
                MSG_REQUEST_FAILED.to_string()
            }
        }
    }
}

fn completion_text(response: &Value) -> String {
    response["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// The analyzer matching a configuration: HTTP when a key is set, otherwise the
/// unconfigured stand-in.
pub fn analyzer_for(config: AnalyzerConfig) -> Box<dyn StrategyAnalyzer> {
    if !config.has_key() {
        return Box::new(UnconfiguredAnalyzer);
    }
    match HttpAnalyzer::new(config) {
        Ok(analyzer) => Box::new(analyzer),
        Err(e) => {
            warn!(error = %e, "Could not build HTTP client for analyzer");
            Box::new(FixedMessage(MSG_REQUEST_FAILED))
        }
    }
}

struct FixedMessage(&'static str);

impl StrategyAnalyzer for FixedMessage {
    fn analyze(&self, _entry: &Entry) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_entry;

    #[test]
    fn prompt_lists_groups_and_attributes() {
        let mut entry = make_entry(
            "Farm Story",
            &[&[("广告类型", "激励视频"), ("出现次数", "3次")], &[("广告位置", "屏幕底部")]],
        );
        entry.genre = "模拟经营".to_string();
        entry.notes = "广告较多".to_string();

        let prompt = build_prompt(&entry);
        assert!(prompt.contains("游戏名称: Farm Story"));
        assert!(prompt.contains("游戏类型: 模拟经营"));
        assert!(prompt.contains("[广告模块 1: g1]\n- 广告类型: 激励视频\n- 出现次数: 3次"));
        assert!(prompt.contains("[广告模块 2: g2]\n- 广告位置: 屏幕底部"));
        assert!(prompt.contains("=== 试玩备注 ===\n广告较多"));
    }

    #[test]
    fn unconfigured_returns_message() {
        let entry = make_entry("A", &[]);
        assert_eq!(UnconfiguredAnalyzer.analyze(&entry), MSG_NOT_CONFIGURED);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AnalyzerConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!config.has_key());
        let entry = make_entry("A", &[]);
        assert_eq!(analyzer_for(config).analyze(&entry), MSG_NOT_CONFIGURED);
    }

    #[test]
    fn invalid_endpoint_yields_failure_message() {
        let config = AnalyzerConfig {
            endpoint: "not a url".to_string(),
            model: "m".to_string(),
            api_key: Some("k".to_string()),
        };
        let entry = make_entry("A", &[]);
        assert_eq!(analyzer_for(config).analyze(&entry), MSG_REQUEST_FAILED);
    }

    #[test]
    fn completion_text_reads_first_choice() {
        let response = json!({"choices": [{"message": {"content": "  分析结果 "}}]});
        assert_eq!(completion_text(&response), "分析结果");
        assert_eq!(completion_text(&json!({})), "");
    }
}
