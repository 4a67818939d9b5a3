//! AI 洞察摘要归一化
//!
//! 后端返回的 AI 分析结果格式不固定：可能是 JSON 对象、数组、
//! 或带标题和列表符号的纯文本。这里统一转换为"分节 + 条目"结构用于展示。

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// 结构化摘要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredSummary {
    pub sections: Vec<SummarySection>,
}

/// 摘要中的一节
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<String>,
}

impl StructuredSummary {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn push(&mut self, section: SummarySection) {
        if !section.items.is_empty() {
            self.sections.push(section);
        }
    }
}

impl SummarySection {
    fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            items: Vec::new(),
        }
    }
}

/// 列表符号：`-` `*` `•` `1.` `1)`
fn bullet_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("valid bullet regex"))
}

/// 归一化原始文本：能解析为 JSON 时按 JSON 处理，否则按纯文本处理
pub fn normalize_summary(raw: &str) -> StructuredSummary {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return normalize_value(&value);
        }
    }
    normalize_text(trimmed)
}

/// 归一化 JSON 值
pub fn normalize_value(value: &Value) -> StructuredSummary {
    let mut summary = StructuredSummary::default();

    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let mut section = SummarySection::titled(humanize_key(key));
                section.items = value_items(inner);
                summary.push(section);
            }
        }
        Value::Array(_) => summary.push(SummarySection {
            title: None,
            items: value_items(value),
        }),
        Value::String(s) => return normalize_text(s),
        other => summary.push(SummarySection {
            title: None,
            items: scalar_text(other).into_iter().collect(),
        }),
    }

    summary
}

/// 纯文本：以 `:` 结尾或 `#` 开头的行作为标题
fn normalize_text(text: &str) -> StructuredSummary {
    let mut summary = StructuredSummary::default();
    let mut current = SummarySection::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(title) = heading(line) {
            summary.push(std::mem::replace(&mut current, SummarySection::titled(title)));
            continue;
        }
        let item = bullet_prefix().replace(line, "");
        let item = item.trim();
        if !item.is_empty() {
            current.items.push(item.to_string());
        }
    }
    summary.push(current);

    summary
}

fn heading(line: &str) -> Option<String> {
    if line.starts_with('#') {
        let title = line.trim_start_matches('#').trim();
        return (!title.is_empty()).then(|| title.to_string());
    }
    if bullet_prefix().is_match(line) {
        return None;
    }
    line.strip_suffix(':')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn value_items(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values
            .iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(flatten_object(map)).filter(|s| !s.is_empty()),
                other => scalar_text(other),
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| inline_text(v).map(|text| format!("{}: {}", humanize_key(k), text)))
            .collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// 对象压平为 `key: value; key: value`
fn flatten_object(map: &Map<String, Value>) -> String {
    map.iter()
        .filter_map(|(k, v)| inline_text(v).map(|text| format!("{}: {}", humanize_key(k), text)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn inline_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(values) => {
            let parts: Vec<String> = values.iter().filter_map(inline_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => Some(flatten_object(map)).filter(|s| !s.is_empty()),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => inline_text(value),
    }
}

/// `key_strengths` / `key-strengths` → `Key strengths`
fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let spaced = spaced.trim();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
