use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 题目格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFormat {
    /// 文本作答
    #[default]
    Text,
    /// 选择题
    MultipleChoice,
}

impl QuestionFormat {
    /// 获取标准名称（与后端字段一致）
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionFormat::Text => "text",
            QuestionFormat::MultipleChoice => "multiple_choice",
        }
    }
}

impl std::fmt::Display for QuestionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 选择题选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
}

impl QuestionOption {
    /// 创建带新 ID 的选项
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
        }
    }
}

/// 尚未保存的题目草稿
///
/// 选择题至少携带 2 个非空选项，文本题不携带选项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    #[serde(rename = "type", default)]
    pub question_type: String,
    pub format: QuestionFormat,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
}

impl QuestionDraft {
    /// 创建文本题草稿
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            question_type: String::new(),
            format: QuestionFormat::Text,
            required: true,
            options: Vec::new(),
        }
    }

    /// 创建选择题草稿
    pub fn multiple_choice<I, S>(text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            question_type: String::new(),
            format: QuestionFormat::MultipleChoice,
            required: true,
            options: options.into_iter().map(QuestionOption::new).collect(),
        }
    }

    pub fn with_type(mut self, question_type: impl Into<String>) -> Self {
        self.question_type = question_type.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// 检查格式与选项是否一致
    pub fn is_consistent(&self) -> bool {
        match self.format {
            QuestionFormat::Text => self.options.is_empty(),
            QuestionFormat::MultipleChoice => {
                self.options
                    .iter()
                    .filter(|o| !o.text.trim().is_empty())
                    .count()
                    >= 2
            }
        }
    }

    /// 选项文本（忽略 ID）
    pub fn option_texts(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.text.as_str()).collect()
    }
}

/// 带来源行号的解析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkParseItem {
    /// 源数据中的行号（从1开始）
    pub row: usize,
    pub draft: QuestionDraft,
}

/// 后端已保存的题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub question_type: String,
    #[serde(default)]
    pub format: QuestionFormat,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub target_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_required() -> bool {
    true
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题目内容以便显示（最多80个字符）
        let preview = if self.text.chars().count() > 80 {
            self.text.chars().take(80).collect::<String>() + "..."
        } else {
            self.text.clone()
        };
        write!(f, "#{} {} [{}]", self.id, preview, self.format)
    }
}
