use serde::Serialize;

/// 消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// 阻止该行提交
    Error,
    /// 提示信息，不阻止提交
    Info,
}

/// 解析/提交过程中产生的反馈消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkMessage {
    pub kind: MessageKind,
    /// 关联的源数据行号；全局消息为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    pub text: String,
}

impl BulkMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            row: None,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            row: None,
            text: text.into(),
        }
    }

    pub fn row_error(row: usize, text: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            ..Self::error(text)
        }
    }

    pub fn row_info(row: usize, text: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            ..Self::info(text)
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

impl std::fmt::Display for BulkMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.row {
            Some(row) => write!(f, "Row {}: {}", row, self.text),
            None => write!(f, "{}", self.text),
        }
    }
}
