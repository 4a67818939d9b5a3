//! 导入会话
//!
//! 持有当前工作集（待提交草稿）和诊断消息。提交后工作集只保留失败的行，
//! 用户修正后可以只重新提交这些行。关闭或取消时清空全部本地状态。

use tracing::warn;

use crate::clients::QuestionStore;
use crate::error::ImportError;
use crate::import::{parse_bulk, BulkParseOutcome};
use crate::models::{BulkMessage, BulkParseItem, TargetRole};
use crate::workflow::batch_submitter::{BatchOutcome, BatchSubmitter, SubmitEvent};

/// 导入会话
#[derive(Debug, Default)]
pub struct ImportSession {
    items: Vec<BulkParseItem>,
    messages: Vec<BulkMessage>,
    header_detected: bool,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析文本并替换工作集
    ///
    /// # 返回
    /// 返回通过校验的题目数量
    pub fn load<S: AsRef<str>>(&mut self, text: &str, existing: &[S]) -> usize {
        let BulkParseOutcome {
            items,
            messages,
            header_detected,
        } = parse_bulk(text, existing);

        self.items = items;
        self.messages = messages;
        self.header_detected = header_detected;
        self.items.len()
    }

    /// 提交当前工作集
    ///
    /// 前置条件（未选岗位、工作集为空）在发起任何请求前检查，
    /// 不满足时在已有诊断之后追加一条阻塞消息并返回 None。
    /// 提交后工作集替换为失败的行。
    pub async fn submit<F>(
        &mut self,
        store: &dyn QuestionStore,
        role: Option<&TargetRole>,
        on_event: F,
    ) -> Option<BatchOutcome>
    where
        F: FnMut(SubmitEvent),
    {
        let role = match self.check_preconditions(role) {
            Ok(role) => role,
            Err(e) => {
                warn!("⚠️ 无法提交: {}", e);
                self.messages.push(BulkMessage::error(precondition_text(&e)));
                return None;
            }
        };

        let mut outcome = BatchSubmitter::new(store)
            .submit(&self.items, role, on_event)
            .await;

        self.items = std::mem::take(&mut outcome.remaining);
        self.messages = outcome.messages.clone();
        outcome.remaining = self.items.clone();

        Some(outcome)
    }

    /// 丢弃全部本地状态
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn items(&self) -> &[BulkParseItem] {
        &self.items
    }

    pub fn messages(&self) -> &[BulkMessage] {
        &self.messages
    }

    pub fn header_detected(&self) -> bool {
        self.header_detected
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(BulkMessage::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_preconditions<'r>(
        &self,
        role: Option<&'r TargetRole>,
    ) -> Result<&'r TargetRole, ImportError> {
        let role = role.ok_or(ImportError::MissingTargetRole)?;
        if self.items.is_empty() {
            return Err(ImportError::EmptyBatch);
        }
        Ok(role)
    }
}

fn precondition_text(error: &ImportError) -> &'static str {
    match error {
        ImportError::MissingTargetRole => "Select a target role before importing",
        ImportError::EmptyBatch => "Nothing to import",
        ImportError::UnsupportedFileType { .. } => "Only .csv and .txt files can be imported",
    }
}
