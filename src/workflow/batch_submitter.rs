//! 批量提交流程 - 流程层
//!
//! 核心职责：把一批已校验的草稿逐条创建为题目
//!
//! 流程顺序：
//! 1. 按顺序逐条提交（上一条完成后才发起下一条）
//! 2. 成功 → 立即发出 `SubmitEvent::Created`
//! 3. 失败 → 发出 `SubmitEvent::Failed`，记录行号错误，保留到重试队列
//!
//! 已创建的题目不会回滚，部分完成是可见的正常结果。

use tracing::info;

use crate::clients::QuestionStore;
use crate::error::AppError;
use crate::models::{BulkMessage, BulkParseItem, Question, TargetRole};
use crate::services::QuestionService;
use crate::workflow::RowCtx;

/// 单条提交完成时发出的事件
#[derive(Debug)]
pub enum SubmitEvent {
    /// 创建成功
    Created { row: usize, question: Question },
    /// 创建失败（该行进入重试队列）
    Failed { row: usize, error: AppError },
}

impl SubmitEvent {
    pub fn row(&self) -> usize {
        match self {
            SubmitEvent::Created { row, .. } | SubmitEvent::Failed { row, .. } => *row,
        }
    }
}

/// 一次批量提交的结果
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// 已创建的题目（按提交顺序）
    pub created: Vec<Question>,
    /// 提交失败、等待重试的草稿
    pub remaining: Vec<BulkParseItem>,
    /// 失败明细 + 汇总信息
    pub messages: Vec<BulkMessage>,
}

impl BatchOutcome {
    pub fn success_count(&self) -> usize {
        self.created.len()
    }

    pub fn failure_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// 批量提交流程
///
/// - 不持有任何 UI 状态，进度通过事件回调交给调用方
/// - 不做并发，保证错误与行号一一对应
pub struct BatchSubmitter<'s> {
    service: QuestionService<'s>,
}

impl<'s> BatchSubmitter<'s> {
    /// 创建新的批量提交流程
    pub fn new(store: &'s dyn QuestionStore) -> Self {
        Self {
            service: QuestionService::new(store),
        }
    }

    /// 逐条提交
    ///
    /// # 参数
    /// - `items`: 已校验的草稿
    /// - `role`: 目标岗位
    /// - `on_event`: 每条完成后立即调用
    pub async fn submit<F>(
        &self,
        items: &[BulkParseItem],
        role: &TargetRole,
        mut on_event: F,
    ) -> BatchOutcome
    where
        F: FnMut(SubmitEvent),
    {
        let total = items.len();
        let mut outcome = BatchOutcome::default();

        for (idx, item) in items.iter().enumerate() {
            let ctx = RowCtx::new(item.row, idx + 1, total, role.clone());

            match self.service.create(item, &ctx).await {
                Ok(question) => {
                    outcome.created.push(question.clone());
                    on_event(SubmitEvent::Created {
                        row: item.row,
                        question,
                    });
                }
                Err(error) => {
                    outcome
                        .messages
                        .push(BulkMessage::row_error(item.row, format!("failed to create: {}", error)));
                    outcome.remaining.push(item.clone());
                    on_event(SubmitEvent::Failed {
                        row: item.row,
                        error,
                    });
                }
            }
        }

        outcome.messages.push(BulkMessage::info(format!(
            "Created {} of {} questions",
            outcome.success_count(),
            total
        )));

        info!(
            "📊 批量提交完成: 成功 {}/{}，待重试 {}",
            outcome.success_count(),
            total,
            outcome.failure_count()
        );

        outcome
    }
}
