//! 题目服务 - 业务能力层
//!
//! 只处理单个题目：查询已有题干、创建一道题。不关心批次和重试。

use tracing::{debug, info, warn};

use crate::clients::QuestionStore;
use crate::error::AppResult;
use crate::models::{BulkParseItem, Question, TargetRole};
use crate::utils::logging::truncate_text;
use crate::workflow::RowCtx;

/// 题目服务
pub struct QuestionService<'s> {
    store: &'s dyn QuestionStore,
}

impl<'s> QuestionService<'s> {
    /// 创建新的题目服务
    pub fn new(store: &'s dyn QuestionStore) -> Self {
        Self { store }
    }

    /// 目标岗位下已有题目的题干（用于重复检测）
    pub async fn existing_texts(&self, role: &TargetRole) -> AppResult<Vec<String>> {
        let questions = self.store.list_questions(role).await?;
        info!("📚 岗位 {} 已有 {} 道题目", role, questions.len());
        Ok(questions.into_iter().map(|q| q.text).collect())
    }

    /// 创建单个题目
    ///
    /// # 参数
    /// - `item`: 通过校验的题目草稿
    /// - `ctx`: 行上下文
    ///
    /// # 返回
    /// 返回后端保存后的题目
    pub async fn create(&self, item: &BulkParseItem, ctx: &RowCtx) -> AppResult<Question> {
        debug!("{} 📤 正在提交: {}", ctx, truncate_text(&item.draft.text, 80));

        match self.store.create_question(&item.draft, &ctx.role).await {
            Ok(question) => {
                info!("{} ✓ 题目创建成功 (id: {})", ctx, question.id);
                Ok(question)
            }
            Err(e) => {
                warn!("{} ⚠️ 题目创建失败: {}", ctx, e);
                Err(e)
            }
        }
    }
}
