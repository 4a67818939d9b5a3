//! 题库存储接口
//!
//! 后端对本 crate 是黑盒，只需要"按岗位列出题目"和"创建一道题"两个能力。

use futures::future::BoxFuture;

use crate::error::AppResult;
use crate::models::{Question, QuestionDraft, TargetRole};

/// 题库存储
///
/// 返回 `BoxFuture` 以便以 `&dyn QuestionStore` 形式传递
pub trait QuestionStore: Send + Sync {
    /// 将草稿保存为目标岗位下的题目
    fn create_question<'a>(
        &'a self,
        draft: &'a QuestionDraft,
        role: &'a TargetRole,
    ) -> BoxFuture<'a, AppResult<Question>>;

    /// 列出目标岗位下已有的题目
    fn list_questions<'a>(&'a self, role: &'a TargetRole) -> BoxFuture<'a, AppResult<Vec<Question>>>;
}
