//! # Question Bulk Import
//!
//! 招聘管理后台的题库批量导入：把粘贴或上传的 CSV 文本解析为题目草稿，
//! 逐行校验后逐条提交到后端题库，失败的行保留下来等待重试。
//!
//! ## 架构设计
//!
//! ### ① 解析层（Import）
//! - `import/` - 纯数据转换，不做 I/O
//! - `tokenizer` / `columns` / `normalize` / `parser` / `template`
//!
//! ### ② 基础设施层（Clients）
//! - `clients/` - 题库存储接口 `QuestionStore` 及其 REST 实现 `SupabaseClient`
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 只处理单个题目
//! - `QuestionService` - 查询已有题干、创建一道题
//! - `RetryWriter` - 把失败的行写回 CSV
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - `BatchSubmitter` 顺序提交，`ImportSession` 管理工作集与重试队列
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - `App` 负责一次完整导入
//!
//! 另有 `insight/` 用于把任意格式的 AI 分析结果归一化为分节列表。

pub mod clients;
pub mod config;
pub mod error;
pub mod import;
pub mod insight;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{QuestionStore, SupabaseClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use import::{parse_bulk, tokenize_line, BulkParseOutcome};
pub use models::{BulkMessage, BulkParseItem, MessageKind, Question, QuestionDraft, TargetRole};
pub use orchestrator::{App, ImportStats};
pub use workflow::{BatchOutcome, BatchSubmitter, ImportSession, SubmitEvent};
