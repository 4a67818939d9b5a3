//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次导入的资源管理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (一次导入：读取 → 解析 → 提交 → 统计)
//!     ↓
//! workflow::ImportSession / BatchSubmitter (工作集与逐条提交)
//!     ↓
//! services (能力层：已有题目 / 创建题目 / 重试文件)
//!     ↓
//! clients (基础设施：QuestionStore / SupabaseClient)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有题库客户端
//! 2. **向下依赖**：编排层 → workflow → services → clients
//! 3. **无业务逻辑**：只做调度和统计，校验全部在 `import` 解析层

pub mod import_runner;

pub use import_runner::{load_input, App, ImportStats};
