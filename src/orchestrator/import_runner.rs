//! 导入执行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整导入的资源管理和流程调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建题库客户端、初始化日志文件
//! 2. **加载输入**：读取 `.csv` / `.txt` 文件（UTF-8）
//! 3. **重复检测准备**：拉取目标岗位下已有的题目
//! 4. **解析预览**：输出可导入题目和逐行诊断
//! 5. **逐条提交**：委托 `ImportSession`，实时记录每条结果
//! 6. **重试文件**：失败的行写回 CSV，修正后可只重新导入这些行
//! 7. **全局统计**：汇总成功 / 失败 / 校验未通过数量

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{error, info, warn};

use crate::clients::{QuestionStore, SupabaseClient};
use crate::config::Config;
use crate::error::{AppError, FileError, ImportError};
use crate::models::TargetRole;
use crate::services::{QuestionService, RetryWriter};
use crate::utils::logging::{
    append_log_line, init_log_file, log_messages, log_preview, log_startup, print_final_stats,
};
use crate::workflow::{ImportSession, SubmitEvent};

/// 支持的输入文件扩展名
const SUPPORTED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// 一次导入的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// 解析通过的题目数
    pub parsed: usize,
    /// 解析阶段被拒绝的行数
    pub rejected: usize,
    /// 创建成功数
    pub created: usize,
    /// 提交失败（已写入重试文件）数
    pub failed: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    store: Box<dyn QuestionStore>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let store = SupabaseClient::new(&config).context("无法创建题库客户端")?;
        Ok(Self::with_store(config, Box::new(store)))
    }

    /// 使用自定义题库存储创建（测试或其他后端）
    pub fn with_store(config: Config, store: Box<dyn QuestionStore>) -> Self {
        Self { config, store }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ImportStats> {
        init_log_file(&self.config.output_log_file)?;
        log_startup(&self.config.target_role, &self.config.input_file);

        let role = TargetRole::new(&self.config.target_role);

        // 加载输入文本
        let text = load_input(Path::new(&self.config.input_file)).await?;

        // 拉取已有题目用于重复检测
        let existing = match &role {
            Some(role) => QuestionService::new(self.store.as_ref())
                .existing_texts(role)
                .await
                .context("无法获取已有题目")?,
            None => Vec::new(),
        };

        // 解析预览
        let mut session = ImportSession::new();
        session.load(&text, &existing);
        log_preview(session.items(), session.messages());

        let mut stats = ImportStats {
            parsed: session.items().len(),
            rejected: session
                .messages()
                .iter()
                .filter(|m| m.is_error() && m.row.is_some())
                .count(),
            ..Default::default()
        };

        if self.config.dry_run {
            info!("🔎 预览模式，不提交任何题目");
            return Ok(stats);
        }

        if session.is_empty() {
            warn!("⚠️ 没有可导入的题目，程序结束");
            return Ok(stats);
        }

        // 逐条提交
        let log_file = self.config.output_log_file.clone();
        let outcome = session
            .submit(self.store.as_ref(), role.as_ref(), |event| {
                record_event(&log_file, &event)
            })
            .await;

        let Some(outcome) = outcome else {
            log_messages(session.messages());
            anyhow::bail!(ImportError::MissingTargetRole);
        };

        log_messages(session.messages());
        stats.created = outcome.success_count();
        stats.failed = outcome.failure_count();

        // 失败的行写回重试文件
        RetryWriter::with_path(&self.config.retry_file)
            .write(session.items())
            .await?;

        print_final_stats(
            stats.created,
            stats.failed,
            stats.rejected,
            &self.config.output_log_file,
        );

        Ok(stats)
    }
}

/// 读取导入文件（仅支持 .csv / .txt，UTF-8）
pub async fn load_input(path: &Path) -> Result<String> {
    let supported = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);

    if !supported {
        return Err(ImportError::UnsupportedFileType {
            path: path.display().to_string(),
        }
        .into());
    }

    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::from(FileError::NotFound {
            path: path.display().to_string(),
        })
        .into());
    }

    info!("\n📁 正在读取: {}", path.display());
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取导入文件: {}", path.display()))?;

    Ok(text)
}

/// 每条提交完成后写入运行日志
fn record_event(log_file: &str, event: &SubmitEvent) {
    let line = match event {
        SubmitEvent::Created { row, question } => format!("第 {} 行 ✓ 已创建 {}", row, question),
        SubmitEvent::Failed { row, error } => format!("第 {} 行 ❌ 创建失败: {}", row, error),
    };
    if let Err(e) = append_log_line(log_file, &line) {
        error!("写入日志文件失败: {}", e);
    }
}
