//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::models::{BulkMessage, BulkParseItem, MessageKind};

/// 初始化 tracing 订阅者
///
/// 日志级别由 `RUST_LOG` 控制，默认 `info`；`verbose` 为 true 时默认 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目批量导入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加一行到日志文件
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    use std::io::Write;

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `target_role`: 目标岗位
/// - `input_file`: 输入文件
pub fn log_startup(target_role: &str, input_file: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目批量导入");
    info!("🎯 目标岗位: {}", target_role);
    info!("📄 输入文件: {}", input_file);
    info!("{}", "=".repeat(60));
}

/// 记录解析预览
///
/// # 参数
/// - `items`: 通过校验的题目
/// - `messages`: 诊断消息
pub fn log_preview(items: &[BulkParseItem], messages: &[BulkMessage]) {
    info!("\n{}", "─".repeat(60));
    info!("📋 解析预览: {} 道题目可导入", items.len());
    for item in items {
        info!(
            "  第 {} 行 [{}] {}",
            item.row,
            item.draft.format,
            truncate_text(&item.draft.text, 60)
        );
    }
    log_messages(messages);
    info!("{}", "─".repeat(60));
}

/// 输出诊断消息（error 用 warn 级别）
pub fn log_messages(messages: &[BulkMessage]) {
    for message in messages {
        match message.kind {
            MessageKind::Error => warn!("  ❌ {}", message),
            MessageKind::Info => info!("  💡 {}", message),
        }
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `rejected`: 解析阶段被拒绝的行数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, rejected: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 导入完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, success + failed);
    info!("❌ 提交失败（待重试）: {}", failed);
    info!("🚫 校验未通过: {}", rejected);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("trắc nghiệm", 4), "trắc...");
    }
}
