//! 重试文件写入服务 - 业务能力层
//!
//! 只负责把提交失败的题目写回 CSV，不关心流程

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::import::columns::Column;
use crate::import::tokenizer::escape_cell;
use crate::models::{BulkParseItem, QuestionDraft};

/// 重试文件的列顺序（与导入模板一致，可直接重新导入）
const RETRY_COLUMNS: [Column; 5] = [
    Column::Format,
    Column::Question,
    Column::Type,
    Column::Options,
    Column::Required,
];

/// 重试文件写入服务
///
/// 职责：
/// - 将提交失败的题目写成可重新导入的 CSV
/// - 没有失败题目时删除旧的重试文件
pub struct RetryWriter {
    retry_file_path: PathBuf,
}

impl RetryWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            retry_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.retry_file_path
    }

    /// 写入待重试的题目
    ///
    /// # 返回
    /// 返回写入的题目数量
    pub async fn write(&self, remaining: &[BulkParseItem]) -> AppResult<usize> {
        let path_display = self.retry_file_path.display().to_string();

        if remaining.is_empty() {
            if fs::try_exists(&self.retry_file_path).await.unwrap_or(false) {
                fs::remove_file(&self.retry_file_path)
                    .await
                    .map_err(|e| AppError::file_write_failed(&path_display, e))?;
                debug!("已删除旧的重试文件: {}", path_display);
            }
            return Ok(0);
        }

        let content = render_csv(remaining);
        fs::write(&self.retry_file_path, content)
            .await
            .map_err(|e| AppError::file_write_failed(&path_display, e))?;

        info!("📝 {} 道失败题目已写入: {}", remaining.len(), path_display);
        Ok(remaining.len())
    }
}

/// 渲染为带表头的 CSV 文本
pub fn render_csv(items: &[BulkParseItem]) -> String {
    let header = RETRY_COLUMNS
        .iter()
        .map(|c| c.header_name())
        .collect::<Vec<_>>()
        .join(",");

    let mut out = header;
    out.push('\n');
    for item in items {
        out.push_str(&render_row(&item.draft));
        out.push('\n');
    }
    out
}

fn render_row(draft: &QuestionDraft) -> String {
    let options = draft.option_texts().join("|");
    let required = if draft.required { "true" } else { "false" };

    [
        draft.format.as_str(),
        draft.text.as_str(),
        draft.question_type.as_str(),
        options.as_str(),
        required,
    ]
    .iter()
    .map(|cell| escape_cell(cell))
    .collect::<Vec<_>>()
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_bulk;
    use crate::models::QuestionFormat;

    fn items() -> Vec<BulkParseItem> {
        vec![
            BulkParseItem {
                row: 2,
                draft: QuestionDraft::text("Why us, and why now?").with_required(false),
            },
            BulkParseItem {
                row: 5,
                draft: QuestionDraft::multiple_choice("Pick \"one\"", ["A", "B"])
                    .with_type("technical"),
            },
        ]
    }

    #[test]
    fn test_rendered_csv_reimports() {
        let csv = render_csv(&items());
        let outcome = parse_bulk::<&str>(&csv, &[]);

        assert!(outcome.header_detected);
        assert_eq!(outcome.error_count(), 0);
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.items[0].draft.text, "Why us, and why now?");
        assert!(!outcome.items[0].draft.required);
        assert_eq!(outcome.items[1].draft.text, "Pick \"one\"");
        assert_eq!(outcome.items[1].draft.format, QuestionFormat::MultipleChoice);
        assert_eq!(outcome.items[1].draft.question_type, "technical");
        assert_eq!(outcome.items[1].draft.option_texts(), vec!["A", "B"]);
    }

    #[test]
    fn test_quoted_text_survives_reimport() {
        let retry = [BulkParseItem {
            row: 3,
            draft: QuestionDraft::text("\"Hello\""),
        }];
        let outcome = parse_bulk::<&str>(&render_csv(&retry), &[]);

        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].draft.text, "\"Hello\"");
    }

    #[tokio::test]
    async fn test_write_then_clear() {
        let path = std::env::temp_dir().join(format!("retry-{}.csv", uuid::Uuid::new_v4()));
        let writer = RetryWriter::with_path(&path);

        let written = writer.write(&items()).await.unwrap();
        assert_eq!(written, 2);
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.starts_with("format,question,type,options,required\n"));

        // 全部成功后旧文件应被删除
        assert_eq!(writer.write(&[]).await.unwrap(), 0);
        assert!(!path.exists());
    }
}
