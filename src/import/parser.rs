//! 批量题目解析
//!
//! 输入一段 CSV 文本和已有题目，输出通过校验的题目草稿和逐行诊断信息。
//! 解析是纯函数：相同输入永远得到相同的草稿列表和消息列表。

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::import::columns::{Column, ColumnMap};
use crate::import::normalize::{dedup_key, normalize_format, parse_required, split_options};
use crate::import::tokenizer::tokenize_line;
use crate::models::{BulkMessage, BulkParseItem, QuestionDraft, QuestionFormat, QuestionOption};

/// 选择题最少选项数
pub const MIN_OPTIONS: usize = 2;

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkParseOutcome {
    /// 通过校验的题目
    pub items: Vec<BulkParseItem>,
    /// 逐行诊断信息（error / info）
    pub messages: Vec<BulkMessage>,
    /// 首行是否被识别为表头
    pub header_detected: bool,
}

impl BulkParseOutcome {
    fn structural(text: &str) -> Self {
        Self {
            messages: vec![BulkMessage::error(text)],
            ..Self::default()
        }
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_error()).count()
    }
}

/// 单行校验失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowRejection {
    MissingText,
    DuplicateOfExisting,
    DuplicateOfRow(usize),
    NotEnoughOptions(usize),
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRejection::MissingText => write!(f, "question text is missing"),
            RowRejection::DuplicateOfExisting => {
                write!(f, "question already exists in this question set")
            }
            RowRejection::DuplicateOfRow(row) => {
                write!(f, "duplicate of row {} in this import", row)
            }
            RowRejection::NotEnoughOptions(found) => write!(
                f,
                "multiple choice question needs at least {} options (found {})",
                MIN_OPTIONS, found
            ),
        }
    }
}

/// 解析批量导入文本
///
/// # 参数
/// - `text`: 粘贴或上传的原始文本
/// - `existing`: 当前题库中已有的题干，用于重复检测
///
/// # 返回
/// 永远返回结果；结构性问题（无数据、表头缺少题干列）以单条 error 消息表示
pub fn parse_bulk<S: AsRef<str>>(text: &str, existing: &[S]) -> BulkParseOutcome {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return BulkParseOutcome::structural("No data found");
    };

    let mut messages = Vec::new();
    let first_cells = tokenize_line(first);

    let (columns, header_detected) = match ColumnMap::detect_header(&first_cells) {
        Some(found) => {
            if !found.map.has(Column::Question) {
                return BulkParseOutcome::structural("Header row has no question/text column");
            }
            if !found.ignored.is_empty() {
                messages.push(BulkMessage::row_info(
                    1,
                    format!("ignored unknown columns: {}", found.ignored.join(", ")),
                ));
            }
            (found.map, true)
        }
        None => (ColumnMap::positional(), false),
    };

    let data_start = usize::from(header_detected);
    if lines.len() <= data_start {
        let mut outcome = BulkParseOutcome::structural("No data rows found");
        outcome.header_detected = header_detected;
        return outcome;
    }

    debug!(
        "批量解析: {} 行数据, 表头: {}",
        lines.len() - data_start,
        header_detected
    );

    let existing_keys: HashSet<String> = existing.iter().map(|t| dedup_key(t.as_ref())).collect();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut items = Vec::new();

    for (idx, line) in lines.iter().enumerate().skip(data_start) {
        let row = idx + 1;
        let cells = tokenize_line(line);

        match parse_row(&cells, &columns, &existing_keys, &seen) {
            Ok((draft, notes)) => {
                messages.extend(notes.into_iter().map(|n| BulkMessage::row_info(row, n)));
                seen.insert(dedup_key(&draft.text), row);
                items.push(BulkParseItem { row, draft });
            }
            Err(rejection) => messages.push(BulkMessage::row_error(row, rejection.to_string())),
        }
    }

    if !items.is_empty() {
        messages.push(BulkMessage::info(format!(
            "{} question(s) ready to import",
            items.len()
        )));
    }

    BulkParseOutcome {
        items,
        messages,
        header_detected,
    }
}

/// 解析并校验单行
///
/// 成功时返回草稿和该行的提示信息
fn parse_row(
    cells: &[String],
    columns: &ColumnMap,
    existing: &HashSet<String>,
    seen: &HashMap<String, usize>,
) -> Result<(QuestionDraft, Vec<String>), RowRejection> {
    let text = columns
        .cell(cells, Column::Question)
        .filter(|t| !t.is_empty())
        .ok_or(RowRejection::MissingText)?;

    let key = dedup_key(text);
    if existing.contains(&key) {
        return Err(RowRejection::DuplicateOfExisting);
    }
    if let Some(&first_row) = seen.get(&key) {
        return Err(RowRejection::DuplicateOfRow(first_row));
    }

    let format = normalize_format(columns.cell(cells, Column::Format).unwrap_or_default());
    let required = parse_required(columns.cell(cells, Column::Required));
    let question_type = columns.cell(cells, Column::Type).unwrap_or_default();
    let options_cell = columns.cell(cells, Column::Options).unwrap_or_default();

    let mut notes = Vec::new();
    let options = match format {
        QuestionFormat::MultipleChoice => {
            let texts = split_options(options_cell);
            if texts.len() < MIN_OPTIONS {
                return Err(RowRejection::NotEnoughOptions(texts.len()));
            }
            texts.into_iter().map(QuestionOption::new).collect()
        }
        QuestionFormat::Text => {
            if !options_cell.is_empty() {
                notes.push("options ignored for a text question".to_string());
            }
            Vec::new()
        }
    };

    let draft = QuestionDraft {
        text: text.to_string(),
        question_type: question_type.to_string(),
        format,
        required,
        options,
    };
    debug_assert!(draft.is_consistent(), "草稿与格式不一致: {:?}", draft);

    Ok((draft, notes))
}
