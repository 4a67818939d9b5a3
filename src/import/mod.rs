//! 解析层（Import）
//!
//! 纯数据转换，不做任何 I/O：
//!
//! - `tokenizer` - 单行 CSV 切分
//! - `columns` - 表头识别与列映射
//! - `normalize` - 格式 / 必答 / 选项单元格的归一化
//! - `parser` - 逐行校验，产出题目草稿和诊断消息
//! - `template` - CSV 模板与 AI 提示词模板

pub mod columns;
pub mod normalize;
pub mod parser;
pub mod template;
pub mod tokenizer;

pub use columns::{Column, ColumnMap};
pub use parser::{parse_bulk, BulkParseOutcome, MIN_OPTIONS};
pub use template::{ai_prompt_template, csv_template};
pub use tokenizer::{escape_cell, tokenize_line};
