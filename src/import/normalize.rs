//! 单元格取值的归一化

use crate::models::QuestionFormat;

/// 视为"否"的取值；其余（包括空值）一律视为必答
const FALSEY_TOKENS: &[&str] = &["0", "false", "no", "n", "không", "khong", "ko"];

/// 视为选择题的精确取值
const MULTIPLE_CHOICE_TOKENS: &[&str] = &[
    "multiple_choice",
    "multiple-choice",
    "multiple choice",
    "mcq",
    "trắc nghiệm",
    "trac nghiem",
];

/// 解析格式单元格
///
/// 无法识别的取值（包括空值）默认为文本题。
pub fn normalize_format(cell: &str) -> QuestionFormat {
    let value = cell.trim().to_lowercase();
    let is_multiple = MULTIPLE_CHOICE_TOKENS.contains(&value.as_str())
        || value.contains("multiple")
        || value.contains("trắc nghiệm")
        || value.contains("trac nghiem");

    if is_multiple {
        QuestionFormat::MultipleChoice
    } else {
        QuestionFormat::Text
    }
}

/// 是否为格式列的精确取值（`text` 或选择题写法）
///
/// 表头识别用：这类单元格出现在首列时，该行更可能是默认顺序的数据行
pub fn is_format_value(cell: &str) -> bool {
    let value = cell.trim().to_lowercase();
    value == QuestionFormat::Text.as_str() || MULTIPLE_CHOICE_TOKENS.contains(&value.as_str())
}

/// 解析必答单元格；缺省为 true
pub fn parse_required(cell: Option<&str>) -> bool {
    match cell {
        Some(value) => !FALSEY_TOKENS.contains(&value.trim().to_lowercase().as_str()),
        None => true,
    }
}

/// 拆分选项单元格：按 `|` 切分，去空白，丢弃空项
pub fn split_options(cell: &str) -> Vec<String> {
    cell.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 重复检测用的归一化键
pub fn dedup_key(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_variants() {
        for raw in [
            "multiple_choice",
            "Multiple-Choice",
            "MCQ",
            "multiple answers",
            "Trắc nghiệm",
            "trac nghiem",
        ] {
            assert_eq!(normalize_format(raw), QuestionFormat::MultipleChoice, "{raw}");
        }
        for raw in ["text", "", "essay", "open"] {
            assert_eq!(normalize_format(raw), QuestionFormat::Text, "{raw}");
        }
    }

    #[test]
    fn test_format_values() {
        assert!(is_format_value(" Text "));
        assert!(is_format_value("MCQ"));
        assert!(!is_format_value("format"));
        assert!(!is_format_value("multiple answers"));
    }

    #[test]
    fn test_required_default_true() {
        assert!(parse_required(None));
        assert!(parse_required(Some("")));
        assert!(parse_required(Some("yes")));
        assert!(parse_required(Some("maybe")));
        for raw in ["0", "FALSE", "No", "n", "Không", "khong", " ko "] {
            assert!(!parse_required(Some(raw)), "{raw}");
        }
    }

    #[test]
    fn test_split_options_drops_empties() {
        assert_eq!(split_options(" A | | B|"), vec!["A", "B"]);
        assert!(split_options("").is_empty());
    }
}
