//! CSV 单行切分
//!
//! 只处理一行文本，不关心表头和字段含义。引号不匹配时尽力恢复，从不报错。

/// 将一行文本切分为单元格
///
/// - 引号外的 `,` 结束当前单元格
/// - 引号内的 `""` 表示一个字面量 `"`
/// - 单元格结束后去除首尾空白，并剥掉残留的一对包围引号
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(finish_cell(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(finish_cell(&mut current));

    cells
}

fn finish_cell(current: &mut String) -> String {
    let cell = std::mem::take(current);
    let trimmed = cell.trim();
    let unquoted = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unquoted.to_string()
}

/// 将单元格转义为 CSV 字段（与 `tokenize_line` 互逆）
///
/// 首尾都是 `"` 的内容会多包一层引号，抵消 `finish_cell` 的剥除。
pub fn escape_cell(cell: &str) -> String {
    if cell.starts_with('"') && cell.ends_with('"') {
        let wrapped = format!("\"{}\"", cell);
        format!("\"{}\"", wrapped.replace('"', "\"\""))
    } else if cell.contains([',', '"', '\n']) || cell.trim() != cell {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cells() {
        assert_eq!(tokenize_line("a, b ,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_cell_with_comma() {
        let cells = tokenize_line(r#"text,"quoted, text",,true"#);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], "quoted, text");
        assert_eq!(cells[2], "");
        assert_eq!(cells[3], "true");
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        let cells = tokenize_line(r#"text,"say ""hi"", then leave",,true"#);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], r#"say "hi", then leave"#);
    }

    #[test]
    fn test_unterminated_quote_recovers() {
        // 引号未闭合：剩余内容全部归入最后一个单元格
        let cells = tokenize_line(r#"a,"b,c"#);
        assert_eq!(cells, vec!["a", "b,c"]);
    }

    #[test]
    fn test_empty_line_yields_single_empty_cell() {
        assert_eq!(tokenize_line(""), vec![""]);
        assert_eq!(tokenize_line(",,"), vec!["", "", ""]);
    }

    #[test]
    fn test_escape_cell_is_read_back() {
        for raw in [
            "plain",
            "a, b",
            r#"he said "no""#,
            "A|B|C",
            "\"Hello\"",
            "\"",
            "\"open only",
        ] {
            let line = format!("x,{}", escape_cell(raw));
            assert_eq!(tokenize_line(&line)[1], raw, "{line}");
        }
    }
}
