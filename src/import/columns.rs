//! 表头识别与列映射

use phf::phf_map;

use crate::import::normalize::is_format_value;

/// 可识别的列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// 题目格式（text / multiple_choice）
    Format,
    /// 题干
    Question,
    /// 题目类型/分类
    Type,
    /// 选项（`|` 分隔）
    Options,
    /// 是否必答
    Required,
}

/// 小写表头文本 → 列
static HEADER_NAMES: phf::Map<&'static str, Column> = phf_map! {
    "format" => Column::Format,
    "question" => Column::Question,
    "text" => Column::Question,
    "type" => Column::Type,
    "options" => Column::Options,
    "choices" => Column::Options,
    "required" => Column::Required,
};

/// 无表头时的默认列顺序
pub const DEFAULT_ORDER: [Column; 4] = [
    Column::Format,
    Column::Question,
    Column::Options,
    Column::Required,
];

impl Column {
    /// 从表头单元格解析（忽略大小写和首尾空白）
    pub fn from_header(cell: &str) -> Option<Self> {
        HEADER_NAMES.get(cell.trim().to_lowercase().as_str()).copied()
    }

    /// 模板中使用的标准表头名
    pub fn header_name(self) -> &'static str {
        match self {
            Column::Format => "format",
            Column::Question => "question",
            Column::Type => "type",
            Column::Options => "options",
            Column::Required => "required",
        }
    }
}

/// 列 → 单元格下标
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    format: Option<usize>,
    question: Option<usize>,
    question_type: Option<usize>,
    options: Option<usize>,
    required: Option<usize>,
}

/// 表头识别结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub map: ColumnMap,
    /// 无法识别的表头单元格
    pub ignored: Vec<String>,
}

impl ColumnMap {
    /// 默认列顺序 `[format, question, options, required]`
    pub fn positional() -> Self {
        let mut map = Self::default();
        for (idx, column) in DEFAULT_ORDER.iter().enumerate() {
            map.assign(*column, idx);
        }
        map
    }

    /// 尝试把一行单元格识别为表头
    ///
    /// 任一单元格是已知表头名即视为表头，未知列记入 `ignored`。
    /// 首列是格式取值（`text`、`mcq` 等）时，只有其余单元格全部是已知表头名才算表头：
    /// `text,options,required` 是表头，`text,Required,,` 按默认顺序作为数据行。
    /// 同名列以第一次出现为准。
    pub fn detect_header(cells: &[String]) -> Option<HeaderMatch> {
        if !looks_like_header(cells) {
            return None;
        }

        let mut map = Self::default();
        let mut ignored = Vec::new();

        for (idx, cell) in cells.iter().enumerate() {
            match Column::from_header(cell) {
                Some(column) => {
                    if map.index_of(column).is_none() {
                        map.assign(column, idx);
                    }
                }
                None if !cell.trim().is_empty() => ignored.push(cell.trim().to_string()),
                None => {}
            }
        }

        Some(HeaderMatch { map, ignored })
    }

    pub fn index_of(&self, column: Column) -> Option<usize> {
        match column {
            Column::Format => self.format,
            Column::Question => self.question,
            Column::Type => self.question_type,
            Column::Options => self.options,
            Column::Required => self.required,
        }
    }

    pub fn has(&self, column: Column) -> bool {
        self.index_of(column).is_some()
    }

    /// 取出某列的单元格（已去除首尾空白）；列不存在或越界返回 None
    pub fn cell<'a>(&self, cells: &'a [String], column: Column) -> Option<&'a str> {
        self.index_of(column)
            .and_then(|idx| cells.get(idx))
            .map(|s| s.trim())
    }

    fn assign(&mut self, column: Column, idx: usize) {
        let slot = match column {
            Column::Format => &mut self.format,
            Column::Question => &mut self.question,
            Column::Type => &mut self.question_type,
            Column::Options => &mut self.options,
            Column::Required => &mut self.required,
        };
        *slot = Some(idx);
    }
}

fn looks_like_header(cells: &[String]) -> bool {
    let Some((first, rest)) = cells.split_first() else {
        return false;
    };

    if is_format_value(first) {
        return Column::from_header(first).is_some()
            && !rest.is_empty()
            && rest.iter().all(|c| Column::from_header(c).is_some());
    }

    cells.iter().any(|c| Column::from_header(c).is_some())
}
