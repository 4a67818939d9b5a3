//! 导入辅助：CSV 模板与 AI 提示词模板

use crate::import::columns::Column;
use crate::models::TargetRole;

/// 模板使用的列顺序
const TEMPLATE_COLUMNS: [Column; 5] = [
    Column::Format,
    Column::Question,
    Column::Type,
    Column::Options,
    Column::Required,
];

/// 可下载的 CSV 模板：表头 + 两行示例
pub fn csv_template() -> String {
    let header = TEMPLATE_COLUMNS
        .iter()
        .map(|c| c.header_name())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{}\n{}\n{}\n",
        header,
        r#"text,"Tell us about a project you are proud of, and your role in it",behavioral,,true"#,
        "multiple_choice,Which language do you use most?,technical,Rust|Go|Python|Other,false",
    )
}

/// 可复制给 AI 工具的提示词，让其按导入格式生成题目
pub fn ai_prompt_template(role: &TargetRole) -> String {
    format!(
        r#"You are helping an HR team build an interview question bank for the role "{role}".
Generate 10 interview questions as CSV with exactly this header:

format,question,type,options,required

Rules:
- format is either text or multiple_choice
- wrap the question in double quotes if it contains a comma, and write a literal quote as ""
- type is a short category label such as behavioral, technical or situational
- options is only used for multiple_choice: at least 2 choices separated by |
- required is true or false
- output only the CSV, no explanations

Example:
{example}"#,
        role = role,
        example = csv_template().trim_end(),
    )
}
