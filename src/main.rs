use anyhow::Result;
use question_bulk_import::import::{ai_prompt_template, csv_template};
use question_bulk_import::models::TargetRole;
use question_bulk_import::utils::logging;
use question_bulk_import::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 只输出导入辅助模板
    if let Ok(kind) = std::env::var("PRINT_TEMPLATE") {
        return print_template(&kind, &config);
    }

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}

fn print_template(kind: &str, config: &Config) -> Result<()> {
    match kind {
        "csv" => print!("{}", csv_template()),
        "prompt" => {
            let role = TargetRole::new(&config.target_role)
                .ok_or_else(|| anyhow::anyhow!("PRINT_TEMPLATE=prompt 需要设置 TARGET_ROLE"))?;
            println!("{}", ai_prompt_template(&role));
        }
        other => anyhow::bail!("未知的模板类型: {}（可选 csv / prompt）", other),
    }
    Ok(())
}
