use serde::Deserialize;
use std::path::Path;

use crate::error::{AppError, AppResult, ConfigError, FileError};

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- 题库 API 配置 ---
    /// 后端 REST 地址（Supabase 项目地址）
    pub api_base_url: String,
    /// 登录后保存的 Bearer Token
    pub api_token: String,
    /// 项目匿名 key（`apikey` 请求头）
    pub api_key: String,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 导入配置 ---
    /// 目标岗位
    pub target_role: String,
    /// 待导入的 CSV / TXT 文件
    pub input_file: String,
    /// 提交失败的题目写回的文件
    pub retry_file: String,
    /// 只解析预览，不提交
    pub dry_run: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:54321".to_string(),
            api_token: String::new(),
            api_key: String::new(),
            request_timeout_secs: 30,
            target_role: String::new(),
            input_file: "questions.csv".to_string(),
            retry_file: "questions.retry.csv".to_string(),
            dry_run: false,
            verbose_logging: false,
            output_log_file: "import_log.txt".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：默认值 ← `CONFIG_FILE` 指定的 TOML 文件 ← 环境变量
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.merge_env()
    }

    /// 仅从环境变量加载（未设置的项使用默认值）
    pub fn from_env() -> AppResult<Self> {
        Self::default().merge_env()
    }

    /// 从 TOML 文件加载
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AppError::File(FileError::TomlParseFailed { source, .. }) => {
                AppError::File(FileError::TomlParseFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    fn merge_env(self) -> AppResult<Self> {
        Ok(Self {
            api_base_url: env_string("API_BASE_URL").unwrap_or(self.api_base_url),
            api_token: env_string("API_TOKEN").unwrap_or(self.api_token),
            api_key: env_string("API_KEY").unwrap_or(self.api_key),
            request_timeout_secs: env_parsed("REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.request_timeout_secs),
            target_role: env_string("TARGET_ROLE").unwrap_or(self.target_role),
            input_file: env_string("INPUT_FILE").unwrap_or(self.input_file),
            retry_file: env_string("RETRY_FILE").unwrap_or(self.retry_file),
            dry_run: env_parsed("DRY_RUN", "bool")?.unwrap_or(self.dry_run),
            verbose_logging: env_parsed("VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
            output_log_file: env_string("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        })
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_parsed<T: std::str::FromStr>(name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_partial_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://example.supabase.co"
            target_role = "backend"
            dry_run = true
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://example.supabase.co");
        assert_eq!(config.target_role, "backend");
        assert!(config.dry_run);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.retry_file, "questions.retry.csv");
    }

    #[test]
    fn test_invalid_toml_is_file_error() {
        let err = Config::from_toml_str("dry_run = \"maybe\"").unwrap_err();
        assert!(matches!(err, AppError::File(FileError::TomlParseFailed { .. })));
    }

    #[test]
    fn test_env_parse_failure() {
        std::env::set_var("QBI_TEST_TIMEOUT", "soon");
        let err = env_parsed::<u64>("QBI_TEST_TIMEOUT", "u64").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::EnvVarParseFailed { .. })
        ));
        std::env::remove_var("QBI_TEST_TIMEOUT");
    }
}
