//! 题库 REST 客户端
//!
//! 封装所有与后端题库 API 相关的调用逻辑（Supabase 风格 REST 接口）
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::clients::QuestionStore;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::{Question, QuestionDraft, QuestionFormat, QuestionOption, TargetRole};

const QUESTIONS_ENDPOINT: &str = "/rest/v1/questions";

/// 创建题目的请求体
#[derive(Debug, Serialize)]
struct CreateQuestionBody<'a> {
    text: &'a str,
    #[serde(rename = "type")]
    question_type: &'a str,
    format: QuestionFormat,
    required: bool,
    options: &'a [QuestionOption],
    target_role: &'a str,
}

impl<'a> CreateQuestionBody<'a> {
    fn new(draft: &'a QuestionDraft, role: &'a TargetRole) -> Self {
        Self {
            text: &draft.text,
            question_type: &draft.question_type,
            format: draft.format,
            required: draft.required,
            options: &draft.options,
            target_role: role.as_str(),
        }
    }
}

/// 题库 REST 客户端
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    token: String,
    api_key: String,
}

impl SupabaseClient {
    /// 创建新的题库客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        if config.api_base_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "api_base_url".to_string(),
            }
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 附加认证请求头
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header("Accept", "application/json")
            .bearer_auth(&self.token);
        if self.api_key.is_empty() {
            request
        } else {
            request.header("apikey", &self.api_key)
        }
    }

    /// 创建题目
    ///
    /// # 参数
    /// - `draft`: 题目草稿
    /// - `role`: 目标岗位
    ///
    /// # 返回
    /// 返回后端保存后的题目
    pub async fn create(&self, draft: &QuestionDraft, role: &TargetRole) -> AppResult<Question> {
        let body = CreateQuestionBody::new(draft, role);
        debug!("保存题目 Payload: {}", serde_json::to_string(&body)?);

        let request = self
            .client
            .post(self.url(QUESTIONS_ENDPOINT))
            .header("Prefer", "return=representation")
            .json(&body);

        let rows: Vec<Question> = self.send(QUESTIONS_ENDPOINT, request).await?;

        rows.into_iter().next().ok_or_else(|| {
            AppError::Api(ApiError::EmptyResponse {
                endpoint: QUESTIONS_ENDPOINT.to_string(),
            })
        })
    }

    /// 列出目标岗位下的题目
    pub async fn list(&self, role: &TargetRole) -> AppResult<Vec<Question>> {
        let request = self.client.get(self.url(QUESTIONS_ENDPOINT)).query(&[
            ("target_role", format!("eq.{}", role.as_str())),
            ("select", "*".to_string()),
        ]);

        let rows: Vec<Question> = self.send(QUESTIONS_ENDPOINT, request).await?;
        debug!("岗位 {} 已有 {} 道题目", role, rows.len());
        Ok(rows)
    }

    /// 发送请求并解析 JSON 响应
    async fn send<T: serde::de::DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        debug!("{} 响应状态: {}", endpoint, status);

        if !status.is_success() {
            return Err(AppError::bad_response(
                endpoint,
                status.as_u16(),
                Self::error_message(status, &text),
            ));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// 从错误响应中提取可读信息
    fn error_message(status: StatusCode, body: &str) -> Option<String> {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        parsed
            .as_ref()
            .and_then(|v| v.get("message").or_else(|| v.get("error")))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .or_else(|| status.canonical_reason().map(str::to_string))
    }
}

impl QuestionStore for SupabaseClient {
    fn create_question<'a>(
        &'a self,
        draft: &'a QuestionDraft,
        role: &'a TargetRole,
    ) -> BoxFuture<'a, AppResult<Question>> {
        self.create(draft, role).boxed()
    }

    fn list_questions<'a>(&'a self, role: &'a TargetRole) -> BoxFuture<'a, AppResult<Vec<Question>>> {
        self.list(role).boxed()
    }
}
