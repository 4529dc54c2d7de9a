use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::modules::chat::domain::{Message, ModelProvider};
use crate::modules::chat::ports::{LLMPort, ProviderCallFailed};

/// 固定采样温度
const TEMPERATURE: f32 = 0.7;
/// 固定输出长度上限
const MAX_TOKENS: u32 = 2048;

/// 不接受采样/长度参数的模型变体（按标识符精确匹配）
///
/// 对这些模型必须整体省略参数而非发送默认值，否则调用会失败
const FIXED_PARAMETER_MODELS: &[&str] = &["gpt-5", "gpt-5-mini", "gpt-5-nano"];

/// OpenAI API 适配器
pub struct OpenAIAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIAdapter {
    /// 创建新的 OpenAI 适配器
    ///
    /// 凭据缺失不做前置校验：首次调用会以提供商的认证错误失败
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// 覆盖 API 地址（测试用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 转换为 OpenAI 请求格式
    fn to_request(messages: &[Message], model: &str) -> OpenAIRequest {
        let fixed = FIXED_PARAMETER_MODELS.contains(&model);

        OpenAIRequest {
            model: model.to_string(),
            messages: messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role().to_openai_role().to_string(),
                    content: m.content().to_string(),
                })
                .collect(),
            temperature: if fixed { None } else { Some(TEMPERATURE) },
            max_tokens: if fixed { None } else { Some(MAX_TOKENS) },
        }
    }
}

#[async_trait]
impl LLMPort for OpenAIAdapter {
    fn provider(&self) -> ModelProvider {
        ModelProvider::OpenAI
    }

    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
    ) -> Result<Message, ProviderCallFailed> {
        let request = Self::to_request(messages, model);

        debug!("Sending OpenAI completion request: {}", model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderCallFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API error: {} - {}", status, error_text);
            return Err(ProviderCallFailed(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        let body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ProviderCallFailed(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(Message::new_assistant(content))
    }
}

// OpenAI API 类型定义

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}
