use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::modules::chat::domain::{Message, ModelProvider};
use crate::modules::chat::ports::{LLMPort, ProviderCallFailed};

/// 固定采样温度
const TEMPERATURE: f64 = 0.7;
/// 固定输出长度上限
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Gemini API 适配器
///
/// 历史分帧：序列中除最后一条外均作为对话历史，
/// 最后一条作为待回答的新轮次发送
pub struct GeminiAdapter {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiAdapter {
    /// 创建新的 Gemini 适配器
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// 覆盖 API 地址（测试用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 转换为 Gemini 请求格式
    ///
    /// assistant 角色重命名为 model，其余角色映射为 user
    fn to_request(messages: &[Message]) -> Result<GeminiRequest, ProviderCallFailed> {
        let (last, history) = messages
            .split_last()
            .ok_or_else(|| ProviderCallFailed("messages must not be empty".to_string()))?;

        let mut contents: Vec<GeminiContent> = history
            .iter()
            .map(|m| GeminiContent {
                role: m.role().to_gemini_role().to_string(),
                parts: vec![GeminiPart {
                    text: m.content().to_string(),
                }],
            })
            .collect();

        // 最后一条作为新的用户轮次
        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: last.content().to_string(),
            }],
        });

        Ok(GeminiRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        })
    }
}

#[async_trait]
impl LLMPort for GeminiAdapter {
    fn provider(&self) -> ModelProvider {
        ModelProvider::Gemini
    }

    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
    ) -> Result<Message, ProviderCallFailed> {
        let request = Self::to_request(messages)?;

        debug!("Sending Gemini completion request: {}", model);

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderCallFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(ProviderCallFailed(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderCallFailed(e.to_string()))?;

        let content = body
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(Message::new_assistant(content))
    }
}

// Gemini API 类型定义

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_history_framing() {
        let messages = vec![
            Message::new_user("Hello"),
            Message::new_assistant("Hi there"),
            Message::new_user("How are you?"),
        ];
        let request = GeminiAdapter::to_request(&messages).unwrap();

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[1].role, "model");
        assert_eq!(request.contents[2].role, "user");
        assert_eq!(request.contents[2].parts[0].text, "How are you?");
    }

    #[test]
    fn test_empty_messages_rejected() {
        let err = GeminiAdapter::to_request(&[]).unwrap_err();
        assert!(err.0.contains("must not be empty"));
    }

    #[test]
    fn test_generation_config_serialization() {
        let request = GeminiAdapter::to_request(&[Message::new_user("Hi")]).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["generationConfig"]["temperature"], 0.7);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "I'm fine" }] }
                }]
            })))
            .mount(&server)
            .await;

        let adapter = GeminiAdapter::new("test-key").with_base_url(server.uri());
        let reply = adapter
            .complete(&[Message::new_user("How are you?")], "gemini-2.0-flash")
            .await
            .unwrap();

        assert_eq!(reply.content(), "I'm fine");
    }

    #[tokio::test]
    async fn test_no_candidates_becomes_empty_string() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let adapter = GeminiAdapter::new("test-key").with_base_url(server.uri());
        let reply = adapter
            .complete(&[Message::new_user("Hi")], "gemini-2.0-flash")
            .await
            .unwrap();

        assert_eq!(reply.content(), "");
    }

    #[tokio::test]
    async fn test_api_error_message_passes_through() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("API key not valid"),
            )
            .mount(&server)
            .await;

        let adapter = GeminiAdapter::new("bad-key").with_base_url(server.uri());
        let err = adapter
            .complete(&[Message::new_user("Hi")], "gemini-2.0-flash")
            .await
            .unwrap_err();

        assert!(err.0.contains("API key not valid"));
    }
}
