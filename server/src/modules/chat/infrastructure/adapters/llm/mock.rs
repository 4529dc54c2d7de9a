use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::modules::chat::domain::{Message, ModelProvider};
use crate::modules::chat::ports::{LLMPort, ProviderCallFailed};

/// 脚本化的单次响应
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Mock LLM 适配器
///
/// 按脚本顺序返回预设响应，脚本耗尽后返回默认回复；
/// 供编排器测试和无凭据环境下的本地试用
pub struct MockLLMAdapter {
    provider: ModelProvider,
    script: Mutex<VecDeque<Scripted>>,
    default_reply: String,
}

impl MockLLMAdapter {
    pub fn new(provider: ModelProvider) -> Self {
        Self {
            provider,
            script: Mutex::new(VecDeque::new()),
            default_reply: "mock reply".to_string(),
        }
    }

    /// 追加一条脚本化回复
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Reply(content.into()));
        self
    }

    /// 追加一次脚本化失败
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.into()));
        self
    }
}

#[async_trait]
impl LLMPort for MockLLMAdapter {
    fn provider(&self) -> ModelProvider {
        self.provider
    }

    async fn complete(
        &self,
        _messages: &[Message],
        _model: &str,
    ) -> Result<Message, ProviderCallFailed> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(content)) => Ok(Message::new_assistant(content)),
            Some(Scripted::Fail(message)) => Err(ProviderCallFailed(message)),
            None => Ok(Message::new_assistant(self.default_reply.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let adapter = MockLLMAdapter::new(ModelProvider::Gemini)
            .with_reply("first")
            .with_failure("boom")
            .with_reply("third");

        let messages = [Message::new_user("hi")];

        assert_eq!(
            adapter.complete(&messages, "m").await.unwrap().content(),
            "first"
        );
        assert_eq!(adapter.complete(&messages, "m").await.unwrap_err().0, "boom");
        assert_eq!(
            adapter.complete(&messages, "m").await.unwrap().content(),
            "third"
        );
        // 脚本耗尽后回落到默认回复
        assert_eq!(
            adapter.complete(&messages, "m").await.unwrap().content(),
            "mock reply"
        );
    }
}
