use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use super::send_message::compose_prompt;
use crate::modules::chat::domain::{Message, Session, SessionId};
use crate::modules::chat::infrastructure::LLMAdapterRegistry;
use crate::modules::chat::ports::{ProviderCallFailed, SessionStore};

/// 编辑并重新生成命令
///
/// 只允许编辑会话中最后一条用户消息：截断该消息及其之后的
/// 全部内容，再以编辑后的文本重新进入发送流程
#[derive(Debug, Clone)]
pub struct EditMessageCommand {
    /// 会话 ID
    pub session_id: SessionId,
    /// 被编辑消息在序列中的下标
    pub message_index: usize,
    /// 编辑后的文本
    pub content: String,
    /// 可选的系统提示前缀
    pub system_prompt: Option<String>,
    /// 模型标识符
    pub model: String,
}

impl EditMessageCommand {
    pub fn new(
        session_id: SessionId,
        message_index: usize,
        content: impl Into<String>,
        system_prompt: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            message_index,
            content: content.into(),
            system_prompt,
            model: model.into(),
        }
    }
}

/// 编辑并重新生成响应
#[derive(Debug, Clone)]
pub struct EditMessageResponse {
    /// 变更后的完整会话
    pub session: Session,
    /// 助手回复
    pub assistant_message: Message,
}

/// 编辑并重新生成命令处理器
pub struct EditMessageHandler {
    session_store: Arc<dyn SessionStore>,
    llm_registry: Arc<LLMAdapterRegistry>,
}

impl EditMessageHandler {
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        llm_registry: Arc<LLMAdapterRegistry>,
    ) -> Self {
        Self {
            session_store,
            llm_registry,
        }
    }
}

#[async_trait]
impl CommandHandler<EditMessageCommand, EditMessageResponse> for EditMessageHandler {
    async fn handle(
        &self,
        command: EditMessageCommand,
    ) -> Result<EditMessageResponse, ApplicationError> {
        if command.content.trim().is_empty() {
            return Err(ApplicationError::ValidationError(
                "Message content cannot be empty".to_string(),
            ));
        }

        let mut session = self
            .session_store
            .get(&command.session_id)
            .await?
            .ok_or_else(|| ApplicationError::SessionNotFound(command.session_id.to_string()))?;

        // 任何变更之前先校验：编辑目标必须是最后一条用户消息，
        // 编辑更早的轮次会破坏追加顺序不变量
        if session.last_user_index() != Some(command.message_index) {
            return Err(ApplicationError::InvalidEditTarget(format!(
                "message {} is not the final user message",
                command.message_index
            )));
        }

        // 截断被编辑消息及其之后的所有消息，再追加编辑后的用户消息
        session.truncate_from(command.message_index);
        let composed = compose_prompt(command.system_prompt.as_deref(), &command.content);
        session.push_message(Message::new_user(composed));

        // 用户消息先于提供商调用持久化
        self.session_store.save(&session).await?;

        let first_exchange = session.message_count() == 1;

        let adapter = self.llm_registry.resolve(&command.model).ok_or_else(|| {
            ProviderCallFailed(format!(
                "no adapter registered for model {}",
                command.model
            ))
        })?;

        let assistant_message = adapter.complete(session.messages(), &command.model).await?;

        session.push_message(assistant_message.clone());
        if first_exchange {
            session.set_title(command.content.clone());
        }
        self.session_store.save(&session).await?;

        Ok(EditMessageResponse {
            session,
            assistant_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{MessageRole, ModelProvider};
    use crate::modules::chat::infrastructure::{InMemorySessionStore, MockLLMAdapter};

    async fn seeded_session(store: &InMemorySessionStore) -> Session {
        let mut session = Session::new(Some(Message::new_user("one")));
        session.push_message(Message::new_assistant("two"));
        session.push_message(Message::new_user("three"));
        session.push_message(Message::new_assistant("four"));
        store.save(&session).await.unwrap();
        session
    }

    fn handler_with(
        store: Arc<InMemorySessionStore>,
        adapter: MockLLMAdapter,
    ) -> EditMessageHandler {
        let mut registry = LLMAdapterRegistry::new();
        registry.register(Arc::new(adapter));
        EditMessageHandler::new(store, Arc::new(registry))
    }

    #[tokio::test]
    async fn test_edit_final_user_message() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = seeded_session(&store).await;
        let adapter = MockLLMAdapter::new(ModelProvider::Gemini).with_reply("regenerated");
        let handler = handler_with(store.clone(), adapter);

        // "three" 位于下标 2，是最后一条用户消息
        let command = EditMessageCommand::new(
            session.id().clone(),
            2,
            "three, edited",
            None,
            "gemini-2.0-flash",
        );
        let response = handler.handle(command).await.unwrap();

        // 原下标 2 及其之后的消息被移除，序列以编辑后的
        // 用户消息加一条助手回复收尾
        let messages = response.session.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role(), MessageRole::User);
        assert_eq!(messages[2].content(), "three, edited");
        assert_eq!(messages[3].role(), MessageRole::Assistant);
        assert_eq!(messages[3].content(), "regenerated");

        let saved = store.get(session.id()).await.unwrap().unwrap();
        assert_eq!(saved.message_count(), 4);
    }

    #[tokio::test]
    async fn test_edit_non_final_user_message_rejected() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = seeded_session(&store).await;
        let adapter = MockLLMAdapter::new(ModelProvider::Gemini);
        let handler = handler_with(store.clone(), adapter);

        // 下标 0 是更早的用户轮次
        let command =
            EditMessageCommand::new(session.id().clone(), 0, "rewrite", None, "gemini-2.0-flash");
        let result = handler.handle(command).await;

        assert!(matches!(result, Err(ApplicationError::InvalidEditTarget(_))));

        // 拒绝发生在任何变更之前
        let saved = store.get(session.id()).await.unwrap().unwrap();
        assert_eq!(saved.message_count(), 4);
    }

    #[tokio::test]
    async fn test_edit_assistant_message_rejected() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = seeded_session(&store).await;
        let adapter = MockLLMAdapter::new(ModelProvider::Gemini);
        let handler = handler_with(store, adapter);

        // 下标 3 是助手消息
        let command =
            EditMessageCommand::new(session.id().clone(), 3, "rewrite", None, "gemini-2.0-flash");
        let result = handler.handle(command).await;

        assert!(matches!(result, Err(ApplicationError::InvalidEditTarget(_))));
    }

    #[tokio::test]
    async fn test_edit_out_of_bounds_rejected() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = seeded_session(&store).await;
        let adapter = MockLLMAdapter::new(ModelProvider::Gemini);
        let handler = handler_with(store, adapter);

        let command =
            EditMessageCommand::new(session.id().clone(), 99, "rewrite", None, "gemini-2.0-flash");
        let result = handler.handle(command).await;

        assert!(matches!(result, Err(ApplicationError::InvalidEditTarget(_))));
    }

    #[tokio::test]
    async fn test_edit_failure_keeps_truncated_user_message() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = seeded_session(&store).await;
        let adapter = MockLLMAdapter::new(ModelProvider::Gemini).with_failure("unavailable");
        let handler = handler_with(store.clone(), adapter);

        let command = EditMessageCommand::new(
            session.id().clone(),
            2,
            "three, edited",
            None,
            "gemini-2.0-flash",
        );
        let result = handler.handle(command).await;

        assert!(matches!(result, Err(ApplicationError::Provider(_))));

        // 编辑后的用户消息已落盘，失败不回滚
        let saved = store.get(session.id()).await.unwrap().unwrap();
        assert_eq!(saved.message_count(), 3);
        assert_eq!(saved.messages()[2].content(), "three, edited");
    }
}
