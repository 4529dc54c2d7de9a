use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Message, Session};
use crate::modules::chat::ports::SessionStore;

/// 创建会话命令
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    /// 首条消息（可选），存在时标题取其内容前 50 个字符
    pub first_message: Option<Message>,
}

impl CreateSessionCommand {
    pub fn new(first_message: Option<Message>) -> Self {
        Self { first_message }
    }
}

/// 创建会话命令响应
#[derive(Debug, Clone)]
pub struct CreateSessionResponse {
    pub session: Session,
}

/// 创建会话命令处理器
pub struct CreateSessionHandler {
    session_store: Arc<dyn SessionStore>,
}

impl CreateSessionHandler {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }
}

#[async_trait]
impl CommandHandler<CreateSessionCommand, CreateSessionResponse> for CreateSessionHandler {
    async fn handle(
        &self,
        command: CreateSessionCommand,
    ) -> Result<CreateSessionResponse, ApplicationError> {
        let session = Session::new(command.first_message);

        self.session_store.save(&session).await?;

        Ok(CreateSessionResponse { session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::infrastructure::InMemorySessionStore;

    #[tokio::test]
    async fn test_create_empty_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CreateSessionHandler::new(store.clone());

        let response = handler.handle(CreateSessionCommand::new(None)).await.unwrap();

        assert_eq!(response.session.title(), "New Chat");
        assert!(store.get(response.session.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_session_with_first_message() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = CreateSessionHandler::new(store);

        let command = CreateSessionCommand::new(Some(Message::new_user("Hello")));
        let response = handler.handle(command).await.unwrap();

        assert_eq!(response.session.title(), "Hello");
        assert_eq!(response.session.message_count(), 1);
    }
}
