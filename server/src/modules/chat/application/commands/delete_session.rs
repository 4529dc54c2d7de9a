use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::SessionId;
use crate::modules::chat::ports::SessionStore;

/// 删除会话命令
#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub session_id: SessionId,
}

impl DeleteSessionCommand {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }
}

/// 删除会话命令处理器
///
/// 删除不存在的 ID 同样返回成功——UI 可能在重新拉取前重复触发删除
pub struct DeleteSessionHandler {
    session_store: Arc<dyn SessionStore>,
}

impl DeleteSessionHandler {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }
}

#[async_trait]
impl CommandHandler<DeleteSessionCommand, ()> for DeleteSessionHandler {
    async fn handle(&self, command: DeleteSessionCommand) -> Result<(), ApplicationError> {
        self.session_store.delete(&command.session_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{Message, Session};
    use crate::modules::chat::infrastructure::InMemorySessionStore;

    #[tokio::test]
    async fn test_delete_existing_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = DeleteSessionHandler::new(store.clone());

        let session = Session::new(Some(Message::new_user("bye")));
        let id = session.id().clone();
        store.save(&session).await.unwrap();

        handler.handle(DeleteSessionCommand::new(id.clone())).await.unwrap();

        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_success_and_store_unchanged() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = DeleteSessionHandler::new(store.clone());

        let session = Session::new(None);
        store.save(&session).await.unwrap();

        handler
            .handle(DeleteSessionCommand::new(SessionId::from("no_such_id")))
            .await
            .unwrap();

        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
